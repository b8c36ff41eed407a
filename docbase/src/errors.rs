use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for docbase operations.
///
/// Each kind names a category of failure so callers can branch on the cause
/// without parsing messages. Absent lookup results are not errors; they are
/// reported as `Ok(None)` or an empty cursor.
///
/// # Examples
///
/// ```rust,ignore
/// use docbase::errors::{DocbaseError, ErrorKind, DocbaseResult};
///
/// fn example() -> DocbaseResult<()> {
///     Err(DocbaseError::new("store is gone", ErrorKind::StoreUnavailable))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The backing store cannot be reached or resolved
    StoreUnavailable,
    /// A store-level operation failed; the underlying error is attached as cause
    StoreOperationFailed,
    /// Malformed caller input (connection string, options, arguments)
    InvalidArgument,
    /// An identifier does not match the entity's key format
    InvalidId,
    /// Entity to document conversion (or back) failed
    ObjectMappingError,
    /// Error during filter construction or evaluation
    FilterError,
    /// Index management failure
    IndexingError,
    /// A cancellation token fired while a read was in progress
    OperationCancelled,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::StoreUnavailable => write!(f, "Store unavailable"),
            ErrorKind::StoreOperationFailed => write!(f, "Store operation failed"),
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::IndexingError => write!(f, "Indexing error"),
            ErrorKind::OperationCancelled => write!(f, "Operation cancelled"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// The docbase error type.
///
/// `DocbaseError` carries a message, an [ErrorKind], an optional cause, and a
/// backtrace captured at construction. Store-level failures are propagated to
/// the caller unchanged through the cause chain; the facade adds no retry or
/// translation of its own.
///
/// # Examples
///
/// ```rust,ignore
/// use docbase::errors::{DocbaseError, ErrorKind};
///
/// let err = DocbaseError::new("malformed id", ErrorKind::InvalidId);
///
/// let cause = DocbaseError::new("connection reset", ErrorKind::StoreUnavailable);
/// let err = DocbaseError::new_with_cause("insert failed", ErrorKind::StoreOperationFailed, cause);
/// ```
#[derive(Clone)]
pub struct DocbaseError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocbaseError>>,
    backtrace: Arc<Backtrace>,
}

impl DocbaseError {
    /// Creates a new `DocbaseError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocbaseError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `DocbaseError` with a cause error attached.
    ///
    /// The cause is preserved for debugging; `source()` exposes it through
    /// the standard error trait.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocbaseError) -> Self {
        DocbaseError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&DocbaseError> {
        self.cause.as_deref()
    }
}

impl Display for DocbaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocbaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // message with cause chain, backtrace only at the end of the chain
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for DocbaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for docbase operations.
///
/// `DocbaseResult<T>` is shorthand for `Result<T, DocbaseError>`. All
/// fallible operations in this crate return it.
pub type DocbaseResult<T> = Result<T, DocbaseError>;

impl From<std::num::ParseIntError> for DocbaseError {
    fn from(err: std::num::ParseIntError) -> Self {
        DocbaseError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidArgument,
        )
    }
}

impl From<String> for DocbaseError {
    fn from(msg: String) -> Self {
        DocbaseError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DocbaseError {
    fn from(msg: &str) -> Self {
        DocbaseError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_error() {
        let error = DocbaseError::new("an error occurred", ErrorKind::StoreOperationFailed);
        assert_eq!(error.message(), "an error occurred");
        assert_eq!(error.kind(), &ErrorKind::StoreOperationFailed);
        assert!(error.cause().is_none());
    }

    #[test]
    fn new_with_cause_attaches_cause() {
        let cause = DocbaseError::new("connection reset", ErrorKind::StoreUnavailable);
        let error =
            DocbaseError::new_with_cause("insert failed", ErrorKind::StoreOperationFailed, cause);
        assert_eq!(error.kind(), &ErrorKind::StoreOperationFailed);
        assert!(error.cause().is_some());
        assert_eq!(error.cause().unwrap().kind(), &ErrorKind::StoreUnavailable);
    }

    #[test]
    fn display_shows_message_only() {
        let error = DocbaseError::new("an error occurred", ErrorKind::InvalidId);
        assert_eq!(format!("{}", error), "an error occurred");
    }

    #[test]
    fn debug_shows_cause_chain() {
        let cause = DocbaseError::new("root", ErrorKind::StoreUnavailable);
        let error = DocbaseError::new_with_cause("top", ErrorKind::StoreOperationFailed, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("top"));
        assert!(formatted.contains("Caused by:"));
        assert!(formatted.contains("root"));
    }

    #[test]
    fn source_returns_cause() {
        let cause = DocbaseError::new("root", ErrorKind::StoreUnavailable);
        let error = DocbaseError::new_with_cause("top", ErrorKind::StoreOperationFailed, cause);
        assert!(error.source().is_some());

        let error = DocbaseError::new("no cause", ErrorKind::InternalError);
        assert!(error.source().is_none());
    }

    #[test]
    fn from_parse_int_error() {
        let parse_err = "not_a_number".parse::<i32>().unwrap_err();
        let error: DocbaseError = parse_err.into();
        assert_eq!(error.kind(), &ErrorKind::InvalidArgument);
        assert!(error.message().contains("Integer parsing"));
    }

    #[test]
    fn from_str_and_string() {
        let error: DocbaseError = "plain message".into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
        assert_eq!(error.message(), "plain message");

        let error: DocbaseError = String::from("owned message").into();
        assert_eq!(error.message(), "owned message");
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(
            format!("{}", ErrorKind::StoreOperationFailed),
            "Store operation failed"
        );
        assert_eq!(format!("{}", ErrorKind::OperationCancelled), "Operation cancelled");
    }

    #[test]
    fn question_mark_with_from() {
        fn parse_number() -> DocbaseResult<i32> {
            let num: i32 = "123".parse()?;
            Ok(num)
        }
        assert_eq!(parse_number().unwrap(), 123);
    }
}
