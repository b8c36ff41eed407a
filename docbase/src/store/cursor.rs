use crate::common::{CancellationToken, Document};
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};

/// A lazy stream of documents from a store read.
///
/// Items are pulled one at a time from the underlying store iterator. When a
/// cancellation token is attached and fires, the cursor yields one
/// `OperationCancelled` error and then terminates.
pub struct DocumentCursor {
    iter: Box<dyn Iterator<Item = DocbaseResult<Document>> + Send>,
    token: Option<CancellationToken>,
    done: bool,
}

impl DocumentCursor {
    pub fn new(iter: Box<dyn Iterator<Item = DocbaseResult<Document>> + Send>) -> Self {
        DocumentCursor {
            iter,
            token: None,
            done: false,
        }
    }

    /// Creates a cursor over an already-materialized batch of documents.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        DocumentCursor::new(Box::new(documents.into_iter().map(Ok)))
    }

    /// Creates an empty cursor.
    pub fn empty() -> Self {
        DocumentCursor::from_documents(Vec::new())
    }

    /// Attaches a cancellation token checked before each item.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Consumes the cursor and returns its first document, if any.
    pub fn first(mut self) -> DocbaseResult<Option<Document>> {
        self.next().transpose()
    }
}

impl Iterator for DocumentCursor {
    type Item = DocbaseResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(token) = &self.token {
            if token.is_cancelled() {
                log::warn!("Document cursor cancelled");
                self.done = true;
                return Some(Err(DocbaseError::new(
                    "Read cancelled by cancellation token",
                    ErrorKind::OperationCancelled,
                )));
            }
        }
        match self.iter.next() {
            Some(item) => Some(item),
            None => {
                self.done = true;
                None
            }
        }
    }
}
