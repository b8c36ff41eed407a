use crate::common::{Document, Value};
use crate::ID_FIELD;
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::{AllFilter, AndFilter, EqualsFilter, NotFilter, OrFilter};
use crate::errors::DocbaseResult;

/// Trait for implementing document filters.
///
/// A `FilterProvider` decides whether a document matches a condition. All
/// evaluation happens against the document itself; there is no index-side
/// evaluation path.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Arguments
    ///
    /// * `entry` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the document matches the filter, `Ok(false)` otherwise
    fn apply(&self, entry: &Document) -> DocbaseResult<bool>;

    /// Checks if this filter operates on a specific field.
    #[inline]
    fn has_field(&self) -> bool {
        false
    }

    /// Gets the field name this filter operates on, if any.
    fn field_name(&self) -> Option<String> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// A predicate for selecting documents.
///
/// `Filter` encapsulates match logic through a provider pattern. Filters are
/// handed to find, delete, and count operations, and can be composed with
/// `and`, `or`, and `not`.
///
/// # Examples
///
/// ```rust,ignore
/// use docbase::filter::field;
///
/// let adults = field("age").gte(18);
/// let named = field("name").eq("Alice");
/// let both = adults.and(named);
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Combines this filter with another using logical OR.
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }

    /// Negates this filter using logical NOT.
    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

/// Creates a filter that matches a document by its string id.
pub fn by_id(id: &str) -> Filter {
    Filter::new(EqualsFilter::new(
        ID_FIELD.to_string(),
        Value::String(id.to_string()),
    ))
}

/// Combines multiple filters using logical AND.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Combines multiple filters using logical OR.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Negates a filter using logical NOT.
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::field;
    use std::fmt::Formatter;

    struct MockFilter;

    impl Display for MockFilter {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "MockFilter")
        }
    }

    impl FilterProvider for MockFilter {
        fn apply(&self, _entry: &Document) -> DocbaseResult<bool> {
            Ok(true)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn custom_provider_applies() {
        let filter = Filter::new(MockFilter);
        assert!(filter.apply(&Document::new()).unwrap());
        assert!(!filter.has_field());
        assert!(filter.field_name().is_none());
    }

    #[test]
    fn all_matches_everything() {
        let filter = all();
        assert!(filter.apply(&Document::new()).unwrap());
        assert!(is_all_filter(&filter));
    }

    #[test]
    fn by_id_matches_id_field() {
        let filter = by_id("67332a5e9f1b2c3d4e5f6071");
        let doc = doc! { "_id": "67332a5e9f1b2c3d4e5f6071" };
        assert!(filter.apply(&doc).unwrap());

        let other = doc! { "_id": "000000000000000000000000" };
        assert!(!filter.apply(&other).unwrap());
    }

    #[test]
    fn composition_methods() {
        let doc = doc! { "a": 1i32, "b": 2i32 };
        assert!(field("a").eq(1i32).and(field("b").eq(2i32)).apply(&doc).unwrap());
        assert!(field("a").eq(9i32).or(field("b").eq(2i32)).apply(&doc).unwrap());
        assert!(!field("a").eq(1i32).not().apply(&doc).unwrap());
    }

    #[test]
    fn free_function_composition() {
        let doc = doc! { "a": 1i32 };
        assert!(and(vec![all(), field("a").eq(1i32)]).apply(&doc).unwrap());
        assert!(or(vec![field("a").eq(2i32), all()]).apply(&doc).unwrap());
        assert!(!not(all()).apply(&doc).unwrap());
    }
}
