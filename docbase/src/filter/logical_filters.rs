use crate::common::Document;
use crate::errors::DocbaseResult;
use crate::filter::{Filter, FilterProvider};
use itertools::Itertools;
use std::any::Any;
use std::fmt::{Display, Formatter};

/// A filter matching documents that satisfy every child filter.
///
/// Evaluation short-circuits on the first non-match.
pub struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().map(|x| x.to_string()).join(" && "))
    }
}

impl FilterProvider for AndFilter {
    fn apply(&self, entry: &Document) -> DocbaseResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter matching documents that satisfy at least one child filter.
///
/// Evaluation short-circuits on the first match.
pub struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().map(|x| x.to_string()).join(" || "))
    }
}

impl FilterProvider for OrFilter {
    fn apply(&self, entry: &Document) -> DocbaseResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter inverting the match result of its child filter.
pub struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    pub fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "!({})", self.filter)
    }
}

impl FilterProvider for NotFilter {
    fn apply(&self, entry: &Document) -> DocbaseResult<bool> {
        Ok(!self.filter.apply(entry)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::field;

    #[test]
    fn and_requires_all() {
        let doc = doc! { "a": 1i32, "b": 2i32 };
        let both = Filter::new(AndFilter::new(vec![
            field("a").eq(1i32),
            field("b").eq(2i32),
        ]));
        assert!(both.apply(&doc).unwrap());

        let one = Filter::new(AndFilter::new(vec![
            field("a").eq(1i32),
            field("b").eq(9i32),
        ]));
        assert!(!one.apply(&doc).unwrap());
    }

    #[test]
    fn or_requires_any() {
        let doc = doc! { "a": 1i32 };
        let either = Filter::new(OrFilter::new(vec![
            field("a").eq(9i32),
            field("a").eq(1i32),
        ]));
        assert!(either.apply(&doc).unwrap());

        let neither = Filter::new(OrFilter::new(vec![
            field("a").eq(8i32),
            field("a").eq(9i32),
        ]));
        assert!(!neither.apply(&doc).unwrap());
    }

    #[test]
    fn empty_and_matches_empty_or_does_not() {
        let doc = doc! { "a": 1i32 };
        assert!(Filter::new(AndFilter::new(vec![])).apply(&doc).unwrap());
        assert!(!Filter::new(OrFilter::new(vec![])).apply(&doc).unwrap());
    }

    #[test]
    fn not_inverts() {
        let doc = doc! { "a": 1i32 };
        let filter = Filter::new(NotFilter::new(field("a").eq(1i32)));
        assert!(!filter.apply(&doc).unwrap());
        let filter = Filter::new(NotFilter::new(field("a").eq(2i32)));
        assert!(filter.apply(&doc).unwrap());
    }

    #[test]
    fn display_formats() {
        let filter = Filter::new(AndFilter::new(vec![
            field("a").eq(1i32),
            field("b").eq(2i32),
        ]));
        assert_eq!(format!("{}", filter), "((a == 1) && (b == 2))");
    }
}
