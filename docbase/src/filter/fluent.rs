use crate::common::Value;

use super::{ComparisonFilter, ComparisonMode, EqualsFilter, Filter, NotEqualsFilter};

/// Creates a fluent filter builder for the specified field name.
///
/// # Examples
///
/// ```rust,ignore
/// use docbase::filter::field;
///
/// let filter = field("age").gte(18).and(field("name").ne("Bob"));
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// Each method consumes the builder and returns a [Filter] ready for use with
/// find, count, and delete operations, or for composition with `and`, `or`,
/// and `not`.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Matches documents where the field equals the specified value.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field_name, value.into()))
    }

    /// Matches documents where the field does not equal the specified value.
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(NotEqualsFilter::new(self.field_name, value.into()))
    }

    /// Matches documents where the field is greater than the specified value.
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::Greater,
        ))
    }

    /// Matches documents where the field is greater than or equal to the specified value.
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::GreaterEqual,
        ))
    }

    /// Matches documents where the field is less than the specified value.
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::Lesser,
        ))
    }

    /// Matches documents where the field is less than or equal to the specified value.
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::LesserEqual,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn fluent_builds_working_filters() {
        let doc = doc! { "age": 30i64, "name": "Alice" };
        assert!(field("age").eq(30i64).apply(&doc).unwrap());
        assert!(field("age").ne(31i64).apply(&doc).unwrap());
        assert!(field("age").gt(29i64).apply(&doc).unwrap());
        assert!(field("age").gte(30i64).apply(&doc).unwrap());
        assert!(field("age").lt(31i64).apply(&doc).unwrap());
        assert!(field("age").lte(30i64).apply(&doc).unwrap());
        assert!(field("name").eq("Alice").apply(&doc).unwrap());
    }

    #[test]
    fn fluent_filters_carry_field_name() {
        let filter = field("age").gt(10i64);
        assert!(filter.has_field());
        assert_eq!(filter.field_name(), Some("age".to_string()));
    }
}
