use crate::common::{Document, Value};
use crate::errors::DocbaseResult;
use crate::filter::FilterProvider;
use std::any::Any;
use std::fmt::{Display, Formatter};

/// A filter that matches every document.
pub struct AllFilter;

impl Display for AllFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(all)")
    }
}

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> DocbaseResult<bool> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter matching documents where a field equals a value.
///
/// An absent field reads as [Value::Null], so `eq(Null)` matches documents
/// that do not carry the field at all.
pub struct EqualsFilter {
    field_name: String,
    value: Value,
}

impl EqualsFilter {
    pub fn new(field_name: String, value: Value) -> Self {
        EqualsFilter { field_name, value }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.value)
    }
}

impl FilterProvider for EqualsFilter {
    fn apply(&self, entry: &Document) -> DocbaseResult<bool> {
        Ok(entry.get(&self.field_name) == self.value)
    }

    #[inline]
    fn has_field(&self) -> bool {
        true
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field_name.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter matching documents where a field does not equal a value.
pub struct NotEqualsFilter {
    field_name: String,
    value: Value,
}

impl NotEqualsFilter {
    pub fn new(field_name: String, value: Value) -> Self {
        NotEqualsFilter { field_name, value }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field_name, self.value)
    }
}

impl FilterProvider for NotEqualsFilter {
    fn apply(&self, entry: &Document) -> DocbaseResult<bool> {
        Ok(entry.get(&self.field_name) != self.value)
    }

    #[inline]
    fn has_field(&self) -> bool {
        true
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field_name.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Relational comparison operators for [ComparisonFilter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::Greater => write!(f, ">"),
            ComparisonMode::GreaterEqual => write!(f, ">="),
            ComparisonMode::Lesser => write!(f, "<"),
            ComparisonMode::LesserEqual => write!(f, "<="),
        }
    }
}

/// A filter matching documents by a relational comparison on a field.
///
/// Values of incomparable variants (string vs number, null, arrays,
/// documents) are unordered; the comparison then reports a non-match rather
/// than an error.
pub struct ComparisonFilter {
    field_name: String,
    value: Value,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    pub fn new(field_name: String, value: Value, mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field_name,
            value,
            mode,
        }
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.field_name, self.mode, self.value)
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &Document) -> DocbaseResult<bool> {
        let field_value = entry.get(&self.field_name);
        let matched = match field_value.partial_cmp(&self.value) {
            Some(ordering) => match self.mode {
                ComparisonMode::Greater => ordering.is_gt(),
                ComparisonMode::GreaterEqual => ordering.is_ge(),
                ComparisonMode::Lesser => ordering.is_lt(),
                ComparisonMode::LesserEqual => ordering.is_le(),
            },
            None => false,
        };
        Ok(matched)
    }

    #[inline]
    fn has_field(&self) -> bool {
        true
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field_name.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
