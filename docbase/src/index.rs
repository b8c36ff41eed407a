use crate::common::SortOrder;
use std::fmt::{Display, Formatter};

/// Description of a single-field index on a collection.
///
/// Docbase indexes are declarative: the repository records which fields a
/// collection is indexed on and in which direction, and the store driver is
/// free to use or ignore them for query planning. Creating an index never
/// changes query results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexDescriptor {
    collection: String,
    field: String,
    order: SortOrder,
}

impl IndexDescriptor {
    pub fn new(collection: &str, field: &str, order: SortOrder) -> Self {
        IndexDescriptor {
            collection: collection.to_string(),
            field: field.to_string(),
            order,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

impl Display for IndexDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = if self.order.is_ascending() { "asc" } else { "desc" };
        write!(f, "{}({} {})", self.collection, self.field, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_accessors() {
        let index = IndexDescriptor::new("books", "title", SortOrder::Ascending);
        assert_eq!(index.collection(), "books");
        assert_eq!(index.field(), "title");
        assert_eq!(index.order(), SortOrder::Ascending);
    }

    #[test]
    fn display_includes_direction() {
        let index = IndexDescriptor::new("books", "year", SortOrder::Descending);
        assert_eq!(format!("{}", index), "books(year desc)");
    }
}
