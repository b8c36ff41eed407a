/// Sort direction for find operations and index definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }

    /// Returns the opposite direction.
    pub fn reverse(&self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ascending() {
        assert!(SortOrder::default().is_ascending());
    }

    #[test]
    fn reverse_flips_direction() {
        assert_eq!(SortOrder::Ascending.reverse(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.reverse(), SortOrder::Ascending);
    }
}
