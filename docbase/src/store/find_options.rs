use crate::common::SortOrder;

/// Options shaping a find operation: sort, skip, and limit.
///
/// Stores apply the parts in a fixed order: sort first, then skip, then
/// limit. An empty `FindOptions` leaves the collection order untouched and
/// returns everything.
///
/// # Examples
///
/// ```rust,ignore
/// use docbase::store::FindOptions;
/// use docbase::common::SortOrder;
///
/// let options = FindOptions::new()
///     .order_by("year", SortOrder::Descending)
///     .skip_by(20)
///     .limit_to(10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindOptions {
    skip: Option<u64>,
    limit: Option<u64>,
    sort_by: Option<(String, SortOrder)>,
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Sorts results by a field before skip and limit apply.
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort_by = Some((field.to_string(), order));
        self
    }

    /// Skips the first `skip` results.
    pub fn skip_by(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Caps the number of results.
    pub fn limit_to(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn sort_by(&self) -> Option<&(String, SortOrder)> {
        self.sort_by.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_have_no_parts() {
        let options = FindOptions::new();
        assert_eq!(options.skip(), None);
        assert_eq!(options.limit(), None);
        assert!(options.sort_by().is_none());
    }

    #[test]
    fn builder_sets_all_parts() {
        let options = FindOptions::new()
            .order_by("year", SortOrder::Descending)
            .skip_by(20)
            .limit_to(10);
        assert_eq!(options.skip(), Some(20));
        assert_eq!(options.limit(), Some(10));
        assert_eq!(
            options.sort_by(),
            Some(&("year".to_string(), SortOrder::Descending))
        );
    }
}
