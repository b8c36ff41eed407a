//! Document predicates and their fluent construction API.

mod basic_filters;
#[allow(clippy::module_inception)]
mod filter;
mod fluent;
mod logical_filters;

pub use basic_filters::{AllFilter, ComparisonFilter, ComparisonMode, EqualsFilter, NotEqualsFilter};
pub use filter::{all, and, by_id, not, or, Filter, FilterProvider};
pub use fluent::{field, FluentFilter};
pub use logical_filters::{AndFilter, NotFilter, OrFilter};

pub(crate) use filter::is_all_filter;
