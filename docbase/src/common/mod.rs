//! Shared building blocks: values, documents, ids, time, cancellation.

pub mod cancellation;
pub mod clock;
pub mod doc_id;
pub mod document;
pub mod sort_order;
pub mod value;
pub mod value_codec;

pub use cancellation::CancellationToken;
pub use clock::{Clock, ClockProvider, FixedClock, SystemClock};
pub use doc_id::DocId;
pub use document::Document;
pub use sort_order::SortOrder;
pub use value::Value;
pub use value_codec::ValueCodec;

pub(crate) use doc_id::DocIdGenerator;
