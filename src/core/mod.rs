pub mod aggregator;
pub mod engine;
pub mod fetcher;
pub mod paginator;
pub mod query;
pub mod resolver;

pub use crate::domain::model::{ListingRecord, QuerySpec};
pub use crate::domain::ports::{ListingSource, ReplyChannel};
pub use crate::utils::error::Result;
