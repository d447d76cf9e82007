use crate::domain::model::{ListingRecord, QuerySpec, ReplyMessage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can answer a listing query.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self, spec: &QuerySpec) -> Result<Vec<ListingRecord>>;
}

/// Where replies for one command invocation go.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Acknowledge the command before slow work starts.
    async fn defer(&self) -> Result<()>;
    /// Immediate reply, used when nothing was deferred.
    async fn reply(&self, text: &str) -> Result<()>;
    async fn follow_up(&self, message: ReplyMessage) -> Result<()>;
}
