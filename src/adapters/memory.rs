use crate::domain::model::{DisplayDocument, ReplyMessage};
use crate::domain::ports::ReplyChannel;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Deferred,
    Reply(String),
    FollowUp(ReplyMessage),
}

/// Records everything sent to it. Useful for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    events: Arc<Mutex<Vec<ChannelEvent>>>,
    fail_after: Option<usize>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow-ups beyond the first `count` fail with a delivery error.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn events(&self) -> Vec<ChannelEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn embeds(&self) -> Vec<DisplayDocument> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ChannelEvent::FollowUp(ReplyMessage::Embed(doc)) => Some(doc),
                _ => None,
            })
            .collect()
    }

    /// Text sent either as an immediate reply or as a follow-up.
    pub fn texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ChannelEvent::Reply(text) | ChannelEvent::FollowUp(ReplyMessage::Text(text)) => {
                    Some(text)
                }
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ChannelEvent) -> Result<()> {
        let mut events = self.events.lock().map_err(|_| ScoutError::DeliveryError {
            message: "channel log poisoned".to_string(),
        })?;
        events.push(event);
        Ok(())
    }

    fn follow_up_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ChannelEvent::FollowUp(_)))
            .count()
    }
}

#[async_trait]
impl ReplyChannel for MemoryChannel {
    async fn defer(&self) -> Result<()> {
        self.push(ChannelEvent::Deferred)
    }

    async fn reply(&self, text: &str) -> Result<()> {
        self.push(ChannelEvent::Reply(text.to_string()))
    }

    async fn follow_up(&self, message: ReplyMessage) -> Result<()> {
        if let Some(limit) = self.fail_after {
            if self.follow_up_count() >= limit {
                return Err(ScoutError::DeliveryError {
                    message: format!("simulated failure after {} follow-ups", limit),
                });
            }
        }
        self.push(ChannelEvent::FollowUp(message))
    }
}
