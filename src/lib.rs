pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{console::ConsoleChannel, discord::DiscordWebhookChannel, memory::MemoryChannel};
pub use crate::config::BotConfig;
pub use crate::core::{engine::CommandEngine, fetcher::ListingFetcher};
pub use crate::domain::model::{Command, CommandOutcome};
pub use crate::utils::error::{Result, ScoutError};
