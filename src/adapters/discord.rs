use crate::config::toml_config::DiscordConfig;
use crate::domain::model::{DisplayDocument, ReplyMessage};
use crate::domain::ports::ReplyChannel;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::Serialize;

/// STRING option type in the application command API.
const OPTION_TYPE_STRING: u8 = 3;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<&'a DisplayDocument>,
}

async fn ensure_success(response: Response, what: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!("Discord {} failed ({}): {}", what, status, body);
    Err(ScoutError::DeliveryError {
        message: format!("{} returned {}: {}", what, status, body),
    })
}

fn delivery_error(what: &str, e: reqwest::Error) -> ScoutError {
    ScoutError::DeliveryError {
        message: format!("{} request failed: {}", what, e),
    }
}

/// Posts replies to a Discord channel webhook.
#[derive(Debug, Clone)]
pub struct DiscordWebhookChannel {
    client: Client,
    webhook_url: String,
}

impl DiscordWebhookChannel {
    pub fn new(webhook_url: &str) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.to_string(),
        }
    }

    pub fn from_config(config: &DiscordConfig) -> Result<Self> {
        let url = validate_required_field("discord.webhook_url", &config.webhook_url)?;
        Ok(Self::new(url))
    }

    async fn post(&self, payload: &WebhookPayload<'_>) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| delivery_error("webhook", e))?;
        ensure_success(response, "webhook").await
    }
}

#[async_trait]
impl ReplyChannel for DiscordWebhookChannel {
    async fn defer(&self) -> Result<()> {
        // A webhook has no interaction to acknowledge.
        tracing::debug!("Webhook delivery, skipping deferred acknowledgment");
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<()> {
        self.post(&WebhookPayload {
            content: Some(text),
            embeds: Vec::new(),
        })
        .await
    }

    async fn follow_up(&self, message: ReplyMessage) -> Result<()> {
        match &message {
            ReplyMessage::Text(text) => self.reply(text).await,
            ReplyMessage::Embed(document) => {
                self.post(&WebhookPayload {
                    content: None,
                    embeds: vec![document],
                })
                .await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

fn string_option(name: &str, description: &str, required: bool) -> CommandOption {
    CommandOption {
        kind: OPTION_TYPE_STRING,
        name: name.to_string(),
        description: description.to_string(),
        required,
    }
}

/// The `search` and `locate` slash commands.
pub fn command_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition {
            name: "search".to_string(),
            description: "Search for a skin listing".to_string(),
            options: vec![
                string_option("weapon", "The weapon name", true),
                string_option("skin", "The skin name", true),
                string_option("phase", "The phase number (optional)", false),
                string_option("paint_seed", "The paint seed for the skin (optional)", false),
            ],
        },
        CommandDefinition {
            name: "locate".to_string(),
            description: "Find listings based on weapon, skin, phase, and tier".to_string(),
            options: vec![
                string_option("weapon", "The weapon name", true),
                string_option("skin", "The skin name", true),
                string_option("phase", "The phase number", true),
                string_option("tier", "The tier for paint seeds", true),
            ],
        },
    ]
}

/// Registers the slash commands for one guild through the REST API.
#[derive(Debug, Clone)]
pub struct CommandRegistrar {
    client: Client,
    api_base: String,
    application_id: String,
    guild_id: String,
    bot_token: String,
}

impl CommandRegistrar {
    pub fn from_config(config: &DiscordConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_base: config.api_base().trim_end_matches('/').to_string(),
            application_id: validate_required_field(
                "discord.application_id",
                &config.application_id,
            )?
            .clone(),
            guild_id: validate_required_field("discord.guild_id", &config.guild_id)?.clone(),
            bot_token: validate_required_field("discord.bot_token", &config.bot_token)?.clone(),
        })
    }

    pub fn commands_url(&self) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.api_base, self.application_id, self.guild_id
        )
    }

    /// Overwrites the guild's command set; returns how many were registered.
    pub async fn register(&self) -> Result<usize> {
        let commands = command_definitions();
        tracing::info!("Started refreshing application (/) commands.");

        let response = self
            .client
            .put(self.commands_url())
            .header(AUTHORIZATION, format!("Bot {}", self.bot_token))
            .json(&commands)
            .send()
            .await
            .map_err(|e| delivery_error("command registration", e))?;
        ensure_success(response, "command registration").await?;

        tracing::info!("Successfully reloaded application (/) commands.");
        Ok(commands.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definitions_shape() {
        let json = serde_json::to_value(command_definitions()).unwrap();

        assert_eq!(json[0]["name"], "search");
        assert_eq!(json[0]["options"][0]["type"], 3);
        assert_eq!(json[0]["options"][2]["required"], false);
        assert_eq!(json[1]["name"], "locate");
        assert_eq!(json[1]["options"][3]["name"], "tier");
        assert_eq!(json[1]["options"][2]["required"], true);
    }

    #[test]
    fn test_registrar_requires_token() {
        let config = DiscordConfig {
            application_id: Some("1".to_string()),
            guild_id: Some("2".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            CommandRegistrar::from_config(&config),
            Err(ScoutError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_commands_url() {
        let config = DiscordConfig {
            bot_token: Some("t".to_string()),
            application_id: Some("1300388610415001661".to_string()),
            guild_id: Some("1300384802091827252".to_string()),
            api_base: Some("https://discord.com/api/v10/".to_string()),
            webhook_url: None,
        };
        let registrar = CommandRegistrar::from_config(&config).unwrap();
        assert_eq!(
            registrar.commands_url(),
            "https://discord.com/api/v10/applications/1300388610415001661/guilds/1300384802091827252/commands"
        );
    }

    #[test]
    fn test_webhook_payload_skips_empty_parts() {
        let payload = WebhookPayload {
            content: Some("hi"),
            embeds: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"content": "hi"})
        );
    }
}
