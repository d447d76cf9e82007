use anyhow::Result;
use float_scout::adapters::discord::{CommandRegistrar, DiscordWebhookChannel};
use float_scout::config::toml_config::DiscordConfig;
use float_scout::domain::model::{DisplayDocument, EmbedField, ReplyMessage};
use float_scout::domain::ports::ReplyChannel;
use float_scout::ScoutError;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_webhook_posts_embed_document() -> Result<()> {
    let server = MockServer::start();
    let webhook = server.mock(|when, then| {
        when.method(POST).path("/api/webhooks/1/abc").json_body(json!({
            "embeds": [{
                "title": "Listings",
                "fields": [{"name": "Listing for AK-47 | Redline", "value": "**Price:** $1.00"}],
                "color": 39423
            }]
        }));
        then.status(204);
    });

    let channel = DiscordWebhookChannel::new(&server.url("/api/webhooks/1/abc"));
    channel.defer().await?;
    channel
        .follow_up(ReplyMessage::Embed(DisplayDocument {
            title: "Listings".to_string(),
            fields: vec![EmbedField {
                name: "Listing for AK-47 | Redline".to_string(),
                value: "**Price:** $1.00".to_string(),
            }],
            color: 0x0099ff,
        }))
        .await?;

    webhook.assert();
    Ok(())
}

#[tokio::test]
async fn test_webhook_posts_text_as_content() -> Result<()> {
    let server = MockServer::start();
    let webhook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .json_body(json!({"content": "No paint seeds found for tier 9."}));
        then.status(200);
    });

    let channel = DiscordWebhookChannel::new(&server.url("/hook"));
    channel.reply("No paint seeds found for tier 9.").await?;

    webhook.assert();
    Ok(())
}

#[tokio::test]
async fn test_webhook_failure_is_delivery_error() {
    let server = MockServer::start();
    let _webhook = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(429).body("{\"retry_after\": 1.5}");
    });

    let channel = DiscordWebhookChannel::new(&server.url("/hook"));
    let result = channel
        .follow_up(ReplyMessage::Text("hello".to_string()))
        .await;

    match result {
        Err(e @ ScoutError::DeliveryError { .. }) => assert!(!e.is_fetch_failure()),
        other => panic!("expected delivery error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_puts_both_commands() -> Result<()> {
    let server = MockServer::start();
    let register = server.mock(|when, then| {
        when.method(PUT)
            .path("/applications/42/guilds/7/commands")
            .header("Authorization", "Bot secret-token");
        then.status(200).json_body(json!([]));
    });

    let config = DiscordConfig {
        bot_token: Some("secret-token".to_string()),
        application_id: Some("42".to_string()),
        guild_id: Some("7".to_string()),
        api_base: Some(server.base_url()),
        webhook_url: None,
    };

    let registered = CommandRegistrar::from_config(&config)?.register().await?;

    register.assert();
    assert_eq!(registered, 2);
    Ok(())
}
