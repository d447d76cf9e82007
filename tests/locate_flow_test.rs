use anyhow::Result;
use float_scout::adapters::memory::{ChannelEvent, MemoryChannel};
use float_scout::{BotConfig, Command, CommandEngine, CommandOutcome, ListingFetcher};
use httpmock::prelude::*;
use serde_json::json;

fn config_for(endpoint: &str) -> BotConfig {
    let toml_content = format!(
        r#"
[marketplace]
endpoint = "{}"
api_key = "test-key"

[delivery]
pause_ms = 0

[tiers]
"1" = ["101", "202", "303"]
"blue" = ["661", "670"]
"#,
        endpoint
    );
    BotConfig::from_toml_str(&toml_content).unwrap()
}

fn listing(id: &str, float_value: f64) -> serde_json::Value {
    json!({
        "id": id,
        "price": 250050,
        "item": {"market_hash_name": "Karambit | Doppler (Phase 1)", "float_value": float_value}
    })
}

fn locate(tier: &str) -> Command {
    Command::Locate {
        weapon: "Karambit".to_string(),
        skin: "Doppler".to_string(),
        phase: "1".to_string(),
        tier: tier.to_string(),
    }
}

#[tokio::test]
async fn test_locate_queries_each_seed_and_tags_results() -> Result<()> {
    let server = MockServer::start();
    let seed_661 = server.mock(|when, then| {
        when.method(GET)
            .path("/listings")
            .header("Authorization", "test-key")
            .query_param("def_index", "507")
            .query_param("paint_index", "418")
            .query_param("max_float", "0.08")
            .query_param("paint_seed", "661");
        then.status(200)
            .json_body(json!([listing("a", 0.01), listing("b", 0.02)]));
    });
    let seed_670 = server.mock(|when, then| {
        when.method(GET)
            .path("/listings")
            .query_param("paint_seed", "670");
        then.status(200).json_body(json!([listing("c", 0.03)]));
    });

    let config = config_for(&server.url("/listings"));
    let engine = CommandEngine::new(ListingFetcher::from_config(&config)?, &config);
    let channel = MemoryChannel::new();

    let outcome = engine.handle(&locate("blue"), &channel).await?;

    seed_661.assert();
    seed_670.assert();
    assert_eq!(
        outcome,
        CommandOutcome::Delivered {
            listings: 3,
            pages: 1
        }
    );

    let embeds = channel.embeds();
    assert_eq!(embeds.len(), 1);
    let names: Vec<&str> = embeds[0].fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Listing for Karambit | Doppler (Phase 1) (Paint Seed: 661)",
            "Listing for Karambit | Doppler (Phase 1) (Paint Seed: 661)",
            "Listing for Karambit | Doppler (Phase 1) (Paint Seed: 670)",
        ]
    );
    assert!(embeds[0].fields[0].value.starts_with("**Price:** $2500.50"));
    Ok(())
}

#[tokio::test]
async fn test_locate_fail_fast_delivers_nothing() -> Result<()> {
    let server = MockServer::start();
    let seed_101 = server.mock(|when, then| {
        when.method(GET)
            .path("/listings")
            .query_param("paint_seed", "101");
        then.status(200)
            .json_body(json!([listing("from-101", 0.01)]));
    });
    let seed_202 = server.mock(|when, then| {
        when.method(GET)
            .path("/listings")
            .query_param("paint_seed", "202");
        then.status(503).body("maintenance");
    });
    let seed_303 = server.mock(|when, then| {
        when.method(GET)
            .path("/listings")
            .query_param("paint_seed", "303");
        then.status(200)
            .json_body(json!([listing("from-303", 0.01)]));
    });

    let config = config_for(&server.url("/listings"));
    let engine = CommandEngine::new(ListingFetcher::from_config(&config)?, &config);
    let channel = MemoryChannel::new();

    let outcome = engine.handle(&locate("1"), &channel).await?;

    seed_101.assert();
    seed_202.assert();
    seed_303.assert_hits(0);
    assert_eq!(outcome, CommandOutcome::FetchFailed);
    assert!(channel.embeds().is_empty());
    assert_eq!(
        channel.texts(),
        vec!["An error occurred while fetching listings.".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_locate_unknown_tier_makes_no_requests() -> Result<()> {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.path("/listings");
        then.status(200).json_body(json!([]));
    });

    let config = config_for(&server.url("/listings"));
    let engine = CommandEngine::new(ListingFetcher::from_config(&config)?, &config);
    let channel = MemoryChannel::new();

    let outcome = engine.handle(&locate("gold"), &channel).await?;

    any_request.assert_hits(0);
    assert_eq!(
        outcome,
        CommandOutcome::UnknownTier {
            tier: "gold".to_string()
        }
    );
    assert_eq!(
        channel.events(),
        vec![ChannelEvent::Reply(
            "No paint seeds found for tier gold.".to_string()
        )]
    );
    Ok(())
}

#[tokio::test]
async fn test_locate_with_no_matches_anywhere() -> Result<()> {
    let server = MockServer::start();
    let any_seed = server.mock(|when, then| {
        when.method(GET).path("/listings");
        then.status(200).json_body(json!([]));
    });

    let config = config_for(&server.url("/listings"));
    let engine = CommandEngine::new(ListingFetcher::from_config(&config)?, &config);
    let channel = MemoryChannel::new();

    let outcome = engine.handle(&locate("1"), &channel).await?;

    any_seed.assert_hits(3);
    assert_eq!(
        outcome,
        CommandOutcome::NoListings {
            display_name: "Karambit | Doppler (Phase 1)".to_string()
        }
    );
    assert_eq!(channel.events()[0], ChannelEvent::Deferred);
    assert_eq!(
        channel.texts(),
        vec!["No listings found for Karambit | Doppler (Phase 1).".to_string()]
    );
    Ok(())
}
