use crate::config::BotConfig;
use crate::core::aggregator::aggregate_by_tier;
use crate::core::paginator::{self, Presenter, ThrottlePolicy};
use crate::core::query;
use crate::core::resolver::VariantResolver;
use crate::domain::model::{Command, CommandOutcome, ListingRecord, ReplyMessage, VariantSpec};
use crate::domain::ports::{ListingSource, ReplyChannel};
use crate::utils::error::Result;

pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching listings.";

/// Runs `search` and `locate` invocations end to end against a listing source.
/// Holds only read-only settings; each [`CommandEngine::handle`] call is independent.
pub struct CommandEngine<S: ListingSource> {
    source: S,
    resolver: VariantResolver,
    presenter: Presenter,
    config: BotConfig,
    page_size: usize,
    throttle: ThrottlePolicy,
}

impl<S: ListingSource> CommandEngine<S> {
    pub fn new(source: S, config: &BotConfig) -> Self {
        Self {
            source,
            resolver: VariantResolver::new(config.phase_registry()),
            presenter: Presenter::new(config.item_url_base()),
            config: config.clone(),
            page_size: config.page_size(),
            throttle: config.throttle_policy(),
        }
    }

    /// Fetch failures are reported to the channel and end the invocation with
    /// `Ok(CommandOutcome::FetchFailed)`; only delivery problems return `Err`.
    pub async fn handle<C: ReplyChannel + ?Sized>(
        &self,
        command: &Command,
        channel: &C,
    ) -> Result<CommandOutcome> {
        tracing::info!("Handling /{} command", command.name());

        match command {
            Command::Search {
                weapon,
                skin,
                phase,
                paint_seed,
            } => {
                let variant = VariantSpec::new(weapon, skin, phase.as_deref());
                let seed = paint_seed.as_deref().filter(|s| !s.is_empty());
                self.search(&variant, seed, channel).await
            }
            Command::Locate {
                weapon,
                skin,
                phase,
                tier,
            } => {
                let variant = VariantSpec::new(weapon, skin, Some(phase.as_str()));
                self.locate(&variant, tier, channel).await
            }
        }
    }

    async fn search<C: ReplyChannel + ?Sized>(
        &self,
        variant: &VariantSpec,
        seed: Option<&str>,
        channel: &C,
    ) -> Result<CommandOutcome> {
        channel.defer().await?;

        let encoding = self.resolver.resolve(&variant.item_family, variant.phase());
        let spec = query::build(
            &variant.item_family,
            &variant.sub_variant,
            variant.phase(),
            &encoding,
            seed,
        );

        let fetched = self.source.fetch(&spec).await;
        self.present(&spec.display_name, fetched, channel).await
    }

    async fn locate<C: ReplyChannel + ?Sized>(
        &self,
        variant: &VariantSpec,
        tier: &str,
        channel: &C,
    ) -> Result<CommandOutcome> {
        let seeds = self.config.tier_seeds(tier);
        if seeds.is_empty() {
            tracing::warn!("No paint seeds configured for tier {}", tier);
            channel
                .reply(&format!("No paint seeds found for tier {}.", tier))
                .await?;
            return Ok(CommandOutcome::UnknownTier {
                tier: tier.to_string(),
            });
        }

        channel.defer().await?;
        tracing::info!("Locating across {} seeds of tier {}", seeds.len(), tier);

        let display_name =
            query::display_name(&variant.item_family, &variant.sub_variant, variant.phase());
        let fetched = aggregate_by_tier(&self.source, &self.resolver, variant, seeds).await;
        self.present(&display_name, fetched, channel).await
    }

    async fn present<C: ReplyChannel + ?Sized>(
        &self,
        display_name: &str,
        fetched: Result<Vec<ListingRecord>>,
        channel: &C,
    ) -> Result<CommandOutcome> {
        let listings = match fetched {
            Ok(listings) => listings,
            Err(e) if e.is_fetch_failure() => {
                tracing::error!("❌ Fetching listings for '{}' failed: {}", display_name, e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                channel
                    .follow_up(ReplyMessage::Text(FETCH_FAILED_MESSAGE.to_string()))
                    .await?;
                return Ok(CommandOutcome::FetchFailed);
            }
            Err(e) => return Err(e),
        };

        if listings.is_empty() {
            tracing::info!("No listings for '{}'", display_name);
            channel
                .follow_up(ReplyMessage::Text(format!(
                    "No listings found for {}.",
                    display_name
                )))
                .await?;
            return Ok(CommandOutcome::NoListings {
                display_name: display_name.to_string(),
            });
        }

        let pages = paginator::paginate(&listings, self.page_size);
        let delivered =
            paginator::deliver(&pages, channel, &self.presenter, &self.throttle).await?;

        tracing::info!(
            "✅ Delivered {} listings for '{}' in {} pages",
            listings.len(),
            display_name,
            delivered
        );
        Ok(CommandOutcome::Delivered {
            listings: listings.len(),
            pages: delivered,
        })
    }
}
