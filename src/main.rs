use clap::Parser;
use float_scout::adapters::discord::CommandRegistrar;
use float_scout::config::cli::{Action, CliArgs};
use float_scout::domain::ports::ReplyChannel;
use float_scout::utils::error::ErrorSeverity;
use float_scout::utils::logger::{self, LogFormat};
use float_scout::utils::validation::Validate;
use float_scout::{
    BotConfig, CommandEngine, CommandOutcome, ConsoleChannel, DiscordWebhookChannel,
    ListingFetcher, ScoutError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_logger(LogFormat::from_flag(args.json_logs), args.verbose);

    tracing::info!("🚀 Starting float-scout");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match BotConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(api_key) = &args.api_key {
        config.marketplace.api_key = api_key.clone();
        tracing::info!("🔧 API key overridden from command line");
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&args, &config).await {
        tracing::error!(
            "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
            args.action.name(),
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(args: &CliArgs, config: &BotConfig) -> Result<(), ScoutError> {
    match &args.action {
        Action::Register => {
            let registrar = CommandRegistrar::from_config(config.discord()?)?;
            let count = registrar.register().await?;
            println!("✅ Registered {} commands", count);
            Ok(())
        }
        Action::Tiers => {
            let mut tiers: Vec<_> = config.tiers.iter().collect();
            tiers.sort_by(|a, b| a.0.cmp(b.0));
            for (tier, seeds) in tiers {
                println!("{:>8}  {} seeds", tier, seeds.len());
            }
            Ok(())
        }
        action => {
            let Some(command) = action.to_command() else {
                return Ok(());
            };
            let engine = CommandEngine::new(ListingFetcher::from_config(config)?, config);

            let channel: Box<dyn ReplyChannel> = if args.webhook {
                Box::new(DiscordWebhookChannel::from_config(config.discord()?)?)
            } else {
                Box::new(ConsoleChannel::new())
            };

            let outcome = engine.handle(&command, channel.as_ref()).await?;
            tracing::debug!("Outcome: {:?}", outcome);
            if outcome == CommandOutcome::FetchFailed {
                std::process::exit(2);
            }
            Ok(())
        }
    }
}
