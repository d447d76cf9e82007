use crate::domain::model::Command;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "float-scout")]
#[command(about = "Find low-float CSFloat listings by skin, phase and paint seed")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "float-scout.toml")]
    pub config: String,

    /// Override marketplace.api_key from the config file
    #[arg(long, env = "CSFLOAT_API_KEY")]
    pub api_key: Option<String>,

    /// Post results to the configured Discord webhook instead of stdout
    #[arg(long)]
    pub webhook: bool,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Search listings for one skin, optionally pinned to a paint seed
    Search {
        #[arg(long)]
        weapon: String,
        #[arg(long)]
        skin: String,
        #[arg(long)]
        phase: Option<String>,
        #[arg(long)]
        paint_seed: Option<String>,
    },
    /// Search every paint seed of a configured tier
    Locate {
        #[arg(long)]
        weapon: String,
        #[arg(long)]
        skin: String,
        #[arg(long)]
        phase: String,
        #[arg(long)]
        tier: String,
    },
    /// Register the slash commands with the configured Discord guild
    Register,
    /// List configured tiers
    Tiers,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Search { .. } => "search",
            Action::Locate { .. } => "locate",
            Action::Register => "register",
            Action::Tiers => "tiers",
        }
    }

    /// The chat command this action stands in for, if any.
    pub fn to_command(&self) -> Option<Command> {
        match self {
            Action::Search {
                weapon,
                skin,
                phase,
                paint_seed,
            } => Some(Command::Search {
                weapon: weapon.clone(),
                skin: skin.clone(),
                phase: phase.clone(),
                paint_seed: paint_seed.clone(),
            }),
            Action::Locate {
                weapon,
                skin,
                phase,
                tier,
            } => Some(Command::Locate {
                weapon: weapon.clone(),
                skin: skin.clone(),
                phase: phase.clone(),
                tier: tier.clone(),
            }),
            Action::Register | Action::Tiers => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let args = CliArgs::parse_from([
            "float-scout",
            "search",
            "--weapon",
            "Karambit",
            "--skin",
            "Doppler",
            "--phase",
            "2",
        ]);

        assert_eq!(
            args.action.to_command(),
            Some(Command::Search {
                weapon: "Karambit".to_string(),
                skin: "Doppler".to_string(),
                phase: Some("2".to_string()),
                paint_seed: None,
            })
        );
        assert_eq!(args.config, "float-scout.toml");
    }

    #[test]
    fn test_locate_requires_tier() {
        let result = CliArgs::try_parse_from([
            "float-scout",
            "locate",
            "--weapon",
            "Karambit",
            "--skin",
            "Doppler",
            "--phase",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_register_has_no_command() {
        let args = CliArgs::parse_from(["float-scout", "-c", "bot.toml", "register"]);
        assert!(args.action.to_command().is_none());
        assert_eq!(args.config, "bot.toml");
    }
}
