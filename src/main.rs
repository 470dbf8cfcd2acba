//! Command-line front end.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use prop_analyzer::{logging, Config, PropAnalyzer, Sport};

#[derive(Parser, Debug)]
#[command(name = "prop-analyzer")]
#[command(version)]
#[command(about = "Compare a player's recent performance to a betting line", long_about = None)]
struct Cli {
    /// Sport to analyze
    #[arg(long, value_enum)]
    sport: Sport,

    /// Player name to analyze
    #[arg(long)]
    player: String,

    /// Betting line for the player
    #[arg(long, allow_negative_numbers = true)]
    line: f64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logging::init(logging::DEFAULT_DIRECTIVE)?;

    let config = Config::from_env()?;
    let analyzer = PropAnalyzer::from_config(&config)?;

    let result = analyzer.analyze(&cli.player, cli.line, cli.sport).await;
    analyzer.close().await;

    println!("Analysis Results for {}:", cli.player);
    for (key, value) in result.fields() {
        println!("{key}: {value}");
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_flags_are_required() {
        assert!(Cli::try_parse_from(["prop-analyzer", "--sport", "basketball", "--player", "A B"]).is_err());
        assert!(Cli::try_parse_from(["prop-analyzer", "--sport", "hockey", "--player", "A", "--line", "1"]).is_err());

        let cli = Cli::try_parse_from([
            "prop-analyzer",
            "--sport",
            "football",
            "--player",
            "Patrick Mahomes",
            "--line",
            "275.5",
        ])
        .unwrap();
        assert_eq!(cli.sport, Sport::Football);
        assert_eq!(cli.player, "Patrick Mahomes");
        assert_eq!(cli.line, 275.5);
    }
}
