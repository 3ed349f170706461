//! Command line front end for resolving combat rolls. Results are printed to stdout as JSON, logs
//! go to stderr.

mod commands;
mod presenter;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use model::config::RulesConfig;
use model::resolver::CombatResolver;
use model::roll::RandomDieRoller;
use tracing_subscriber::EnvFilter;

use crate::commands::{Attack, Damage, NewRound, Roll, Suppress};
use crate::presenter::JsonPresenter;

const DEFAULT_LOG_FILTER: &str = "combat_cli=info,model=info";

#[derive(Parser)]
#[command(name = "combat-cli")]
#[command(about = "Resolves dice pool rolls, damage and suppression checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// TOML file overriding the default rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Roll(Roll),
    Damage(Damage),
    Suppress(Suppress),
    Attack(Attack),
    NewRound(NewRound),
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let rules = match &cli.rules {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RulesConfig::default(),
    };
    let roller = match cli.seed {
        Some(seed) => RandomDieRoller::seeded(seed),
        None => RandomDieRoller::from_entropy(),
    };
    let mut resolver = CombatResolver::new(rules, roller);
    let mut presenter = JsonPresenter::new(io::stdout().lock());

    match cli.command {
        Command::Roll(roll) => roll.execute(&mut resolver, &mut presenter),
        Command::Damage(damage) => damage.execute(&resolver, &mut presenter),
        Command::Suppress(suppress) => suppress.execute(&mut resolver, &mut presenter),
        Command::Attack(attack) => attack.execute(&mut resolver, &mut presenter),
        Command::NewRound(new_round) => new_round.execute(&resolver),
    }
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}
