//! QBR - Quantum Buckshot Roulette
//! Command-line driver: hot-seat play, random-agent simulations and state dumps

mod agent;
mod play;
mod render;
mod simulate;

use clap::{Args, Parser, Subcommand};
use colored::*;
use qbr_game::{GameConfig, GameController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qbr")]
#[command(author = "QBR Contributors")]
#[command(version = "2026.10.19")]
#[command(about = "QBR - Quantum Buckshot Roulette", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Parâmetros da partida (sobrescrevem QBR_* do ambiente)
#[derive(Args, Debug, Clone)]
struct MatchArgs {
    /// Bullets per round
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(4..=10))]
    bullets: Option<u8>,

    /// Gates each player picks per round
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
    gates: Option<u8>,

    /// Starting lives per player
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=5))]
    lives: Option<u32>,

    /// RNG seed for a reproducible match
    #[arg(short, long)]
    seed: Option<u64>,
}

impl MatchArgs {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::from_env();
        if let Some(bullets) = self.bullets {
            config.num_bullets = bullets as usize;
        }
        if let Some(gates) = self.gates {
            config.num_gates = gates as usize;
        }
        if let Some(lives) = self.lives {
            config.num_lives = lives;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat match in the terminal
    Play {
        #[command(flatten)]
        settings: MatchArgs,

        /// Name of player 1
        #[arg(long)]
        player1: Option<String>,

        /// Name of player 2
        #[arg(long)]
        player2: Option<String>,
    },

    /// Run matches between random agents and print statistics
    Simulate {
        #[command(flatten)]
        settings: MatchArgs,

        /// Number of matches
        #[arg(short = 'n', long, default_value_t = 100)]
        matches: u32,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the snapshot of a freshly started round as JSON
    State {
        #[command(flatten)]
        settings: MatchArgs,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qbr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { settings, player1, player2 } => {
            let mut config = settings.config();
            if let Some(name) = player1 {
                config.player_names[0] = name;
            }
            if let Some(name) = player2 {
                config.player_names[1] = name;
            }
            play::run(config)
        }
        Commands::Simulate { settings, matches, json } => {
            simulate::run(settings.config(), matches, json)
        }
        Commands::State { settings } => state_command(settings.config()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn state_command(config: GameConfig) -> anyhow::Result<()> {
    let mut game = GameController::new(config)?;
    game.start_new_round()?;
    println!("{}", game.game_state().to_json()?);
    Ok(())
}
