use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::RngCore;
use twinrando::randomize::generate_with_retries;
use twinrando::stats::generate_stats;
use twinrando::CancelToken;
use twinrando_game::{Config, GameMode, KeysanityMode};

#[derive(Parser)]
struct Args {
    /// Seed number; random if omitted.
    #[arg(long)]
    seed: Option<usize>,

    /// Number of players (multiworld when greater than 1).
    #[arg(long, default_value_t = 1)]
    players: usize,

    /// Place dungeon keys and keycards through the global fill.
    #[arg(long)]
    keysanity: bool,

    /// Write the spoiler log JSON here instead of stdout.
    #[arg(long)]
    spoiler: Option<PathBuf>,

    /// Generate this many seeds and print placement statistics instead of a
    /// single spoiler log.
    #[arg(long)]
    stats: Option<usize>,
}

fn build_configs(args: &Args) -> Vec<Config> {
    (0..args.players)
        .map(|i| {
            let mut config = Config::default();
            config.player_name = if args.players == 1 {
                "Player".to_string()
            } else {
                format!("Player {}", i + 1)
            };
            config.game_mode = if args.players > 1 {
                GameMode::Multiworld
            } else {
                GameMode::Single
            };
            if args.keysanity {
                config.keysanity = KeysanityMode::Both;
            }
            config
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args
        .seed
        .unwrap_or_else(|| rand::rngs::OsRng.next_u64() as usize);
    let configs = build_configs(&args);
    let cancel = CancelToken::new();

    if let Some(num_seeds) = args.stats {
        let report = generate_stats(&configs[0], num_seeds, seed, &cancel);
        println!("{}", report.summary());
        return Ok(());
    }

    let data = generate_with_retries(&configs, seed, &cancel)
        .with_context(|| format!("generating seed {seed}"))?;
    info!("seed {} generated", data.seed);

    let json = data.spoiler.to_json()?;
    match &args.spoiler {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("spoiler log written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
