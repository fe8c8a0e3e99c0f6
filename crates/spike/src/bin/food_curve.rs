use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use snake_food_core::chance::{spawn_chance, CHANCE_SCALE};
use snake_food_core::food::{simulate_spawn_rate, SpawnRateScenario};
use snake_food_core::FoodConfig;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Simulate food spawning on an empty board and print spawn-rate statistics as JSON.
#[derive(Parser, Debug)]
#[command(name = "food-curve")]
struct Args {
    /// JSON file with a FoodConfig; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long, allow_hyphen_values = true)]
    spawn_period: Option<i32>,
    /// Base seed; per-run seeds are drawn from it.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 16)]
    runs: usize,
    #[arg(long, default_value_t = 1000)]
    turns: usize,
    #[arg(long, default_value_t = 4)]
    living: usize,
    #[arg(long, default_value_t = 0)]
    food_eaten: usize,
    /// Also print the spawn-chance curve for the configured period.
    #[arg(long)]
    curve: bool,
}

fn load_config(args: &Args) -> Result<FoodConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            FoodConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FoodConfig::default(),
    };
    if let Some(width) = args.width {
        config.board_width = width;
    }
    if let Some(height) = args.height {
        config.board_height = height;
    }
    if let Some(period) = args.spawn_period {
        config.spawn_period = period;
    }
    config.seed = args.seed;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.curve && config.spawn_period > 1 {
        for y in 0..config.spawn_period as u32 {
            let chance = spawn_chance(config.spawn_period, y);
            println!(
                "turns_since_last_spawn={y} chance={chance:.3} p={:.5}",
                chance / CHANCE_SCALE
            );
        }
    }

    let mut rng = ChaCha12Rng::seed_from_u64(args.seed);
    let seeds: Vec<u64> = (0..args.runs).map(|_| rng.random()).collect();
    let scenario = SpawnRateScenario {
        turns: args.turns,
        living: args.living,
        food_eaten: args.food_eaten,
    };

    let start = Instant::now();
    let summary = simulate_spawn_rate(&config, scenario, &seeds)?;
    tracing::info!(
        runs = args.runs,
        turns = args.turns,
        elapsed = ?start.elapsed(),
        "simulation complete"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
