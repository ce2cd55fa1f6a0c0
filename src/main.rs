use quadsim::{bench_gravity, bench_step};
use quadsim::{Scenario, ScenarioConfig, Universe};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "2D Barnes-Hut N-body simulation")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Override the number of generations
    #[arg(short, long, global = true)]
    generations: Option<usize>,

    /// Override the time step
    #[arg(long, global = true)]
    dt: Option<f64>,

    /// Override the Barnes-Hut threshold
    #[arg(long, global = true)]
    theta: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Jupiter and the Galilean moons
    Jupiter,
    /// A single disc galaxy
    Galaxy {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Two galaxies pushed into each other
    Collision {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// A YAML scenario, relative names are looked up in `scenarios/`
    File {
        #[arg(short, default_value = "test_file.yaml")]
        file_name: String,
    },
    /// Direct vs Barnes-Hut timings
    Bench,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let mut config_path = PathBuf::from(file_name);
    if config_path.is_relative() && !config_path.exists() {
        config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    }

    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn summarize(snapshots: &[Universe]) {
    let Some(last) = snapshots.last() else {
        return;
    };
    println!("{} snapshots, {} bodies", snapshots.len(), last.len());
    if let Some(com) = last.center_of_mass() {
        println!("center of mass: ({:.6e}, {:.6e})", com.x, com.y);
    }
    for (i, b) in last.bodies().iter().enumerate().take(10) {
        println!(
            "{i:3}: x = ({:.6e}, {:.6e})  v = ({:.6e}, {:.6e})  m = {:.4e}",
            b.x.x, b.x.y, b.v.x, b.v.y, b.m
        );
    }
    if last.len() > 10 {
        println!("... {} more", last.len() - 10);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let scenario = match args.command {
        Command::Jupiter => Scenario::jupiter(100_000)?,
        Command::Galaxy { seed } => Scenario::galaxy(50_000, seed)?,
        Command::Collision { seed } => Scenario::collision(10_000, seed)?,
        Command::File { file_name } => {
            let cfg = load_scenario_from_yaml(&file_name)?;
            Scenario::build_scenario(cfg).context("invalid scenario")?
        }
        Command::Bench => {
            bench_gravity()?;
            bench_step()?;
            return Ok(());
        }
    };

    let scenario = scenario.with_overrides(args.generations, args.dt, args.theta)?;
    let snapshots = scenario.run().context("simulation failed")?;
    summarize(&snapshots);

    Ok(())
}
