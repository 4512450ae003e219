//! floorsketch CLI - replays command scripts and inspects sketch snapshots.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use floorsketch::{
    check_completeness, derive_walls, format_feet_inches, init_logging, is_complete, Config,
    SketchCommand, SketchFile, SketchSession, VERSION,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "floorsketch", version = VERSION)]
#[command(about = "Floor plan sketching engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON array of commands and print one status line per command
    Replay {
        /// Script file containing an array of commands
        script: PathBuf,
        /// Engine configuration (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Snapshot to start from instead of an empty session
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Where to save the resulting snapshot
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the derived walls of a snapshot
    Walls {
        snapshot: PathBuf,
        /// Engine configuration (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Report completeness issues of a snapshot
    Check {
        snapshot: PathBuf,
        /// Engine configuration (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command {
        Commands::Replay {
            script,
            config,
            snapshot,
            output,
        } => replay(&script, config.as_deref(), snapshot.as_deref(), output.as_deref()),
        Commands::Walls { snapshot, config } => list_walls(&snapshot, config.as_deref()),
        Commands::Check { snapshot, config } => check(&snapshot, config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn replay(
    script: &Path,
    config: Option<&Path>,
    snapshot: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let commands: Vec<SketchCommand> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script {}", script.display()))?;

    let mut session = SketchSession::new(load_config(config)?);
    if let Some(snapshot) = snapshot {
        session.load_from_file(snapshot)?;
    }

    let mut failures = 0;
    for command in commands {
        let status = session.execute(command);
        if status.starts_with("Error:") {
            failures += 1;
        }
        println!("{}", status);
    }
    tracing::info!("Replayed {} with {} failed command(s)", script.display(), failures);

    if let Some(output) = output {
        session.save_to_file(output)?;
        println!("Saved {}", output.display());
    }
    Ok(())
}

fn list_walls(snapshot: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let file = SketchFile::load_from_file(snapshot)?;
    let rooms = &file.floor_plan.rooms;
    let walls = derive_walls(rooms, config.wall_editing.shared_wall_tolerance_ft);

    for wall in &walls {
        let owners: Vec<&str> = wall
            .room_ids
            .iter()
            .map(|id| {
                rooms
                    .iter()
                    .find(|r| &r.id == id)
                    .map_or(id.as_str(), |r| r.name.as_str())
            })
            .collect();
        println!(
            "{}  {:<5} {:<8} {:>20}  {}{}",
            wall.id,
            wall.direction.to_string(),
            wall.wall_type.to_string(),
            format_feet_inches(wall.length_ft),
            owners.join(" / "),
            if wall.missing { "  (missing)" } else { "" }
        );
    }
    println!("{} wall(s)", walls.len());
    Ok(())
}

fn check(snapshot: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let file = SketchFile::load_from_file(snapshot)?;
    let issues = check_completeness(&file.floor_plan.rooms, &config.validation);

    for issue in &issues {
        println!("[{}] {}", issue.severity, issue.message);
    }
    if is_complete(&issues) {
        println!("{} is complete", file.metadata.name);
    } else {
        println!("{} is incomplete", file.metadata.name);
    }
    Ok(())
}
