use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Write a sample bootstrap payload for manual testing
    Fixtures {
        /// Output path for the payload
        #[arg(long, default_value = "bootstrap.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Fixtures { out } => write_fixtures(out)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn write_fixtures(out: PathBuf) -> Result<()> {
    let payload = json!({
        "available_ingredients": [
            { "id": "1", "name": "Beef Patty" },
            { "id": "2", "name": "Cheddar" },
            { "id": "3", "name": "Lettuce" },
            { "id": "4", "name": "Tomato" }
        ],
        "available_burgers": [
            { "id": "1", "name": "Classic", "price": 3.50 },
            { "id": "2", "name": "Double Stack", "price": 5.25 }
        ],
        "initial_ingredients": [
            { "id": "3", "name": "Lettuce" }
        ],
        "initial_order_items": [
            { "burger_id": "1", "burger_name": "Classic", "quantity": 2, "price": 3.50 }
        ]
    });
    fs::write(&out, serde_json::to_string_pretty(&payload)?)?;
    println!("wrote {}", out.display());
    Ok(())
}
