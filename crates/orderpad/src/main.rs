use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use orderpad::infra::bootstrap::Bootstrap;
use orderpad::infra::config::Config;
use orderpad::ui::app::UiApp;

/// Interactive burger and order form composer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON bootstrap payload with catalogs and initial selections.
    #[arg(long)]
    bootstrap: Option<PathBuf>,

    /// Directory submission bodies are written to (overrides config).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    orderpad::init();

    let config = Config::load()?;
    let bootstrap = match &cli.bootstrap {
        Some(path) => Bootstrap::load(path)?,
        None => Bootstrap::sample(),
    };

    let mut app = UiApp::new(config, bootstrap, cli.output_dir);
    app.run()
}
