// ===== ROADMAP =====
//
// TODO: offer a diff option in the overwrite prompt
//
// TODO: allow picking a remote other than origin for default resolution

mod bootstrap;
mod git;
mod progress;
mod prompt;
mod settings;

use std::fs;

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::bootstrap::Bootstrap;
use crate::settings::Settings;

#[derive(Parser)]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(about = "Bootstrap an offline-first web app from the bundled template.")]
struct Cli {
    #[command(flatten)]
    bootstrap: Bootstrap,

    #[arg(
        short = 'h',
        long = "help",
        help = "Print this help message.",
        action = ArgAction::Help,
    )]
    help: Option<bool>,

    #[arg(
        short = 'V',
        long = "version",
        help = "Print version information.",
        action = ArgAction::Version,
    )]
    version: Option<bool>,
}

pub(crate) struct App {
    cli: Cli,
    settings: Settings,
}

impl App {
    fn init() -> Self {
        let cli = Cli::parse();
        let settings = Settings::init().expect("failed to initialize settings");
        fs::create_dir_all(&settings.prefix).expect("failed to create prefix directory");
        Self { cli, settings }
    }
}

fn main() -> Result<()> {
    App::init().bootstrap()
}
