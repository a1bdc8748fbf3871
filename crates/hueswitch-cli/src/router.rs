// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hueswitch_themes::ThemeHost;

use crate::{
    commands::*,
    error::CliResult,
    output::OutputStyle,
    setup::{build_coordinator, SetupOptions},
};

/// hue - switch and inspect application themes
#[derive(Parser, Debug)]
#[command(name = "hue")]
#[command(bin_name = "hue")]
#[command(about = "Switch and inspect application themes")]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Coordinator configuration file (TOML or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of theme files
    #[arg(long, global = true, value_name = "DIR")]
    pub themes_dir: Option<PathBuf>,

    /// Preference file holding the selected theme
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List available themes
    List,

    /// Show the active theme
    Current,

    /// Switch to a theme by id
    Switch {
        /// Theme id
        #[arg(value_name = "ID")]
        id: String,

        /// Do not notify change listeners
        #[arg(long)]
        silent: bool,
    },

    /// Switch to the next theme
    Next,

    /// Switch to the previous theme
    #[command(alias = "previous")]
    Prev,

    /// Toggle between two themes (light and dark by default)
    Toggle {
        /// First theme id
        #[arg(value_name = "FIRST", requires = "second")]
        first: Option<String>,

        /// Second theme id
        #[arg(value_name = "SECOND")]
        second: Option<String>,
    },

    /// Switch to the first theme with a group tag
    Group {
        /// Group tag
        #[arg(value_name = "TAG")]
        tag: String,
    },

    /// Show a theme's colors, fonts and images
    Show {
        /// Theme id (default: active theme)
        #[arg(value_name = "ID")]
        id: Option<String>,
    },
}

impl Cli {
    pub fn setup_options(&self) -> SetupOptions {
        SetupOptions {
            config: self.config.clone(),
            themes_dir: self.themes_dir.clone(),
            store: self.store.clone(),
        }
    }
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments, run the command and print its output
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();
        crate::logging::init_logging(cli.verbose, cli.quiet);

        let output = Self::run(&cli, OutputStyle::default())?;
        println!("{}", output);
        Ok(())
    }

    /// Compose the coordinator for `cli` and execute its command
    pub fn run(cli: &Cli, style: OutputStyle) -> CliResult<String> {
        let host = ThemeHost::new();
        let coordinator = build_coordinator(&host, &cli.setup_options())?;
        let ctx = CommandContext::new(coordinator, style);
        Self::execute(cli.command.clone().unwrap_or(Commands::Current), &ctx)
    }

    /// Execute a command
    pub fn execute(command: Commands, ctx: &CommandContext) -> CliResult<String> {
        match command {
            Commands::List => ListCommand.execute(ctx),
            Commands::Current => CurrentCommand.execute(ctx),
            Commands::Switch { id, silent } => {
                SwitchCommand::new(SwitchTarget::Id { id, silent }).execute(ctx)
            }
            Commands::Next => SwitchCommand::new(SwitchTarget::Next).execute(ctx),
            Commands::Prev => SwitchCommand::new(SwitchTarget::Previous).execute(ctx),
            Commands::Toggle { first, second } => ToggleCommand::new(first, second).execute(ctx),
            Commands::Group { tag } => SwitchCommand::new(SwitchTarget::Group(tag)).execute(ctx),
            Commands::Show { id } => ShowCommand::new(id).execute(ctx),
        }
    }
}
