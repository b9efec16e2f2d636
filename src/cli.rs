//! Command-line interface for family-switcher.
//!
//! Parses subcommands and global overrides into [`RuntimeOptions`]; `main`
//! applies the overrides to the loaded [`Config`] and runs the command.

use crate::switcher::Command;
use clap::{Parser, Subcommand};
use family_switcher_config::{Config, CurationMode, FontPosition, FontTarget};
use std::path::PathBuf;

/// family-switcher - Browse installed fonts and assign them to editor and terminal font settings
#[derive(Parser, Debug)]
#[command(name = "family-switcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Curation list shaping the pickers (overrides config)
    #[arg(long, global = true, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Editor settings.json to edit (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Tool config file (default: ~/.config/family-switcher/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not write the highlighted font while picking
    #[arg(long, global = true)]
    pub no_preview: bool,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Curation mode argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    None,
    Allow,
    Deny,
    Favorite,
}

impl From<ModeArg> for CurationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::None => CurationMode::None,
            ModeArg::Allow => CurationMode::Allow,
            ModeArg::Deny => CurationMode::Deny,
            ModeArg::Favorite => CurationMode::Favorite,
        }
    }
}

/// Font setting argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TargetArg {
    #[default]
    Editor,
    Terminal,
}

impl From<TargetArg> for FontTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Editor => FontTarget::Editor,
            TargetArg::Terminal => FontTarget::Terminal,
        }
    }
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate installed fonts and cache their family names
    LoadFonts,

    /// Pick a font for a position of the editor font family
    Switch {
        /// Position to set, 1 (primary) to 5 (asked for if omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        position: Option<u8>,
    },

    /// Pick a font for a position of the terminal font family
    SwitchTerminal {
        /// Position to set, 1 (primary) to 5 (asked for if omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        position: Option<u8>,
    },

    /// Choose the fonts in the active curation list
    #[command(alias = "search")]
    Manage,

    /// Put a font at the primary position of the editor font family
    Preview {
        font: String,
    },

    /// Put a font at a position of the editor or terminal font family
    Apply {
        font: String,

        /// Font setting to change
        #[arg(short, long, value_enum, default_value_t = TargetArg::Editor)]
        target: TargetArg,

        /// Position to set, 1 (primary) to 5 (asked for if omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        position: Option<u8>,
    },

    /// Add a font to the active curation list
    Add {
        font: String,
    },

    /// Remove a font from the active curation list
    Remove {
        font: String,
    },

    /// Show the curated fonts and all cached fonts
    Views {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub command: Command,
    /// Print views as JSON
    pub json: bool,
    pub mode: Option<CurationMode>,
    pub settings_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub no_preview: bool,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl RuntimeOptions {
    /// Overlay command-line overrides on `config` for this run.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.curation_mode = mode;
        }
        if let Some(path) = &self.settings_path {
            config.settings_path = Some(path.clone());
        }
        if self.no_preview {
            config.live_preview = false;
        }
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        let mut json = false;
        let command = match cli.command {
            None => Command::Switch {
                target: FontTarget::Editor,
                position: None,
            },
            Some(Commands::LoadFonts) => Command::LoadFonts,
            Some(Commands::Switch { position }) => Command::Switch {
                target: FontTarget::Editor,
                position: position_arg(position),
            },
            Some(Commands::SwitchTerminal { position }) => Command::Switch {
                target: FontTarget::Terminal,
                position: position_arg(position),
            },
            Some(Commands::Manage) => Command::Manage,
            Some(Commands::Preview { font }) => Command::Preview { font },
            Some(Commands::Apply {
                font,
                target,
                position,
            }) => Command::Apply {
                font,
                target: target.into(),
                position: position_arg(position),
            },
            Some(Commands::Add { font }) => Command::Add { font },
            Some(Commands::Remove { font }) => Command::Remove { font },
            Some(Commands::Views { json: as_json }) => {
                json = as_json;
                Command::Views
            }
        };
        Self {
            command,
            json,
            mode: cli.mode.map(Into::into),
            settings_path: cli.settings,
            config_path: cli.config,
            no_preview: cli.no_preview,
            log_level: cli.log_level.map(|l| l.to_level_filter()),
        }
    }
}

/// 1-based position from the command line
fn position_arg(position: Option<u8>) -> Option<FontPosition> {
    position.and_then(|p| FontPosition::from_index(usize::from(p).checked_sub(1)?))
}

/// Result of CLI processing
pub enum CliResult {
    /// Run the parsed command
    Continue(RuntimeOptions),
    /// Exit with the given code
    Exit(i32),
}

/// Process CLI arguments
pub fn process_cli() -> CliResult {
    match Cli::try_parse() {
        Ok(cli) => CliResult::Continue(cli.into()),
        Err(e) => {
            // Prints help/version to stdout and usage errors to stderr
            let _ = e.print();
            CliResult::Exit(if e.use_stderr() { 2 } else { 0 })
        }
    }
}
