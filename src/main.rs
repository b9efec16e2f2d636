use anyhow::{Context, Result};
use family_switcher::cli::{self, RuntimeOptions};
use family_switcher::picker::{TerminalNotifier, TerminalPrompt};
use family_switcher::{Command, Switcher, SwitcherOptions};
use family_switcher_config::{Config, SettingsStore};
use family_switcher_fonts::SystemFontSource;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Routes all log::info!() etc. to the debug log file.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied below).
    family_switcher::debug::init_log_bridge(options.log_level);

    log::info!("Starting family-switcher {}", family_switcher::VERSION);

    match run(&options) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("family-switcher: error: {e:#}");
            std::process::exit(1);
        }
    }
}

/// Build the switcher from config and CLI overrides and run the command.
/// Returns false when the command reported a failure.
fn run(options: &RuntimeOptions) -> Result<bool> {
    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;
    family_switcher::debug::set_level(config.log_level.to_level_filter());
    options.apply_to(&mut config);

    let settings_path = config.resolved_settings_path();
    log::info!("Editor settings: {:?}", settings_path);
    let store = SettingsStore::open(settings_path.clone(), config.state_file())
        .with_context(|| format!("Failed to open {}", settings_path.display()))?;
    let fonts = SystemFontSource::new()
        .with_font_dirs(config.resolved_font_dirs())
        .monospace_only(config.monospace_only);

    let mut switcher = Switcher::new(
        store,
        Box::new(TerminalPrompt::new()),
        Box::new(TerminalNotifier),
        Box::new(fonts),
        SwitcherOptions::from(&config),
    );

    if options.command == Command::Views {
        let Some(views) = switcher.report("show views", |s| s.views()) else {
            return Ok(false);
        };
        if options.json {
            println!("{}", serde_json::to_string_pretty(&views.to_json())?);
        } else {
            print!("{}", views.render_text());
        }
        return Ok(true);
    }

    Ok(switcher.run(&options.command))
}
