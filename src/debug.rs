//! Log bridge for family-switcher.
//!
//! Routes every `log::info!()` etc. to a debug log file in the temp directory
//! (`/tmp/family_switcher_debug.log` on Unix, `%TEMP%\family_switcher_debug.log`
//! on Windows) so log lines never land inside the interactive picker. When
//! `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: explicit level passed to [`init_log_bridge`] (the
//! `--log-level` flag), then `RUST_LOG`, then the config value applied later via
//! [`set_level`].

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set once the level came from the CLI or `RUST_LOG`; config must not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file
pub fn log_file_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/family_switcher_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("family_switcher_debug.log")
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Install the log bridge. Safe to call more than once; later calls only
/// adjust the level.
pub fn init_log_bridge(level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_level = rust_log.as_deref().and_then(parse_level);
    let effective = level.or(env_level).unwrap_or(LevelFilter::Info);
    if level.is_some() || env_level.is_some() {
        LEVEL_PINNED.store(true, Ordering::Relaxed);
    }

    let bridge = BRIDGE.get_or_init(|| {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path())
            .ok();
        LogBridge {
            file: Mutex::new(file),
            mirror_stderr: rust_log.is_some(),
        }
    });

    // Fails only if another logger is already installed (e.g. in tests)
    let _ = log::set_logger(bridge);
    log::set_max_level(effective);
}

/// Apply the configured level unless the CLI or `RUST_LOG` already chose one.
pub fn set_level(level: LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level);
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    // Only a bare level is honoured; per-module filters fall back to the default.
    value.trim().parse::<LevelFilter>().ok()
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}
