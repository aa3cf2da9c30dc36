// SPDX-License-Identifier: MPL-2.0
//! `log` backend.
//!
//! Records go to stderr as one line each. Warnings and errors are also
//! forwarded to the diagnostics collector once [`attach_diagnostics`] is
//! called. The level comes from `RUST_LOG` (`info` when unset).

use crate::diagnostics::DiagnosticsHandle;
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;

/// Dependencies whose info/debug output drowns ours.
const NOISY_TARGETS: &[&str] = &["wgpu", "naga", "cosmic_text", "iced_wgpu", "winit", "reqwest", "hyper"];

static DIAGNOSTICS: OnceLock<DiagnosticsHandle> = OnceLock::new();

struct AppLogger;

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > log::max_level() {
            return false;
        }
        metadata.level() <= Level::Warn || !is_noisy(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let _ = writeln!(std::io::stderr().lock(), "{}", line);

        if let Some(handle) = DIAGNOSTICS.get() {
            match record.level() {
                Level::Error => handle.log_error(record.target(), record.args().to_string()),
                Level::Warn => handle.log_warning(record.target(), record.args().to_string()),
                _ => {}
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn is_noisy(target: &str) -> bool {
    NOISY_TARGETS
        .iter()
        .any(|noisy| target == *noisy || target.starts_with(&format!("{noisy}::")))
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!(
        "{} [{:>5}] {}: {}",
        Local::now().format("%H:%M:%S%.3f"),
        level,
        target,
        message
    )
}

/// Parses a `RUST_LOG`-style value.
///
/// Only the bare default directive (`info`, `warn,...`) sets the level.
/// Per-target directives such as `prompt_gallery=debug` are ignored.
fn parse_level(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.contains('='))
        .find_map(|directive| directive.parse().ok())
}

/// Installs the logger. Later calls are no-ops.
pub fn init() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Info);

    if log::set_boxed_logger(Box::new(AppLogger)).is_ok() {
        log::set_max_level(level);
        log::debug!("logger initialized at {}", level);
    }
}

/// Starts forwarding warnings and errors into `handle`.
pub fn attach_diagnostics(handle: DiagnosticsHandle) {
    if DIAGNOSTICS.set(handle).is_err() {
        log::debug!("diagnostics already attached to logger");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_levels() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn per_target_directives_do_not_set_global_level() {
        assert_eq!(parse_level("prompt_gallery=trace"), None);
        assert_eq!(parse_level("prompt_gallery=debug,info"), Some(LevelFilter::Info));
        assert_eq!(parse_level(" warn , reqwest=trace"), Some(LevelFilter::Warn));
    }

    #[test]
    fn init_installs_once() {
        init();
        init();
        log::info!("logger reachable after repeated init");
    }

    #[test]
    fn dependency_targets_are_noisy() {
        assert!(is_noisy("wgpu"));
        assert!(is_noisy("wgpu::device"));
        assert!(!is_noisy("wgpu_like"));
        assert!(!is_noisy("prompt_gallery::embed"));
    }

    #[test]
    fn lines_carry_level_and_target() {
        let line = format_line(Level::Warn, "prompt_gallery::catalog", "missing");
        assert!(line.contains("[ WARN] prompt_gallery::catalog: missing"));
    }
}
