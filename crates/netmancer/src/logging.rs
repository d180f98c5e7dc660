//! Tracing setup: diagnostics on stderr, command outcomes in the audit log.
//!
//! The audit log receives only events with target [`AUDIT_TARGET`], one
//! line each: `YYYY-MM-DD HH:MM:SS | <command> | <message>`.

use std::fmt;
use std::path::Path;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{EnvFilter, Targets, filter_fn};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt as tfmt};

pub const AUDIT_TARGET: &str = "netmancer::audit";

/// Record one command outcome in the audit log.
pub fn audit(command: &str, message: &str) {
    tracing::info!(target: AUDIT_TARGET, command, "{message}");
}

/// Install the global subscriber. The returned guard flushes the audit
/// log when dropped and must outlive every `audit` call.
pub fn init(verbosity: u8, log_file: &Path) -> Option<WorkerGuard> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter_fn(|meta| meta.target() != AUDIT_TARGET))
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)));

    let (audit_layer, guard) = match open_appender(log_file) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tfmt::layer()
                .event_format(AuditFormat)
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(Targets::new().with_target(AUDIT_TARGET, Level::INFO));
            (Some(layer), Some(guard))
        }
        Err(err) => {
            eprintln!(
                "warning: audit log disabled, cannot open {}: {err}",
                log_file.display()
            );
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(audit_layer)
        .init();

    guard
}

fn open_appender(path: &Path) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let file_name = path
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or("log file path has no file name")?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)?;
    Ok(appender)
}

// ── Audit line format ────────────────────────────────────────────────

/// `timestamp | command | message`, local time, no level or target.
pub struct AuditFormat;

impl<S, N> FormatEvent<S, N> for AuditFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = AuditFields::default();
        event.record(&mut fields);
        writeln!(
            writer,
            "{} | {} | {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            fields.command,
            fields.message
        )
    }
}

#[derive(Default)]
struct AuditFields {
    command: String,
    message: String,
}

impl Visit for AuditFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "command" => value.clone_into(&mut self.command),
            "message" => value.clone_into(&mut self.message),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "command" => self.command = format!("{value:?}"),
            "message" => self.message = format!("{value:?}"),
            _ => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::registry().with(
            tfmt::layer()
                .event_format(AuditFormat)
                .with_writer(buffer.clone())
                .with_filter(Targets::new().with_target(AUDIT_TARGET, Level::INFO)),
        );
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn audit_line_has_three_columns() {
        let out = capture(|| audit("show-info", "Showed information for interface eth0"));
        let line = out.lines().next().unwrap();
        let parts: Vec<_> = line.split(" | ").collect();
        assert_eq!(parts.len(), 3, "{line}");
        assert!(
            chrono::NaiveDateTime::parse_from_str(parts[0], "%Y-%m-%d %H:%M:%S").is_ok(),
            "bad timestamp in {line}"
        );
        assert_eq!(parts[1], "show-info");
        assert_eq!(parts[2], "Showed information for interface eth0");
    }

    #[test]
    fn only_audit_target_is_written() {
        let out = capture(|| {
            tracing::info!("ordinary diagnostic");
            audit("network-apply", "Applied Netplan configuration successfully");
        });
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("network-apply"));
    }
}
