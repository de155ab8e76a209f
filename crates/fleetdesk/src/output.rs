//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Notifications and the request spinner go to stderr.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};
use tokio::sync::broadcast;

use fleetdesk_core::status::TagSeverity;
use fleetdesk_core::{Notification, Severity};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color ───────────────────────────────────────────────────────────

/// Whether output written to `stream` should carry color codes.
pub fn should_color(mode: ColorMode, stream: &impl IsTerminal) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stream.is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of items in the chosen format.
///
/// - `table`: `to_row` builds one `Tabled` row per item
/// - `json` / `json-compact` / `yaml`: serializes the items themselves
/// - `plain`: `id_fn` yields one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single item. Table output uses `detail_fn`, a pre-formatted
/// key/value block.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

/// A status label, colored by severity when `color` is set.
pub fn tag(label: &str, severity: TagSeverity, color: bool) -> String {
    if !color {
        return label.to_owned();
    }
    match severity {
        TagSeverity::Secondary => label.dimmed().to_string(),
        TagSeverity::Info => label.cyan().to_string(),
        TagSeverity::Warn => label.yellow().to_string(),
        TagSeverity::Success => label.green().to_string(),
        TagSeverity::Danger => label.red().to_string(),
    }
}

/// Page footer for table output, e.g. "page 2/4, 17 total".
pub fn page_footer(page: u32, page_count: u64, total: u64) -> String {
    format!("page {page}/{}, {total} total", page_count.max(1))
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Notifications ───────────────────────────────────────────────────

fn format_notification(n: &Notification, color: bool) -> String {
    let (mark, label) = match n.severity {
        Severity::Success => ("✓", "success"),
        Severity::Info => ("i", "info"),
        Severity::Warn => ("!", "warning"),
        Severity::Error => ("✗", "error"),
    };
    let head = if color {
        match n.severity {
            Severity::Success => format!("{} {}", mark.green(), n.summary.green()),
            Severity::Info => format!("{} {}", mark.cyan(), n.summary),
            Severity::Warn => format!("{} {}", mark.yellow(), n.summary.yellow()),
            Severity::Error => format!("{} {}", mark.red().bold(), n.summary.red()),
        }
    } else {
        format!("{mark} {label}: {}", n.summary)
    };
    match &n.detail {
        Some(detail) => format!("{head}\n  {detail}"),
        None => head,
    }
}

/// Print every queued notification to stderr. Returns how many were
/// errors. Errors are printed even in quiet mode.
pub fn drain_notifications(
    rx: &mut broadcast::Receiver<Notification>,
    color: bool,
    quiet: bool,
) -> usize {
    let mut errors = 0;
    loop {
        match rx.try_recv() {
            Ok(n) => {
                let is_error = n.severity == Severity::Error;
                if is_error {
                    errors += 1;
                }
                if is_error || !quiet {
                    eprintln!("{}", format_notification(&n, color));
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notifications dropped");
            }
            Err(_) => return errors,
        }
    }
}

// ── Spinner ─────────────────────────────────────────────────────────

/// Run `fut` behind a stderr spinner. Hidden when quiet or not a terminal.
pub async fn with_spinner<F: Future>(message: &str, quiet: bool, fut: F) -> F::Output {
    if quiet || !io::stderr().is_terminal() {
        return fut.await;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    let out = fut.await;
    pb.finish_and_clear();
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fleetdesk_core::Notifications;

    use super::*;

    #[derive(serde::Serialize, Tabled)]
    struct Row {
        id: String,
        name: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "a1".into(),
                name: "Depot".into(),
            },
            Row {
                id: "a2".into(),
                name: "Port".into(),
            },
        ]
    }

    fn identity(r: &Row) -> Row {
        Row {
            id: r.id.clone(),
            name: r.name.clone(),
        }
    }

    #[test]
    fn plain_emits_one_id_per_line() {
        let out = render_list(OutputFormat::Plain, &rows(), identity, |r| r.id.clone()).unwrap();
        assert_eq!(out, "a1\na2");
    }

    #[test]
    fn json_keeps_field_names() {
        let out =
            render_list(OutputFormat::JsonCompact, &rows(), identity, |r| r.id.clone()).unwrap();
        assert_eq!(out, r#"[{"id":"a1","name":"Depot"},{"id":"a2","name":"Port"}]"#);
    }

    #[test]
    fn table_has_headers() {
        let out = render_list(OutputFormat::Table, &rows(), identity, |r| r.id.clone()).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("Port"));
    }

    #[test]
    fn drain_counts_errors() {
        let hub = Notifications::new();
        let mut rx = hub.subscribe();
        hub.success("saved");
        hub.error("boom");
        hub.error("again");
        assert_eq!(drain_notifications(&mut rx, false, true), 2);
        assert_eq!(drain_notifications(&mut rx, false, true), 0);
    }

    #[test]
    fn uncoloured_notification_names_severity() {
        let n = Notification {
            severity: Severity::Warn,
            summary: "careful".into(),
            detail: None,
            life: Severity::Warn.life(),
        };
        assert_eq!(format_notification(&n, false), "! warning: careful");
    }

    #[test]
    fn tags_are_plain_without_color() {
        assert_eq!(tag("Done", TagSeverity::Success, false), "Done");
        assert!(tag("Done", TagSeverity::Success, true).contains("Done"));
    }

    #[test]
    fn footer_never_shows_zero_pages() {
        assert_eq!(page_footer(1, 0, 0), "page 1/1, 0 total");
    }
}
