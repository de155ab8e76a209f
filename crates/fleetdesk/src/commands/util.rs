//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use fleetdesk_core::types::PageParams;
use fleetdesk_core::{Confirm, ConfirmPrompt, Navigation, Pagination, Route};

use super::Ctx;
use crate::cli::PageArgs;
use crate::error::CliError;

/// Pass the routing guard for `route`. Being bounced to the login view
/// means there is no usable session.
pub async fn enter(ctx: &Ctx<'_>, route: Route) -> Result<(), CliError> {
    match ctx.console.navigate(&route.path()).await? {
        Navigation::Proceed(_) => Ok(()),
        Navigation::Redirect(Route::Login) => Err(CliError::NotSignedIn),
        Navigation::Redirect(other) => {
            debug!(from = %route, to = %other, "guard redirect");
            Ok(())
        }
    }
}

/// Show the requested page: mount when the store already sits on it,
/// otherwise move there (which fetches once).
pub async fn load_page<S: Pagination>(store: &S, args: &PageArgs, default_size: u32) {
    let size = args.page_size.unwrap_or(default_size);
    if store.list().params() == PageParams::new(args.page, size) {
        store.mount().await;
    } else {
        store.set_pagination(Some(args.page), Some(size)).await;
    }
}

/// Turn a `false` from a store mutation into an error; the reason was
/// already reported as a notification.
pub fn ensure(ok: bool, action: &str) -> Result<(), CliError> {
    if ok {
        Ok(())
    } else {
        Err(CliError::Failed {
            action: action.into(),
        })
    }
}

// ── Confirmation ────────────────────────────────────────────────────

/// Refuse to prompt when stdin is not a terminal and `--yes` is absent.
pub fn require_interactive(action: &str, yes: bool) -> Result<(), CliError> {
    if yes || io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }
    require_interactive(message, yes)?;
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))
}

/// Terminal-backed confirmation for the trip workflow.
pub struct TerminalConfirm {
    pub assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            return true;
        }
        let text = format!(
            "{}: {} ({} / {})",
            prompt.header, prompt.message, prompt.accept_label, prompt.reject_label
        );
        // dialoguer blocks on stdin
        tokio::task::spawn_blocking(move || confirm(&text, false).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Parse a trip start date: RFC 3339, or local "YYYY-MM-DD HH:MM", or a
/// bare local date (midnight).
pub fn parse_start(raw: &str) -> Result<DateTime<Utc>, CliError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let invalid = || CliError::Validation {
        field: "start".into(),
        reason: format!("expected RFC 3339 or YYYY-MM-DD HH:MM, got '{raw}'"),
    };

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| invalid())?;

    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// `Some(value)` unless blank, for optional form fields.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Dash for missing values in detail views.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn rfc3339_start_is_taken_as_is() {
        let dt = parse_start("2024-06-15T08:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn local_start_round_trips_through_local_time() {
        let dt = parse_start("2024-06-15 08:30").unwrap();
        assert_eq!(
            dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            "2024-06-15 08:30"
        );
    }

    #[test]
    fn garbage_start_is_a_usage_error() {
        let err = parse_start("next tuesday").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn helpers_treat_blank_as_missing() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
