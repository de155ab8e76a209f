//! Auth command handlers.

use dialoguer::Input;
use tracing::warn;

use fleetdesk_core::types::User;
use fleetdesk_core::{LoginCredentials, Navigation, Route};

use super::{Ctx, util};
use crate::cli::{AuthArgs, AuthCommand};
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn detail(u: &User) -> String {
    [
        format!("ID:    {}", u.id),
        format!("Name:  {}", u.full_name()),
        format!("Email: {}", u.email),
        format!("Role:  {}", u.role),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AuthArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let auth = ctx.console.auth();

    match args.command {
        AuthCommand::Login {
            email,
            password,
            force,
        } => {
            if !force {
                let nav = ctx.console.navigate(&Route::Login.path()).await?;
                if nav == Navigation::Redirect(Route::Dashboard) {
                    let who = auth.user().map(|u| u.email).unwrap_or_default();
                    eprintln!("Already signed in as {who} (use --force to sign in again)");
                    return Ok(());
                }
            }

            let email = match email {
                Some(e) => e,
                None => Input::new()
                    .with_prompt("Email")
                    .interact_text()
                    .map_err(prompt_err)?,
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ").map_err(prompt_err)?,
            };
            if email.trim().is_empty() || password.is_empty() {
                return Err(CliError::Validation {
                    field: "credentials".into(),
                    reason: "email and password cannot be empty".into(),
                });
            }

            let credentials = LoginCredentials::new(email.trim(), password);
            let response =
                output::with_spinner("Signing in", ctx.quiet(), auth.login(&credentials)).await?;

            let name = response
                .user
                .as_ref()
                .map_or_else(|| credentials.email.clone(), User::full_name);
            if !ctx.quiet() {
                eprintln!("Signed in as {name}");
            }
            Ok(())
        }

        AuthCommand::Logout => {
            // Best effort: the local session is dropped whatever the server says.
            if auth.is_authenticated() || ctx.console.api().token_store().load().is_some() {
                if let Err(e) = ctx.console.api().logout().await {
                    warn!(error = %e, "server-side logout failed");
                }
            }
            auth.logout();
            if !ctx.quiet() {
                eprintln!("Signed out");
            }
            Ok(())
        }

        AuthCommand::Whoami => {
            util::enter(ctx, Route::Dashboard).await?;
            let user = auth.user().ok_or(CliError::NotSignedIn)?;
            let out = output::render_single(ctx.format, &user, detail, |u| u.email.clone())?;
            ctx.print(&out);
            Ok(())
        }
    }
}
