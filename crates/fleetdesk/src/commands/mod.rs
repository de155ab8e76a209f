//! Command dispatch: each handler plays a view, passing the routing guard
//! first and then driving the stores.

pub mod addresses;
pub mod auth;
pub mod config_cmd;
pub mod orders;
pub mod trips;
pub mod trucks;
pub mod util;

use fleetdesk_core::Console;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a handler needs for one invocation.
pub struct Ctx<'a> {
    pub console: &'a Console,
    pub global: &'a GlobalOpts,
    pub format: OutputFormat,
    /// Color status tags in table output.
    pub color: bool,
    /// Configured rows per page, used when `--page-size` is absent.
    pub page_size: u32,
}

impl Ctx<'_> {
    pub fn quiet(&self) -> bool {
        self.global.quiet
    }

    pub fn print(&self, rendered: &str) {
        crate::output::print_output(rendered, self.global.quiet);
    }
}

/// Dispatch a backend-bound command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(args, ctx).await,
        Command::Addresses(args) => addresses::handle(args, ctx).await,
        Command::Trucks(args) => trucks::handle(args, ctx).await,
        Command::Orders(args) => orders::handle(args, ctx).await,
        Command::Trips(args) => trips::handle(args, ctx).await,
        // Handled before a console exists
        Command::Config(args) => config_cmd::handle(args, ctx.global),
        Command::Completions(_) => Ok(()),
    }
}
