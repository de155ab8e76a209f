mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::Ctx;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands work without a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "fleetdesk", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::resolve(&cli.global)?;
            let console = config::build_console(&cfg)?;
            let color_err = output::should_color(cli.global.color, &std::io::stderr());

            // Subscribe before anything runs so no notification is missed.
            let mut notifications = console.notifications().subscribe();

            let ctx = Ctx {
                console: &console,
                global: &cli.global,
                format: config::output_format(&cli.global, &cfg),
                color: output::should_color(cli.global.color, &std::io::stdout()),
                page_size: cfg.page_size,
            };

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &ctx).await;

            let errors =
                output::drain_notifications(&mut notifications, color_err, cli.global.quiet);
            match result {
                Ok(()) if errors > 0 => Err(CliError::Failed {
                    action: "the command".into(),
                }),
                other => other,
            }
        }
    }
}
