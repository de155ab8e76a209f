//! Clap derive structures for the `fleetdesk` CLI.
//!
//! Defines the command tree, global flags and shared argument groups.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fleetdesk -- admin console for addresses, trucks, orders and trips
#[derive(Debug, Parser)]
#[command(
    name = "fleetdesk",
    version,
    about = "Manage the logistics fleet from the command line",
    long_about = "Administrative console for a logistics backend.\n\n\
        Lists and edits delivery addresses, trucks and orders, and plans,\n\
        starts and completes the trips that carry each order.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "FLEETDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format (defaults to the configured one)
    #[arg(long, short = 'o', env = "FLEETDESK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in, sign out and show the current user
    Auth(AuthArgs),

    /// Manage delivery addresses
    #[command(alias = "addr")]
    Addresses(AddressesArgs),

    /// Manage the truck fleet
    Trucks(TrucksArgs),

    /// Manage customer orders
    Orders(OrdersArgs),

    /// Plan and track trips
    Trips(TripsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Pagination for list commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number, 1-based
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Exchange email and password for a session token
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "FLEETDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Sign in again even when a session exists
        #[arg(long)]
        force: bool,
    },

    /// Drop the session and the stored token
    Logout,

    /// Show the signed-in user
    Whoami,
}

// ── Addresses ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: AddressesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
    /// List addresses
    #[command(alias = "ls")]
    List(PageArgs),

    /// Create an address
    Add(AddressFields),

    /// Change an address; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: AddressFields,
    },

    /// Delete an address
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Debug, Args)]
pub struct AddressFields {
    /// First address line
    #[arg(long)]
    pub line1: Option<String>,

    /// Second address line
    #[arg(long)]
    pub line2: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// State or region
    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub postcode: Option<String>,
}

// ── Trucks ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TrucksArgs {
    #[command(subcommand)]
    pub command: TrucksCommand,
}

#[derive(Debug, Subcommand)]
pub enum TrucksCommand {
    /// List trucks
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Show max weight in tonnes instead of kilograms
        #[arg(long)]
        tonnes: bool,
    },

    /// Show one truck in detail
    Show {
        id: String,

        /// Show max weight in tonnes instead of kilograms
        #[arg(long)]
        tonnes: bool,
    },

    /// Register a truck
    Add(TruckFields),

    /// Change a truck; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: TruckFields,
    },

    /// Delete a truck
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Debug, Args)]
pub struct TruckFields {
    /// Licence plate
    #[arg(long)]
    pub plate: Option<String>,

    #[arg(long)]
    pub vin: Option<String>,

    /// Registration certificate number
    #[arg(long)]
    pub registration: Option<String>,

    #[arg(long)]
    pub driver: Option<String>,

    /// Cargo width, metres
    #[arg(long)]
    pub width: Option<String>,

    /// Cargo height, metres
    #[arg(long)]
    pub height: Option<String>,

    /// Cargo length, metres
    #[arg(long)]
    pub length: Option<String>,

    /// Maximum load, kilograms
    #[arg(long)]
    pub max_weight: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Manufacturing year
    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Whether the truck takes trips
    #[arg(long)]
    pub active: Option<bool>,
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List(PageArgs),

    /// Show an order with its trips
    Show { id: String },

    /// Create an order
    Create(OrderFields),

    /// Change an order; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: OrderFields,
    },

    /// Cancel an order
    Cancel { id: String },
}

#[derive(Debug, Args)]
pub struct OrderFields {
    /// Total cargo weight, kilograms
    #[arg(long)]
    pub cargo_weight: Option<String>,

    /// Destination address id
    #[arg(long)]
    pub destination: Option<String>,

    /// Pallet as WEIGHT:HEIGHT (repeatable; replaces all pallets)
    #[arg(long = "pallet", value_name = "WEIGHT:HEIGHT")]
    pub pallets: Vec<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Lifecycle status (draft, new, in_progress, done, cancelled)
    #[arg(long)]
    pub status: Option<String>,
}

// ── Trips ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TripsArgs {
    #[command(subcommand)]
    pub command: TripsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TripsCommand {
    /// List all trips
    #[command(alias = "ls")]
    List(PageArgs),

    /// List the trips of one order
    ForOrder { order_id: String },

    /// Trucks that can take a trip for an order
    Trucks { order_id: String },

    /// Plan a trip for an order
    Create {
        order_id: String,

        /// Truck id
        #[arg(long)]
        truck: String,

        /// Start date, RFC 3339 or "YYYY-MM-DD HH:MM" local time (defaults to now)
        #[arg(long)]
        start: Option<String>,

        /// Pallet id carried on this trip (repeatable)
        #[arg(long = "pallet")]
        pallets: Vec<String>,

        /// Estimated fuel, litres
        #[arg(long)]
        fuel: String,

        /// Estimated duration, hours
        #[arg(long)]
        duration: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Change a planned trip
    Update {
        trip_id: String,

        #[arg(long)]
        truck: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        fuel: Option<String>,

        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Start a planned trip
    Start { trip_id: String },

    /// Complete a trip with the actual consumption
    Complete {
        trip_id: String,

        /// Actual fuel, litres
        #[arg(long)]
        fuel: String,

        /// Actual duration, hours
        #[arg(long)]
        duration: String,
    },

    /// Delete a trip
    #[command(alias = "rm")]
    Delete { trip_id: String },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Print one value
    Get { key: String },

    /// Change one value and save
    Set { key: String, value: String },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
