use crate::core::calculator::staleness::Cadence;
use crate::models::resource::Resource;
use crate::models::user::Role;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for whops
/// Warehouse operations compliance client (attendance, safety talks, spot checks)
#[derive(Parser, Debug)]
#[command(
    name = "whops",
    version = env!("CARGO_PKG_VERSION"),
    about = "Warehouse operations compliance client: record attendance, safety talks, spot checks and ledgers, and let DOs verify them",
    long_about = None
)]
pub struct Cli {
    /// Override local database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by the user and admin list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Exact day (YYYY-MM-DD)")]
    pub date: Option<String>,

    #[arg(long, help = "Month bucket: YYYY-MM, or a month number 1-12")]
    pub month: Option<String>,

    #[arg(long = "from", help = "First day included (YYYY-MM-DD)")]
    pub date_from: Option<String>,

    #[arg(long = "to", help = "Last day included (YYYY-MM-DD)")]
    pub date_to: Option<String>,

    #[arg(
        long = "where",
        value_name = "FIELD~TEXT",
        help = "Case-insensitive substring match on a field (repeatable)"
    )]
    pub where_: Vec<String>,

    #[arg(long, help = "Free-text search over every field")]
    pub search: Option<String>,

    #[arg(long, value_name = "FIELD", help = "Sort by field (ascending)")]
    pub sort: Option<String>,

    #[arg(long, requires = "sort", help = "Sort descending")]
    pub desc: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the local database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Sign in as warehouse user (or as admin with --admin)
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, help = "Sign in to the admin area")]
        admin: bool,
    },

    /// Sign out and forget the stored token
    Logout {
        #[arg(long, help = "Sign out of the admin area")]
        admin: bool,
    },

    /// Show who is signed in
    Whoami,

    /// Ask an administrator to create an account
    RequestAccess {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long = "warehouse", value_name = "WAREHOUSE_ID")]
        warehouse: String,
    },

    /// Add a new record
    Add {
        #[command(subcommand)]
        record: AddCommand,
    },

    /// Print an empty spot-check form to fill in and pass to `add spot-check`
    SpotCheckTemplate {
        #[arg(long, value_enum, default_value = "weekly")]
        kind: Cadence,
    },

    /// List your own records
    List {
        #[arg(value_enum)]
        resource: Resource,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Print raw JSON instead of a table")]
        json: bool,
    },

    /// Change fields of one of your records
    Edit {
        #[arg(value_enum)]
        resource: Resource,

        id: String,

        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },

    /// Today's overview and spot-check alerts
    Dashboard,

    /// Offline calculators
    Calc {
        #[command(subcommand)]
        calc: CalcCommand,
    },

    /// Administrator commands
    Admin {
        #[command(subcommand)]
        cmd: AdminCommand,
    },

    /// Interactive prompt with inactivity timeout
    Shell {
        #[arg(long, help = "Guard the admin area instead of the user area")]
        admin: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Daily attendance (extra time is computed)
    Attendance {
        #[arg(long, help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "in", default_value = "09:30", help = "Time in (HH:MM)")]
        time_in: String,

        #[arg(long = "out", default_value = "17:30", help = "Time out (HH:MM)")]
        time_out: String,

        #[arg(long, default_value = "")]
        diversion: String,

        #[arg(long, default_value = "")]
        handling: String,

        #[arg(long, help = "WHI signature, default your name")]
        signature: Option<String>,
    },

    /// Safety talk with labours
    SafetyTalk {
        #[arg(long)]
        date: Option<String>,

        #[arg(long, help = "Time (HH:MM)")]
        time: Option<String>,

        #[arg(long = "conducted-by")]
        conducted_by: Option<String>,

        #[arg(long = "labours")]
        labours: Option<String>,

        #[arg(long = "hc-present", value_parser = ["Yes", "No"])]
        hc_present: Option<String>,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long, default_value = "")]
        remarks: String,
    },

    /// Safety talk with truckers
    TruckerTalk {
        #[arg(long)]
        date: Option<String>,

        #[arg(long, help = "Time (HH:MM)")]
        time: Option<String>,

        #[arg(long = "conducted-by")]
        conducted_by: Option<String>,

        #[arg(long = "truck-no")]
        truck_no: Option<String>,

        #[arg(long = "driver")]
        driver: Option<String>,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long, default_value = "Excellent")]
        remarks: String,
    },

    /// Empty-bag ledger entry (balance is computed)
    EmptyBag {
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        product: String,

        #[arg(long, allow_hyphen_values = true)]
        opening: String,

        #[arg(long, allow_hyphen_values = true)]
        receipt: String,

        #[arg(long, allow_hyphen_values = true)]
        issued: String,

        #[arg(long)]
        purpose: Option<String>,

        #[arg(long = "per-ref")]
        per_ref: Option<String>,

        #[arg(long, help = "WHI initial, default your name")]
        initial: Option<String>,
    },

    /// Pre-numbered stationary book usage
    Stationary {
        #[arg(long = "book-no")]
        book_no: Option<String>,

        #[arg(long = "receipt-date")]
        receipt_date: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long = "start-date")]
        start_date: Option<String>,

        #[arg(long = "end-date")]
        end_date: Option<String>,

        #[arg(long)]
        purpose: Option<String>,

        #[arg(long, help = "WHI initial, default your name")]
        initial: Option<String>,
    },

    /// Weekly or quarterly spot check from a YAML/JSON form
    SpotCheck {
        #[arg(long, value_enum, default_value = "weekly")]
        kind: Cadence,

        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CalcCommand {
    /// Time worked beyond the daily baseline
    ExtraTime {
        #[arg(value_name = "IN")]
        time_in: String,

        #[arg(value_name = "OUT")]
        time_out: String,
    },

    /// Running balance: opening + receipt - issued
    Balance {
        #[arg(allow_hyphen_values = true)]
        opening: String,

        #[arg(allow_hyphen_values = true)]
        receipt: String,

        #[arg(allow_hyphen_values = true)]
        issued: String,
    },

    /// Spot-check due status for a last check date
    Due {
        #[arg(long, value_enum, default_value = "weekly")]
        kind: Cadence,

        #[arg(long, help = "Date of the last check (YYYY-MM-DD); omit if none")]
        last: Option<String>,

        #[arg(
            long,
            help = "Reference instant instead of now (RFC 3339, or YYYY-MM-DD for midnight UTC)"
        )]
        today: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Warehouse and user totals
    Dashboard,

    /// List every user's records of one kind
    List {
        #[arg(value_enum)]
        resource: Resource,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Mark a record as verified by you
    Verify {
        #[arg(value_enum)]
        resource: Resource,

        id: String,
    },

    /// Delete a record
    Delete {
        #[arg(value_enum)]
        resource: Resource,

        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage warehouses
    Warehouse {
        #[command(subcommand)]
        cmd: WarehouseCommand,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        cmd: UserCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum WarehouseCommand {
    List,

    Add {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        province: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        capacity: String,

        #[arg(long = "contact-person", default_value = "")]
        contact_person: String,

        #[arg(long = "contact-phone", default_value = "")]
        contact_phone: String,
    },

    Edit {
        id: String,

        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },

    Delete {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List,

    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, value_enum, default_value = "warehouse_manager")]
        role: Role,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        province: String,

        #[arg(long, default_value = "")]
        address: String,
    },

    /// Replace the warehouses assigned to a user
    Assign {
        user_id: String,

        #[arg(long = "warehouses", value_delimiter = ',', num_args = 1.., required = true)]
        warehouses: Vec<String>,
    },

    /// Flip a user between active and inactive
    ToggleStatus { user_id: String },
}
