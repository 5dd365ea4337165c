use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rWorkHistory
/// CLI application to keep an employment history with SQLite
#[derive(Parser)]
#[command(
    name = "rworkhistory",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple employment history CLI: records grouped by employer and client, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log in with the configured credentials
    Login {
        #[arg(long = "user", short = 'u')]
        user: String,

        #[arg(long = "password", short = 'p')]
        password: String,

        #[arg(long = "phone")]
        phone: String,

        /// Never time out because of inactivity
        #[arg(long = "stay-signed-in")]
        stay_signed_in: bool,
    },

    /// Log out and stop the session
    Logout,

    /// Inspect or drive the inactivity monitor
    Session {
        #[arg(long = "status", help = "Show the session state (default)")]
        status: bool,

        #[arg(long = "extend", help = "Count as activity and restart the timeout")]
        extend: bool,

        #[arg(
            long = "stay-signed-in",
            value_enum,
            value_name = "on|off",
            help = "Suspend or resume the inactivity timeout"
        )]
        stay_signed_in: Option<Toggle>,

        /// Keep the session open in the terminal: every line typed is
        /// activity; `e` extends, `stay on`/`stay off` toggle, `q` logs out
        #[arg(long = "watch")]
        watch: bool,
    },

    /// Add an employment record
    Add {
        #[arg(long, short = 'e')]
        employer: String,

        #[arg(long, short = 'p')]
        position: String,

        #[arg(long, short = 'c')]
        client: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD), ignored with --till
        #[arg(long)]
        to: Option<String>,

        /// Ongoing employment
        #[arg(long)]
        till: bool,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Edit an employment record
    Edit {
        id: i64,

        #[arg(long, short = 'e')]
        employer: Option<String>,

        #[arg(long, short = 'p')]
        position: Option<String>,

        #[arg(long, short = 'c', conflicts_with = "clear_client")]
        client: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long, conflicts_with = "clear_to")]
        to: Option<String>,

        #[arg(long, conflicts_with = "no_till")]
        till: bool,

        /// Mark the record as no longer ongoing
        #[arg(long = "no-till")]
        no_till: bool,

        #[arg(long = "desc", conflicts_with = "clear_desc")]
        description: Option<String>,

        #[arg(long = "clear-client")]
        clear_client: bool,

        #[arg(long = "clear-to")]
        clear_to: bool,

        #[arg(long = "clear-desc")]
        clear_desc: bool,
    },

    /// Delete an employment record
    Del {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show a single record
    Show { id: i64 },

    /// List records grouped by employer and client
    List {
        #[arg(long, help = "Filter by employer (case-insensitive substring)")]
        employer: Option<String>,

        #[arg(long, help = "Filter by position (case-insensitive substring)")]
        position: Option<String>,

        #[arg(long, default_value = "all", help = "Filter by status: all, current, past")]
        status: String,

        /// Sort by employer, position, from, to or client.
        /// Repeating the current field flips the direction.
        #[arg(long = "sort-by", conflicts_with = "clear_sort")]
        sort_by: Option<String>,

        #[arg(long = "clear-sort", help = "Remove the saved sort")]
        clear_sort: bool,

        /// Expand or collapse an employer group
        #[arg(long, value_name = "EMPLOYER")]
        toggle: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip)
        #[arg(long)]
        compress: bool,
    },

    /// Export employment records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
