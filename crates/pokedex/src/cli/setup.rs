use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "pokedex",
    bin_name = "pokedex",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Serve, browse and create paginated, type-filtered records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: pokedex.toml in the user config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Server to talk to (overrides server_url)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub server: Option<String>,

    /// Work on the data file directly instead of a server
    #[arg(long, global = true, conflicts_with = "server", help_heading = "Options")]
    pub local: bool,

    /// Data file used by `serve` and `--local` (overrides data_file)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (overrides bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Print one page of records
    #[command(alias = "ls")]
    List {
        /// Page number, starting at 1
        #[arg(
            long,
            short,
            default_value_t = 1,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(1..)
        )]
        page: i64,

        /// Records per page (default: default_page_size)
        #[arg(long, short = 's', allow_negative_numbers = true)]
        page_size: Option<i64>,

        /// Comma-separated types; records with any of them match
        #[arg(long, short)]
        query: Option<String>,
    },

    /// Create a record
    #[command(alias = "new")]
    Create {
        #[arg(long, default_value = "")]
        name: String,

        /// Comma-separated types
        #[arg(long, default_value = "")]
        types: String,

        /// Image URL, must start with http
        #[arg(long, default_value = "")]
        sprite: String,
    },

    /// Create every record in a JSON array file
    Import {
        /// JSON array of {"name", "types", "sprite"}
        file: PathBuf,
    },

    /// Page through records interactively
    Browse {
        /// Records per page (default: default_page_size)
        #[arg(long, short = 's')]
        page_size: Option<usize>,

        /// Initial comma-separated type filter
        #[arg(long, short)]
        query: Option<String>,
    },
}

impl Commands {
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve { .. })
    }
}
