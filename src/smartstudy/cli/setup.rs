use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "smartstudy", bin_name = "smartstudy", version = get_version())]
#[command(about = "Local document store and account tools for SmartStudy", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the collections and config.json
    #[arg(long, global = true, env = "SMARTSTUDY_HOME", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show collection and document counts
    Status,

    /// Write every collection to a JSON file
    Export {
        /// Output file (default: <db_name>_<YYYY-MM-DD>.json in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace collections with the contents of an export file
    Import { path: PathBuf },

    /// Remove all documents and restore default settings
    Clear {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },

    /// Clear the database, then add the demo courses and settings
    ResetDemo {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },

    /// Add the demo courses and settings if there are no courses yet
    Seed,

    /// List documents of a collection
    #[command(alias = "ls")]
    List {
        collection: String,

        /// Only documents where FIELD equals VALUE (repeatable)
        #[arg(short = 'w', long = "where", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Show one document
    Get { collection: String, id: String },

    /// Add a document given as a JSON object
    Add { collection: String, json: String },

    /// Merge a JSON object into a document
    Update {
        collection: String,
        id: String,
        json: String,
    },

    /// Delete a document
    #[command(alias = "rm")]
    Delete { collection: String, id: String },

    /// Create an account and sign in
    Register {
        email: String,

        #[arg(long)]
        password: String,

        /// Extra profile fields as a JSON object
        #[arg(long)]
        profile: Option<String>,
    },

    /// Sign in
    Login {
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Change a user's password
    Passwd {
        /// User id
        id: String,

        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "smartstudy",
            "list",
            "courses",
            "--where",
            "level=Beginner",
            "-w",
            "rating=4.8",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                collection,
                filters,
            } => {
                assert_eq!(collection, "courses");
                assert_eq!(filters, vec!["level=Beginner", "rating=4.8"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_data_dir_after_subcommand() {
        let cli =
            Cli::try_parse_from(["smartstudy", "status", "--data-dir", "/tmp/study", "-v"])
                .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/study")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_register_requires_password() {
        assert!(Cli::try_parse_from(["smartstudy", "register", "a@b.c"]).is_err());
    }

    #[test]
    fn test_version_has_package_version() {
        assert!(get_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
