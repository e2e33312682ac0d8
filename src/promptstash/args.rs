use clap::{Parser, Subcommand, ValueEnum};
use promptstash::catalog::SortBy;

/// "0.3.2" for tagged release builds, "0.3.2@abc1234 2024-01-15 14:30" otherwise.
fn version() -> &'static str {
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
#[command(name = "promptstash", version = version())]
#[command(about = "Store, tag, search and edit reusable text prompts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Title,
    Updated,
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Title => SortBy::Title,
            SortField::Updated => SortBy::UpdatedAt,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List prompts
    #[command(alias = "ls")]
    List {
        /// Only prompts whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only prompts carrying this tag (repeat to require several)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Sort field
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Ascending order
        #[arg(long, conflicts_with = "desc")]
        asc: bool,

        /// Descending order
        #[arg(long)]
        desc: bool,
    },

    /// Show a prompt in full
    #[command(alias = "v")]
    View {
        /// Prompt id (a unique prefix is enough)
        id: String,
    },

    /// List every tag in use
    Tags,

    /// Create a new prompt
    #[command(alias = "n")]
    Create {
        /// Title (defaults to "Untitled Prompt")
        #[arg(long)]
        title: Option<String>,

        /// Prompt text
        #[arg(long)]
        content: String,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Change a prompt
    #[command(alias = "e")]
    Edit {
        /// Prompt id (a unique prefix is enough)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New prompt text, checked against the editor limits
        #[arg(long)]
        content: Option<String>,

        /// Replace the tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a prompt
    #[command(alias = "rm")]
    Delete {
        /// Prompt id (a unique prefix is enough)
        id: String,
    },

    /// Copy a prompt under a new id
    #[command(alias = "dup")]
    Duplicate {
        /// Prompt id (a unique prefix is enough)
        id: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (max-length, auto-save-interval, read-only, latency, storage-key)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::parse_from([
            "promptstash", "list", "-s", "api", "-t", "a", "-t", "b", "--sort", "title", "--desc",
        ]);
        match cli.command {
            Some(Commands::List {
                search,
                tags,
                sort,
                asc,
                desc,
            }) => {
                assert_eq!(search.as_deref(), Some("api"));
                assert_eq!(tags, vec!["a", "b"]);
                assert_eq!(sort, Some(SortField::Title));
                assert!(!asc);
                assert!(desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn asc_and_desc_conflict() {
        assert!(Cli::try_parse_from(["promptstash", "list", "--asc", "--desc"]).is_err());
    }

    #[test]
    fn create_requires_content() {
        assert!(Cli::try_parse_from(["promptstash", "create", "--title", "x"]).is_err());
    }
}
