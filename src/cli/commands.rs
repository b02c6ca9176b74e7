use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[cfg(feature = "unstable-dynamic")]
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate, ValueCompleter};

#[derive(Parser, Debug)]
#[command(name = "mdtree")]
#[command(version)]
#[command(about = "Split markdown documents into section files and put them back together")]
#[command(
    long_about = "mdtree - Explode a markdown document into one file per section with an index,\n\
    assemble such a directory back into a single document, and inspect heading structure.\n\n\
    Examples:\n  \
    mdtree explode guide.md guide/        # One file per ## section plus index.md\n  \
    mdtree assemble guide/ guide.md       # Rebuild the document\n  \
    mdtree tree guide.md                  # Show heading tree\n  \
    mdtree extract guide.md Installation  # Print one section\n  \
    mdtree check-links -r README.md       # Check local links, following .md files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug details to stderr
    ///
    /// Equivalent to RUST_LOG=debug. RUST_LOG still takes precedence per module.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a document into one file per level-2 section plus index.md
    ///
    /// Each section file starts with the section heading promoted to level 1;
    /// every heading inside it moves up one level. Headings inside fenced code
    /// blocks are left untouched.
    Explode {
        /// Markdown document to split
        #[arg(add = markdown_file_completer())]
        file: PathBuf,

        /// Directory for the section files (created if missing)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        output_dir: PathBuf,
    },

    /// Rebuild a document from an exploded directory
    ///
    /// Reads index.md, follows its section links in order and demotes every
    /// heading one level. Unreadable section files are skipped with a warning.
    Assemble {
        /// Directory containing index.md and the section files
        #[arg(value_hint = clap::ValueHint::DirPath)]
        input_dir: PathBuf,

        /// Where to write the assembled document
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output_file: PathBuf,
    },

    /// List all headings in the document
    List {
        #[arg(add = markdown_file_completer())]
        file: PathBuf,

        /// Output format (default from config, otherwise text)
        #[arg(short = 'f', long = "format")]
        format: Option<OutputFormat>,

        /// Show only headings at this level (1-6)
        #[arg(short = 'L', long = "level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(1..=6))]
        level: Option<u8>,

        /// Show only headings containing this text (case-insensitive)
        #[arg(long = "filter", value_name = "PATTERN", conflicts_with = "level")]
        filter: Option<String>,
    },

    /// Show heading tree structure with box-drawing characters
    Tree {
        #[arg(add = markdown_file_completer())]
        file: PathBuf,
    },

    /// Extract one section by heading text (case-insensitive)
    ///
    /// The section runs from the heading to the next heading of the same or a
    /// higher level.
    Extract {
        #[arg(add = markdown_file_completer())]
        file: PathBuf,

        /// Heading text to look for
        heading: String,

        /// Write `{slug}.md` into this directory instead of printing
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Extract every section at one heading level
    ExtractAll {
        #[arg(add = markdown_file_completer())]
        file: PathBuf,

        /// Heading level (1-6, default from config, otherwise 2)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        level: Option<u8>,

        /// Write numbered `NN-{slug}.md` files into this directory instead of printing
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Check that the links in a document point somewhere
    ///
    /// Relative links must resolve to an existing file or directory. Anchors
    /// are skipped; e-mail addresses and external URLs are listed without
    /// being contacted.
    CheckLinks {
        #[arg(add = markdown_file_completer())]
        file: PathBuf,

        /// Also check linked markdown files, each once
        #[arg(short = 'r', long = "recursive")]
        recursive: bool,
    },

    /// Show the config file location and the settings in effect
    Config {
        /// Write the current settings to the config file
        #[arg(long = "init")]
        init: bool,
    },

    /// Print a table of contents of anchor links
    Toc {
        #[arg(add = markdown_file_completer())]
        file: PathBuf,

        /// Deepest heading level to include (default from config, otherwise 3)
        #[arg(long = "max-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(1..=6))]
        max_level: Option<u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `## Heading` line per heading
    Text,
    /// JSON array of `{ "level", "text" }`
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring case.
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

#[cfg(feature = "unstable-dynamic")]
fn markdown_file_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(MarkdownCompleter)
}

#[cfg(not(feature = "unstable-dynamic"))]
fn markdown_file_completer() -> clap::builder::ValueHint {
    clap::ValueHint::FilePath
}

/// Completes directories and `.md`/`.markdown` files.
#[cfg(feature = "unstable-dynamic")]
struct MarkdownCompleter;

#[cfg(feature = "unstable-dynamic")]
impl ValueCompleter for MarkdownCompleter {
    fn complete(&self, current: &std::ffi::OsStr) -> Vec<CompletionCandidate> {
        use std::path::Path;

        let input = current.to_string_lossy();
        let (search_dir, prefix) = split_completion_input(&input);
        let prefix = prefix.to_lowercase();

        let Ok(entries) = std::fs::read_dir(&search_dir) else {
            return vec![];
        };

        let mut candidates: Vec<CompletionCandidate> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                let name = path.file_name()?.to_string_lossy().to_string();
                if !name.to_lowercase().starts_with(&prefix) {
                    return None;
                }

                let value = if search_dir == Path::new(".") {
                    name
                } else {
                    search_dir.join(&name).to_string_lossy().to_string()
                };

                if path.is_dir() {
                    let value = if value.ends_with('/') { value } else { format!("{value}/") };
                    Some(CompletionCandidate::new(value).help(Some("directory".into())))
                } else if is_markdown(&path) {
                    Some(CompletionCandidate::new(value))
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| a.get_value().cmp(b.get_value()));
        candidates
    }
}

/// Split a partially typed path into the directory to list and the file
/// name prefix to match. `docs/RE` lists `docs` for `RE`, `docs/` lists
/// everything in `docs/`, a bare `RE` searches the current directory.
#[cfg(feature = "unstable-dynamic")]
fn split_completion_input(input: &str) -> (PathBuf, String) {
    use std::path::Path;

    if input.is_empty() {
        return (PathBuf::from("."), String::new());
    }
    if input.ends_with('/') || input.ends_with('\\') {
        return (PathBuf::from(input), String::new());
    }

    let path = Path::new(input);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    (dir, prefix)
}

#[cfg(feature = "unstable-dynamic")]
fn is_markdown(path: &std::path::Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ext == "md" || ext == "markdown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_explode() {
        let cli = Cli::try_parse_from(["mdtree", "explode", "doc.md", "out", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Explode { file, output_dir } => {
                assert_eq!(file, PathBuf::from("doc.md"));
                assert_eq!(output_dir, PathBuf::from("out"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_extract_all_level_range() {
        let cli = Cli::try_parse_from(["mdtree", "extract-all", "doc.md", "3"]).unwrap();
        assert!(matches!(cli.command, Command::ExtractAll { level: Some(3), .. }));
        assert!(Cli::try_parse_from(["mdtree", "extract-all", "doc.md", "7"]).is_err());
    }

    #[test]
    fn test_parse_check_links_and_list_filters() {
        let cli = Cli::try_parse_from(["mdtree", "check-links", "-r", "README.md"]).unwrap();
        assert!(matches!(cli.command, Command::CheckLinks { recursive: true, .. }));

        let cli = Cli::try_parse_from(["mdtree", "list", "doc.md", "-L", "2"]).unwrap();
        assert!(matches!(cli.command, Command::List { level: Some(2), filter: None, .. }));
        assert!(
            Cli::try_parse_from(["mdtree", "list", "doc.md", "-L", "2", "--filter", "x"]).is_err()
        );
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_config("yaml"), None);
    }

    #[cfg(feature = "unstable-dynamic")]
    #[test]
    fn test_split_completion_input() {
        assert_eq!(split_completion_input(""), (PathBuf::from("."), String::new()));
        assert_eq!(split_completion_input("RE"), (PathBuf::from("."), "RE".to_string()));
        assert_eq!(
            split_completion_input("docs/RE"),
            (PathBuf::from("docs"), "RE".to_string())
        );
        assert_eq!(split_completion_input("docs/"), (PathBuf::from("docs/"), String::new()));
    }
}
