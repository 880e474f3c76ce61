use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use devkit_codec::{DigestAlgorithm, IdKind, Nationality};

#[derive(Parser)]
#[command(
    name = "devkit",
    about = "Developer utilities: JSON diff and formatting, encoding, hashing, time zones and test data",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare the key paths and values of two JSON documents
    Diff(DiffArgs),
    /// Unwrap JSON that has been stringified one or more times
    Unwrap(InputArgs),
    /// Pretty-print JSON
    Fmt(FmtArgs),
    /// Minify JSON
    Minify(InputArgs),
    /// Escape JSON as a string literal
    Escape(InputArgs),
    /// Base64-encode text
    Encode(TextArgs),
    /// Decode base64 to text
    Decode(TextArgs),
    /// Hash text
    Hash(HashArgs),
    /// Inspect a base64 encoded image
    Image(InputArgs),
    /// Generate random v4 UUIDs
    Uuid(UuidArgs),
    /// Convert a wall-clock time between time zones
    Time(TimeArgs),
    /// Generate or validate national ID, Iqama and passport numbers
    Id(IdArgs),
    /// Generate fake person records
    Person(PersonArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub a: String,
    pub b: String,
    /// Show added and removed paths as a tree
    #[arg(long)]
    pub tree: bool,
    /// Merge the tree recursively instead of one level deep
    #[arg(long, requires = "tree")]
    pub deep_merge: bool,
}

/// File input; `-` or no argument reads stdin.
#[derive(Args)]
pub struct InputArgs {
    pub file: Option<String>,
}

#[derive(Args)]
pub struct FmtArgs {
    pub file: Option<String>,
    #[arg(long)]
    pub indent: Option<usize>,
}

/// Literal text input; `-` or no argument reads stdin.
#[derive(Args)]
pub struct TextArgs {
    pub text: Option<String>,
}

#[derive(Args)]
pub struct HashArgs {
    #[arg(short, long, default_value = "sha256")]
    pub algorithm: DigestAlgorithm,
    pub text: Option<String>,
}

#[derive(Args)]
pub struct UuidArgs {
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

#[derive(Args)]
pub struct TimeArgs {
    /// Time to convert; the current time when omitted
    pub input: Option<String>,
    /// Zone the input is written in (IANA name, preset name or abbreviation)
    #[arg(long)]
    pub from: Option<String>,
    /// Target zone; repeat for several. Defaults to the preset zones
    #[arg(long)]
    pub to: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// nid, iqama or passport
    #[arg(short, long, default_value = "nid")]
    pub kind: IdKind,
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
    /// Check an existing number instead of generating new ones
    #[arg(long)]
    pub validate: Option<String>,
}

#[derive(Args)]
pub struct PersonArgs {
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
    /// saudi or non-saudi
    #[arg(long, default_value = "saudi")]
    pub nationality: Nationality,
    /// Document kind for non-Saudi records: iqama or passport
    #[arg(long, default_value = "nid")]
    pub id_type: IdKind,
}
