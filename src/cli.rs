//! CLI argument parsing for the deck pipeline.
//!
//! The CLI stays thin: it selects a task pairing and paths, then hands off
//! to the acquisition or encoding stage.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tasks::Task;

/// Default dictionary endpoint for the web source.
pub const DEFAULT_BASE_URL: &str = "https://en.openrussian.org/ru";

/// Default completion endpoint for the generation source.
pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";

#[derive(Parser, Debug)]
#[command(
    name = "deckforge",
    version,
    about = "Acquire vocabulary entries and package them as study decks",
    after_help = "Examples:\n  deckforge acquire --task web --index-file indexes/ru.txt --save-path out\n  deckforge acquire --task generation --index-file indexes/ru.txt --save-path out \\\n      --api-key keys/openai --prompt prompts/en2ru.txt\n  deckforge encode --task web --index-file indexes/ru.txt --metadata-path out/metadata \\\n      --media-path out/media --save-path out --deck-id 1001 --deck-name ru-deck\n  deckforge encode --task web --index-file indexes/ru.txt --metadata-path out/metadata \\\n      --media-path out/media --save-path out --deck-id 1001 --deck-name ru-deck --check-only",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch raw entries for each identifier and persist them
    Acquire(AcquireArgs),
    /// Encode persisted entries into a packaged deck, or check store health
    Encode(EncodeArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Fetch and persist raw entries for a list of identifiers")]
pub struct AcquireArgs {
    /// Source/template pairing to run
    #[arg(long, value_enum)]
    pub task: Task,

    /// Tab-separated index file (identifier, optional rank)
    #[arg(long, value_name = "FILE")]
    pub index_file: PathBuf,

    /// Directory receiving the metadata/ and media/ stores
    #[arg(long, value_name = "DIR")]
    pub save_path: PathBuf,

    /// Worker pool size
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Re-fetch identifiers that already have a record
    #[arg(long)]
    pub overwrite: bool,

    /// Per-identifier retry budget
    #[arg(long, default_value_t = 5)]
    pub max_retries: usize,

    /// Drop entries ranked at or beyond this cutoff
    #[arg(long, value_name = "RANK")]
    pub max_rank: Option<u32>,

    /// Treat the rank cutoff as inclusive (keep rank == max-rank)
    #[arg(long, requires = "max_rank")]
    pub rank_inclusive: bool,

    /// Dictionary base URL for the web task
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait when a challenge page is detected
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    pub challenge_wait: u64,

    /// Completion endpoint for the generation task
    #[arg(long, value_name = "URL", default_value = DEFAULT_COMPLETIONS_URL)]
    pub completions_url: String,

    /// Backend credential: literal or path to a key file (generation task)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Completion model name (generation task)
    #[arg(long, value_name = "MODEL", default_value = "gpt-3.5-turbo-instruct")]
    pub model: String,

    /// Prompt prefix: literal or path to a prompt file (generation task)
    #[arg(long, value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Task articulation appended to the prompt (generation task)
    #[arg(long, value_name = "TEXT", default_value = "Define the following word")]
    pub articulation: String,
}

#[derive(Parser, Debug)]
#[command(about = "Encode persisted entries into a packaged deck")]
pub struct EncodeArgs {
    /// Source/template pairing to run
    #[arg(long, value_enum)]
    pub task: Task,

    /// Tab-separated index file (identifier, optional rank)
    #[arg(long, value_name = "FILE")]
    pub index_file: PathBuf,

    /// Metadata store directory
    #[arg(long, value_name = "DIR")]
    pub metadata_path: PathBuf,

    /// Media store directory
    #[arg(long, value_name = "DIR")]
    pub media_path: PathBuf,

    /// Directory receiving the packaged deck or check reports
    #[arg(long, value_name = "DIR", default_value = "outputs")]
    pub save_path: PathBuf,

    /// Deck identifier baked into the artifact name
    #[arg(long, value_name = "ID")]
    pub deck_id: i64,

    /// Deck name baked into the artifact name
    #[arg(long, value_name = "NAME")]
    pub deck_name: String,

    /// Only report identifiers missing from the stores; no packaging
    #[arg(long)]
    pub check_only: bool,

    /// Directory holding per-task presentation resources
    #[arg(long, value_name = "DIR", default_value = "formats")]
    pub formats_dir: PathBuf,
}
