use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;

use deckforge::acquire::{self, AcquireOptions};
use deckforge::cli::{AcquireArgs, Command, EncodeArgs, RootArgs};
use deckforge::encode::{self, EncodeJob};
use deckforge::index::{self, RankCutoff};
use deckforge::package::JsonPackageWriter;
use deckforge::source::{ContentSource, GenerationSource, WebSource};
use deckforge::store::StorePaths;
use deckforge::tasks::Task;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = RootArgs::parse();
    match cli.command {
        Command::Acquire(args) => cmd_acquire(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn cmd_acquire(args: AcquireArgs) -> Result<()> {
    let cutoff = args.max_rank.map(|max_rank| RankCutoff {
        max_rank,
        inclusive: args.rank_inclusive,
    });
    let entries = index::filter_by_rank(index::load_index(&args.index_file)?, cutoff);
    let paths = StorePaths::under(&args.save_path);
    let options = AcquireOptions {
        concurrency: args.concurrency,
        overwrite: args.overwrite,
    };

    let source: Box<dyn ContentSource> = match args.task {
        Task::Web => Box::new(WebSource::new(
            &args.base_url,
            args.max_retries,
            Duration::from_secs(args.challenge_wait),
        )),
        Task::Generation => {
            let api_key = args
                .api_key
                .as_deref()
                .ok_or_else(|| anyhow!("--api-key is required for the generation task"))?;
            let prompt = args
                .prompt
                .as_deref()
                .ok_or_else(|| anyhow!("--prompt is required for the generation task"))?;
            Box::new(GenerationSource::new(
                &args.completions_url,
                api_key,
                &args.model,
                prompt,
                &args.articulation,
                args.max_retries,
            )?)
        }
    };

    acquire::run(source.as_ref(), &paths, &entries, &options)?;
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> Result<()> {
    let entries = index::load_index(&args.index_file)?;
    let paths = StorePaths::new(args.metadata_path.clone(), args.media_path.clone());

    if args.check_only {
        return encode::check(&paths, &entries, &args.save_path);
    }

    let template = args.task.template(&args.formats_dir)?;
    let transformer = args.task.transformer();
    encode::run(
        EncodeJob {
            deck_id: args.deck_id,
            deck_name: &args.deck_name,
            save_path: &args.save_path,
            paths: &paths,
            template,
            transformer: transformer.as_ref(),
            writer: &JsonPackageWriter,
        },
        &entries,
    )?;
    Ok(())
}
