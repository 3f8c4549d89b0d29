// src/main.rs
// Generate the hashed keyword table header consumed by the lexer.
// Usage:
//   cargo run                                  # writes tables/lexer_keyword_tables.h
//   cargo run -- out.h --json out.json -v
//   cargo run -- out.h --keywords words.txt --min 8 --max 64

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use kwhash::lexer::{
    keywords::{KeywordSet, parse_keyword_list},
    tables::{
        DEFAULT_KEYWORDS, HeaderConfig, SearchRange, build_keyword_table, render_header,
        save_table_json, verify::verify_table, write_header,
    },
};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

/// Generate the hashed keyword table header for the lexer
#[derive(Parser, Debug)]
#[command(name = "kwhash")]
struct Args {
    /// Header to write
    #[arg(default_value = "tables/lexer_keyword_tables.h")]
    out: PathBuf,

    /// Smallest table size tried
    #[arg(long, default_value_t = SearchRange::default().min)]
    min: usize,

    /// Table sizes tried stop below this
    #[arg(long, default_value_t = SearchRange::default().max)]
    max: usize,

    /// Keyword list, one per line (`#` comments allowed). Built-in list if omitted.
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// JSON file overriding the names used in the header
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the table as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Echo the header to stdout. Progress lines always go to stderr.
    #[arg(long)]
    print: bool,

    /// Only log errors. Overrides -v.
    #[arg(short, long)]
    quiet: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(quiet: bool, verbose: u8) -> Result<()> {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // library code logs through the `log` facade
    tracing_log::LogTracer::init().context("failed to set log tracer")?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("KWHASH_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info);
    }));
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<HeaderConfig> {
    let Some(path) = path else {
        return Ok(HeaderConfig::default());
    };
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&src).with_context(|| format!("failed to parse config {}", path.display()))
}

fn load_keywords(path: Option<&PathBuf>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect());
    };
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read keywords {}", path.display()))?;
    let words = parse_keyword_list(&src);
    if words.is_empty() {
        tracing::warn!("no keywords in {}", path.display());
    }
    Ok(words)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose)?;

    let cfg = load_config(args.config.as_ref())?;
    let words = load_keywords(args.keywords.as_ref())?;
    let set = KeywordSet::from_keywords(&words, &cfg.data_name).context("invalid keyword list")?;
    let range = SearchRange::new(args.min, args.max);

    eprintln!(
        "[kwhash] {} keywords, trying sizes [{}, {})",
        set.len(),
        range.min,
        range.max
    );
    let table = build_keyword_table(&set, range).context("failed to build keyword table")?;
    verify_table(&set, &table).context("generated table failed verification")?;
    eprintln!(
        "[kwhash] size {}: max depth {}, used {} of {}, {} slots",
        table.candidate.size,
        table.candidate.max_depth,
        table.candidate.used_slots,
        table.candidate.size,
        table.slots.max_index() + 1
    );

    let text = render_header(&set, &table.slots, &cfg);
    write_header(&args.out, &text)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    eprintln!("[kwhash] wrote {}", args.out.display());
    if args.print {
        print!("{text}");
    }

    if let Some(json) = &args.json {
        save_table_json(json, &table)
            .with_context(|| format!("failed to write {}", json.display()))?;
        eprintln!("[kwhash] wrote {}", json.display());
    }
    Ok(())
}
