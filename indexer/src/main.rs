use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use stay_core::destination::load_destinations;
use stay_core::{Destination, DestinationIndex};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query the destination search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from destination JSON/JSONL files and report its size
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Print every token with its posting count
        #[arg(long, default_value_t = false)]
        dump: bool,
    },
    /// Run a search against a freshly built index
    Query {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Search text
        #[arg(long)]
        q: String,
        /// Maximum results
        #[arg(long, default_value_t = 10)]
        k: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, dump } => {
            let destinations = collect_destinations(Path::new(&input))?;
            let index = DestinationIndex::build(&destinations);
            tracing::info!(num_destinations = index.num_docs(), num_tokens = index.len(), "index build complete");
            if dump {
                for token in index.tokens() {
                    let n = index.postings(token).map_or(0, |p| p.len());
                    println!("{token}\t{n}");
                }
            }
            Ok(())
        }
        Commands::Query { input, q, k } => {
            let destinations = collect_destinations(Path::new(&input))?;
            let index = DestinationIndex::build(&destinations);
            let hits = index.search(&q, k);
            tracing::info!(query = %q, hits = hits.len(), "query complete");
            for doc_id in hits {
                println!("{}", serde_json::to_string(&destinations[doc_id])?);
            }
            Ok(())
        }
    }
}

/// Every `.json`/`.jsonl` file under `input` (or `input` itself), in path
/// order so record positions are stable between runs.
fn collect_destinations(input: &Path) -> Result<Vec<Destination>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        return Err(anyhow!("input {} does not exist", input.display()));
    }

    let mut out = Vec::new();
    for file in files {
        let batch = load_destinations(&file)?;
        tracing::debug!(file = %file.display(), records = batch.len(), "loaded destinations");
        out.extend(batch);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn collects_json_and_jsonl_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"term":"Rome, Italy","uid":"A6Dz","type":"city"}]"#).unwrap();
        fs::write(
            dir.path().join("b.jsonl"),
            "{\"term\":\"Osaka, Japan\",\"uid\":\"cXbT\"}\n\n{\"term\":\"Tokyo, Japan\",\"uid\":\"jiHg\"}\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let dests = collect_destinations(dir.path()).unwrap();
        let uids: Vec<&str> = dests.iter().map(|d| d.uid.as_str()).collect();
        assert_eq!(uids, vec!["A6Dz", "cXbT", "jiHg"]);

        let index = DestinationIndex::build(&dests);
        assert_eq!(index.search("japan", 10), vec![1, 2]);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(collect_destinations(Path::new("/definitely/not/here")).is_err());
    }
}
