use anyhow::Result;
use clap::{Parser, Subcommand};
use recipe_core::persist::{load_snapshot, save_snapshot, IndexPaths};
use recipe_core::{
    CatalogFilter, EngineConfig, IndexBuilder, IndexHandle, MalformedPolicy, RankedResult, SearchRequest, Snapshot,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod input;
mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(name = "recipe-indexer")]
#[command(about = "Build and query a TF-IDF recipe index", long_about = None)]
struct Cli {
    /// Index directory (overrides recipes.toml / RECIPES_INDEX_DIR)
    #[arg(long, global = true)]
    index: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a JSON/JSONL file or a directory of them
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Output index directory (defaults to the configured index directory)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Fail on the first record missing an id or title, and on an empty corpus
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Free-text search with optional filters
    Search {
        query: String,
        #[arg(long)]
        k: Option<usize>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        area: Option<String>,
        /// Keep only results containing any of these ingredients (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Give up on the scoring scan after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Rank recipes by how many of the given ingredients they contain
    Ingredients {
        #[arg(required = true)]
        ingredients: Vec<String>,
        #[arg(long)]
        k: Option<usize>,
    },
    /// List recipes
    Recipes {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one recipe as JSON
    Show { id: String },
    /// List distinct categories
    Categories,
    /// List distinct areas
    Areas,
    /// First recipes of the collection
    Popular {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Read queries from stdin until `exit`
    Interactive {
        #[arg(long, default_value_t = 5)]
        k: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(index) = cli.index {
        settings.index_dir = index;
    }

    match cli.command {
        Commands::Build { input, output, strict } => {
            let output = output.unwrap_or_else(|| settings.index_dir.clone());
            build(&input, &output, strict, &settings.engine)
        }
        Commands::Search { query, k, category, area, ingredients, timeout_ms } => {
            let snapshot = open(&settings)?;
            let mut request = SearchRequest::new(query, k.unwrap_or(settings.engine.default_top_k));
            request.category = category;
            request.area = area;
            request.ingredients = ingredients;
            request.deadline = timeout_ms.map(|ms| std::time::Instant::now() + std::time::Duration::from_millis(ms));
            let results = snapshot.search_filtered(&settings.engine, &request)?;
            print_results(&results);
            Ok(())
        }
        Commands::Ingredients { ingredients, k } => {
            let snapshot = open(&settings)?;
            let k = k.unwrap_or(settings.engine.default_top_k);
            print_results(&snapshot.search_by_ingredients(&settings.engine, &ingredients, k)?);
            Ok(())
        }
        Commands::Recipes { category, area, limit } => {
            let snapshot = open(&settings)?;
            let filter = CatalogFilter { category, area, limit };
            for r in snapshot.catalog.list(&filter) {
                println!("{}\t{}\t{}\t{}", r.id, r.title, or_na(&r.category), or_na(&r.area));
            }
            Ok(())
        }
        Commands::Show { id } => {
            let snapshot = open(&settings)?;
            match snapshot.catalog.get(&id) {
                Some(recipe) => println!("{}", serde_json::to_string_pretty(recipe)?),
                None => anyhow::bail!("recipe {id:?} not found"),
            }
            Ok(())
        }
        Commands::Categories => {
            open(&settings)?.catalog.categories().iter().for_each(|c| println!("{c}"));
            Ok(())
        }
        Commands::Areas => {
            open(&settings)?.catalog.areas().iter().for_each(|a| println!("{a}"));
            Ok(())
        }
        Commands::Popular { limit } => {
            print_results(&open(&settings)?.catalog.popular(limit));
            Ok(())
        }
        Commands::Interactive { k } => interactive(&settings, k),
    }
}

fn build(input: &Path, output: &Path, strict: bool, config: &EngineConfig) -> Result<()> {
    let records = input::load_records(input)?;
    let policy = if strict { MalformedPolicy::Abort } else { MalformedPolicy::Skip };
    let out = IndexBuilder::new(config.clone())
        .policy(policy)
        .require_documents(strict)
        .build(records)?;
    for r in &out.rejected {
        eprintln!("skipped record {}: {}", r.position, r.reason);
    }
    let snapshot = out.into_snapshot();
    save_snapshot(&IndexPaths::new(output), &snapshot)?;
    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}

fn open(settings: &Settings) -> Result<Snapshot> {
    Ok(load_snapshot(&IndexPaths::new(&settings.index_dir))?)
}

fn or_na(v: &Option<String>) -> &str { v.as_deref().unwrap_or("N/A") }

fn print_results(results: &[RankedResult]) {
    if results.is_empty() {
        println!("no matching recipes");
        return;
    }
    for r in results {
        println!("[{:.4}] {} (id {}) - {} | {}", r.score, r.title, r.id, or_na(&r.category), or_na(&r.area));
        if let Some(s) = &r.snippet {
            println!("    {s}");
        }
    }
}

fn interactive(settings: &Settings, k: usize) -> Result<()> {
    let handle = IndexHandle::new();
    handle.publish(open(settings)?);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    println!("type a query, `:reload` to pick up a rebuilt index, `exit` to quit");
    loop {
        print!("query> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query == ":reload" {
            match open(settings) {
                Ok(snapshot) => {
                    handle.publish(snapshot);
                    println!("index reloaded");
                }
                Err(e) => eprintln!("reload failed, keeping current index: {e:#}"),
            }
            continue;
        }
        let snapshot = handle.current()?;
        match snapshot.search(&settings.engine, query, k) {
            Ok(results) => print_results(&results),
            Err(e) => eprintln!("search failed: {e}"),
        }
    }
    Ok(())
}
