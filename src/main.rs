use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use shelfmatch::ingest::load_catalog;
use shelfmatch::{CancelFlag, Catalog, EngineConfig, FsSink, ResultSink, Scheduler};
use shelfmatch_engine::DEFAULT_LIMIT;

/// Cross-store grocery product matcher
#[derive(Parser, Debug)]
#[command(name = "shelfmatch")]
#[command(about = "Matches products across three store catalogs by name similarity", long_about = None)]
struct Args {
    /// JSON dump of store A's catalog
    #[arg(long)]
    catalog_a: PathBuf,

    /// JSON dump of store B's catalog
    #[arg(long)]
    catalog_b: PathBuf,

    /// JSON dump of store C's catalog
    #[arg(long)]
    catalog_c: PathBuf,

    /// Directory the rankings are written to
    #[arg(short, long, default_value = "./out")]
    out_dir: PathBuf,

    /// Maximum products scored per catalog pair
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting shelfmatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Output directory: {:?}", args.out_dir);

    let (products_a, _) = load_catalog(&args.catalog_a, Catalog::A)?;
    let (products_b, _) = load_catalog(&args.catalog_b, Catalog::B)?;
    let (products_c, _) = load_catalog(&args.catalog_c, Catalog::C)?;

    let sink: Arc<dyn ResultSink> = Arc::new(FsSink::new(&args.out_dir)?);
    let config = EngineConfig::default().with_limit(args.limit);
    let scheduler = Scheduler::new(config, sink);

    let cancel = CancelFlag::new();
    let run = scheduler.run_with_cancel(products_a, products_b, products_c, cancel.clone());
    tokio::pin!(run);

    let summaries = tokio::select! {
        result = &mut run => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupt received, cancelling running comparisons");
            cancel.cancel();
            run.await?
        }
    };

    for summary in &summaries {
        info!(
            pair = %summary.pair,
            smaller = summary.smaller_len,
            larger = summary.larger_len,
            scored = summary.products_scored,
            candidates = summary.total_candidates,
            "comparison complete"
        );
    }
    info!("All catalog comparisons finished");

    Ok(())
}
