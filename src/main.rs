use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use version_gatherer::config::Config;
use version_gatherer::gatherer::binary::Binary;
use version_gatherer::gatherer::contract::VersionsGatherer;
use version_gatherer::gatherer::legacy::{BinaryVersionGatherer, LegacyAdapter};
use version_gatherer::gatherer::meta::GathererMeta;
use version_gatherer::gatherer::registry::GathererRegistry;

#[derive(Parser)]
#[command(name = "version-gatherer")]
#[command(version, about = "Discover new releases of external binaries")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available gatherers
    List,
    /// Run a gatherer once and print the versions it found as JSON
    Gather {
        /// Gatherer name (see `list`)
        #[arg(long)]
        gatherer: String,
        /// Name of the binary to check
        #[arg(long)]
        binary: String,
        /// Meta line (KEY=VALUE); may be repeated
        #[arg(long, conflicts_with = "meta_file")]
        meta: Vec<String>,
        /// File holding the meta text
        #[arg(long)]
        meta_file: Option<PathBuf>,
        /// Identifier of the newest version already known
        #[arg(long)]
        since: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    let _guard = version_gatherer::logging::init(&config.log)?;

    let registry = GathererRegistry::with_defaults(&config.http)?;

    match cli.command {
        Command::List => {
            for (name, description) in registry.catalog() {
                println!("{}\n  {}\n", name, description.replace('\n', "\n  "));
            }
            Ok(())
        }
        Command::Gather {
            gatherer,
            binary,
            meta,
            meta_file,
            since,
        } => {
            let meta_text = match meta_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading meta from {}", path.display()))?,
                None => meta.join("\n"),
            };
            let meta = GathererMeta::parse(&meta_text)?;
            let gatherer = registry.create(&gatherer, Binary::new(binary), &meta)?;

            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(run_gather(gatherer, since))
        }
    }
}

async fn run_gather(
    mut gatherer: Box<dyn VersionsGatherer>,
    since: Option<String>,
) -> anyhow::Result<()> {
    let output = match since {
        Some(since) => {
            let mut adapter = LegacyAdapter::new(gatherer);
            BinaryVersionGatherer::gather(&mut adapter, Some(since.as_str())).await?;
            json!({
                "versions": adapter.versions(),
                "latest": adapter.latest_version(),
            })
        }
        None => {
            gatherer.gather().await?;
            json!({
                "versions": gatherer.versions(),
                "latest": gatherer.latest_version(),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
