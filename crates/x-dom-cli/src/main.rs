//! CLI for inspecting XML documents through the x-dom node layer

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use x_dom::Document;
use xot_tree::XotTree;

/// Inspect an XML document through x-dom.
#[derive(Parser)]
#[command(name = "x-dom", version, about)]
struct Cli {
    /// Log decoration and cache activity (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the document as serialized by the engine.
    Serialize {
        /// XML file to read
        file: PathBuf,
    },

    /// Print every namespace declaration under the root element.
    Namespaces {
        /// XML file to read
        file: PathBuf,

        /// Emit a JSON object instead of one declaration per line
        #[arg(long)]
        json: bool,
    },

    /// Navigate to a child element by a slash-separated path of names.
    Explore {
        /// XML file to read
        file: PathBuf,

        /// Path such as `catalog/book/title`
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Serialize { file } => {
            let doc = load(&file)?;
            println!("{}", doc.serialize_to_text()?);
        }
        Command::Namespaces { file, json } => {
            let doc = load(&file)?;
            let namespaces = doc.collect_namespaces()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&namespaces)?);
            } else {
                for (key, uri) in &namespaces {
                    println!("{}={}", key, uri);
                }
            }
        }
        Command::Explore { file, path } => {
            let doc = load(&file)?;
            doc.explore();
            let steps: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            let Some(explorer) = doc.as_node().explorer() else {
                bail!("document is not explorable");
            };
            match explorer.path(&steps)? {
                Some(node) => println!("{}", node.serialize()?),
                None => bail!("no element at path '{}'", path),
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Document<XotTree>> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = Document::parse(XotTree::new(), &xml)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(file = %path.display(), "loaded document");
    Ok(doc)
}
