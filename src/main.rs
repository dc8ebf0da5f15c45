//! hotconf command line.
//!
//! ```text
//! hotconf get   conf.yaml rabbitmq.queue.key --as string
//! hotconf dump  conf.yaml
//! hotconf watch conf.yaml --path rabbitmq.queue.key --signal hup --watch-file
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use hotconf::config::{ConfigStore, ConfigWatcher};
use hotconf::lifecycle::Shutdown;
use hotconf::observability::logging::{init_logging, LogFormat};
use hotconf::observability::metrics;
use hotconf::Node;

#[derive(Parser)]
#[command(name = "hotconf")]
#[command(about = "Inspect and hot-reload configuration documents", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log output format (pretty or json).
    #[arg(long, default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a single value
    Get {
        file: PathBuf,
        path: String,
        /// Type to coerce the value into
        #[arg(long = "as", value_enum, default_value_t = Target::Node)]
        target: Target,
    },
    /// Print the normalized document as JSON
    Dump { file: PathBuf },
    /// Keep the document loaded and reload it on a signal or file change
    Watch {
        file: PathBuf,
        /// Paths to print after each reload
        #[arg(short, long = "path")]
        paths: Vec<String>,
        /// Reload signal (hup, int, usr1, usr2)
        #[cfg(unix)]
        #[arg(long, default_value = "hup")]
        signal: hotconf::lifecycle::ReloadSignal,
        /// Also reload when the file changes on disk
        #[arg(long)]
        watch_file: bool,
        /// Expose Prometheus metrics on this address
        #[arg(long)]
        metrics_address: Option<SocketAddr>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Bool,
    Int,
    Float,
    #[value(name = "string")]
    Text,
    StringList,
    Node,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Get { file, path, target } => {
            let store = ConfigStore::open(&file)?;
            let rendered = match target {
                Target::Bool => store.get::<bool>(&path)?.to_string(),
                Target::Int => store.get::<i64>(&path)?.to_string(),
                Target::Float => store.get::<f64>(&path)?.to_string(),
                Target::Text => store.get::<String>(&path)?,
                Target::StringList => store.get::<Vec<String>>(&path)?.join("\n"),
                Target::Node => render(&store.get_node(&path)?)?,
            };
            println!("{}", rendered);
        }
        Commands::Dump { file } => {
            let store = ConfigStore::open(&file)?;
            println!("{}", render(&store.snapshot())?);
        }
        Commands::Watch {
            file,
            paths,
            #[cfg(unix)]
            signal,
            watch_file,
            metrics_address,
        } => {
            if let Some(addr) = metrics_address {
                metrics::init_metrics(addr);
            }

            let store = Arc::new(ConfigStore::open(&file)?);
            tracing::info!(path = %file.display(), "Configuration loaded");

            let shutdown = Shutdown::new();

            #[cfg(unix)]
            let reloader = hotconf::lifecycle::spawn_signal_reloader(
                store.clone(),
                signal,
                shutdown.subscribe(),
            )?;
            #[cfg(unix)]
            let ctrl_c_reserved = signal == hotconf::lifecycle::ReloadSignal::Interrupt;
            #[cfg(not(unix))]
            let ctrl_c_reserved = false;

            // Dropping the watcher stops it, so keep it alive until exit.
            let _watcher = if watch_file {
                Some(ConfigWatcher::new(store.clone(), &file).run()?)
            } else {
                None
            };

            let printer = tokio::spawn(print_on_publish(store.clone(), paths, shutdown.subscribe()));

            shutdown.trigger_on_termination(ctrl_c_reserved).await;

            #[cfg(unix)]
            let _ = reloader.await;
            let _ = printer.await;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn render(node: &Node) -> Result<String, serde_json::Error> {
    match node {
        Node::String(s) => Ok(s.clone()),
        other => serde_json::to_string_pretty(other),
    }
}

/// Print the watched paths whenever a new tree is published.
async fn print_on_publish(
    store: Arc<ConfigStore>,
    paths: Vec<String>,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) {
    let mut seen = 0;
    let mut ticker = tokio::time::interval(Duration::from_millis(250));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let generation = store.generation();
                if generation == seen {
                    continue;
                }
                seen = generation;
                println!("# generation {} ({:?})", generation, store.state());
                for path in &paths {
                    let value = store
                        .get_node(path)
                        .map_err(|e| e.to_string())
                        .and_then(|node| render(&node).map_err(|e| e.to_string()));
                    match value {
                        Ok(v) => println!("{} = {}", path, v),
                        Err(e) => println!("{} ! {}", path, e),
                    }
                }
            }
            _ = shutdown.recv() => break,
        }
    }
}
