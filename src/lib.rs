pub mod config;
pub mod editor;
mod error;
pub mod geometry;
mod graph;
pub mod layout;
pub mod snapshot;
pub mod validate;

use clap::Parser;
use log::{debug, info, trace, warn};
use std::fs;

pub use error::DagEditError;
pub use layout::layouted_elements;
pub use snapshot::{Edge, Node, PortSide, Snapshot};
pub use validate::validate_dag;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Path to the input snapshot JSON file
    #[arg(help = "Path to the input snapshot file")]
    pub input: String,

    /// Path to the output snapshot JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Run the dagedit pipeline: read a snapshot, report validity, lay it out,
/// write the repositioned snapshot.
pub fn run(cfg: &Config) -> Result<(), DagEditError> {
    info!(
        input_path = cfg.input,
        output_path = cfg.output;
        "Processing graph snapshot",
    );

    // Load configuration
    let app_config = config::AppConfig::load_optional(cfg.config.as_deref())?;

    // Reading input file
    let content = fs::read_to_string(&cfg.input)?;
    trace!(content; "File content");

    // Parsing the snapshot
    let snapshot: Snapshot = serde_json::from_str(&content)?;
    debug!(
        nodes_len = snapshot.nodes.len(),
        edges_len = snapshot.edges.len();
        "Parsed snapshot",
    );

    // Validity is a derived view, recomputed from the snapshot
    let valid = validate_dag(&snapshot.nodes, &snapshot.edges);
    if valid {
        info!("Snapshot is a valid DAG");
    } else {
        warn!("Snapshot is not a valid DAG; layout is advisory");
    }

    // Calculating the layout
    info!("Calculating layout");
    let engine = layout::Engine::from_options(app_config.layout().clone());
    let layouted = engine.calculate(&snapshot.nodes, &snapshot.edges);

    // Export the repositioned snapshot
    let serialized = serde_json::to_string_pretty(&layouted)?;
    fs::write(&cfg.output, serialized)?;

    info!(output_file = cfg.output; "Snapshot exported successfully");

    Ok(())
}
