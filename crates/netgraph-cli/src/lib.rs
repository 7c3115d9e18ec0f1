//! CLI logic for netgraph.
//!
//! Loads a graph file, runs its scripted updates through the dynamic
//! accessor path and writes the label overlay as SVG.

mod args;
mod config;
mod error;
mod script;

pub use args::Args;
pub use config::{ConfigError, load_config};
pub use error::CliError;
pub use script::{InputDocument, Target, Update};

use std::fs;

use log::info;

use netgraph::{Graph, RecordingRenderManager, Renderer};

/// Run the netgraph CLI application
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph files
/// - Graph errors while loading nodes and links
/// - Failing updates
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input).map_err(|err| CliError::io(&args.input, err))?;
    let document: InputDocument = toml::from_str(&source)
        .map_err(|err| CliError::input(&args.input, source.clone(), &err))?;
    let (data, updates) = document.into_parts();

    let recorder = RecordingRenderManager::default();
    let mut graph = Graph::new(app_config)
        .with_renderer(Renderer::new(recorder.clone(), recorder.clone()));
    graph.set_data(data)?;

    for (index, update) in updates.iter().enumerate() {
        update.apply(index, &mut graph)?;
    }
    graph.draw();

    info!(
        nodes = graph.nodes().count(),
        links = graph.links().count(),
        updates = updates.len(),
        changes = recorder.len();
        "Graph processed"
    );

    let doc = graph.labels().to_document();
    fs::write(&args.output, doc.to_string()).map_err(|err| CliError::io(&args.output, err))?;

    info!(output_file = args.output, labels = graph.labels().len(); "SVG exported successfully");

    Ok(())
}
