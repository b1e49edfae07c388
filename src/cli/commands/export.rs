//! Export command handler

use std::fs;
use std::path::Path;

use techtree::config::Config;
use techtree::core::export::mermaid::MermaidGenerator;
use techtree::core::importer::normalize;
use techtree::{error, info};

/// Run the export command: render a tree file as a Mermaid flowchart.
pub fn run(
    input_file: &Path,
    output: Option<&Path>,
    language: Option<&str>,
    config: &Config,
    now: String,
) {
    if let Err(e) = export_single(input_file, output, language, config, now) {
        error!("Export failed for {}: {e}", input_file.display());
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn export_single(
    input_file: &Path,
    output: Option<&Path>,
    language: Option<&str>,
    config: &Config,
    now: String,
) -> Result<(), String> {
    let raw = fs::read_to_string(input_file)
        .map_err(|e| format!("✗ Failed to read {}: {e}", input_file.display()))?;

    let fallback_course_id = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("course");

    let options = config.import_options(now);
    let document = normalize(&raw, fallback_course_id, &options)
        .map_err(|e| format!("✗ Failed to import {}: {e}", input_file.display()))?;

    let language = language.unwrap_or(document.metadata.default_language.as_str());
    let diagram = MermaidGenerator::generate(&document, language);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    format!(
                        "✗ Failed to create output directory {}: {e}",
                        parent.display()
                    )
                })?;
            }
            fs::write(path, diagram)
                .map_err(|e| format!("✗ Failed to write {}: {e}", path.display()))?;
            println!("✓ Diagram written to: {}", path.display());
            info!("Exported diagram for: {}", document.id);
        }
        None => print!("{diagram}"),
    }

    Ok(())
}
