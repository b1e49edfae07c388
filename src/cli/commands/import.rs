//! Import command handler

use std::fs;
use std::path::{Path, PathBuf};

use techtree::config::Config;
use techtree::core::importer::{normalize, to_import_json};
use techtree::core::stats;
use techtree::{error, info};

/// Run the import command: normalize a tree file and report on it.
///
/// # Arguments
/// * `input_file` - Path to the tree JSON file
/// * `course_id` - Course id used when the document names none
/// * `output` - Optional path for the normalized canonical JSON
/// * `config` - Configuration supplying locale defaults
/// * `now` - Timestamp string for defaulted document timestamps
/// * `verbose` - Whether to print full statistics
pub fn run(
    input_file: &Path,
    course_id: Option<&str>,
    output: Option<&Path>,
    config: &Config,
    now: String,
    verbose: bool,
) {
    if let Err(e) = import_single(input_file, course_id, output, config, now, verbose) {
        error!("Import failed for {}: {e}", input_file.display());
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn import_single(
    input_file: &Path,
    course_id: Option<&str>,
    output: Option<&Path>,
    config: &Config,
    now: String,
    verbose: bool,
) -> Result<(), String> {
    let raw = fs::read_to_string(input_file)
        .map_err(|e| format!("✗ Failed to read {}: {e}", input_file.display()))?;

    let fallback_course_id = course_id.map_or_else(
        || {
            input_file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("course")
                .to_string()
        },
        ToString::to_string,
    );

    let options = config.import_options(now);
    let document = normalize(&raw, &fallback_course_id, &options)
        .map_err(|e| format!("✗ Failed to import {}: {e}", input_file.display()))?;

    info!("Tree imported: {}", document.id);
    println!(
        "✓ Imported '{}' ({} nodes, {} edges)",
        document.id,
        document.nodes.len(),
        document.edges.len()
    );

    if verbose {
        println!("\n=== Statistics ===\n");
        print!("{}", stats::compute(&document));
    }

    if let Some(output) = output {
        let final_output_path: PathBuf = output.to_path_buf();
        if let Some(parent) = final_output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                format!(
                    "✗ Failed to create output directory {}: {e}",
                    parent.display()
                )
            })?;
        }

        let rendered = serde_json::to_string_pretty(&to_import_json(&document))
            .map_err(|e| format!("✗ Failed to serialize normalized tree: {e}"))?;
        fs::write(&final_output_path, rendered)
            .map_err(|e| format!("✗ Failed to write {}: {e}", final_output_path.display()))?;

        println!("✓ Normalized tree written to: {}", final_output_path.display());
    }

    Ok(())
}
