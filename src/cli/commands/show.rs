//! Show command handler

use std::path::PathBuf;

use techtree::config::Config;
use techtree::core::fetch::{FileFetcher, GraphFetcher};
use techtree::core::stats;
use techtree::error;

/// Run the show command: fetch a course tree from the configured
/// `trees_dir` and print its statistics.
pub fn run(course_id: &str, config: &Config, now: String) {
    let trees_dir = PathBuf::from(&config.paths.trees_dir);
    let fetcher = FileFetcher::new(trees_dir, config.import_options(now));

    match fetcher.fetch_graph(course_id) {
        Ok(document) => {
            println!(
                "✓ {} (course '{}', updated {})\n",
                document.id, document.course_id, document.updated_at
            );
            print!("{}", stats::compute(&document));
        }
        Err(e) => {
            error!("Show failed for '{course_id}': {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
