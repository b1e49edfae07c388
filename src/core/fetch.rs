//! Graph fetch collaborator
//!
//! The interaction store does not know where documents come from; it
//! calls a [`GraphFetcher`] once per load intent and interprets the
//! result. The CLI uses [`FileFetcher`], which resolves trees from a
//! directory of `{course_id}.json` files.

use std::fs;
use std::path::PathBuf;

use crate::core::error::FetchError;
use crate::core::importer::{normalize, ImportOptions};
use crate::core::models::GraphDocument;

/// Supplies a graph document for a course id.
///
/// No retries, pagination, or caching; one call per load intent.
pub trait GraphFetcher: Send {
    /// Fetch and normalize the tree for a course
    ///
    /// # Errors
    /// Returns a [`FetchError`] when the tree cannot be located, read,
    /// or normalized.
    fn fetch_graph(&self, course_id: &str) -> Result<GraphDocument, FetchError>;
}

/// Fetcher backed by a directory of `{course_id}.json` files
#[derive(Debug, Clone)]
pub struct FileFetcher {
    /// Directory holding tree files
    dir: PathBuf,
    /// Import context applied to every fetched tree
    options: ImportOptions,
}

impl FileFetcher {
    /// Create a fetcher over the given directory
    #[must_use]
    pub const fn new(dir: PathBuf, options: ImportOptions) -> Self {
        Self { dir, options }
    }
}

impl GraphFetcher for FileFetcher {
    fn fetch_graph(&self, course_id: &str) -> Result<GraphDocument, FetchError> {
        let path = self.dir.join(format!("{course_id}.json"));
        if !path.exists() {
            return Err(FetchError::NotFound(course_id.to_string()));
        }

        let raw = fs::read_to_string(&path)?;
        Ok(normalize(&raw, course_id, &self.options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_file_fetcher_reads_and_normalizes() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("algo101.json");
        let mut file = fs::File::create(&path).expect("create tree file");
        write!(file, r#"{{"nodes": {{"a": {{"title": "A"}}}}}}"#).expect("write tree file");

        let fetcher = FileFetcher::new(dir.path().to_path_buf(), ImportOptions::default());
        let doc = fetcher.fetch_graph("algo101").expect("fetch succeeds");

        assert_eq!(doc.course_id, "algo101");
        assert_eq!(doc.id, "algo101_tree");
        assert_eq!(doc.nodes.len(), 1);
    }

    #[test]
    fn test_file_fetcher_missing_course() {
        let dir = TempDir::new().expect("temp dir");
        let fetcher = FileFetcher::new(dir.path().to_path_buf(), ImportOptions::default());

        let err = fetcher.fetch_graph("nope").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }

    #[test]
    fn test_file_fetcher_bad_json_surfaces_parse_error() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("bad.json"), "{nodes:").expect("write tree file");

        let fetcher = FileFetcher::new(dir.path().to_path_buf(), ImportOptions::default());
        let err = fetcher.fetch_graph("bad").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
