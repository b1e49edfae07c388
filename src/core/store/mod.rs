//! Graph interaction store
//!
//! A sequential state machine over [`InteractionState`]. Every accepted
//! intent replaces the whole state with a new value; nothing is mutated
//! field-by-field behind the snapshot's back. Documents are held as
//! `Arc<GraphDocument>` so readers can share them without copying.

pub mod service;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::FetchError;
use crate::core::importer::{normalize, ImportOptions};
use crate::core::models::{GraphDocument, Position};

/// Zoom clamping range for the viewport
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Smallest allowed zoom factor
    pub min_zoom: f64,
    /// Largest allowed zoom factor
    pub max_zoom: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.25,
            max_zoom: 4.0,
        }
    }
}

/// One user or system action submitted to the store
#[derive(Debug, Clone)]
pub enum Intent {
    /// Fetch the tree for a course through the fetch collaborator
    Load {
        /// Course whose tree should be loaded
        course_id: String,
    },
    /// Echo the text the user is editing into the state
    ImportFromText {
        /// Raw editor contents
        text: String,
    },
    /// Normalize text and replace the document on success
    ParseAndApply {
        /// Raw JSON to normalize
        text: String,
        /// Course id used when the document names none
        fallback_course_id: String,
    },
    /// Change (or clear) the selection
    SelectNode {
        /// Node id, or `None` to clear
        id: Option<String>,
    },
    /// Move one node to a new canvas position
    MoveNode {
        /// Node id
        id: String,
        /// New horizontal coordinate
        x: f64,
        /// New vertical coordinate
        y: f64,
    },
    /// Shift the view offset
    Pan {
        /// Horizontal delta
        dx: f64,
        /// Vertical delta
        dy: f64,
    },
    /// Scale the view, clamped into the configured range
    Zoom {
        /// Multiplier applied to the current zoom
        factor: f64,
    },
}

/// Snapshot of the interactive surface after a transition
#[derive(Debug, Clone)]
pub struct InteractionState {
    /// Whether a load or parse is in flight
    pub is_loading: bool,
    /// Last user-visible failure, if any
    pub error: Option<String>,
    /// Last text the user is editing
    pub raw_input: String,
    /// Current document; survives failed reloads
    pub document: Option<Arc<GraphDocument>>,
    /// Currently selected node id (not validated against the document)
    pub selected_node_id: Option<String>,
    /// Current zoom factor
    pub zoom: f64,
    /// Current pan offset (unclamped)
    pub pan: Position,
    /// Monotonic load generation; stale load results are discarded
    pub generation: u64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            raw_input: String::new(),
            document: None,
            selected_node_id: None,
            zoom: 1.0,
            pan: Position::new(0.0, 0.0),
            generation: 0,
        }
    }
}

/// The single-writer state machine.
///
/// All transitions go through [`Store::apply`] (or the load completion
/// path), so two interleaved moves can never race on the node list.
/// Load intents only mark the state as loading here; running the fetch
/// off-thread is the job of [`service::StoreService`].
#[derive(Debug)]
pub struct Store {
    state: InteractionState,
    viewport: ViewportConfig,
    options: ImportOptions,
}

impl Store {
    /// Create a store with empty state
    #[must_use]
    pub fn new(viewport: ViewportConfig, options: ImportOptions) -> Self {
        Self {
            state: InteractionState::default(),
            viewport,
            options,
        }
    }

    /// Current state snapshot
    #[must_use]
    pub const fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Apply one intent and return the resulting state.
    ///
    /// Malformed intents (unknown node id, and so on) are no-ops by
    /// design; only parse and fetch failures reach the `error` field.
    pub fn apply(&mut self, intent: Intent) -> &InteractionState {
        let next = match intent {
            Intent::Load { course_id } => {
                // The service runs the fetch; this path only marks
                // loading so direct Store users see a consistent state.
                let _ = course_id;
                InteractionState {
                    is_loading: true,
                    error: None,
                    generation: self.state.generation + 1,
                    ..self.state.clone()
                }
            }
            Intent::ImportFromText { text } => InteractionState {
                raw_input: text,
                ..self.state.clone()
            },
            Intent::ParseAndApply {
                text,
                fallback_course_id,
            } => match normalize(&text, &fallback_course_id, &self.options) {
                Ok(document) => InteractionState {
                    is_loading: false,
                    error: None,
                    document: Some(Arc::new(document)),
                    ..self.state.clone()
                },
                Err(e) => InteractionState {
                    is_loading: false,
                    error: Some(e.to_string()),
                    ..self.state.clone()
                },
            },
            Intent::SelectNode { id } => InteractionState {
                selected_node_id: id,
                ..self.state.clone()
            },
            Intent::MoveNode { id, x, y } => match &self.state.document {
                Some(document) if document.node(&id).is_some() => InteractionState {
                    document: Some(Arc::new(
                        document.with_node_position(&id, Position::new(x, y)),
                    )),
                    ..self.state.clone()
                },
                _ => self.state.clone(),
            },
            Intent::Pan { dx, dy } => InteractionState {
                pan: Position::new(self.state.pan.x + dx, self.state.pan.y + dy),
                ..self.state.clone()
            },
            Intent::Zoom { factor } => InteractionState {
                zoom: (self.state.zoom * factor)
                    .clamp(self.viewport.min_zoom, self.viewport.max_zoom),
                ..self.state.clone()
            },
        };

        self.state = next;
        &self.state
    }

    /// Mark a load as in flight and return its generation.
    ///
    /// The matching [`Store::finish_load`] call must carry the same
    /// generation back; a completion for any older generation is stale.
    pub fn begin_load(&mut self) -> u64 {
        let generation = self.state.generation + 1;
        self.state = InteractionState {
            is_loading: true,
            error: None,
            generation,
            ..self.state.clone()
        };
        generation
    }

    /// Complete a load started with [`Store::begin_load`].
    ///
    /// A stale completion (superseded by a newer load) is discarded
    /// without touching the state. A failed load surfaces its message
    /// and leaves any previously loaded document intact.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<GraphDocument, FetchError>,
    ) -> &InteractionState {
        if generation != self.state.generation {
            return &self.state;
        }

        self.state = match result {
            Ok(document) => InteractionState {
                is_loading: false,
                error: None,
                document: Some(Arc::new(document)),
                ..self.state.clone()
            },
            Err(e) => InteractionState {
                is_loading: false,
                error: Some(e.to_string()),
                ..self.state.clone()
            },
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Metadata;

    fn store() -> Store {
        Store::new(ViewportConfig::default(), ImportOptions::default())
    }

    fn sample_document() -> GraphDocument {
        normalize(
            r#"{"nodes": {"a": {"title": "A"}, "b": {"title": "B", "requirements": ["a"]}}}"#,
            "c1",
            &ImportOptions::default(),
        )
        .expect("sample document normalizes")
    }

    #[test]
    fn test_initial_state_is_empty() {
        let store = store();
        let state = store.state();
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.document.is_none());
        assert!(state.selected_node_id.is_none());
        assert!((state.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_import_from_text_is_pure_echo() {
        let mut store = store();
        let state = store.apply(Intent::ImportFromText {
            text: "{not even json".to_string(),
        });
        assert_eq!(state.raw_input, "{not even json");
        assert!(state.error.is_none());
        assert!(state.document.is_none());
    }

    #[test]
    fn test_parse_and_apply_success() {
        let mut store = store();
        let state = store.apply(Intent::ParseAndApply {
            text: r#"{"nodes": {"a": {"title": "A"}}}"#.to_string(),
            fallback_course_id: "c1".to_string(),
        });
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        let document = state.document.as_ref().expect("document applied");
        assert_eq!(document.nodes.len(), 1);
    }

    #[test]
    fn test_parse_failure_preserves_prior_document() {
        let mut store = store();
        store.apply(Intent::ParseAndApply {
            text: r#"{"nodes": {"a": {"title": "A"}}}"#.to_string(),
            fallback_course_id: "c1".to_string(),
        });

        let state = store.apply(Intent::ParseAndApply {
            text: "{nodes:".to_string(),
            fallback_course_id: "c1".to_string(),
        });
        assert!(state.error.is_some());
        // A failed reparse does not discard the previously good graph
        assert!(state.document.is_some());
    }

    #[test]
    fn test_parse_and_apply_is_idempotent() {
        let mut store = store();
        let text = r#"{"nodes": {"a": {}, "b": {"requirements": ["a"]}}}"#.to_string();

        let first = store
            .apply(Intent::ParseAndApply {
                text: text.clone(),
                fallback_course_id: "c1".to_string(),
            })
            .document
            .clone()
            .unwrap();
        let second = store
            .apply(Intent::ParseAndApply {
                text,
                fallback_course_id: "c1".to_string(),
            })
            .document
            .clone()
            .unwrap();

        assert_eq!(*first, *second);
    }

    #[test]
    fn test_select_unknown_node_is_tolerated() {
        let mut store = store();
        store.finish_load(0, Ok(sample_document()));
        let before = store.state().document.clone();

        let state = store.apply(Intent::SelectNode {
            id: Some("nonexistent".to_string()),
        });
        assert_eq!(state.selected_node_id.as_deref(), Some("nonexistent"));
        assert!(state.error.is_none());
        assert_eq!(
            state.document.as_deref().map(|d| &d.id),
            before.as_deref().map(|d| &d.id)
        );
    }

    #[test]
    fn test_move_node_replaces_exactly_one_node() {
        let mut store = store();
        store.finish_load(0, Ok(sample_document()));
        let before = store.state().document.clone().unwrap();

        let state = store.apply(Intent::MoveNode {
            id: "b".to_string(),
            x: 42.0,
            y: -1.0,
        });
        let after = state.document.clone().unwrap();

        assert!((after.node("b").unwrap().position.x - 42.0).abs() < f64::EPSILON);
        assert_eq!(after.node("a"), before.node("a"));
        assert_eq!(after.edges, before.edges);
        // The prior document value is untouched
        assert!(before.node("b").unwrap().position.x.abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_node_is_idempotent() {
        let mut store = store();
        store.finish_load(0, Ok(sample_document()));

        let intent = Intent::MoveNode {
            id: "a".to_string(),
            x: 5.0,
            y: 5.0,
        };
        let once = store.apply(intent.clone()).document.clone().unwrap();
        let twice = store.apply(intent).document.clone().unwrap();
        assert_eq!(*once, *twice);
    }

    #[test]
    fn test_move_unknown_node_is_noop() {
        let mut store = store();
        store.finish_load(0, Ok(sample_document()));
        let before = store.state().document.clone().unwrap();

        let state = store.apply(Intent::MoveNode {
            id: "ghost".to_string(),
            x: 1.0,
            y: 1.0,
        });
        assert!(state.error.is_none());
        assert_eq!(*state.document.clone().unwrap(), *before);
    }

    #[test]
    fn test_move_without_document_is_noop() {
        let mut store = store();
        let state = store.apply(Intent::MoveNode {
            id: "a".to_string(),
            x: 1.0,
            y: 1.0,
        });
        assert!(state.document.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_pan_accumulates_unclamped() {
        let mut store = store();
        store.apply(Intent::Pan { dx: 10.0, dy: 5.0 });
        let state = store.apply(Intent::Pan {
            dx: -100_000.0,
            dy: 5.0,
        });
        assert!((state.pan.x + 99_990.0).abs() < f64::EPSILON);
        assert!((state.pan.y - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamps_into_range() {
        let mut store = store();
        let state = store.apply(Intent::Zoom { factor: 100.0 });
        assert!((state.zoom - 4.0).abs() < f64::EPSILON);

        let state = store.apply(Intent::Zoom { factor: 0.0001 });
        assert!((state.zoom - 0.25).abs() < f64::EPSILON);

        let state = store.apply(Intent::Zoom { factor: 2.0 });
        assert!((state.zoom - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_begin_load_marks_loading_and_clears_error() {
        let mut store = store();
        store.finish_load(0, Err(FetchError::NotFound("x".to_string())));
        assert!(store.state().error.is_some());

        let generation = store.begin_load();
        assert_eq!(generation, 1);
        assert!(store.state().is_loading);
        assert!(store.state().error.is_none());
    }

    #[test]
    fn test_failed_load_keeps_existing_document() {
        let mut store = store();
        let generation = store.begin_load();
        store.finish_load(generation, Ok(sample_document()));

        let generation = store.begin_load();
        let state = store.finish_load(generation, Err(FetchError::NotFound("c2".to_string())));
        assert!(state.error.as_deref().unwrap_or("").contains("c2"));
        assert!(state.document.is_some());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_stale_load_result_is_discarded() {
        let mut store = store();
        let stale = store.begin_load();
        let fresh = store.begin_load();

        let mut old_doc = sample_document();
        old_doc.id = "old".to_string();
        // The superseded load completes late; its result must not apply
        store.finish_load(stale, Ok(old_doc));
        assert!(store.state().is_loading);
        assert!(store.state().document.is_none());

        let mut new_doc = sample_document();
        new_doc.id = "new".to_string();
        let state = store.finish_load(fresh, Ok(new_doc));
        assert_eq!(state.document.as_ref().unwrap().id, "new");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_document_is_shared_not_copied() {
        let mut store = store();
        store.finish_load(0, Ok(GraphDocument {
            id: "t".to_string(),
            version: 1,
            course_id: "c".to_string(),
            created_at: "now".to_string(),
            updated_at: "now".to_string(),
            nodes: vec![],
            edges: vec![],
            metadata: Metadata::default(),
        }));

        let first = store.state().document.clone().unwrap();
        let state = store.apply(Intent::Pan { dx: 1.0, dy: 1.0 });
        let second = state.document.clone().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
