//! Threaded wrapper around the store
//!
//! All intents funnel through one mpsc channel into a single worker
//! thread that owns the [`Store`], so every transition is applied at
//! one sequential point. Slow work (the fetch behind a `Load` intent)
//! runs on its own thread and posts its completion back through the
//! same channel, tagged with the load generation so a superseded fetch
//! cannot clobber a newer one.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use super::{InteractionState, Intent, Store, ViewportConfig};
use crate::core::error::FetchError;
use crate::core::fetch::GraphFetcher;
use crate::core::importer::ImportOptions;
use crate::core::models::GraphDocument;
use crate::{debug, warn};

enum Message {
    Intent(Intent),
    LoadFinished {
        generation: u64,
        result: Result<GraphDocument, FetchError>,
    },
    Shutdown,
}

/// Handle to the store's worker thread.
///
/// Cloneable senders are cheap; snapshots are published as
/// `Arc<InteractionState>` and never block on in-flight work.
pub struct StoreService {
    sender: Sender<Message>,
    shared: Arc<Mutex<Arc<InteractionState>>>,
    worker: Option<JoinHandle<()>>,
}

impl StoreService {
    /// Spawn the worker thread owning a fresh store
    #[must_use]
    pub fn spawn(
        fetcher: Arc<dyn GraphFetcher + Sync>,
        viewport: ViewportConfig,
        options: ImportOptions,
    ) -> Self {
        let (sender, receiver) = mpsc::channel::<Message>();
        let shared = Arc::new(Mutex::new(Arc::new(InteractionState::default())));

        let worker_shared = Arc::clone(&shared);
        let worker_sender = sender.clone();
        let worker = thread::spawn(move || {
            let mut store = Store::new(viewport, options);

            while let Ok(message) = receiver.recv() {
                match message {
                    Message::Intent(Intent::Load { course_id }) => {
                        let generation = store.begin_load();
                        publish(&worker_shared, store.state());

                        let fetcher = Arc::clone(&fetcher);
                        let completion = worker_sender.clone();
                        thread::spawn(move || {
                            let result = fetcher.fetch_graph(&course_id);
                            // The service may already be gone; a dropped
                            // completion is indistinguishable from a
                            // superseded one.
                            let _ = completion.send(Message::LoadFinished { generation, result });
                        });
                    }
                    Message::Intent(intent) => {
                        store.apply(intent);
                        publish(&worker_shared, store.state());
                    }
                    Message::LoadFinished { generation, result } => {
                        if let Err(ref e) = result {
                            warn!("load (generation {generation}) failed: {e}");
                        }
                        store.finish_load(generation, result);
                        publish(&worker_shared, store.state());
                    }
                    Message::Shutdown => break,
                }
            }
            debug!("store worker stopped");
        });

        Self {
            sender,
            shared,
            worker: Some(worker),
        }
    }

    /// Submit an intent for processing.
    /// Intents submitted after shutdown are silently dropped.
    pub fn submit(&self, intent: Intent) {
        let _ = self.sender.send(Message::Intent(intent));
    }

    /// Latest published state snapshot
    ///
    /// # Panics
    /// Panics if the worker thread poisoned the snapshot lock.
    #[must_use]
    pub fn snapshot(&self) -> Arc<InteractionState> {
        Arc::clone(&self.shared.lock().expect("snapshot lock poisoned"))
    }
}

impl Drop for StoreService {
    fn drop(&mut self) {
        let _ = self.sender.send(Message::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn publish(shared: &Arc<Mutex<Arc<InteractionState>>>, state: &InteractionState) {
    if let Ok(mut slot) = shared.lock() {
        *slot = Arc::new(state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::importer::normalize;
    use std::time::{Duration, Instant};

    struct FakeFetcher {
        fail: bool,
    }

    impl GraphFetcher for FakeFetcher {
        fn fetch_graph(&self, course_id: &str) -> Result<GraphDocument, FetchError> {
            if self.fail {
                return Err(FetchError::NotFound(course_id.to_string()));
            }
            Ok(normalize(
                r#"{"nodes": {"a": {"title": "A"}}}"#,
                course_id,
                &ImportOptions::default(),
            )
            .expect("fake tree normalizes"))
        }
    }

    fn wait_until(service: &StoreService, check: impl Fn(&InteractionState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if check(&service.snapshot()) {
                return;
            }
            assert!(Instant::now() < deadline, "state never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_load_publishes_document() {
        let service = StoreService::spawn(
            Arc::new(FakeFetcher { fail: false }),
            ViewportConfig::default(),
            ImportOptions::default(),
        );

        service.submit(Intent::Load {
            course_id: "algo".to_string(),
        });
        wait_until(&service, |s| s.document.is_some() && !s.is_loading);

        let state = service.snapshot();
        assert!(state.error.is_none());
        assert_eq!(state.document.as_ref().unwrap().course_id, "algo");
    }

    #[test]
    fn test_failed_load_surfaces_error_only() {
        let service = StoreService::spawn(
            Arc::new(FakeFetcher { fail: true }),
            ViewportConfig::default(),
            ImportOptions::default(),
        );

        service.submit(Intent::Load {
            course_id: "missing".to_string(),
        });
        wait_until(&service, |s| s.error.is_some() && !s.is_loading);

        let state = service.snapshot();
        assert!(state.document.is_none());
        assert!(state.error.as_deref().unwrap().contains("missing"));
    }

    #[test]
    fn test_interactive_intents_are_serialized() {
        let service = StoreService::spawn(
            Arc::new(FakeFetcher { fail: false }),
            ViewportConfig::default(),
            ImportOptions::default(),
        );

        for _ in 0..10 {
            service.submit(Intent::Pan { dx: 1.0, dy: 0.0 });
        }
        service.submit(Intent::SelectNode {
            id: Some("a".to_string()),
        });
        wait_until(&service, |s| s.selected_node_id.is_some());

        let state = service.snapshot();
        assert!((state.pan.x - 10.0).abs() < f64::EPSILON);
    }
}
