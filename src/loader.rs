// loader.rs - The one background job: fetch, decode, hand over.
//
// The load runs on its own thread so the caller never blocks. A
// `CancelToken` is checked before the result is delivered; once the view is
// torn down the late result is dropped on the floor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};

use crate::error::LoadError;
use crate::models::{LoadedLibrary, RenderModel};
use crate::source::DataSource;
use crate::view::{derive_view, ViewEvent, ViewState};

/// Shared flag; clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Start the load. `deliver` runs at most once, on the loader thread, and
/// never after `token` was cancelled.
pub fn spawn_load<F>(source: Box<dyn DataSource>, token: CancelToken, deliver: F) -> JoinHandle<()>
where
    F: FnOnce(Result<LoadedLibrary, LoadError>) + Send + 'static,
{
    thread::spawn(move || {
        let origin = source.describe();
        info!(source = %origin, "loading game library");

        let result = source.fetch();
        if token.is_cancelled() {
            info!(source = %origin, "view closed before load finished, discarding result");
            return;
        }

        match &result {
            Ok(library) => info!(games = library.games.len(), "game library loaded"),
            Err(e) => warn!(error = %e, "game library failed to load"),
        }
        deliver(result);
    })
}

/// Apply a finished load to a shared view and return the new render model.
///
/// The token is checked again while the view lock is held, so a teardown
/// racing the loader thread can never see the result applied. Returns `None`
/// when the result was discarded.
pub fn deliver_to_view(
    view: &Mutex<ViewState>,
    token: &CancelToken,
    result: Result<LoadedLibrary, LoadError>,
) -> Option<RenderModel> {
    let mut view = match view.lock() {
        Ok(view) => view,
        Err(e) => {
            error!("view lock poisoned, dropping load result: {e}");
            return None;
        }
    };
    if token.is_cancelled() {
        info!("view torn down while result was pending, discarding it");
        return None;
    }
    view.apply(ViewEvent::Loaded(result));
    Some(derive_view(&view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameRecord;
    use std::sync::mpsc;

    struct StaticSource {
        games: Vec<GameRecord>,
        cancel_during_fetch: Option<CancelToken>,
    }

    impl DataSource for StaticSource {
        fn fetch(&self) -> Result<LoadedLibrary, LoadError> {
            if let Some(token) = &self.cancel_during_fetch {
                token.cancel();
            }
            Ok(LoadedLibrary {
                total_games: self.games.len(),
                games: self.games.clone(),
                fetched_at: chrono::Utc::now(),
            })
        }

        fn describe(&self) -> String {
            "static".into()
        }
    }

    struct FailingSource;

    impl DataSource for FailingSource {
        fn fetch(&self) -> Result<LoadedLibrary, LoadError> {
            Err(LoadError::Http("connection refused".into()))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    #[test]
    fn delivers_result_once() {
        let (tx, rx) = mpsc::channel();
        let source = StaticSource {
            games: vec![GameRecord::new(1, "Dota 2", 5)],
            cancel_during_fetch: None,
        };
        spawn_load(Box::new(source), CancelToken::new(), move |r| {
            tx.send(r).unwrap();
        })
        .join()
        .unwrap();

        let delivered: Vec<_> = rx.try_iter().collect();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].as_ref().unwrap().games.len(), 1);
    }

    #[test]
    fn failures_are_delivered_too() {
        let (tx, rx) = mpsc::channel();
        spawn_load(Box::new(FailingSource), CancelToken::new(), move |r| {
            tx.send(r).unwrap();
        })
        .join()
        .unwrap();

        assert!(matches!(rx.recv().unwrap(), Err(LoadError::Http(_))));
    }

    #[test]
    fn cancelled_load_is_discarded() {
        let (tx, rx) = mpsc::channel();
        let token = CancelToken::new();
        let source = StaticSource {
            games: vec![GameRecord::new(1, "Dota 2", 5)],
            cancel_during_fetch: Some(token.clone()),
        };
        spawn_load(Box::new(source), token.clone(), move |r| {
            tx.send(r).unwrap();
        })
        .join()
        .unwrap();

        assert!(token.is_cancelled());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn delivery_applies_result_to_live_view() {
        let view = Mutex::new(ViewState::new(crate::config::ViewConfig::new("games.json")));
        let model = deliver_to_view(
            &view,
            &CancelToken::new(),
            Ok(LoadedLibrary {
                total_games: 1,
                games: vec![GameRecord::new(570, "Dota 2", 30)],
                fetched_at: chrono::Utc::now(),
            }),
        );
        assert!(matches!(model, Some(RenderModel::Ready(_))));
    }

    #[test]
    fn delivery_after_teardown_leaves_view_untouched() {
        let view = Mutex::new(ViewState::new(crate::config::ViewConfig::new("games.json")));
        let token = CancelToken::new();
        token.cancel();

        let model = deliver_to_view(
            &view,
            &token,
            Ok(LoadedLibrary {
                total_games: 1,
                games: vec![GameRecord::new(570, "Dota 2", 30)],
                fetched_at: chrono::Utc::now(),
            }),
        );
        assert!(model.is_none());
        assert_eq!(derive_view(&view.lock().unwrap()), RenderModel::Loading);
    }
}
