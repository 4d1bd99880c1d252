// commands.rs - Tauri command handlers.
//
// These functions are the "API" of the desktop app. The frontend calls them with:
//   import { invoke } from "@tauri-apps/api/core";
//   const view = await invoke("toggle_bucket", { index: 2 });
//
// Every command applies exactly one `ViewEvent` and returns the freshly
// derived `RenderModel`, so the frontend only ever draws what it is handed.

use std::sync::Mutex;

use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_opener::OpenerExt;
use tracing::warn;

use crate::config::ViewConfig;
use crate::error::AppError;
use crate::loader::{deliver_to_view, spawn_load, CancelToken};
use crate::models::{OrderMode, RenderModel};
use crate::source::source_for;
use crate::view::{derive_view, store_url, ViewEvent, ViewState};

/// Event emitted once the library load settles (loaded or failed).
pub const LIBRARY_UPDATED: &str = "library-updated";

/// RUST NOTE: This is our shared application state.
/// `Mutex<ViewState>` ensures only one command mutates the view at a time;
/// Tauri runs IPC handlers on several threads.
pub struct AppState {
    pub view: Mutex<ViewState>,
    /// Cancelled when the main window goes away.
    pub load: CancelToken,
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        AppState {
            view: Mutex::new(ViewState::new(config)),
            load: CancelToken::new(),
        }
    }
}

// Shorthand type alias: `CmdResult<T>` is `Result<T, AppError>`
type CmdResult<T> = Result<T, AppError>;

// Lock the view and propagate a poisoned mutex as an AppError.
macro_rules! view {
    ($state:expr) => {
        $state
            .view
            .lock()
            .map_err(|e| AppError::Custom(format!("view lock poisoned: {e}")))?
    };
}

fn dispatch(state: &AppState, event: ViewEvent) -> CmdResult<RenderModel> {
    let mut view = view!(state);
    view.apply(event);
    Ok(derive_view(&view))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Kick off the one-shot load for the configured fetch URL.
///
/// Must run after `AppState` is managed. The result is applied to the view
/// and pushed to the frontend as a `library-updated` event.
pub fn start_load(app: &AppHandle) -> CmdResult<()> {
    let state = app.state::<AppState>();
    let fetch_url = view!(state).config.fetch_url.clone();
    let handle = app.clone();

    spawn_load(source_for(&fetch_url), state.load.clone(), move |result| {
        let state = handle.state::<AppState>();
        let Some(model) = deliver_to_view(&state.view, &state.load, result) else {
            return;
        };
        if let Err(e) = handle.emit(LIBRARY_UPDATED, &model) {
            warn!("failed to emit {LIBRARY_UPDATED}: {e}");
        }
    });
    Ok(())
}

// ---------------------------------------------------------------------------
// View commands
// ---------------------------------------------------------------------------

/// Current render model without changing anything.
#[tauri::command]
pub fn get_view(state: State<AppState>) -> CmdResult<RenderModel> {
    let view = view!(state);
    Ok(derive_view(&view))
}

/// Flip the checkbox at `index` (unchecked hides that playtime range).
#[tauri::command]
pub fn toggle_bucket(state: State<AppState>, index: usize) -> CmdResult<RenderModel> {
    dispatch(&state, ViewEvent::ToggleBucket { index })
}

#[tauri::command]
pub fn set_search(state: State<AppState>, text: String) -> CmdResult<RenderModel> {
    dispatch(&state, ViewEvent::SetSearch(text))
}

/// `order` is a radio value: "most-time", "least-time", "alphabetical" or "default".
#[tauri::command]
pub fn set_order(state: State<AppState>, order: String) -> CmdResult<RenderModel> {
    dispatch(&state, ViewEvent::SetOrder(OrderMode::from_value(&order)))
}

/// `displayed_total` is the page count the button was rendered with.
#[tauri::command]
pub fn next_page(state: State<AppState>, displayed_total: usize) -> CmdResult<RenderModel> {
    dispatch(&state, ViewEvent::NextPage { displayed_total })
}

#[tauri::command]
pub fn previous_page(state: State<AppState>, displayed_total: usize) -> CmdResult<RenderModel> {
    dispatch(&state, ViewEvent::PreviousPage { displayed_total })
}

#[tauri::command]
pub fn toggle_filters(state: State<AppState>) -> CmdResult<RenderModel> {
    dispatch(&state, ViewEvent::ToggleFilters)
}

/// Open the game's Steam store page in the default browser.
#[tauri::command]
pub fn open_store_page(app: AppHandle, app_id: u64) -> CmdResult<()> {
    app.opener()
        .open_url(store_url(app_id), None::<&str>)
        .map_err(|e| AppError::Custom(format!("could not open store page: {e}")))
}
