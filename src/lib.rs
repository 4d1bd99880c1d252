// lib.rs - Steamshelf library root.
//
// Everything the view needs lives here so both binaries share it:
//   - `steamshelf`      the Tauri desktop shell (feature "desktop")
//   - `steamshelf-cli`  a headless front end over the same reducer

pub mod config;
pub mod error;
pub mod filters;
pub mod loader;
pub mod logging;
pub mod models;
pub mod ordering;
pub mod paging;
pub mod source;
pub mod view;

#[cfg(feature = "desktop")]
pub mod commands;

pub use config::ViewConfig;
pub use error::{AppError, LoadError};
pub use models::{GameRecord, OrderMode, PlaytimeBucket, RenderModel};
pub use view::{derive_view, reduce, ViewEvent, ViewState};

/// Build and run the desktop app.
///
/// This wires everything together:
///   1. Reads config.json (or STEAMSHELF_FETCH_URL)
///   2. Starts the background library load
///   3. Registers the Tauri commands so JavaScript can call them
///   4. Cancels the load if the window closes before it finishes
#[cfg(feature = "desktop")]
pub fn run() {
    use tauri::{Manager, WindowEvent};

    use commands::AppState;

    logging::init_logging();

    tauri::Builder::default()
        // ── Plugins ──────────────────────────────────────────────────────────
        // tauri-plugin-opener opens the Steam store page in the user's browser
        .plugin(tauri_plugin_opener::init())

        // ── One-time setup ───────────────────────────────────────────────────
        .setup(|app| {
            // A bad or missing config aborts startup with the error message.
            let config = ViewConfig::load_default()?;
            app.manage(AppState::new(config));
            commands::start_load(app.handle())?;
            Ok(())
        })

        // ── Teardown ─────────────────────────────────────────────────────────
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                if let Some(state) = window.try_state::<AppState>() {
                    state.load.cancel();
                }
            }
        })

        // ── Register IPC commands ────────────────────────────────────────────
        .invoke_handler(tauri::generate_handler![
            commands::get_view,
            commands::toggle_bucket,
            commands::set_search,
            commands::set_order,
            commands::next_page,
            commands::previous_page,
            commands::toggle_filters,
            commands::open_store_page,
        ])

        // ── Start the event loop ─────────────────────────────────────────────
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
