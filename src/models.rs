// models.rs - All data types for Steamshelf.
//
// RUST NOTE: `derive` macros auto-generate trait implementations for us.
//   - `Serialize / Deserialize` (from serde) convert these structs to/from JSON,
//     both for the Steam payload and for the render model sent to the frontend.
//   - `Debug`   lets you print them with `{:?}` for logging.
//   - `Clone`   lets you duplicate a value (Rust moves by default).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Steam payload
// ---------------------------------------------------------------------------

/// One owned game as reported by Steam. Immutable once fetched.
///
/// Only `appid`, `name` and `playtime_forever` are read; serde ignores every
/// other field in the payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameRecord {
    #[serde(rename = "appid")]
    pub app_id: u64,
    pub name: String,
    #[serde(rename = "playtime_forever", default)]
    pub playtime_minutes: u32,
}

impl GameRecord {
    pub fn new(app_id: u64, name: impl Into<String>, playtime_minutes: u32) -> Self {
        GameRecord {
            app_id,
            name: name.into(),
            playtime_minutes,
        }
    }

    /// Playtime widened for bucket arithmetic, which can dip below zero.
    pub fn playtime(&self) -> i64 {
        i64::from(self.playtime_minutes)
    }
}

/// `{ "response": { "game_count": .., "games": [..] } }`
#[derive(Debug, Deserialize)]
pub struct LibraryResponse {
    pub response: LibraryPayload,
}

#[derive(Debug, Deserialize)]
pub struct LibraryPayload {
    pub game_count: Option<u64>,
    // Steam omits `games` entirely for private or empty profiles.
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

/// Result of a successful load, handed to the view reducer.
#[derive(Debug, Clone)]
pub struct LoadedLibrary {
    pub total_games: usize,
    pub games: Vec<GameRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl From<LibraryResponse> for LoadedLibrary {
    fn from(body: LibraryResponse) -> Self {
        let LibraryPayload { game_count, games } = body.response;
        let total_games = game_count
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(games.len());
        LoadedLibrary {
            total_games,
            games,
            fetched_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters and ordering
// ---------------------------------------------------------------------------

/// A playtime range shown as a filter checkbox.
///
/// `start_minutes` is inclusive and `end_minutes` exclusive, see
/// [`crate::filters::in_range`]. Unchecked means the range is excluded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaytimeBucket {
    pub start_minutes: i64,
    pub end_minutes: i64,
    pub is_unplayed: bool,
    pub is_checked: bool,
    /// Matches against the full library at generation time; never refreshed.
    pub match_count: usize,
}

/// Sort criterion applied to the filtered list before paging.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderMode {
    #[default]
    #[serde(rename = "default", alias = "")]
    None,
    #[serde(rename = "most-time")]
    MostPlayed,
    #[serde(rename = "least-time")]
    LeastPlayed,
    #[serde(rename = "alphabetical")]
    Alphabetical,
}

impl OrderMode {
    pub fn as_str(&self) -> &str {
        match self {
            OrderMode::None         => "default",
            OrderMode::MostPlayed   => "most-time",
            OrderMode::LeastPlayed  => "least-time",
            OrderMode::Alphabetical => "alphabetical",
        }
    }

    /// Parse a radio-button value. Anything unrecognised means "no order".
    pub fn from_value(s: &str) -> Self {
        match s {
            "most-time"    => OrderMode::MostPlayed,
            "least-time"   => OrderMode::LeastPlayed,
            "alphabetical" => OrderMode::Alphabetical,
            _              => OrderMode::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Render model: everything the frontend needs to draw one frame
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RenderModel {
    Loading,
    Failed { message: String },
    Ready(LibraryPage),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPage {
    pub total_games:    usize,
    pub filtered_count: usize,
    pub filter_panel:   FilterPanelView,
    pub buckets:        Vec<BucketView>,
    pub search_text:    String,
    pub order:          OrderMode,
    pub pagination:     PaginationView,
    pub games:          Vec<GameCard>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameCard {
    pub app_id:        u64,
    pub name:          String,
    pub playtime_label: String,
    pub image_url:     String,
    pub store_url:     String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketView {
    pub index:       usize,
    pub label:       String,
    pub match_count: usize,
    pub checked:     bool,
    pub is_unplayed: bool,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page:        usize,
    pub total_pages:         usize,
    /// What "out of N" shows: an empty result still reads "of 1".
    pub display_total_pages: usize,
    pub previous_disabled:   bool,
    pub next_disabled:       bool,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterPanelView {
    pub collapsed:     bool,
    pub toggle_label:  String,
    pub options_class: String,
}
