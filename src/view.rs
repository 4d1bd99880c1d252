// view.rs - View state, the event reducer and the render model.
//
// The frontend never computes anything. It sends a `ViewEvent`, the reducer
// updates `ViewState`, and `derive_view` rebuilds the whole `RenderModel`:
//
//   raw games -> bucket filters -> search -> order -> page
//
// Nothing is cached between calls; a personal library is a few hundred games.

use tracing::{debug, info, warn};

use crate::config::ViewConfig;
use crate::error::LoadError;
use crate::filters::{apply_bucket_filters, apply_search, generate_buckets};
use crate::models::{
    BucketView, FilterPanelView, GameCard, GameRecord, LibraryPage, LoadedLibrary, OrderMode,
    PaginationView, PlaytimeBucket, RenderModel,
};
use crate::ordering::order;
use crate::paging::{self, paginate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

/// Everything the user can change, plus the loaded library.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub config:            ViewConfig,
    pub load_state:        LoadState,
    pub total_games:       usize,
    /// Replaced wholesale by a load, never edited in place.
    pub raw_games:         Vec<GameRecord>,
    pub buckets:           Vec<PlaytimeBucket>,
    pub search_text:       String,
    pub order_mode:        OrderMode,
    pub current_page:      usize,
    pub filters_collapsed: bool,
}

/// One discrete user action, or the load completing.
///
/// RUST NOTE: the page events carry the page count the user was looking at,
/// instead of a closure capturing it.
#[derive(Debug)]
pub enum ViewEvent {
    Loaded(Result<LoadedLibrary, LoadError>),
    ToggleBucket { index: usize },
    SetSearch(String),
    SetOrder(OrderMode),
    NextPage { displayed_total: usize },
    PreviousPage { displayed_total: usize },
    ToggleFilters,
}

impl ViewState {
    pub fn new(config: ViewConfig) -> Self {
        ViewState {
            config,
            load_state: LoadState::Loading,
            total_games: 0,
            raw_games: Vec::new(),
            buckets: Vec::new(),
            search_text: String::new(),
            order_mode: OrderMode::None,
            current_page: 1,
            filters_collapsed: true,
        }
    }

    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Loaded(result) => self.finish_load(result),
            ViewEvent::ToggleBucket { index } => {
                match self.buckets.get_mut(index) {
                    Some(bucket) => bucket.is_checked = !bucket.is_checked,
                    None => warn!(index, "toggle for unknown playtime bucket ignored"),
                }
                self.clamp_page();
            }
            ViewEvent::SetSearch(text) => {
                self.search_text = text;
                self.clamp_page();
            }
            ViewEvent::SetOrder(mode) => self.order_mode = mode,
            ViewEvent::NextPage { displayed_total } => {
                self.current_page = paging::next_page(self.current_page, displayed_total);
            }
            ViewEvent::PreviousPage { displayed_total } => {
                self.current_page = paging::previous_page(self.current_page, displayed_total);
            }
            ViewEvent::ToggleFilters => self.filters_collapsed = !self.filters_collapsed,
        }
    }

    fn finish_load(&mut self, result: Result<LoadedLibrary, LoadError>) {
        if self.load_state != LoadState::Loading {
            warn!("library already settled, ignoring a second load result");
            return;
        }
        match result {
            Ok(library) => {
                let range = &self.config.hours_filter_range;
                // An empty library is valid: no buckets, nothing to filter.
                self.buckets =
                    generate_buckets(&library.games, range.checkboxes, range.filter_unplayed)
                        .unwrap_or_else(|e| {
                            debug!("{e}");
                            Vec::new()
                        });
                self.total_games = library.total_games;
                self.raw_games = library.games;
                self.current_page = 1;
                self.load_state = LoadState::Loaded;
                info!(
                    games = self.raw_games.len(),
                    fetched_at = %library.fetched_at,
                    "library view ready"
                );
            }
            Err(e) => self.load_state = LoadState::Failed(e.to_string()),
        }
    }

    /// Pull `current_page` back inside the pages that now exist.
    fn clamp_page(&mut self) {
        let count = self.filtered_games().len();
        let total = paging::total_pages(count, self.config.games_per_page);
        let clamped = self.current_page.min(total).max(1);
        if clamped != self.current_page {
            debug!(from = self.current_page, to = clamped, "current page clamped");
            self.current_page = clamped;
        }
    }

    /// Bucket filters, then search, then order.
    pub fn filtered_games(&self) -> Vec<GameRecord> {
        let games = apply_bucket_filters(&self.raw_games, &self.buckets);
        let games = apply_search(&games, &self.search_text);
        order(games, self.order_mode)
    }
}

/// `(state, event) -> state`, for callers that hold the state by value.
pub fn reduce(mut state: ViewState, event: ViewEvent) -> ViewState {
    state.apply(event);
    state
}

/// Everything the frontend draws, computed from scratch.
pub fn derive_view(state: &ViewState) -> RenderModel {
    match &state.load_state {
        LoadState::Loading => RenderModel::Loading,
        LoadState::Failed(message) => RenderModel::Failed {
            message: message.clone(),
        },
        LoadState::Loaded => RenderModel::Ready(derive_page(state)),
    }
}

fn derive_page(state: &ViewState) -> LibraryPage {
    let config = &state.config;
    let filtered = state.filtered_games();
    let page = paginate(&filtered, config.games_per_page, state.current_page);

    let games = page
        .items
        .iter()
        .map(|g| GameCard {
            app_id: g.app_id,
            name: g.name.clone(),
            playtime_label: playtime_label(g.playtime_minutes),
            image_url: image_url(config, g.app_id),
            store_url: store_url(g.app_id),
        })
        .collect();

    let buckets = state
        .buckets
        .iter()
        .enumerate()
        .map(|(index, b)| BucketView {
            index,
            label: bucket_label(b),
            match_count: b.match_count,
            checked: b.is_checked,
            is_unplayed: b.is_unplayed,
        })
        .collect();

    LibraryPage {
        total_games: state.total_games,
        filtered_count: filtered.len(),
        filter_panel: filter_panel(state.filters_collapsed),
        buckets,
        search_text: state.search_text.clone(),
        order: state.order_mode,
        pagination: PaginationView {
            current_page: page.current_page,
            total_pages: page.total_pages,
            display_total_pages: page.total_pages.max(1),
            previous_disabled: page.current_page <= 1,
            next_disabled: page.current_page == page.total_pages,
        },
        games,
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// "2 Hours and 1 Minute Played", "45 Minutes Played", "No Play Time".
pub fn playtime_label(minutes_played: u32) -> String {
    if minutes_played == 0 {
        return "No Play Time".to_string();
    }
    let hours = minutes_played / 60;
    let minutes = minutes_played % 60;

    let mut parts = Vec::with_capacity(2);
    if hours != 0 {
        parts.push(format!("{hours} {}", if hours == 1 { "Hour" } else { "Hours" }));
    }
    if minutes != 0 {
        parts.push(format!("{minutes} {}", if minutes == 1 { "Minute" } else { "Minutes" }));
    }
    format!("{} Played", parts.join(" and "))
}

/// Checkbox text, e.g. "12 to 6 hours (4)".
pub fn bucket_label(bucket: &PlaytimeBucket) -> String {
    let count = bucket.match_count;
    if bucket.is_unplayed {
        return format!("Unplayed Games ({count})");
    }
    let start_hours = minutes_to_rounded_hours(bucket.start_minutes);
    if bucket.end_minutes == 0 {
        return format!("{start_hours} to less than 1 hour ({count})");
    }
    let end_hours = minutes_to_rounded_hours(bucket.end_minutes);
    format!("{start_hours} to {end_hours} hours ({count})")
}

// Half-up, so 90 minutes shows as 2 hours.
fn minutes_to_rounded_hours(minutes: i64) -> i64 {
    (minutes + 30).div_euclid(60)
}

pub fn image_url(config: &ViewConfig, app_id: u64) -> String {
    format!("{}{}{}", config.image_path_prefix, app_id, config.image_suffix)
}

pub fn store_url(app_id: u64) -> String {
    format!("https://store.steampowered.com/app/{app_id}/")
}

fn filter_panel(collapsed: bool) -> FilterPanelView {
    let (toggle, class) = if collapsed { ("+", "hidden") } else { ("\u{2013}", "") };
    FilterPanelView {
        collapsed,
        toggle_label: toggle.to_string(),
        options_class: class.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn loaded(games: Vec<GameRecord>) -> Result<LoadedLibrary, LoadError> {
        Ok(LoadedLibrary {
            total_games: games.len(),
            games,
            fetched_at: Utc::now(),
        })
    }

    fn ready_state(per_page: usize, games: Vec<GameRecord>) -> ViewState {
        let mut config = ViewConfig::new("games.json");
        config.games_per_page = per_page;
        reduce(ViewState::new(config), ViewEvent::Loaded(loaded(games)))
    }

    fn page(state: &ViewState) -> LibraryPage {
        match derive_view(state) {
            RenderModel::Ready(page) => page,
            other => panic!("expected a ready view, got {other:?}"),
        }
    }

    fn five_games() -> Vec<GameRecord> {
        vec![
            GameRecord::new(1, "Celeste", 0),
            GameRecord::new(2, "Dota 2", 4210),
            GameRecord::new(3, "Half-Life", 61),
            GameRecord::new(4, "Portal", 150),
            GameRecord::new(5, "Stardew Valley", 1),
        ]
    }

    #[test]
    fn starts_loading_with_filters_collapsed() {
        let state = ViewState::new(ViewConfig::new("games.json"));
        assert_eq!(derive_view(&state), RenderModel::Loading);
        assert!(state.filters_collapsed);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn failed_load_is_a_persistent_state() {
        let state = reduce(
            ViewState::new(ViewConfig::new("games.json")),
            ViewEvent::Loaded(Err(LoadError::Http("timed out".into()))),
        );
        assert_eq!(
            derive_view(&state),
            RenderModel::Failed { message: "HTTP error: timed out".into() }
        );

        let state = reduce(state, ViewEvent::Loaded(loaded(five_games())));
        assert!(matches!(derive_view(&state), RenderModel::Failed { .. }));
    }

    #[test]
    fn empty_library_loads_without_buckets() {
        let state = ready_state(3, Vec::new());
        let view = page(&state);
        assert!(view.buckets.is_empty());
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.pagination.current_page, 0);
        assert_eq!(view.pagination.total_pages, 0);
        assert_eq!(view.pagination.display_total_pages, 1);
        assert!(view.games.is_empty());
    }

    #[test]
    fn first_page_renders_cards() {
        let view = page(&ready_state(2, five_games()));
        assert_eq!(view.total_games, 5);
        assert_eq!(view.filtered_count, 5);
        assert_eq!(view.pagination.total_pages, 3);
        assert!(view.pagination.previous_disabled);
        assert!(!view.pagination.next_disabled);

        let card = &view.games[1];
        assert_eq!(card.name, "Dota 2");
        assert_eq!(card.playtime_label, "70 Hours and 10 Minutes Played");
        assert_eq!(card.image_url, "https://steamcdn-a.akamaihd.net/steam/apps/2/header.jpg");
        assert_eq!(card.store_url, "https://store.steampowered.com/app/2/");
    }

    #[test]
    fn shrinking_the_result_clamps_the_page() {
        let mut state = ready_state(2, five_games());
        state.apply(ViewEvent::NextPage { displayed_total: 3 });
        state.apply(ViewEvent::NextPage { displayed_total: 3 });
        assert_eq!(state.current_page, 3);

        state.apply(ViewEvent::SetSearch("dota".into()));
        assert_eq!(state.current_page, 1);
        let view = page(&state);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.games[0].name, "Dota 2");
        assert!(view.pagination.next_disabled);
    }

    #[test]
    fn unchecking_a_bucket_pulls_the_page_back() {
        let mut state = ready_state(1, five_games());
        for _ in 0..4 {
            state.apply(ViewEvent::NextPage { displayed_total: 5 });
        }
        assert_eq!(state.current_page, 5);

        let unplayed = state.buckets.iter().position(|b| b.is_unplayed).unwrap();
        state.apply(ViewEvent::ToggleBucket { index: unplayed });
        assert_eq!(state.current_page, 4);

        let view = page(&state);
        assert_eq!(view.pagination.total_pages, 4);
        assert_eq!(view.pagination.current_page, 4);
        assert_eq!(view.games.len(), 1);
    }

    #[test]
    fn search_with_no_hits_keeps_page_at_one() {
        let mut state = ready_state(2, five_games());
        state.apply(ViewEvent::SetSearch("zelda".into()));
        assert_eq!(state.current_page, 1);
        assert_eq!(page(&state).pagination.current_page, 0);
    }

    #[test]
    fn unchecking_the_unplayed_bucket_hides_unplayed_games() {
        let mut state = ready_state(10, five_games());
        let unplayed = state.buckets.iter().position(|b| b.is_unplayed).unwrap();

        state.apply(ViewEvent::ToggleBucket { index: unplayed });
        let view = page(&state);
        assert_eq!(view.filtered_count, 4);
        assert!(view.games.iter().all(|g| g.name != "Celeste"));
        assert!(!view.buckets[unplayed].checked);
        // match counts stay as generated
        assert_eq!(view.buckets[unplayed].match_count, 1);

        state.apply(ViewEvent::ToggleBucket { index: unplayed });
        assert_eq!(page(&state).filtered_count, 5);
    }

    #[test]
    fn unknown_bucket_index_is_ignored() {
        let mut state = ready_state(10, five_games());
        let before = state.buckets.clone();
        state.apply(ViewEvent::ToggleBucket { index: 99 });
        assert_eq!(state.buckets, before);
    }

    #[test]
    fn order_applies_before_paging() {
        let mut state = ready_state(2, five_games());
        state.apply(ViewEvent::SetOrder(OrderMode::MostPlayed));
        let names: Vec<String> = page(&state).games.into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Dota 2", "Portal"]);
    }

    #[test]
    fn previous_page_uses_displayed_total() {
        let mut state = ready_state(1, five_games());
        state.current_page = 5;
        state.apply(ViewEvent::PreviousPage { displayed_total: 3 });
        assert_eq!(state.current_page, 2);
        state.apply(ViewEvent::PreviousPage { displayed_total: 3 });
        state.apply(ViewEvent::PreviousPage { displayed_total: 3 });
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn toggle_filters_flips_panel() {
        let state = reduce(ready_state(3, five_games()), ViewEvent::ToggleFilters);
        let panel = page(&state).filter_panel;
        assert!(!panel.collapsed);
        assert_eq!(panel.toggle_label, "\u{2013}");
        assert_eq!(panel.options_class, "");

        let panel = page(&reduce(state, ViewEvent::ToggleFilters)).filter_panel;
        assert_eq!(panel.toggle_label, "+");
        assert_eq!(panel.options_class, "hidden");
    }

    #[test]
    fn playtime_labels() {
        assert_eq!(playtime_label(0), "No Play Time");
        assert_eq!(playtime_label(1), "1 Minute Played");
        assert_eq!(playtime_label(45), "45 Minutes Played");
        assert_eq!(playtime_label(60), "1 Hour Played");
        assert_eq!(playtime_label(121), "2 Hours and 1 Minute Played");
    }

    #[test]
    fn bucket_labels() {
        let mut bucket = PlaytimeBucket {
            start_minutes: 720,
            end_minutes: 360,
            is_unplayed: false,
            is_checked: true,
            match_count: 4,
        };
        assert_eq!(bucket_label(&bucket), "12 to 6 hours (4)");

        bucket.start_minutes = 90;
        bucket.end_minutes = 0;
        assert_eq!(bucket_label(&bucket), "2 to less than 1 hour (4)");

        bucket.start_minutes = 0;
        bucket.is_unplayed = true;
        assert_eq!(bucket_label(&bucket), "Unplayed Games (4)");
    }
}
