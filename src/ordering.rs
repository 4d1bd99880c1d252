// ordering.rs - Reorders the filtered list for the selected order mode.

use std::cmp::Reverse;

use crate::models::{GameRecord, OrderMode};

/// Return the games in `mode` order.
///
/// `OrderMode::None` hands the list back untouched. The sorts are stable, so
/// equal playtimes or names keep their incoming order.
pub fn order(games: Vec<GameRecord>, mode: OrderMode) -> Vec<GameRecord> {
    let mut games = games;
    match mode {
        OrderMode::None         => {}
        OrderMode::MostPlayed   => games.sort_by_key(|g| Reverse(g.playtime_minutes)),
        OrderMode::LeastPlayed  => games.sort_by_key(|g| g.playtime_minutes),
        // Z to A. Kept this way for parity with the existing frontend.
        OrderMode::Alphabetical => games.sort_by(|a, b| b.name.cmp(&a.name)),
    }
    games
}
