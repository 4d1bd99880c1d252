// filters.rs - Playtime buckets and the search box.
//
// Buckets split the observed playtime range into equal slices, stepping down
// from the most played game. A bucket that is UNCHECKED hides the games in
// its range; checked buckets never restrict anything.

use tracing::{debug, warn};

use crate::error::EmptyInputError;
use crate::models::{GameRecord, PlaytimeBucket};

/// `(end, start]`, plus exact zero for the unplayed bucket.
///
/// A value equal to `end` belongs to the next bucket down, a value equal to
/// `start` belongs to this one.
pub fn in_range(value: i64, start: i64, end: i64, is_unplayed: bool) -> bool {
    (value <= start && value > end) || (is_unplayed && value == 0)
}

impl PlaytimeBucket {
    pub fn contains(&self, game: &GameRecord) -> bool {
        in_range(game.playtime(), self.start_minutes, self.end_minutes, self.is_unplayed)
    }
}

/// Most playtime checkboxes a view will generate.
pub const MAX_CHECKBOXES: usize = 100;

/// Build `checkbox_count` buckets from max playtime downwards, plus the
/// synthetic unplayed bucket when `include_unplayed` is set.
///
/// Counts above [`MAX_CHECKBOXES`] are capped.
pub fn generate_buckets(
    games: &[GameRecord],
    checkbox_count: usize,
    include_unplayed: bool,
) -> Result<Vec<PlaytimeBucket>, EmptyInputError> {
    let max = games.iter().map(GameRecord::playtime).max().ok_or(EmptyInputError)?;
    let min = games.iter().map(GameRecord::playtime).min().ok_or(EmptyInputError)?;

    if checkbox_count > MAX_CHECKBOXES {
        warn!(checkbox_count, "too many playtime checkboxes, capping at {MAX_CHECKBOXES}");
    }
    let capped = checkbox_count.min(MAX_CHECKBOXES);

    let mut buckets = Vec::with_capacity(capped + 1);
    if let Ok(count @ 1..) = i64::try_from(capped) {
        // round-half-up of (max - min) / count, without going through floats
        let width = (2 * (max - min) + count) / (2 * count);

        for k in 1..=count {
            let end = max - width * k;
            let start = end + width;
            buckets.push(bucket(games, start, end.max(0), false));
        }
    }
    if include_unplayed {
        buckets.push(bucket(games, 0, 0, true));
    }

    debug!(min, max, buckets = buckets.len(), "generated playtime buckets");
    Ok(buckets)
}

fn bucket(games: &[GameRecord], start: i64, end: i64, is_unplayed: bool) -> PlaytimeBucket {
    let match_count = games
        .iter()
        .filter(|g| in_range(g.playtime(), start, end, is_unplayed))
        .count();
    PlaytimeBucket {
        start_minutes: start,
        end_minutes: end,
        is_unplayed,
        is_checked: true,
        match_count,
    }
}

/// Keep every game that no unchecked bucket claims.
pub fn apply_bucket_filters(games: &[GameRecord], buckets: &[PlaytimeBucket]) -> Vec<GameRecord> {
    let excluding: Vec<&PlaytimeBucket> = buckets.iter().filter(|b| !b.is_checked).collect();

    games
        .iter()
        .filter(|game| !excluding.iter().any(|b| b.contains(game)))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on the game name. Empty text keeps all.
pub fn apply_search(games: &[GameRecord], text: &str) -> Vec<GameRecord> {
    let needle = text.to_lowercase();
    games
        .iter()
        .filter(|game| game.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
