// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relative ratings and the cumulative-partition weighted draw.
//!
//! The partition is rebuilt from the current ratings on every draw. Ratings
//! change between calls and so does the eligible set, so nothing here is
//! cached.

use honorbot_core::records::round_rating;
use honorbot_core::{UserId, UserRecord};
use rand::Rng;

/// Each rating divided by the sum of all of them.
pub fn relative_ratings(ratings: &[f64]) -> Vec<f64> {
    let total: f64 = ratings.iter().sum();
    ratings.iter().map(|r| r / total).collect()
}

/// Cumulative boundaries over `[0, 1)` in list order.
///
/// The last boundary is forced to exactly `1.0` so that accumulated
/// floating-point error can never leave a draw without a bucket.
pub fn partition(relative: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    let mut boundaries: Vec<f64> = relative
        .iter()
        .map(|r| {
            acc += r;
            acc
        })
        .collect();
    if let Some(last) = boundaries.last_mut() {
        *last = 1.0;
    }
    boundaries
}

/// Index of the first boundary that is `>= draw`.
///
/// `boundaries` must be non-empty; a draw beyond every boundary (impossible
/// for a draw in `[0, 1)` over a well-formed partition) resolves to the last
/// bucket.
pub fn pick(boundaries: &[f64], draw: f64) -> usize {
    boundaries
        .iter()
        .position(|b| draw <= *b)
        .unwrap_or(boundaries.len().saturating_sub(1))
}

/// Draw one user with probability proportional to `rating`, optionally
/// leaving one user out of the draw.
///
/// Returns `None` when nobody is left to draw from.
pub fn draw_user<'a, R: Rng + ?Sized>(
    users: &'a [UserRecord],
    exclude: Option<UserId>,
    rng: &mut R,
) -> Option<&'a UserRecord> {
    let pool: Vec<&UserRecord> = users
        .iter()
        .filter(|u| Some(u.user_id()) != exclude)
        .collect();
    if pool.is_empty() {
        return None;
    }
    let ratings: Vec<f64> = pool.iter().map(|u| u.rating).collect();
    let boundaries = partition(&relative_ratings(&ratings));
    let index = pick(&boundaries, rng.gen_range(0.0..1.0));
    pool.get(index).copied()
}

/// Rating after a consolation increment, rounded for storage.
pub fn bump_rating(rating: f64, increment: f64) -> f64 {
    round_rating(rating + increment)
}

/// Relative rating as a percentage with at most two decimals and no
/// trailing zeros: `0.5` is `50%`, `1/3` is `33.33%`.
pub fn format_percent(relative: f64) -> String {
    let fixed = format!("{:.2}", relative * 100.0);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}
