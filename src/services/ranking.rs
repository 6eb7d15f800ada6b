//! Result filtering and ranking.

use crate::models::{BookSummary, SearchOutcome};
use crate::services::detect;

/// Filter normalized results and rank them by rating.
///
/// With `english_only` set, a book survives only when both its title and
/// its description positively detect as English. With a minimum rating
/// set, books below it are dropped; unrated books rank as 0.0 and so
/// never survive a minimum. Survivors are sorted by rating descending
/// with a stable sort, so equal ratings keep their provider order.
///
/// An empty survivor set becomes the [`SearchOutcome::Empty`] sentinel;
/// `Found` always carries at least one book.
pub fn filter_and_rank(
    books: Vec<BookSummary>,
    min_rating: Option<f32>,
    english_only: bool,
) -> SearchOutcome {
    let input_count = books.len();

    let mut survivors: Vec<BookSummary> = books
        .into_iter()
        .filter(|book| {
            if english_only
                && !(detect::is_english(&book.title) && detect::is_english(&book.description))
            {
                return false;
            }
            if let Some(min) = min_rating {
                if book.rating_or_zero() < min {
                    return false;
                }
            }
            true
        })
        .collect();

    survivors.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));

    tracing::debug!(
        input = input_count,
        survivors = survivors.len(),
        english_only = english_only,
        "Filtered and ranked catalog results"
    );

    if survivors.is_empty() {
        SearchOutcome::Empty
    } else {
        SearchOutcome::Found { books: survivors }
    }
}
