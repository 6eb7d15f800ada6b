//! Prompt assembly for both request modes.

use crate::models::PreferenceInput;

/// Placeholder substituted for preference fields the user left empty
const ANY: &str = "Any";

fn or_any(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => ANY,
    }
}

/// Prompt for the direct suggestion-generation mode
///
/// Lists every preference field by name, asks for five books, and tells
/// the model to separate them with blank lines so the chunker downstream
/// has a boundary to split on.
pub fn suggestion_prompt(prefs: &PreferenceInput) -> String {
    let ratings = format!("{:.1}", prefs.minimum_rating);
    format!(
        "Suggest 5 books based on the following preferences:\n\
         - Genre: {genre}\n\
         - Language: {language}\n\
         - Year of Publication: {year_range}\n\
         - Preferred Authors: {authors}\n\
         - Minimum Book Rating: {ratings}\n\
         - Current Mood: {mood}\n\
         \n\
         Provide the following details for each book:\n\
         - Book Title\n\
         - Author\n\
         - Publishing Date\n\
         - Genre\n\
         - Language\n\
         - Book Rating (out of 5)\n\
         - A short but exciting description that hooks the reader.\n\
         \n\
         Format the response so each book's details appear clearly on a \
         new line, with a blank line between books.",
        genre = or_any(Some(&prefs.genre)),
        language = or_any(prefs.language.as_deref()),
        year_range = prefs.year_range_label(),
        authors = or_any(prefs.authors.as_deref()),
        ratings = ratings,
        mood = or_any(prefs.mood.as_deref()),
    )
}

/// Prompt for the advisory query-refinement call
///
/// The reply is shown to the user as context only; the catalog query is
/// always built from the raw preferences, never from this text.
pub fn refinement_prompt(prefs: &PreferenceInput) -> String {
    format!(
        "Rewrite the following book preferences as one short search phrase \
         suitable for a book catalog. Reply with the phrase only, no \
         explanation.\n\
         - Genre: {genre}\n\
         - Preferred Authors: {authors}\n\
         - Language: {language}\n\
         - Current Mood: {mood}",
        genre = or_any(Some(&prefs.genre)),
        authors = or_any(prefs.authors.as_deref()),
        language = or_any(prefs.language.as_deref()),
        mood = or_any(prefs.mood.as_deref()),
    )
}
