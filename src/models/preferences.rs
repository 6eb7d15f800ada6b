use serde::{Deserialize, Serialize};

/// Lower bound of the minimum-rating preference
pub const RATING_FLOOR: f32 = 1.0;
/// Upper bound of the minimum-rating preference
pub const RATING_CEILING: f32 = 5.0;
/// Earliest accepted publication year
pub const YEAR_FLOOR: u16 = 1900;
/// Latest accepted publication year
pub const YEAR_CEILING: u16 = 2025;

fn default_minimum_rating() -> f32 {
    3.0
}

fn default_year_range() -> (u16, u16) {
    (2000, YEAR_CEILING)
}

/// User-supplied reading preferences for one request
///
/// Immutable once deserialized. The slider-style fields carry their own
/// defaults, so a request body may omit them entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceInput {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Comma-separated free text, e.g. "J.K. Rowling, Dan Brown"
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    /// 1.0-5.0 inclusive
    #[serde(default = "default_minimum_rating")]
    pub minimum_rating: f32,
    /// Inclusive (min, max) publication-year window, 1900-2025
    #[serde(default = "default_year_range")]
    pub year_range: (u16, u16),
}

impl Default for PreferenceInput {
    fn default() -> Self {
        Self {
            genre: String::new(),
            language: None,
            authors: None,
            mood: None,
            minimum_rating: default_minimum_rating(),
            year_range: default_year_range(),
        }
    }
}

impl PreferenceInput {
    /// True when at least one text field is filled in
    pub fn has_any_field(&self) -> bool {
        let filled = |value: &Option<String>| {
            value
                .as_deref()
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false)
        };

        !self.genre.trim().is_empty()
            || filled(&self.language)
            || filled(&self.authors)
            || filled(&self.mood)
    }

    /// Bounds check on the numeric fields
    ///
    /// Returns the user-correctable problem as a message; the caller maps
    /// it to an invalid-input response.
    pub fn validate(&self) -> Result<(), String> {
        if !(RATING_FLOOR..=RATING_CEILING).contains(&self.minimum_rating) {
            return Err(format!(
                "minimum_rating must be between {:.1} and {:.1}",
                RATING_FLOOR, RATING_CEILING
            ));
        }

        let (from, until) = self.year_range;
        if from > until {
            return Err("year_range must be ordered (min, max)".to_string());
        }
        if from < YEAR_FLOOR || until > YEAR_CEILING {
            return Err(format!(
                "year_range must fall within {}-{}",
                YEAR_FLOOR, YEAR_CEILING
            ));
        }

        Ok(())
    }

    /// Whether the strict English-only result filter applies
    ///
    /// An explicit non-English language preference turns the filter off;
    /// filtering those results down to English would contradict it.
    pub fn prefers_english(&self) -> bool {
        match self.language.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(language) => {
                let lowered = language.to_lowercase();
                matches!(lowered.as_str(), "en" | "eng" | "english")
            }
        }
    }

    /// "min-max" label for prompts
    pub fn year_range_label(&self) -> String {
        format!("{}-{}", self.year_range.0, self.year_range.1)
    }
}
