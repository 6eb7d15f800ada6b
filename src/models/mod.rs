use serde::{Deserialize, Deserializer, Serialize};

pub mod preferences;

pub use preferences::PreferenceInput;

/// Placeholder used when a provider record carries no title
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Placeholder author when a provider record carries none
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Placeholder category when a provider record carries none
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
/// Placeholder year when the published date is absent or malformed
pub const UNKNOWN_YEAR: &str = "Unknown Year";
/// Placeholder description when a provider record carries none
pub const NO_DESCRIPTION: &str = "No description available.";
/// Rendered in place of a numeric rating when the provider has none
pub const NOT_RATED: &str = "Not Rated";

/// Canonical book record surfaced to the client
///
/// Every field is populated: missing provider data is replaced with the
/// documented placeholder, so the rendered identity (title + authors) is
/// never empty. Constructed only from an [`ApiVolume`]; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    pub title: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    /// Four-character year string, or [`UNKNOWN_YEAR`]
    pub published_year: String,
    /// Provider rating on a 0-5 scale, kept numeric for filtering and
    /// ranking
    pub rating: Option<f32>,
    /// Display form of `rating`; [`NOT_RATED`] when the provider has none
    pub rating_label: String,
    pub description: String,
    /// Cover image URL, when the provider has one
    pub thumbnail: Option<String>,
    /// Canonical detail-page link, when the provider has one
    pub info_link: Option<String>,
}

impl BookSummary {
    /// Sort key for ranking: unrated books sort as zero, below any rated book
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}

/// Display form of a rating; [`NOT_RATED`] when absent
pub fn rating_label(rating: Option<f32>) -> String {
    match rating {
        Some(rating) => format!("{:.1}", rating),
        None => NOT_RATED.to_string(),
    }
}

/// Outcome of a catalog search after filtering and ranking
///
/// `Found` always holds at least one book; zero survivors become the
/// `Empty` sentinel so the client can render a distinct "no matches"
/// message and never confuses it with a provider failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found { books: Vec<BookSummary> },
    Empty,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::Empty)
    }
}

// ============================================================================
// Catalog API Types
// ============================================================================

/// Search response envelope from the volumes endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchResponse {
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub items: Option<Vec<ApiVolume>>,
}

/// Raw volume record as returned by the catalog provider
///
/// Also what the search cache stores, so it round-trips through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVolume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: ApiVolumeInfo,
}

/// The `volumeInfo` payload of one volume record
///
/// Every field is optional: the provider omits whatever it does not know,
/// and ratings occasionally arrive as strings, so deserialization must
/// tolerate anything rather than reject the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_links: Option<ApiImageLinks>,
    #[serde(default)]
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiImageLinks {
    #[serde(default)]
    pub small_thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Accepts a numeric rating, a numeric string, or anything else as `None`
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Float(f32),
        String(String),
        Other(serde_json::Value),
    }

    match Option::<RawRating>::deserialize(deserializer)? {
        Some(RawRating::Float(value)) => Ok(Some(value)),
        // "NaN" and "inf" parse as floats that break the rating ordering
        Some(RawRating::String(text)) => {
            Ok(text.trim().parse::<f32>().ok().filter(|v| v.is_finite()))
        }
        _ => Ok(None),
    }
}

/// First four characters of the raw published date, or [`UNKNOWN_YEAR`]
///
/// The provider's date formats vary ("1998", "1998-05", "1998-05-02");
/// the leading four characters are the year in all of them.
fn extract_year(published_date: Option<&str>) -> String {
    match published_date {
        Some(date) if date.chars().count() >= 4 => date.chars().take(4).collect(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

impl From<ApiVolume> for BookSummary {
    fn from(volume: ApiVolume) -> Self {
        let info = volume.volume_info;

        let title = match info.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => UNKNOWN_TITLE.to_string(),
        };

        let authors = match info.authors {
            Some(authors) if !authors.is_empty() => authors,
            _ => vec![UNKNOWN_AUTHOR.to_string()],
        };

        let categories = match info.categories {
            Some(categories) if !categories.is_empty() => categories,
            _ => vec![UNKNOWN_GENRE.to_string()],
        };

        let description = match info.description {
            Some(description) if !description.trim().is_empty() => description,
            _ => NO_DESCRIPTION.to_string(),
        };

        let thumbnail = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));

        let rating = info.average_rating;

        BookSummary {
            title,
            authors,
            categories,
            published_year: extract_year(info.published_date.as_deref()),
            rating,
            rating_label: rating_label(rating),
            description,
            thumbnail,
            info_link: info.info_link,
        }
    }
}
