use std::fmt;

/// A ready-to-send catalog search query.
///
/// `q` is already URL-encoded; providers splice it into the request URL
/// verbatim instead of letting the HTTP client encode it a second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    q: String,
    lang_restrict: Option<String>,
}

impl CatalogQuery {
    pub fn q(&self) -> &str {
        &self.q
    }

    /// ISO 639-1 code for the catalog's language-restrict parameter
    pub fn lang_restrict(&self) -> Option<&str> {
        self.lang_restrict.as_deref()
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.q)?;
        if let Some(lang) = &self.lang_restrict {
            write!(f, " lang:{}", lang)?;
        }
        Ok(())
    }
}

/// Assemble the catalog query string from free-text preferences.
///
/// The subject phrase is URL-encoded, then each comma-separated author
/// becomes an `inauthor:` term with the author name encoded the same
/// way. Blank segments between commas are skipped. A recognized language
/// preference is carried separately as a language-restrict code rather
/// than folded into `q`.
pub fn build_query(subject: &str, authors: Option<&str>, language: Option<&str>) -> CatalogQuery {
    let mut parts: Vec<String> = Vec::new();

    let subject = subject.trim();
    if !subject.is_empty() {
        parts.push(urlencoding::encode(subject).into_owned());
    }

    for author in authors.unwrap_or_default().split(',') {
        let author = author.trim();
        if author.is_empty() {
            continue;
        }
        parts.push(format!("inauthor:{}", urlencoding::encode(author)));
    }

    CatalogQuery {
        q: parts.join("+"),
        lang_restrict: language.and_then(language_code),
    }
}

/// Map a free-text language preference to an ISO 639-1 code.
///
/// Recognizes the names users actually type plus bare two-letter codes.
/// Anything else returns `None` and the search runs unrestricted.
pub fn language_code(language: &str) -> Option<String> {
    let lowered = language.trim().to_lowercase();
    let code = match lowered.as_str() {
        "" => return None,
        "en" | "eng" | "english" => "en",
        "hi" | "hindi" => "hi",
        "es" | "spanish" | "español" | "espanol" => "es",
        "fr" | "french" | "français" | "francais" => "fr",
        "de" | "german" | "deutsch" => "de",
        "it" | "italian" | "italiano" => "it",
        "pt" | "portuguese" | "português" => "pt",
        "ru" | "russian" => "ru",
        "ja" | "japanese" => "ja",
        "zh" | "chinese" | "mandarin" => "zh",
        "ar" | "arabic" => "ar",
        "bn" | "bengali" => "bn",
        "ta" | "tamil" => "ta",
        other => {
            // Assume a bare two-letter code is already ISO 639-1
            if other.len() == 2 && other.chars().all(|c| c.is_ascii_lowercase()) {
                return Some(other.to_string());
            }
            return None;
        }
    };
    Some(code.to_string())
}
