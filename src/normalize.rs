//! Text normalization: raw email content to a clean token multiset

use crate::types::{RawEmail, TokenCounts};
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

// Regex patterns
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>\[\]{}|\\^]+").unwrap());

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d*)?(?:[eE][+-]?\d+)?").unwrap());

static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

static HEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head.*?>.*?</head>").unwrap());

static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a\b[^>]*>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

static BLANK_LINES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\s*\n)+").unwrap());

/// Normalization switches, all independently toggleable
///
/// Serialized into the model artifact so predictions are served with exactly
/// the configuration the vocabulary was fit under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Extract only body content from structured messages, preferring the
    /// first `text/plain` part of a depth-first walk over the part tree
    pub strip_headers: bool,

    /// Lowercase the extracted text before tokenization
    pub lower_case: bool,

    /// Replace every occurrence of each detected URL with the `URL` sentinel
    pub replace_urls: bool,

    /// Replace each maximal numeric literal with the `NUMBER` sentinel
    pub replace_numbers: bool,

    /// Collapse each maximal run of non-word characters into a single space
    pub remove_punctuation: bool,

    /// Porter-stem every token after splitting, merging counts of surface
    /// forms that share a root
    pub stemming: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_headers: true,
            lower_case: true,
            replace_urls: true,
            replace_numbers: true,
            remove_punctuation: true,
            stemming: true,
        }
    }
}

/// Stateless normalization service
///
/// Holds the compiled stemmer so it is constructed once and shared; safe to
/// call from concurrent requests.
pub struct Normalizer {
    options: NormalizeOptions,
    stemmer: Stemmer,
}

impl Normalizer {
    #[must_use]
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    #[must_use]
    pub const fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize one email into its token multiset
    ///
    /// Never fails: undecodable content degrades to best-effort text
    /// extraction, and an email with no extractable text yields an empty
    /// multiset.
    #[must_use]
    pub fn normalize(&self, email: &RawEmail) -> TokenCounts {
        let mut text = self.extract_text(email);

        if self.options.lower_case {
            text = text.to_lowercase();
        }

        if self.options.replace_urls {
            text = replace_urls(&text);
        }

        if self.options.replace_numbers {
            text = NUMBER_REGEX.replace_all(&text, "NUMBER").into_owned();
        }

        if self.options.remove_punctuation {
            text = NON_WORD_REGEX.replace_all(&text, " ").into_owned();
        }

        let mut counts = TokenCounts::new();
        for token in text.split_whitespace() {
            if self.options.stemming {
                // The stemmer expects lowercase input; surface forms that
                // share a root merge into one count.
                let stemmed = self.stemmer.stem(&token.to_lowercase()).into_owned();
                counts.add(stemmed);
            } else {
                counts.add(token);
            }
        }
        counts
    }

    /// Normalize already-extracted plain content
    #[must_use]
    pub fn normalize_text(&self, content: &str) -> TokenCounts {
        self.normalize(&RawEmail::Text(content))
    }

    /// Normalize a batch of emails, one multiset per input, order preserved
    #[must_use]
    pub fn normalize_batch(&self, emails: &[RawEmail]) -> Vec<TokenCounts> {
        emails.iter().map(|email| self.normalize(email)).collect()
    }

    fn extract_text(&self, email: &RawEmail) -> String {
        match email {
            // Inline markup in plain content goes through the same
            // conversion as an HTML body part.
            RawEmail::Text(content) => {
                if TAG_REGEX.is_match(content) {
                    html_to_plain_text(content)
                } else {
                    (*content).to_string()
                }
            }
            RawEmail::Message(raw) => {
                if !self.options.strip_headers {
                    return String::from_utf8_lossy(raw).into_owned();
                }
                match mailparse::parse_mail(raw) {
                    Ok(parsed) => extract_body_text(&parsed),
                    Err(e) => {
                        debug!("Unparseable message structure, using raw payload: {e}");
                        String::from_utf8_lossy(raw).into_owned()
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Extract body text from a parsed message: first `text/plain` part of a
/// depth-first walk, else the first `text/html` part converted to plain text
fn extract_body_text(parsed: &mailparse::ParsedMail) -> String {
    let mut plain: Option<String> = None;
    let mut html: Option<String> = None;
    collect_text_parts(parsed, &mut plain, &mut html);

    if let Some(text) = plain {
        text
    } else if let Some(markup) = html {
        html_to_plain_text(&markup)
    } else {
        String::new()
    }
}

fn collect_text_parts(
    part: &mailparse::ParsedMail,
    plain: &mut Option<String>,
    html: &mut Option<String>,
) {
    if part.subparts.is_empty() {
        let content_type = part.ctype.mimetype.to_lowercase();
        if content_type == "text/plain" && plain.is_none() {
            *plain = Some(part_text(part));
        } else if content_type == "text/html" && html.is_none() {
            *html = Some(part_text(part));
        }
    } else {
        for sub in &part.subparts {
            collect_text_parts(sub, plain, html);
            if plain.is_some() {
                return;
            }
        }
    }
}

/// Decode a leaf part, falling back to the raw payload when transfer decoding
/// fails
fn part_text(part: &mailparse::ParsedMail) -> String {
    match part.get_body() {
        Ok(body) => body,
        Err(e) => {
            debug!("Undecodable part, using raw payload: {e}");
            part.get_body_raw()
                .map(|raw| String::from_utf8_lossy(&raw).into_owned())
                .unwrap_or_default()
        }
    }
}

/// Replace every occurrence of each detected URL with the `URL` sentinel
///
/// Detected URLs are deduplicated, then substituted longest-first so a URL
/// embedded in another cannot corrupt the pass.
fn replace_urls(text: &str) -> String {
    let mut urls: Vec<&str> = URL_REGEX.find_iter(text).map(|m| m.as_str()).collect();
    urls.sort_unstable();
    urls.dedup();
    urls.sort_by_key(|url| std::cmp::Reverse(url.len()));

    let mut result = text.to_string();
    for url in urls {
        result = result.replace(url, " URL ");
    }
    result
}

/// Convert an HTML body to plain text
///
/// Drops the `<head>` region, turns anchor openings into the `HYPERLINK`
/// sentinel, strips remaining tags, collapses blank lines, and decodes the
/// common HTML entities.
#[must_use]
pub fn html_to_plain_text(html: &str) -> String {
    let text = HEAD_REGEX.replace_all(html, "");
    let text = ANCHOR_REGEX.replace_all(&text, " HYPERLINK ");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = BLANK_LINES_REGEX.replace_all(&text, "\n");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
