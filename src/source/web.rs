//! Network content source: fetch a dictionary page and extract raw sections.

use regex::Regex;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use super::{percent_encode_path, ContentSource, FetchError, RawSegments};

/// Sentinel for sections the page does not populate.
///
/// Keeping a placeholder instead of omitting the section keeps segment arity
/// stable for downstream transforms.
const EMPTY_SECTION: &str = "None";

/// Marker present on rate-limit/challenge interstitials.
const CHALLENGE_MARKER: &str = "id=\"search-form-index\"";

/// Fetches one dictionary page per identifier and extracts its sections.
pub struct WebSource {
    base_url: String,
    max_retries: usize,
    challenge_wait: Duration,
}

impl WebSource {
    pub fn new(base_url: &str, max_retries: usize, challenge_wait: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            challenge_wait,
        }
    }

    fn page_url(&self, identifier: &str) -> String {
        percent_encode_path(&format!("{}/{}", self.base_url, identifier))
    }

    fn fetch_page(&self, url: &str) -> Result<String, String> {
        let mut response = ureq::get(url).call().map_err(|err| err.to_string())?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|err| err.to_string())
    }
}

impl ContentSource for WebSource {
    fn fetch(&self, identifier: &str) -> Result<RawSegments, FetchError> {
        let url = self.page_url(identifier);
        let mut last_error = String::from("no attempts made");
        for attempt in 1..=self.max_retries {
            match self.fetch_page(&url) {
                Ok(html) if html.contains(CHALLENGE_MARKER) => {
                    tracing::info!(
                        identifier,
                        attempt,
                        wait_secs = self.challenge_wait.as_secs(),
                        "challenge page detected, waiting before retry"
                    );
                    last_error = "challenge page".to_string();
                    thread::sleep(self.challenge_wait);
                }
                Ok(html) => return Ok(extract_segments(identifier, &html)),
                Err(err) => {
                    tracing::error!(
                        identifier,
                        attempt,
                        max_retries = self.max_retries,
                        error = %err,
                        "page fetch failed"
                    );
                    last_error = err;
                }
            }
        }
        Err(FetchError {
            identifier: identifier.to_string(),
            attempts: self.max_retries,
            last_error,
        })
    }
}

fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("section extraction regex"))
}

fn strip_tags(html: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    cached_regex(&TAGS, r"<[^>]+>").replace_all(html, "").trim().to_string()
}

fn block<'a>(html: &'a str, class: &str) -> Option<&'a str> {
    // Lazy match is enough for the flat section blocks this scopes.
    let pattern = format!(r#"(?s)<div[^>]*class="[^"]*{class}[^"]*"[^>]*>(.*?)</div>"#);
    let re = Regex::new(&pattern).expect("section block regex");
    re.captures(html).map(|cap| cap.get(1).map_or("", |m| m.as_str()))
}

fn inner_texts(html: &str, element: &'static OnceLock<Regex>, pattern: &str) -> Vec<String> {
    cached_regex(element, pattern)
        .captures_iter(html)
        .map(|cap| strip_tags(cap.get(1).map_or("", |m| m.as_str())))
        .filter(|text| !text.is_empty())
        .collect()
}

fn or_sentinel(text: String) -> String {
    if text.is_empty() {
        EMPTY_SECTION.to_string()
    } else {
        text
    }
}

/// Extract the fixed section tuple from a dictionary page.
///
/// Segment order: identifier, pronunciation accent, overview, tags,
/// translations, example sentence pairs.
pub fn extract_segments(identifier: &str, html: &str) -> RawSegments {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    static PARA: OnceLock<Regex> = OnceLock::new();
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    static CONTENT: OnceLock<Regex> = OnceLock::new();
    static SRC_SPAN: OnceLock<Regex> = OnceLock::new();
    static DST_SPAN: OnceLock<Regex> = OnceLock::new();

    let accent = cached_regex(&SPAN, r"(?s)<span[^>]*>(.*?)</span>")
        .captures(html)
        .map(|cap| strip_tags(cap.get(1).map_or("", |m| m.as_str())))
        .unwrap_or_default();

    let overview = block(html, "overview")
        .map(|inner| inner_texts(inner, &PARA, r"(?s)<p[^>]*>(.*?)</p>").join("\n"))
        .unwrap_or_default();

    let tags = block(html, "tags")
        .map(|inner| inner_texts(inner, &ANCHOR, r"(?s)<a[^>]*>(.*?)</a>").join("\n"))
        .unwrap_or_default();

    // Translation entries nest inside their section, so `block` cannot scope
    // them; `class="content"` divs only occur in the translations section.
    let translations = inner_texts(
        html,
        &CONTENT,
        r#"(?s)<div[^>]*class="content"[^>]*>(.*?)</div>"#,
    )
    .join("\n");

    let sources = inner_texts(html, &SRC_SPAN, r#"(?s)<span class="ru"[^>]*>(.*?)</span>"#);
    let targets = inner_texts(html, &DST_SPAN, r#"(?s)<span class="tl"[^>]*>(.*?)</span>"#);
    let examples = sources
        .iter()
        .zip(targets.iter())
        .map(|(src, dst)| format!("{src} | {dst}"))
        .collect::<Vec<_>>()
        .join("\n");

    vec![
        identifier.to_string(),
        or_sentinel(accent),
        or_sentinel(overview),
        or_sentinel(tags),
        or_sentinel(translations),
        or_sentinel(examples),
    ]
}
