//! Extraction of canonical video identifiers from YouTube watch URLs.
//!
//! Only URLs starting with exactly [`WATCH_URL_PREFIX`] are considered.
//! The query string is parsed strictly: every `&`-separated segment must
//! be a `key=value` pair, and the first `v` value is authoritative.
//!
//! ```
//! use video_catalog::video_id::extract;
//!
//! let id = extract("https://www.youtube.com/watch?v=IODxDxX7oi4&ts=14").unwrap();
//! assert_eq!(id.as_str(), "IODxDxX7oi4");
//! assert!(extract("https://www.youtube.com/watch?v=").is_err());
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::{form_urlencoded, Url};

/// Every accepted URL starts with this, compared byte for byte.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch";

/// The longest identifier the store accepts.
pub const MAX_VIDEO_ID_LENGTH: usize = 40;

const WATCH_PATH: &str = "/watch";
const VIDEO_ID_PARAMETER: &str = "v";
const SEGMENT_SEPARATOR: char = '&';
const PAIR_SEPARATOR: char = '=';

/// The canonical identifier of a YouTube video, i.e. the `v` parameter
/// of its watch URL.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps an identifier read back from the store, where it was
    /// already validated on the way in.
    pub(crate) fn from_stored(id: String) -> Self {
        VideoId(id)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The reasons a URL is not accepted as a YouTube watch URL.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidUrl {
    #[error("URL does not start with {}", WATCH_URL_PREFIX)]
    NotYouTube,

    #[error("URL could not be parsed: {0}")]
    Unparseable(url::ParseError),

    #[error("URL path {path:?} is not {}", WATCH_PATH)]
    WrongPath { path: String },

    #[error("URL has no query string")]
    MissingQuery,

    #[error("query segment {segment:?} is not a key=value pair")]
    MalformedQuery { segment: String },

    #[error("URL has no `v` parameter")]
    MissingVideoId,

    #[error("URL has an empty `v` parameter")]
    EmptyVideoId,

    #[error("video ID is {length} characters long (maximum {})", MAX_VIDEO_ID_LENGTH)]
    VideoIdTooLong { length: usize },

    #[error("video ID contains a NUL character")]
    NulInVideoId,
}

/// Extracts the canonical video identifier from `url`.
pub fn extract(url: &str) -> Result<VideoId, InvalidUrl> {
    if !url.starts_with(WATCH_URL_PREFIX) {
        return Err(InvalidUrl::NotYouTube);
    }

    let parsed = Url::parse(url).map_err(InvalidUrl::Unparseable)?;

    if parsed.path() != WATCH_PATH {
        return Err(InvalidUrl::WrongPath {
            path: parsed.path().to_owned(),
        });
    }

    let query = match parsed.query() {
        Some(query) if !query.is_empty() => query,
        _ => return Err(InvalidUrl::MissingQuery),
    };

    let id = first_value(query, VIDEO_ID_PARAMETER)?.ok_or(InvalidUrl::MissingVideoId)?;

    if id.is_empty() {
        return Err(InvalidUrl::EmptyVideoId);
    }

    let length = id.chars().count();

    if length > MAX_VIDEO_ID_LENGTH {
        return Err(InvalidUrl::VideoIdTooLong { length });
    }

    // Postgres text columns cannot hold NUL
    if id.contains('\0') {
        return Err(InvalidUrl::NulInVideoId);
    }

    Ok(VideoId(id))
}

/// Returns the decoded first value of `key`, after checking that every
/// segment of `query` is well-formed.
fn first_value(query: &str, key: &str) -> Result<Option<String>, InvalidUrl> {
    let mut found = None;

    for segment in query.split(SEGMENT_SEPARATOR) {
        if !segment.contains(PAIR_SEPARATOR) {
            return Err(InvalidUrl::MalformedQuery {
                segment: segment.to_owned(),
            });
        }

        if found.is_some() {
            continue;
        }

        // a segment holds no `&`, so it decodes to exactly one pair
        if let Some((name, value)) = form_urlencoded::parse(segment.as_bytes()).next() {
            if name == key {
                found = Some(value.into_owned());
            }
        }
    }

    Ok(found)
}
