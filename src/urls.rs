use url::{ParseError, Url};

/// Convenience wrapper for URL generation functions.
#[derive(Clone, Debug)]
pub struct Urls {
    /// Top-level URL, including trailing slash.
    base: Url,

    /// Path for all video-related actions.
    pub(crate) videos_path: String,

    /// Prefix for all video-related actions.
    videos_prefix: String,
}

impl Urls {
    /// Create a new instance. `videos_path` should *not* include a trailing slash.
    pub fn new(base: impl AsRef<str>, videos_path: impl Into<String>) -> Result<Self, ParseError> {
        let base = Url::parse(base.as_ref())?;
        let videos_path = videos_path.into();
        let videos_prefix = format!("{}/", videos_path);

        Ok(Urls {
            base,
            videos_path,
            videos_prefix,
        })
    }

    pub fn videos(&self) -> Result<Url, ParseError> {
        self.base.join(&self.videos_prefix)
    }

    /// The detail URL of a single video, with a trailing slash.
    pub fn video(&self, id: i64) -> Result<Url, ParseError> {
        self.videos()?.join(&format!("{}/", id))
    }
}
