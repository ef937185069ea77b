use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::BackendError;
use crate::normalization::{non_blank, normalize_name};
use crate::video_id::{self, VideoId};

/// The longest name the store accepts, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// The longest URL the store accepts, in characters.
pub const MAX_URL_LENGTH: usize = 400;

/// A single video in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Video {
    /// The ID assigned by the store, increasing in creation order.
    id: i64,

    /// The display name provided.
    name: String,

    /// The URL exactly as submitted.
    url: String,

    /// The notes provided, if any.
    notes: Option<String>,

    /// The identifier derived from `url`. Unique across the catalog.
    video_id: VideoId,

    /// The date and time it was added.
    #[serde(with = "time::serde::timestamp")]
    created_at: OffsetDateTime,
}

impl Video {
    pub fn new(id: i64, created_at: OffsetDateTime, video: NewVideo) -> Self {
        let NewVideo {
            name,
            url,
            notes,
            video_id,
        } = video;

        Video {
            id,
            name,
            url,
            notes,
            video_id,
            created_at,
        }
    }

    pub(crate) fn from_stored(
        id: i64,
        name: String,
        url: String,
        notes: Option<String>,
        video_id: VideoId,
        created_at: OffsetDateTime,
    ) -> Self {
        Video {
            id,
            name,
            url,
            notes,
            video_id,
            created_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// A validated video that has not been stored yet.
///
/// The only way to build one is [`NewVideo::new`], so `video_id` is
/// always the identifier extracted from `url`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewVideo {
    name: String,
    url: String,
    notes: Option<String>,
    video_id: VideoId,
}

impl NewVideo {
    pub fn new(
        name: impl AsRef<str>,
        url: impl Into<String>,
        notes: Option<String>,
    ) -> Result<Self, BackendError> {
        let name = normalize_name(name);
        let url = url.into();

        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH || name.contains('\0') {
            return Err(BackendError::InvalidSubmission { field: "name" });
        }

        if url.chars().count() > MAX_URL_LENGTH || url.contains('\0') {
            return Err(BackendError::InvalidSubmission { field: "url" });
        }

        let notes = non_blank(notes);

        if notes.as_deref().map_or(false, |n| n.contains('\0')) {
            return Err(BackendError::InvalidSubmission { field: "notes" });
        }

        let video_id = video_id::extract(&url)?;

        Ok(NewVideo {
            name,
            url,
            notes,
            video_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }
}

/// The fields of the submission form, as sent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Submission {
    pub name: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl Submission {
    /// Checks that the required fields are present and derives the
    /// video ID.
    pub fn validate(self) -> Result<NewVideo, BackendError> {
        let Submission { name, url, notes } = self;

        let name = name.ok_or(BackendError::InvalidSubmission { field: "name" })?;
        let url = url
            .filter(|u| !u.is_empty())
            .ok_or(BackendError::InvalidSubmission { field: "url" })?;

        NewVideo::new(name, url, notes)
    }
}
