//! Adding videos to the catalog and listing them.

use std::cmp::Ordering;

use crate::db::Db;
use crate::errors::BackendError;
use crate::video::{Submission, Video};

/// Validates `submission` and stores it. Nothing is stored if the
/// submission is invalid or its video ID is already taken.
pub async fn add<D: Db + ?Sized>(db: &D, submission: Submission) -> Result<Video, BackendError> {
    let video = submission.validate()?;

    db.insert(video).await
}

/// Returns the videos whose names contain `search_term` (ignoring
/// case), or all videos if there is no term, sorted by name.
pub async fn list<D: Db + ?Sized>(
    db: &D,
    search_term: Option<&str>,
) -> Result<Vec<Video>, BackendError> {
    let videos = db.retrieve_all().await?;

    Ok(filter_and_sort(videos, search_term))
}

/// Keeps the videos matching `search_term` and orders them by
/// lowercased name, oldest first among equal names.
pub fn filter_and_sort(videos: Vec<Video>, search_term: Option<&str>) -> Vec<Video> {
    let mut videos = match search_term.filter(|t| !t.is_empty()) {
        Some(term) => {
            let term = term.to_lowercase();

            videos
                .into_iter()
                .filter(|v| v.name().to_lowercase().contains(&term))
                .collect()
        }
        None => videos,
    };

    videos.sort_by(compare);

    videos
}

fn compare(a: &Video, b: &Video) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.id().cmp(&b.id()))
}
