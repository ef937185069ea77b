use std::sync::RwLock;

use futures::future::{self, BoxFuture, FutureExt};
use time::OffsetDateTime;

use crate::errors::BackendError;
use crate::video::{NewVideo, Video};

/// A store that keeps videos in memory, for tests.
#[derive(Default)]
pub struct MemoryDb {
    videos: RwLock<Vec<Video>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }
}

impl super::Db for MemoryDb {
    fn insert(&self, video: NewVideo) -> BoxFuture<Result<Video, BackendError>> {
        future::ready(memory_insert(self, video)).boxed()
    }

    fn retrieve(&self, id: i64) -> BoxFuture<Result<Option<Video>, BackendError>> {
        future::ready(memory_retrieve(self, id)).boxed()
    }

    fn retrieve_all(&self) -> BoxFuture<Result<Vec<Video>, BackendError>> {
        future::ready(memory_retrieve_all(self)).boxed()
    }
}

fn memory_insert(db: &MemoryDb, video: NewVideo) -> Result<Video, BackendError> {
    // the duplicate check and the push happen under one write lock
    let mut videos = db
        .videos
        .write()
        .map_err(|_| BackendError::StoreUnavailable)?;

    if videos.iter().any(|v| v.video_id() == video.video_id()) {
        return Err(BackendError::DuplicateVideo);
    }

    let id = videos.last().map_or(1, |v| v.id() + 1);
    let created = Video::new(id, OffsetDateTime::now_utc(), video);
    videos.push(created.clone());

    Ok(created)
}

fn memory_retrieve(db: &MemoryDb, id: i64) -> Result<Option<Video>, BackendError> {
    let videos = db.videos.read().map_err(|_| BackendError::StoreUnavailable)?;

    Ok(videos.iter().find(|v| v.id() == id).cloned())
}

fn memory_retrieve_all(db: &MemoryDb) -> Result<Vec<Video>, BackendError> {
    let videos = db.videos.read().map_err(|_| BackendError::StoreUnavailable)?;

    Ok(videos.clone())
}
