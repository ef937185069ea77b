use futures::future::BoxFuture;

use crate::errors::BackendError;
use crate::video::{NewVideo, Video};

mod memory;

/// The record store. Implementations must reject a second video with
/// the same video ID with [`BackendError::DuplicateVideo`].
pub trait Db {
    fn insert(&self, video: NewVideo) -> BoxFuture<Result<Video, BackendError>>;

    fn retrieve(&self, id: i64) -> BoxFuture<Result<Option<Video>, BackendError>>;

    /// Returns every video in creation order.
    fn retrieve_all(&self) -> BoxFuture<Result<Vec<Video>, BackendError>>;
}

pub use self::memory::MemoryDb;
pub use self::postgres::*;

mod postgres {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use sqlx::{
        self,
        postgres::{PgPool, PgRow},
    };
    use time::OffsetDateTime;

    use crate::errors::BackendError;
    use crate::video::{NewVideo, Video};
    use crate::video_id::VideoId;

    const VIDEOS_VIDEO_ID_CONSTRAINT: &str = "videos_video_id_key";

    pub struct PgDb {
        pool: PgPool,
    }

    impl PgDb {
        pub fn new(pool: PgPool) -> Self {
            PgDb { pool }
        }
    }

    // these can be simplified once async functions in traits are stabilized
    impl super::Db for PgDb {
        fn insert(&self, video: NewVideo) -> BoxFuture<Result<Video, BackendError>> {
            async move {
                let query = sqlx::query_as::<_, (i64, OffsetDateTime)>(include_str!(
                    "queries/create.sql"
                ));

                let (id, created_at) = query
                    .bind(video.name())
                    .bind(video.url())
                    .bind(video.notes())
                    .bind(video.video_id().as_str())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(Video::new(id, created_at, video))
            }
            .boxed()
        }

        fn retrieve(&self, id: i64) -> BoxFuture<Result<Option<Video>, BackendError>> {
            async move {
                let query = sqlx::query(include_str!("queries/retrieve.sql"));

                let video = query
                    .bind(id)
                    .try_map(video_from_row)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(video)
            }
            .boxed()
        }

        fn retrieve_all(&self) -> BoxFuture<Result<Vec<Video>, BackendError>> {
            async move {
                let query = sqlx::query(include_str!("queries/retrieve_all.sql"));

                let videos = query
                    .try_map(video_from_row)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(videos)
            }
            .boxed()
        }
    }

    fn video_from_row(row: PgRow) -> Result<Video, sqlx::Error> {
        let id: i64 = try_get(&row, "id")?;
        let name: String = try_get(&row, "name")?;
        let url: String = try_get(&row, "url")?;
        let notes: Option<String> = try_get(&row, "notes")?;
        let video_id: String = try_get(&row, "video_id")?;
        let created_at: OffsetDateTime = try_get(&row, "created_at")?;

        // rows were validated on insertion, so they are rebuilt as-is
        Ok(Video::from_stored(
            id,
            name,
            url,
            notes,
            VideoId::from_stored(video_id),
            created_at,
        ))
    }

    fn try_get<'a, T: sqlx::Type<sqlx::Postgres> + sqlx::decode::Decode<'a, sqlx::Postgres>>(
        row: &'a PgRow,
        column: &str,
    ) -> Result<T, sqlx::Error> {
        use sqlx::prelude::*;

        row.try_get(column)
    }

    fn map_sqlx_error(error: sqlx::Error) -> BackendError {
        use sqlx::Error;

        match error {
            Error::Database(ref e) if e.constraint() == Some(VIDEOS_VIDEO_ID_CONSTRAINT) => {
                BackendError::DuplicateVideo
            }
            _ => BackendError::Sqlx { source: error },
        }
    }
}
