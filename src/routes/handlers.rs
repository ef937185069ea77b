use std::time::{Duration, Instant};

use log::{debug, o};
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::catalog;
use crate::environment::Environment;
use crate::errors::BackendError;
use crate::routes::{
    query::ListQuery,
    rejection::{Context, Rejection},
    response::SuccessResponse,
};
use crate::video::Submission;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        // TODO when `try` blocks are stabilized, we can wrap the body
        // and return the headers even on errors
        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn home(environment: Environment) -> RouteResult {
    timed! {
        json(&SuccessResponse::Home {
            app_name: &environment.config.app_name,
        })
    }
}

pub async fn add(environment: Environment, submission: Submission) -> RouteResult {
    timed! {
        let Environment { logger, db, urls, .. } = environment;

        let submitted_url = submission.url.clone();
        let error_handler = |e: BackendError| Rejection::new(Context::add(submitted_url.clone()), e);

        debug!(logger, "Adding video..."; "url" => ?submitted_url);
        let video = catalog::add(db.as_ref(), submission)
            .await
            .map_err(&error_handler)?;

        let logger = logger.new(o!("id" => video.id(), "video_id" => video.video_id().to_string()));
        debug!(logger, "Added video.");

        let location = urls
            .video(video.id())
            .map_err(|source| BackendError::FailedToGenerateUrl { source })
            .map_err(&error_handler)?;

        let response = SuccessResponse::Add {
            id: video.id(),
            video_id: video.video_id(),
        };

        with_header(
            with_status(json(&response), StatusCode::CREATED),
            "location",
            location.as_str(),
        )
    }
}

pub async fn list(environment: Environment, query: ListQuery) -> RouteResult {
    timed! {
        let ListQuery { search_term } = query;

        let error_handler = |e: BackendError| Rejection::new(Context::list(search_term.clone()), e);

        debug!(environment.logger, "Listing videos..."; "search_term" => ?search_term);
        let videos = catalog::list(environment.db.as_ref(), search_term.as_deref())
            .await
            .map_err(&error_handler)?;

        json(&SuccessResponse::List {
            count: videos.len(),
            videos,
        })
    }
}

pub async fn retrieve(environment: Environment, id: i64) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::retrieve(id), e);

        debug!(environment.logger, "Retrieving video..."; "id" => id);

        let video = environment
            .db
            .retrieve(id)
            .await
            .map_err(&error_handler)?
            .ok_or_else(|| error_handler(BackendError::NonExistentId(id)))?;

        json(&video)
    }
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
