use serde::Serialize;

use crate::video::Video;
use crate::video_id::VideoId;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Add {
        id: i64,
        video_id: &'a VideoId,
    },
    Healthz {
        revision: Option<&'a str>,
        timestamp: Option<&'a str>,
        version: &'a str,
    },
    Home {
        app_name: &'a str,
    },
    List {
        count: usize,
        videos: Vec<Video>,
    },
}
