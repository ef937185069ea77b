pub mod catalog;
pub mod config;
pub mod db;
pub mod environment;
pub mod errors;
pub mod normalization;
pub mod routes;
pub mod urls;
pub mod video;
pub mod video_id;
