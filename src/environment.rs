use std::sync::Arc;

use log::Logger;

use crate::db::Db;
use crate::urls::Urls;

/// Everything a route handler needs, cloned into each route.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub db: Arc<dyn Db + Send + Sync>,
    pub urls: Arc<Urls>,
    pub config: Config,
}

impl Environment {
    pub fn new(
        logger: Arc<Logger>,
        db: Arc<dyn Db + Send + Sync>,
        urls: Arc<Urls>,
        config: Config,
    ) -> Self {
        Self {
            logger,
            db,
            urls,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// The title shown on the home page.
    pub(crate) app_name: String,
}

impl Config {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}
