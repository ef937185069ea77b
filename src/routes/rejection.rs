use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    Add { url: Option<String> },
    List { search_term: Option<String> },
    Retrieve { id: i64 },
}

impl Context {
    pub fn add(url: Option<String>) -> Context {
        Context::Add { url }
    }

    pub fn list(search_term: Option<String>) -> Context {
        Context::List { search_term }
    }

    pub fn retrieve(id: i64) -> Context {
        Context::Retrieve { id }
    }
}
