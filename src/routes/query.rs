use serde::Deserialize;

/// The query string of the listing route.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub(crate) search_term: Option<String>,
}
