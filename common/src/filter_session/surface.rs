//! Seams between the session and the outside world: the catalog and the page.

use std::{collections::BTreeSet, fmt::Display};

use crate::{
    catalog_ids::{CollectionId, NamedOption, SubCollectionId, SurveyId},
    decades::DecadeYears,
    filter_session::view::FilterView,
    filter_state::FilterScope,
    search_query::SearchParams,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The request never produced a response.
    Transport(String),
    /// The catalog answered with a non-success status.
    Status { status: u16, body: String },
    /// The response body was not the expected shape.
    Decode(String),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Request failed: {}", err),
            Self::Status { status, body } => write!(f, "Catalog returned {}: {}", status, body),
            Self::Decode(err) => write!(f, "Failed to decode response: {}", err),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolves which child facet values exist under a parent selection.
///
/// An empty input set means unconstrained. Every call is one round trip; nothing is cached.
#[allow(async_fn_in_trait)]
pub trait FilterResolver {
    async fn resolve_sub_collections(
        &self,
        collections: &BTreeSet<CollectionId>,
    ) -> Result<Vec<NamedOption<SubCollectionId>>, ResolveError>;

    async fn resolve_surveys(
        &self,
        sub_collections: &BTreeSet<SubCollectionId>,
    ) -> Result<Vec<NamedOption<SurveyId>>, ResolveError>;

    async fn resolve_decades(&self, scope: &FilterScope) -> Result<DecadeYears, ResolveError>;

    async fn resolve_years_in_decade(&self, decade: i32, scope: &FilterScope) -> Result<Vec<i32>, ResolveError>;
}

/// The page the session drives: facet renderer, address bar and results grid.
pub trait PageSurface {
    fn render(&self, view: &FilterView);

    fn push_url(&self, query: &str);

    fn reload_grid(&self, params: &SearchParams, reset_to_first_page: bool);
}
