use std::collections::BTreeSet;

use common::{
    catalog_ids::{CollectionId, NamedOption, SubCollectionId, SurveyId},
    decades::DecadeYears,
    filter_session::surface::{FilterResolver, ResolveError},
    filter_state::FilterScope,
};
use dioxus::prelude::*;

use crate::api::ddi_api;

/// Resolves facet options through the server functions in [`ddi_api`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerFnResolver;

fn to_resolve_error(e: ServerFnError) -> ResolveError {
    match e {
        ServerFnError::ServerError { message, code, .. } => ResolveError::Status { status: code, body: message },
        other => ResolveError::Transport(other.to_string()),
    }
}

impl FilterResolver for ServerFnResolver {
    async fn resolve_sub_collections(
        &self,
        collections: &BTreeSet<CollectionId>,
    ) -> Result<Vec<NamedOption<SubCollectionId>>, ResolveError> {
        ddi_api::get_sub_collections(collections.clone()).await.map_err(to_resolve_error)
    }

    async fn resolve_surveys(
        &self,
        sub_collections: &BTreeSet<SubCollectionId>,
    ) -> Result<Vec<NamedOption<SurveyId>>, ResolveError> {
        ddi_api::get_surveys(sub_collections.clone()).await.map_err(to_resolve_error)
    }

    async fn resolve_decades(&self, scope: &FilterScope) -> Result<DecadeYears, ResolveError> {
        ddi_api::get_decades(scope.clone()).await.map_err(to_resolve_error)
    }

    async fn resolve_years_in_decade(&self, decade: i32, scope: &FilterScope) -> Result<Vec<i32>, ResolveError> {
        ddi_api::get_years_by_decade(decade, scope.clone()).await.map_err(to_resolve_error)
    }
}
