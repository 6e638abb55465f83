//! CSV export and question detail pages are served by the catalog itself.

use axum::{
    body::Body,
    extract::OriginalUri,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::config::ApiConfig;

/// Same path and query, on the catalog origin.
pub fn catalog_redirect_target(base_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("{}{}", base_url.trim_end_matches('/'), path_and_query)
}

pub async fn redirect_to_catalog(OriginalUri(uri): OriginalUri) -> Response {
    match ApiConfig::from_env() {
        Ok(config) => {
            let target = catalog_redirect_target(&config.base_url, &uri);
            info!("Redirecting {} to {}", uri, target);
            Redirect::temporary(&target).into_response()
        }
        Err(e) => {
            tracing::error!("redirect_to_catalog: bad configuration: {:#?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Body::from(e.to_string())).into_response()
        }
    }
}
