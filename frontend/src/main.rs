//! Frontend application entry point.

use ddi_frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use axum::{extract::Request, middleware::Next};
        use dioxus::server::axum;
        use backend::server_extra::redirect_to_catalog::redirect_to_catalog;

        Ok(dioxus::server::router(App)
            .route("/export/questions/", axum::routing::get(redirect_to_catalog))
            .route("/question/{id}/", axum::routing::get(redirect_to_catalog))
            .layer(axum::middleware::from_fn(
                |request: Request, next: Next| async move {
                    let method = request.method().clone();
                    let path = request.uri().path().to_string();
                    let res = next.run(request).await;
                    dioxus::logger::tracing::debug!("{} {} -> {}", method, path, res.status());
                    res
                },
            )))
    });
}
