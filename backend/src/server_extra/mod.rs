//! Extra axum routes mounted next to the Dioxus app.

pub mod redirect_to_catalog;
