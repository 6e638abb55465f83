//! Server functions proxying to the catalog client.

pub mod ddi_api;
