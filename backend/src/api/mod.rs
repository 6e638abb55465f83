//! Catalog API calls, grouped by the page feature they serve.

pub mod filters;
pub mod search;
