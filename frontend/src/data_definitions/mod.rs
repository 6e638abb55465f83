//! Types carried in the page URL and between page components.

pub mod filter_query_param;
pub mod grid_request;
