//! Common library exports shared between frontend and backend.
//!
//! Holds the survey catalog filter state, its URL form, and the [`filter_session`]
//! controller that drives the facet cascade.

extern crate serde;

pub mod catalog_ids;
pub mod decades;
pub mod export_links;
pub mod filter_query;
pub mod filter_session;
pub mod filter_state;
pub mod request_sequence;
pub mod search_const;
pub mod search_query;
pub mod search_result;
