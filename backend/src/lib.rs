//! Server side of the question catalog: a client for the DDI catalog REST API.

pub mod api;
pub mod config;
pub mod ddi_utils;
pub mod resolver;
pub mod server_extra;
