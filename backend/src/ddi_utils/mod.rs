//! HTTP plumbing for the catalog API and highlight parsing.

pub mod ddi_http;
pub mod decompose_spans;
