//! Binds the filter session to server functions, signals and the router.

pub mod server_fn_resolver;
pub mod signal_surface;
