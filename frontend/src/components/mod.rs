pub mod blocking_dialog;
pub mod error_boundary;
pub mod search_components;
pub mod suspend_boundary;
