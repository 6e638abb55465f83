//! Facet option endpoints of the catalog.

mod list_collections;
pub use list_collections::list_collections;

mod get_sub_collections;
pub use get_sub_collections::get_sub_collections;

mod get_surveys;
pub use get_surveys::get_surveys;

mod get_decades;
pub use get_decades::get_decades;

mod get_years_by_decade;
pub use get_years_by_decade::get_years_by_decade;

mod scope_params;
