use common::search_query::SearchParams;

/// One reload of the results grid, as requested by the filter session.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest {
    pub params: SearchParams,
    pub reset_to_first_page: bool,
    /// Bumped on every request so an identical reload still restarts the grid.
    pub seq: u64,
}
