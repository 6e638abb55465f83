//! Constants shared by the search page and the catalog client.

/// Rows requested by the first grid load.
pub const INITIAL_ROW_LIMIT: u64 = 10;

/// Rows added to the limit by each "load more".
pub const LOAD_MORE_STEP: u64 = 10;

pub const EXPORT_QUESTIONS_PATH: &str = "/export/questions/";

pub const QUESTION_DETAIL_PATH: &str = "/question/";
