pub mod cache;
pub mod config;
pub mod debounce;
pub mod filter;
pub mod model;
pub mod names;
pub mod normalize;
pub mod options;
pub mod pagination;
pub mod query_state;
pub mod search;
pub mod session;
pub mod year_range;
