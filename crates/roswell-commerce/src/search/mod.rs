//! Search module.
//!
//! Contains product filters and pagination.

mod filter;
mod results;

pub use filter::{Filter, ProductQuery};
pub use results::{paginate, Page, Pagination, DEFAULT_PER_PAGE};
