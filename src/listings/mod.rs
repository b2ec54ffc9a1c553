//! Listing data: the immutable store, the category catalog, and the
//! category filter.

mod category;
mod filter;
mod store;
mod types;

pub use category::{Category, CategoryId, CATALOG};
pub use filter::{filter, filter_by};
pub use store::ListingStore;
pub use types::{Listing, ListingError};
