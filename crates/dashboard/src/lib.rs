//! Region selection dashboard.
//!
//! [`Dashboard`] owns the selection, the fetch coordinator, the data cache
//! and the region catalog. Callers toggle regions, drive outstanding fetches
//! with [`Dashboard::settle_next`] / [`Dashboard::settle_all`] and render
//! [`Dashboard::view`] whenever [`Dashboard::revision`] moves.

pub mod catalog;
pub mod selection;
pub mod store;
pub mod view;

pub use catalog::*;
pub use selection::*;
pub use store::*;
pub use view::*;
