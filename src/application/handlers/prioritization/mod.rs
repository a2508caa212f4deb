//! Prioritization handlers - reordering with background rescoring.

mod order_store;
mod reorder_coordinator;

pub use order_store::{OrderStore, DEFAULT_ORDER_KEY};
pub use reorder_coordinator::ReorderCoordinator;
