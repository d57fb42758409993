//! Order Persistence Module
//!
//! Priced orders are written once per checkout (all sub-orders of a group in
//! one redb transaction) and afterwards only change fulfillment status.
//!
//! ```text
//! CheckoutService → PricedOrder group → OrderStorage (redb, one txn)
//!                                            ↓
//!                        status updates / group lookups / reports
//! ```

pub mod storage;

pub use storage::{OrderStorage, StorageError, StorageResult};

// Re-export shared types for convenience
pub use shared::models::{OrderStatus, OrderStatusUpdate, PricedOrder};
