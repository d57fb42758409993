//! redb-based storage layer for priced orders
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `PricedOrder` (JSON) | Priced sub-orders |
//! | `order_groups` | `order_group_id` | `Vec<i64>` (JSON) | Multi-merchant group index |
//! | `settings` | `"rate_settings"` | `RateSettings` (JSON) | Live admin settings |
//!
//! # Atomicity
//!
//! A checkout group is written in a single `WriteTransaction`. If any order
//! of the group fails to insert, the transaction is dropped without commit
//! and nothing from that checkout is visible.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderStatus, PricedOrder, RateSettings};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for orders: key = order_id, value = JSON-serialized PricedOrder
const ORDERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("orders");

/// Table for groups: key = order_group_id, value = JSON-serialized Vec<i64>
const ORDER_GROUPS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("order_groups");

/// Table for settings: key = settings name, value = JSON
const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

const RATE_SETTINGS_KEY: &str = "rate_settings";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Order already exists: {0}")]
    DuplicateOrder(i64),

    #[error("Invalid status transition for order {order_id}: {from:?} -> {to:?}")]
    InvalidTransition {
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::OrderNotFound(id) => AppError::order_not_found(id),
            StorageError::DuplicateOrder(id) => AppError::with_message(
                ErrorCode::AlreadyExists,
                format!("Order {} already exists", id),
            )
            .with_detail("order_id", id),
            StorageError::InvalidTransition { order_id, from, to } => AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Order {} cannot move from {:?} to {:?}", order_id, from, to),
            )
            .with_detail("order_id", order_id)
            .with_detail("from", serde_json::to_value(from).unwrap_or_default())
            .with_detail("to", serde_json::to_value(to).unwrap_or_default()),
            StorageError::Serialization(e) => {
                tracing::error!(error = %e, "Stored record could not be decoded");
                AppError::with_message(ErrorCode::StorageCorrupted, e.to_string())
            }
            other => {
                tracing::error!(error = %other, "Storage error occurred");
                AppError::database(other.to_string())
            }
        }
    }
}

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for OrderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStorage").finish_non_exhaustive()
    }
}

impl OrderStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable as soon as `commit()` returns.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            // Create all tables if they don't exist
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_GROUPS_TABLE)?;
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Order Operations ==========

    /// Store all sub-orders of one checkout atomically
    ///
    /// Orders sharing an `order_group_id` are indexed in `order_groups`.
    /// An order id that already exists aborts the whole write.
    pub fn store_group(&self, orders: &[PricedOrder]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            for order in orders {
                if table.get(order.id)?.is_some() {
                    return Err(StorageError::DuplicateOrder(order.id));
                }
                let value = serde_json::to_vec(order)?;
                table.insert(order.id, value.as_slice())?;
            }

            let mut groups = txn.open_table(ORDER_GROUPS_TABLE)?;
            for group_id in group_ids(orders) {
                let ids: Vec<i64> = orders
                    .iter()
                    .filter(|o| o.order_group_id.as_deref() == Some(group_id))
                    .map(|o| o.id)
                    .collect();
                let value = serde_json::to_vec(&ids)?;
                groups.insert(group_id, value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: i64) -> StorageResult<Option<PricedOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => {
                let order: PricedOrder = serde_json::from_slice(value.value())?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Get all orders of a multi-merchant group, in checkout order
    pub fn get_group(&self, order_group_id: &str) -> StorageResult<Option<Vec<PricedOrder>>> {
        let read_txn = self.db.begin_read()?;
        let groups = read_txn.open_table(ORDER_GROUPS_TABLE)?;

        let ids: Vec<i64> = match groups.get(order_group_id)? {
            Some(value) => serde_json::from_slice(value.value())?,
            None => return Ok(None),
        };

        let table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::with_capacity(ids.len());
        for id in ids {
            let value = table.get(id)?.ok_or(StorageError::OrderNotFound(id))?;
            let order: PricedOrder = serde_json::from_slice(value.value())?;
            orders.push(order);
        }
        Ok(Some(orders))
    }

    /// Get all orders, oldest first
    pub fn list_orders(&self) -> StorageResult<Vec<PricedOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: PricedOrder = serde_json::from_slice(value.value())?;
            orders.push(order);
        }
        orders.sort_by_key(|o| (o.created_at, o.id));

        Ok(orders)
    }

    /// Move an order to a new status
    ///
    /// Only `status` and `updated_at` change; pricing and split fields are
    /// written back exactly as stored.
    pub fn update_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        updated_at: i64,
    ) -> StorageResult<PricedOrder> {
        let txn = self.db.begin_write()?;
        let order = {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let mut order: PricedOrder = {
                let value = table
                    .get(order_id)?
                    .ok_or(StorageError::OrderNotFound(order_id))?;
                serde_json::from_slice(value.value())?
            };

            if !order.status.can_transition_to(status) {
                return Err(StorageError::InvalidTransition {
                    order_id,
                    from: order.status,
                    to: status,
                });
            }

            order.status = status;
            order.updated_at = updated_at;
            let value = serde_json::to_vec(&order)?;
            table.insert(order_id, value.as_slice())?;
            order
        };
        txn.commit()?;
        Ok(order)
    }

    // ========== Settings Operations ==========

    /// 读取已保存的费率设置
    pub fn load_settings(&self) -> StorageResult<Option<RateSettings>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;

        match table.get(RATE_SETTINGS_KEY)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// 保存费率设置
    pub fn save_settings(&self, settings: &RateSettings) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTINGS_TABLE)?;
            let value = serde_json::to_vec(settings)?;
            table.insert(RATE_SETTINGS_KEY, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Distinct group ids in first-seen order
fn group_ids(orders: &[PricedOrder]) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for id in orders.iter().filter_map(|o| o.order_group_id.as_deref()) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
