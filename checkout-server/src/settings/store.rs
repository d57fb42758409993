//! Live rate settings with redb persistence

use parking_lot::RwLock;
use shared::error::AppResult;
use shared::models::{RateSettings, RateSettingsUpdate};
use std::sync::Arc;

use crate::orders::{OrderStorage, StorageResult};

/// Admin-editable rate settings
///
/// Readers get a cloned [`RateSettings`] value. Writers validate, persist and
/// then swap the in-memory copy under the write lock, so a reader never sees
/// a value that was rejected or not yet saved.
#[derive(Clone)]
pub struct SettingsStore {
    storage: OrderStorage,
    current: Arc<RwLock<RateSettings>>,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("current", &*self.current.read())
            .finish()
    }
}

impl SettingsStore {
    /// Load persisted settings, falling back to defaults
    ///
    /// A stored value that no longer validates is ignored with a warning so a
    /// bad record never blocks checkout.
    pub fn load(storage: OrderStorage) -> StorageResult<Self> {
        let settings = match storage.load_settings()? {
            Some(saved) => match saved.validate() {
                Ok(()) => saved,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored rate settings invalid, using defaults");
                    RateSettings::default()
                }
            },
            None => {
                tracing::info!("No stored rate settings, using defaults");
                RateSettings::default()
            }
        };

        Ok(Self {
            storage,
            current: Arc::new(RwLock::new(settings)),
        })
    }

    /// Current settings as an owned value
    ///
    /// A checkout calls this exactly once and prices against the copy.
    pub fn snapshot(&self) -> RateSettings {
        self.current.read().clone()
    }

    /// Apply a partial update
    pub fn update(&self, update: RateSettingsUpdate) -> AppResult<RateSettings> {
        let mut current = self.current.write();
        let next = current.merged(update);
        next.validate()?;
        self.storage.save_settings(&next)?;
        *current = next.clone();

        tracing::info!(
            base_delivery_fee = %next.base_delivery_fee,
            per_km_rate = %next.per_km_rate,
            app_earnings_percentage = %next.app_earnings_percentage,
            "Rate settings updated"
        );
        Ok(next)
    }

    /// Replace all settings
    pub fn replace(&self, settings: RateSettings) -> AppResult<RateSettings> {
        settings.validate()?;
        let mut current = self.current.write();
        self.storage.save_settings(&settings)?;
        *current = settings.clone();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::error::ErrorCode;

    fn store() -> SettingsStore {
        SettingsStore::load(OrderStorage::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let settings = store().snapshot();
        assert_eq!(settings, RateSettings::default());
        assert_eq!(settings.base_delivery_fee, dec!(25));
        assert_eq!(settings.max_merchants_per_order, 2);
    }

    #[test]
    fn test_partial_update_persists() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let store = SettingsStore::load(storage.clone()).unwrap();

        let updated = store
            .update(RateSettingsUpdate {
                per_km_rate: Some(dec!(18)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.per_km_rate, dec!(18));
        assert_eq!(updated.base_delivery_fee, dec!(25));

        // A fresh store over the same database sees the change
        let reloaded = SettingsStore::load(storage).unwrap();
        assert_eq!(reloaded.snapshot().per_km_rate, dec!(18));
    }

    #[test]
    fn test_invalid_update_rejected_and_not_applied() {
        let store = store();
        let err = store
            .update(RateSettingsUpdate {
                app_earnings_percentage: Some(dec!(120)),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SettingsInvalid);
        assert_eq!(store.snapshot().app_earnings_percentage, dec!(50));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = store();
        let snapshot = store.snapshot();
        store
            .update(RateSettingsUpdate {
                app_earnings_percentage: Some(dec!(70)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(snapshot.app_earnings_percentage, dec!(50));
        assert_eq!(store.snapshot().app_earnings_percentage, dec!(70));
    }

    #[test]
    fn test_invalid_stored_settings_fall_back() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let bad = RateSettings {
            max_merchants_per_order: 0,
            ..RateSettings::default()
        };
        storage.save_settings(&bad).unwrap();

        let store = SettingsStore::load(storage).unwrap();
        assert_eq!(store.snapshot().max_merchants_per_order, 2);
    }
}
