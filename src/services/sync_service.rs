use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{SyncPayload, SyncStats};
use crate::store::RecordStore;
use crate::validation::{validate_class_instances, validate_yoga_classes};

/// Replaces the whole server-side dataset with a client snapshot.
pub struct SyncService {
    store: Arc<dyn RecordStore>,
}

impl SyncService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validates `payload` in full, then hands it to the store as a single
    /// replace-all. Nothing is written unless validation passes.
    pub async fn sync_all(&self, payload: SyncPayload) -> Result<SyncStats, AppError> {
        let (Some(classes), Some(instances)) = (payload.yoga_classes, payload.class_instances)
        else {
            return Err(AppError::Validation(
                "payload must contain yogaClasses and classInstances".into(),
            ));
        };

        validate_yoga_classes(&classes)?;
        validate_class_instances(&instances)?;

        let known: HashSet<&str> = classes.iter().map(|c| c.id.as_str()).collect();
        let orphaned = instances
            .iter()
            .filter(|i| {
                i.yoga_class_id
                    .as_deref()
                    .is_none_or(|class_id| !known.contains(class_id))
            })
            .count();
        if orphaned > 0 {
            warn!("{} class instances do not reference a synced class", orphaned);
        }

        info!(
            "Starting sync: {} classes, {} instances",
            classes.len(),
            instances.len()
        );
        self.store
            .replace_all(&classes, &instances)
            .await
            .map_err(AppError::SyncFailed)?;

        let stats = SyncStats {
            yoga_classes: classes.len(),
            class_instances: instances.len(),
            orphaned_instances: orphaned,
        };
        info!("Sync completed successfully: {:?}", stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{ClassInstance, YogaClass};
    use crate::store::StoreError;

    #[derive(Default)]
    struct RecordingStore {
        replaced: Mutex<Vec<(usize, usize)>>,
        fail: bool,
    }

    #[async_trait]
    impl RecordStore for RecordingStore {
        async fn list_yoga_classes(&self) -> Result<Vec<YogaClass>, StoreError> {
            Ok(Vec::new())
        }

        async fn insert_yoga_class(&self, _class: &YogaClass) -> Result<(), StoreError> {
            Ok(())
        }

        async fn list_class_instances(&self) -> Result<Vec<ClassInstance>, StoreError> {
            Ok(Vec::new())
        }

        async fn insert_class_instance(&self, _instance: &ClassInstance) -> Result<(), StoreError> {
            Ok(())
        }

        async fn find_instances_by_class_ids(
            &self,
            _class_ids: &[String],
        ) -> Result<Vec<ClassInstance>, StoreError> {
            Ok(Vec::new())
        }

        async fn replace_all(
            &self,
            classes: &[YogaClass],
            instances: &[ClassInstance],
        ) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Database(sqlx::Error::PoolClosed));
            }
            self.replaced
                .lock()
                .unwrap()
                .push((classes.len(), instances.len()));
            Ok(())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn payload(json: serde_json::Value) -> SyncPayload {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn test_missing_collection_is_rejected_without_store_call() {
        let store = Arc::new(RecordingStore::default());
        let service = SyncService::new(store.clone());

        let err = service
            .sync_all(payload(serde_json::json!({"yogaClasses": []})))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.replaced.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_collection_is_rejected() {
        let store = Arc::new(RecordingStore::default());
        let service = SyncService::new(store.clone());

        let err = service
            .sync_all(payload(
                serde_json::json!({"yogaClasses": null, "classInstances": []}),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_before_store_call() {
        let store = Arc::new(RecordingStore::default());
        let service = SyncService::new(store.clone());

        let err = service
            .sync_all(payload(serde_json::json!({
                "yogaClasses": [{"id": "c1"}, {"id": ""}],
                "classInstances": []
            })))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "yogaClasses[1] id must not be empty");
        assert!(store.replaced.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sync_counts_orphans() {
        let store = Arc::new(RecordingStore::default());
        let service = SyncService::new(store.clone());

        let stats = service
            .sync_all(payload(serde_json::json!({
                "yogaClasses": [{"id": "c1"}],
                "classInstances": [
                    {"id": "i1", "yogaClassId": "c1"},
                    {"id": "i2", "yogaClassId": "gone"},
                    {"id": "i3"}
                ]
            })))
            .await
            .unwrap();

        assert_eq!(
            stats,
            SyncStats {
                yoga_classes: 1,
                class_instances: 3,
                orphaned_instances: 2,
            }
        );
        assert_eq!(*store.replaced.lock().unwrap(), vec![(1, 3)]);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_sync_failed() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        let service = SyncService::new(store);

        let err = service
            .sync_all(payload(
                serde_json::json!({"yogaClasses": [], "classInstances": []}),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SyncFailed(_)));
    }
}
