//! Persistence seam for both record kinds.
//!
//! Handlers only see [`RecordStore`]; the SQLite implementation lives here as
//! well, and tests substitute their own implementations.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, info};

use crate::db::repository;
use crate::models::{ClassInstance, YogaClass};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_yoga_classes(&self) -> Result<Vec<YogaClass>, StoreError>;
    async fn insert_yoga_class(&self, class: &YogaClass) -> Result<(), StoreError>;
    async fn list_class_instances(&self) -> Result<Vec<ClassInstance>, StoreError>;
    async fn insert_class_instance(&self, instance: &ClassInstance) -> Result<(), StoreError>;

    /// Returns every instance whose `yoga_class_id` is one of `class_ids`.
    async fn find_instances_by_class_ids(
        &self,
        class_ids: &[String],
    ) -> Result<Vec<ClassInstance>, StoreError>;

    /// Deletes every record of both kinds and inserts the given ones.
    ///
    /// Implementations must apply this atomically: on error the previous
    /// contents stay in place.
    async fn replace_all(
        &self,
        classes: &[YogaClass],
        instances: &[ClassInstance],
    ) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(settings: &Settings) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;

        info!("connected to store at {}", settings.database_url);
        Self::from_pool(pool).await
    }

    /// Single-connection in-memory database. Every connection to
    /// `sqlite::memory:` is a separate database, so the pool never grows or
    /// recycles its connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self { db })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_yoga_classes(&self) -> Result<Vec<YogaClass>, StoreError> {
        Ok(repository::fetch_yoga_classes(&self.db).await?)
    }

    async fn insert_yoga_class(&self, class: &YogaClass) -> Result<(), StoreError> {
        let mut conn = self.db.acquire().await?;
        repository::insert_yoga_class(&mut conn, class).await?;
        Ok(())
    }

    async fn list_class_instances(&self) -> Result<Vec<ClassInstance>, StoreError> {
        Ok(repository::fetch_class_instances(&self.db).await?)
    }

    async fn insert_class_instance(&self, instance: &ClassInstance) -> Result<(), StoreError> {
        let mut conn = self.db.acquire().await?;
        repository::insert_class_instance(&mut conn, instance).await?;
        Ok(())
    }

    async fn find_instances_by_class_ids(
        &self,
        class_ids: &[String],
    ) -> Result<Vec<ClassInstance>, StoreError> {
        Ok(repository::fetch_class_instances_by_class_ids(&self.db, class_ids).await?)
    }

    async fn replace_all(
        &self,
        classes: &[YogaClass],
        instances: &[ClassInstance],
    ) -> Result<(), StoreError> {
        // Dropping `tx` on an early return rolls back.
        let mut tx = self.db.begin().await?;

        let removed_instances = repository::delete_all_class_instances(&mut tx).await?;
        let removed_classes = repository::delete_all_yoga_classes(&mut tx).await?;
        debug!(
            "removed {} classes, {} instances",
            removed_classes, removed_instances
        );

        for class in classes {
            repository::insert_yoga_class(&mut tx, class).await?;
        }
        for instance in instances {
            repository::insert_class_instance(&mut tx, instance).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}
