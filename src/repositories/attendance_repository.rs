use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{AttendanceKey, AttendanceRecord},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_by_key(&self, key: &AttendanceKey) -> AppResult<Option<AttendanceRecord>>;
    /// Writes under the record's deterministic per-day id.
    async fn upsert(&self, record: AttendanceRecord) -> AppResult<()>;
}

pub struct MongoAttendanceRepository {
    collection: Collection<AttendanceRecord>,
}

impl MongoAttendanceRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("attendance");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attendance collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let student_day_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "day": 1 })
            .options(
                IndexOptions::builder()
                    .name("student_day".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(student_day_index).await?;

        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for MongoAttendanceRepository {
    async fn find_by_key(&self, key: &AttendanceKey) -> AppResult<Option<AttendanceRecord>> {
        let record = self
            .collection
            .find_one(doc! { "id": key.document_id() })
            .await?;
        Ok(record)
    }

    async fn upsert(&self, record: AttendanceRecord) -> AppResult<()> {
        self.collection
            .replace_one(doc! { "id": &record.id }, &record)
            .upsert(true)
            .await?;
        Ok(())
    }
}
