use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Student};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>>;
    async fn list_by_class(&self, class_id: &str) -> AppResult<Vec<Student>>;
}

pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("students");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for students collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let class_index = IndexModel::builder()
            .keys(doc! { "class_id": 1, "last_name": 1 })
            .options(
                IndexOptions::builder()
                    .name("class_last_name".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(class_index).await?;

        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>> {
        let student = self.collection.find_one(doc! { "id": id }).await?;
        Ok(student)
    }

    async fn list_by_class(&self, class_id: &str) -> AppResult<Vec<Student>> {
        let students = self
            .collection
            .find(doc! { "class_id": class_id })
            .sort(doc! { "last_name": 1, "first_name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(students)
    }
}
