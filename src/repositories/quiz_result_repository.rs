use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuizResult, ResultKey},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Writes under the deterministic key: a second submission for the same
    /// (quiz, student) replaces the first document instead of adding one.
    async fn upsert(&self, result: QuizResult) -> AppResult<QuizResult>;
    async fn find_by_key(&self, key: &ResultKey) -> AppResult<Option<QuizResult>>;
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>>;
    /// Returns true when a document was actually removed.
    async fn delete_by_key(&self, key: &ResultKey) -> AppResult<bool>;
}

pub struct MongoQuizResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoQuizResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_results");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizResultRepository for MongoQuizResultRepository {
    async fn upsert(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection
            .replace_one(doc! { "id": &result.id }, &result)
            .upsert(true)
            .await?;
        Ok(result)
    }

    async fn find_by_key(&self, key: &ResultKey) -> AppResult<Option<QuizResult>> {
        let result = self
            .collection
            .find_one(doc! { "id": key.document_id() })
            .await?;
        Ok(result)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn delete_by_key(&self, key: &ResultKey) -> AppResult<bool> {
        let outcome = self
            .collection
            .delete_one(doc! { "id": key.document_id() })
            .await?;
        Ok(outcome.deleted_count > 0)
    }
}
