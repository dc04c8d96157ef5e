use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Submission, SubmissionStatus},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    async fn find_by_assignment_and_student(
        &self,
        assignment_id: &str,
        student_id: &str,
    ) -> AppResult<Option<Submission>>;
    async fn list_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>>;
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn update(&self, submission: Submission) -> AppResult<Submission>;
    async fn set_grade(&self, id: &str, grade: u32, feedback: Option<String>) -> AppResult<()>;
    async fn set_status(&self, id: &str, status: SubmissionStatus) -> AppResult<()>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("submissions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One live submission per (assignment, student) pair.
        let pair_index = IndexModel::builder()
            .keys(doc! { "assignment_id": 1, "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("assignment_student_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(pair_index).await?;

        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn find_by_assignment_and_student(
        &self,
        assignment_id: &str,
        student_id: &str,
    ) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one(doc! {
                "assignment_id": assignment_id,
                "student_id": student_id
            })
            .await?;
        Ok(submission)
    }

    async fn list_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        let submissions = self
            .collection
            .find(doc! { "assignment_id": assignment_id })
            .await?
            .try_collect()
            .await?;
        Ok(submissions)
    }

    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn update(&self, submission: Submission) -> AppResult<Submission> {
        self.collection
            .replace_one(doc! { "id": &submission.id }, &submission)
            .await?;
        Ok(submission)
    }

    async fn set_grade(&self, id: &str, grade: u32, feedback: Option<String>) -> AppResult<()> {
        let mut set = doc! { "grade": grade as i64 };
        if let Some(feedback) = feedback {
            set.insert("feedback", feedback);
        }
        self.collection
            .update_one(doc! { "id": id }, doc! { "$set": set })
            .await?;
        Ok(())
    }

    async fn set_status(&self, id: &str, status: SubmissionStatus) -> AppResult<()> {
        let status = mongodb::bson::ser::to_bson(&status)?;
        self.collection
            .update_one(doc! { "id": id }, doc! { "$set": { "status": status } })
            .await?;
        Ok(())
    }
}
