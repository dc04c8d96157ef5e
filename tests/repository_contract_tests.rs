mod common;

use std::collections::BTreeMap;

use classhub_server::{
    errors::AppError,
    models::domain::{QuizResult, ResultKey, Submission},
    repositories::{
        AssignmentRepository, QuizRepository, QuizResultRepository, SubmissionRepository,
    },
};

use common::{
    make_assignment, make_quiz, InMemoryAssignmentRepository, InMemoryQuizRepository,
    InMemoryQuizResultRepository, InMemorySubmissionRepository,
};

#[tokio::test]
async fn creating_a_duplicate_quiz_id_is_rejected() {
    let repository = InMemoryQuizRepository::new();

    repository
        .create(make_quiz("quiz-1", "class-1", &[0]))
        .await
        .expect("first create");
    let duplicate = repository.create(make_quiz("quiz-1", "class-1", &[0])).await;

    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));
}

#[tokio::test]
async fn quizzes_list_in_lesson_order() {
    let repository = InMemoryQuizRepository::new();

    for (id, order) in [("quiz-c", 3), ("quiz-a", 1), ("quiz-b", 2)] {
        let mut quiz = make_quiz(id, "class-1", &[0]);
        quiz.order = order;
        repository.create(quiz).await.expect("create");
    }

    let listed = repository.list_by_class("class-1").await.expect("list");
    let ids: Vec<&str> = listed.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["quiz-a", "quiz-b", "quiz-c"]);
}

#[tokio::test]
async fn result_upsert_replaces_under_the_same_key() {
    let repository = InMemoryQuizResultRepository::new();
    let key = ResultKey::new("quiz-1", "student-1");

    let answers: BTreeMap<usize, usize> = [(0, 1)].into_iter().collect();
    repository
        .upsert(QuizResult::new(&key, 0, 1, &answers))
        .await
        .expect("first upsert");
    repository
        .upsert(QuizResult::new(&key, 1, 1, &answers))
        .await
        .expect("second upsert");

    assert_eq!(repository.count().await, 1);
    let stored = repository
        .find_by_key(&key)
        .await
        .expect("lookup")
        .expect("result exists");
    assert_eq!(stored.score, 1);
    assert_eq!(stored.id, "quiz-1:student-1");
}

#[tokio::test]
async fn deleting_a_missing_result_reports_false() {
    let repository = InMemoryQuizResultRepository::new();
    let key = ResultKey::new("quiz-1", "student-absent");

    let deleted = repository.delete_by_key(&key).await.expect("delete");
    assert!(!deleted);
}

#[tokio::test]
async fn submission_pair_is_unique_and_updates_need_an_existing_document() {
    let repository = InMemorySubmissionRepository::new();

    let first = repository
        .create(Submission::new("assignment-1", "student-1", None, None))
        .await
        .expect("first create");
    let duplicate = repository
        .create(Submission::new("assignment-1", "student-1", None, None))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let mut phantom = first.clone();
    phantom.id = "submission-absent".to_string();
    let updated = repository.update(phantom).await;
    assert!(matches!(updated, Err(AppError::NotFound(_))));

    let graded = repository.set_grade("submission-absent", 5, None).await;
    assert!(matches!(graded, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn assignments_list_oldest_first() {
    let repository = InMemoryAssignmentRepository::new();

    let late = make_assignment("a-late", "class-1", 10);
    let mut early = make_assignment("a-early", "class-1", 10);
    early.created_at = late.created_at.map(|at| at - chrono::Duration::days(1));

    repository.create(late.clone()).await.expect("create");
    repository.create(early.clone()).await.expect("create");

    let listed = repository.list_by_class("class-1").await.expect("list");
    let ids: Vec<&str> = listed.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a-early", "a-late"]);
}
