#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use classhub_server::{
    errors::{AppError, AppResult},
    models::domain::{
        Assignment, AttendanceKey, AttendanceRecord, Question, QuestionOption, Quiz, QuizResult,
        ResultKey, Student, Submission, SubmissionStatus,
    },
    repositories::{
        AssignmentRepository, AttendanceRepository, QuizRepository, QuizResultRepository,
        StudentRepository, SubmissionRepository,
    },
};

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn list_by_class(&self, class_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.class_id == class_id)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.order);
        Ok(items)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }
}

#[derive(Default)]
pub struct InMemoryQuizResultRepository {
    results: Arc<RwLock<HashMap<String, QuizResult>>>,
}

impl InMemoryQuizResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryQuizResultRepository {
    async fn upsert(&self, result: QuizResult) -> AppResult<QuizResult> {
        let mut results = self.results.write().await;
        results.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    async fn find_by_key(&self, key: &ResultKey) -> AppResult<Option<QuizResult>> {
        let results = self.results.read().await;
        Ok(results.get(&key.document_id()).cloned())
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .values()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        Ok(items)
    }

    async fn delete_by_key(&self, key: &ResultKey) -> AppResult<bool> {
        let mut results = self.results.write().await;
        Ok(results.remove(&key.document_id()).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    records: Arc<RwLock<HashMap<String, AttendanceRecord>>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn all(&self) -> Vec<AttendanceRecord> {
        let records = self.records.read().await;
        let mut items: Vec<_> = records.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find_by_key(&self, key: &AttendanceKey) -> AppResult<Option<AttendanceRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&key.document_id()).cloned())
    }

    async fn upsert(&self, record: AttendanceRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }
}

/// Always errors; exercises the recorder's swallow-and-log contract.
pub struct FailingAttendanceRepository;

#[async_trait]
impl AttendanceRepository for FailingAttendanceRepository {
    async fn find_by_key(&self, _key: &AttendanceKey) -> AppResult<Option<AttendanceRecord>> {
        Err(AppError::DatabaseError("attendance store offline".into()))
    }

    async fn upsert(&self, _record: AttendanceRecord) -> AppResult<()> {
        Err(AppError::DatabaseError("attendance store offline".into()))
    }
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: Arc<RwLock<HashMap<String, Student>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, student: Student) {
        self.students
            .write()
            .await
            .insert(student.id.clone(), student);
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.get(id).cloned())
    }

    async fn list_by_class(&self, class_id: &str) -> AppResult<Vec<Student>> {
        let students = self.students.read().await;
        let mut items: Vec<_> = students
            .values()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    assignments: Arc<RwLock<HashMap<String, Assignment>>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(id).cloned())
    }

    async fn list_by_class(&self, class_id: &str) -> AppResult<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        let mut items: Vec<_> = assignments
            .values()
            .filter(|a| a.class_id == class_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        let mut assignments = self.assignments.write().await;
        if assignments.contains_key(&assignment.id) {
            return Err(AppError::AlreadyExists(format!(
                "Assignment with id '{}' already exists",
                assignment.id
            )));
        }
        assignments.insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<HashMap<String, Submission>>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.get(id).cloned())
    }

    async fn find_by_assignment_and_student(
        &self,
        assignment_id: &str,
        student_id: &str,
    ) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .find(|s| s.assignment_id == assignment_id && s.student_id == student_id)
            .cloned())
    }

    async fn list_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<_> = submissions
            .values()
            .filter(|s| s.assignment_id == assignment_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        Ok(items)
    }

    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;
        if submissions
            .values()
            .any(|s| s.assignment_id == submission.assignment_id && s.student_id == submission.student_id)
        {
            return Err(AppError::AlreadyExists(format!(
                "Submission for assignment '{}' by student '{}' already exists",
                submission.assignment_id, submission.student_id
            )));
        }
        submissions.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn update(&self, submission: Submission) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;
        if !submissions.contains_key(&submission.id) {
            return Err(AppError::NotFound(format!(
                "Submission with id '{}' not found",
                submission.id
            )));
        }
        submissions.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn set_grade(&self, id: &str, grade: u32, feedback: Option<String>) -> AppResult<()> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))?;
        submission.grade = Some(grade);
        if feedback.is_some() {
            submission.feedback = feedback;
        }
        Ok(())
    }

    async fn set_status(&self, id: &str, status: SubmissionStatus) -> AppResult<()> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))?;
        submission.status = status;
        Ok(())
    }
}

pub fn make_quiz(id: &str, class_id: &str, correct_answers: &[usize]) -> Quiz {
    let questions = correct_answers
        .iter()
        .enumerate()
        .map(|(index, &correct)| Question {
            text: format!("Question {}", index + 1),
            image_url: None,
            options: (0..3)
                .map(|option| QuestionOption {
                    text: format!("Option {}", option + 1),
                    image_url: None,
                })
                .collect(),
            correct_answer: correct,
        })
        .collect();

    let mut quiz = Quiz::new(class_id, "Integration Quiz", questions, 1);
    quiz.id = id.to_string();
    quiz
}

pub fn make_student(id: &str, class_id: &str, first: &str, last: &str) -> Student {
    let mut student = Student::new(class_id, first, last);
    student.id = id.to_string();
    student
}

pub fn make_assignment(id: &str, class_id: &str, points: u32) -> Assignment {
    use chrono::{Duration, Utc};
    let mut assignment = Assignment::new(class_id, "Integration Assignment", Utc::now() + Duration::days(7), points);
    assignment.id = id.to_string();
    assignment
}
