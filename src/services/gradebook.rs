use serde::{Deserialize, Serialize};

use crate::models::domain::{Assignment, Quiz, Student};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single cell in the aggregation table. Ungraded work and a missing quiz
/// attempt both aggregate as 0, but the cell keeps them distinguishable from
/// an earned 0 for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "points", rename_all = "snake_case")]
pub enum GradeCell {
    Ungraded,
    Score(u32),
}

impl GradeCell {
    pub fn points(&self) -> u32 {
        match self {
            GradeCell::Ungraded => 0,
            GradeCell::Score(points) => *points,
        }
    }

    pub fn is_graded(&self) -> bool {
        matches!(self, GradeCell::Score(_))
    }
}

#[derive(Clone, Debug)]
pub struct StudentRow {
    pub student: Student,
    /// One cell per assignment, in the gradebook's assignment order.
    pub assignment_grades: Vec<GradeCell>,
    /// One cell per quiz, in the gradebook's quiz order.
    pub quiz_scores: Vec<GradeCell>,
}

impl StudentRow {
    pub fn total(&self) -> u32 {
        self.assignment_grades
            .iter()
            .chain(self.quiz_scores.iter())
            .map(GradeCell::points)
            .sum()
    }

    fn matches(&self, term: &str) -> bool {
        self.student
            .full_name()
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

/// Per-classroom aggregation over already-fetched data. Everything here is a
/// pure derivation; deletion of a stored result happens in the service, and
/// the next build simply no longer sees it.
#[derive(Clone, Debug)]
pub struct Gradebook {
    pub class_id: String,
    pub assignments: Vec<Assignment>,
    pub quizzes: Vec<Quiz>,
    pub rows: Vec<StudentRow>,
}

impl Gradebook {
    /// Every assignment's point value plus one point per quiz question.
    pub fn max_score(&self) -> u32 {
        let assignment_points: u32 = self.assignments.iter().map(|a| a.points).sum();
        let quiz_points: u32 = self
            .quizzes
            .iter()
            .map(|q| q.question_count() as u32)
            .sum();
        assignment_points + quiz_points
    }

    pub fn total_score(&self, student_id: &str) -> u32 {
        self.rows
            .iter()
            .find(|row| row.student.id == student_id)
            .map(StudentRow::total)
            .unwrap_or(0)
    }

    /// Case-insensitive substring match against "first last"; an empty term
    /// matches everyone.
    pub fn filter_by_search_term(&self, term: &str) -> Vec<&StudentRow> {
        self.rows
            .iter()
            .filter(|row| term.is_empty() || row.matches(term))
            .collect()
    }

    pub fn view(&self, search: Option<&str>, sort: Option<SortDirection>) -> GradebookView {
        let mut rows = self.filter_by_search_term(search.unwrap_or(""));
        if let Some(direction) = sort {
            sort_by_total(&mut rows, direction);
        }

        GradebookView {
            class_id: self.class_id.clone(),
            max_score: self.max_score(),
            assignments: self
                .assignments
                .iter()
                .map(|a| ColumnView {
                    id: a.id.clone(),
                    title: a.title.clone(),
                    max_points: a.points,
                })
                .collect(),
            quizzes: self
                .quizzes
                .iter()
                .map(|q| ColumnView {
                    id: q.id.clone(),
                    title: q.title.clone(),
                    max_points: q.question_count() as u32,
                })
                .collect(),
            rows: rows
                .into_iter()
                .map(|row| RowView {
                    student_id: row.student.id.clone(),
                    full_name: row.student.full_name(),
                    assignment_grades: row.assignment_grades.clone(),
                    quiz_scores: row.quiz_scores.clone(),
                    total: row.total(),
                })
                .collect(),
        }
    }
}

/// Stable sort by total: ties keep their prior relative order in both
/// directions.
pub fn sort_by_total(rows: &mut [&StudentRow], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => rows.sort_by_key(|row| row.total()),
        SortDirection::Descending => rows.sort_by(|a, b| b.total().cmp(&a.total())),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradebookView {
    pub class_id: String,
    pub max_score: u32,
    pub assignments: Vec<ColumnView>,
    pub quizzes: Vec<ColumnView>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub id: String,
    pub title: String,
    pub max_points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub student_id: String,
    pub full_name: String,
    pub assignment_grades: Vec<GradeCell>,
    pub quiz_scores: Vec<GradeCell>,
    pub total: u32,
}
