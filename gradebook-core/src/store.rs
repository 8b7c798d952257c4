use chrono::NaiveDateTime;
use thiserror::Error;

use crate::error::Error;
use crate::filter::Filter;
use crate::models::{
    Exam, ExamPatch, Grade, GradeValue, NewExam, NewSubject, Subject, SubjectPatch,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// A failure inside the persistence collaborator. Propagated as is.
#[derive(Debug, Error)]
#[error("storage failure: {source}")]
pub struct StoreError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl StoreError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StoreError {
            source: source.into(),
        }
    }
}

/// Persistence primitives the access-control components are built on.
///
/// Implementations do no authorization of their own. Fetch-by-id methods
/// return soft-deleted rows too; list methods apply the given [`Filter`].
pub trait Store {
    /// Runs `op` as one unit of work, committed when it returns `Ok` and
    /// rolled back otherwise.
    fn atomically<T, F>(&mut self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>;

    fn fetch_subject(&mut self, id: i32) -> StoreResult<Option<Subject>>;
    fn fetch_subjects(&mut self, filter: &Filter) -> StoreResult<Vec<Subject>>;
    fn insert_subject(&mut self, data: &NewSubject, now: NaiveDateTime) -> StoreResult<Subject>;
    fn update_subject(
        &mut self,
        id: i32,
        patch: &SubjectPatch,
        now: NaiveDateTime,
    ) -> StoreResult<Subject>;
    /// Sets `deleted_at` only while it is unset. `None` means the row was
    /// already marked, possibly by a concurrent unit of work.
    fn mark_subject_deleted(&mut self, id: i32, at: NaiveDateTime)
        -> StoreResult<Option<Subject>>;

    fn fetch_exam(&mut self, id: i32) -> StoreResult<Option<Exam>>;
    fn fetch_exams(&mut self, filter: &Filter) -> StoreResult<Vec<Exam>>;
    fn insert_exam(&mut self, data: &NewExam, now: NaiveDateTime) -> StoreResult<Exam>;
    fn update_exam(&mut self, id: i32, patch: &ExamPatch, now: NaiveDateTime)
        -> StoreResult<Exam>;
    /// Same contract as [`Store::mark_subject_deleted`].
    fn mark_exam_deleted(&mut self, id: i32, at: NaiveDateTime) -> StoreResult<Option<Exam>>;

    fn fetch_grade(&mut self, id: i32) -> StoreResult<Option<Grade>>;
    fn fetch_grades(&mut self, filter: &Filter) -> StoreResult<Vec<Grade>>;
    fn insert_grade(&mut self, exam_id: i32, grade: GradeValue) -> StoreResult<Grade>;
    fn update_grade(&mut self, id: i32, grade: GradeValue) -> StoreResult<Grade>;
    fn remove_grade(&mut self, id: i32) -> StoreResult<()>;
}
