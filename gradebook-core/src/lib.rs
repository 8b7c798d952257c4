//! Role-gated access control for subjects, exams and grades.
//!
//! Every operation takes the acting [`Principal`] and a [`Store`], walks the
//! ownership chain `Grade -> Exam -> Subject -> User` fresh inside one unit of
//! work and either returns the entity or one of the [`Error`] kinds.

use chrono::{NaiveDateTime, Utc};

pub mod access;
pub mod error;
pub mod exam;
pub mod filter;
pub mod grade;
pub mod memory;
pub mod models;
pub mod role;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
pub use filter::Filter;
pub use memory::MemoryStore;
pub use models::{
    Exam, ExamPatch, Grade, GradePatch, GradeValue, NewExam, NewGrade, NewSubject, Subject,
    SubjectPatch,
};
pub use role::{Principal, Role};
pub use store::{Store, StoreError, StoreResult};

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
