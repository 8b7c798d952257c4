use thiserror::Error;

use crate::store::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way an operation on subjects, exams or grades can fail.
///
/// Not-found kinds are raised before permission kinds wherever existence is
/// revealed. Nothing here is retried; each error ends the request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("subject not found")]
    SubjectNotFound,

    #[error("exam not found")]
    ExamNotFound,

    #[error("grade not found")]
    GradeNotFound,

    /// The subject exists but belongs to another user.
    #[error("no access to this subject")]
    SubjectAccessDenied,

    /// The role of the principal does not allow the operation.
    #[error("permission denied")]
    PermissionDenied,

    #[error("subject is already deleted")]
    SubjectAlreadyDeleted,

    #[error("exam is already deleted")]
    ExamAlreadyDeleted,

    /// A non-superuser tried to create a subject on behalf of someone else.
    #[error("subjects can only be created for yourself")]
    InvalidSubjectOwner,

    #[error("invalid grade data: {0}")]
    InvalidGradeData(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::SubjectNotFound | Error::ExamNotFound | Error::GradeNotFound
        )
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Error::SubjectAccessDenied | Error::PermissionDenied)
    }
}
