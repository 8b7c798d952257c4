//! Ownership resolution shared by the subject, exam and grade components.
//!
//! Only a subject carries a direct edge to its owning user. Exams and grades
//! are resolved upward through the store on every call; nothing is cached
//! between requests.

use log::warn;

use crate::error::{Error, Result};
use crate::models::{Exam, Grade, Subject};
use crate::role::Principal;
use crate::store::Store;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn is_mutation(self) -> bool {
        !matches!(self, Operation::Read)
    }
}

/// Fails with [`Error::PermissionDenied`] unless the role may mutate,
/// regardless of ownership.
pub fn require_mutation_rights(principal: &Principal) -> Result<()> {
    if principal.role.can_mutate() {
        Ok(())
    } else {
        warn!(
            "user {} with role {} may not mutate",
            principal.id, principal.role
        );
        Err(Error::PermissionDenied)
    }
}

/// Decides whether `principal` may perform `op` on anything whose chain ends
/// at `subject`.
///
/// Superusers pass unconditionally. Everyone else must own the subject
/// ([`Error::SubjectAccessDenied`]) and, for mutations, hold an editing role
/// ([`Error::PermissionDenied`]). Ownership is checked first.
pub fn resolve_access(principal: &Principal, subject: &Subject, op: Operation) -> Result<()> {
    if principal.is_superuser() {
        return Ok(());
    }
    if !principal.owns(subject.owner_user_id) {
        warn!(
            "user {} denied {:?} below subject {} owned by {}",
            principal.id, op, subject.id, subject.owner_user_id
        );
        return Err(Error::SubjectAccessDenied);
    }
    if op.is_mutation() {
        require_mutation_rights(principal)?;
    }
    Ok(())
}

/// Follows an exam to its subject. A missing subject is an orphaned exam.
pub fn subject_of_exam<S: Store>(store: &mut S, exam: &Exam) -> Result<Subject> {
    store
        .fetch_subject(exam.subject_id)?
        .ok_or(Error::SubjectNotFound)
}

/// Follows a grade to its exam. A missing exam is an orphaned grade.
pub fn exam_of_grade<S: Store>(store: &mut S, grade: &Grade) -> Result<Exam> {
    store.fetch_exam(grade.exam_id)?.ok_or(Error::ExamNotFound)
}

/// Authorizes `op` on an existing exam by walking `Exam -> Subject`.
pub fn authorize_exam<S: Store>(
    store: &mut S,
    principal: &Principal,
    exam: &Exam,
    op: Operation,
) -> Result<()> {
    if principal.is_superuser() {
        return Ok(());
    }
    let subject = subject_of_exam(store, exam)?;
    resolve_access(principal, &subject, op)
}

/// Authorizes `op` on an existing grade by walking `Grade -> Exam -> Subject`.
pub fn authorize_grade<S: Store>(
    store: &mut S,
    principal: &Principal,
    grade: &Grade,
    op: Operation,
) -> Result<()> {
    if principal.is_superuser() {
        return Ok(());
    }
    let exam = exam_of_grade(store, grade)?;
    authorize_exam(store, principal, &exam, op)
}
