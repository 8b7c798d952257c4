//! Exam CRUD. Exams are owned through their subject.
//!
//! Reads resolve the exam unscoped and then authorize the chain, so a
//! foreign exam surfaces as [`Error::SubjectAccessDenied`] rather than
//! [`Error::ExamNotFound`].

use log::{debug, info};

use crate::access::{self, Operation};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::models::{Exam, ExamPatch, NewExam};
use crate::now;
use crate::role::Principal;
use crate::store::Store;

pub fn get<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Exam> {
    debug!("user {} fetches exam {}", principal.id, id);
    store.atomically(|tx| {
        let exam = tx.fetch_exam(id)?.ok_or(Error::ExamNotFound)?;
        access::authorize_exam(tx, principal, &exam, Operation::Read)?;
        Ok(exam)
    })
}

/// All non-deleted exams whose subject is visible to the principal.
pub fn list<S: Store>(store: &mut S, principal: &Principal) -> Result<Vec<Exam>> {
    debug!("user {} lists exams", principal.id);
    store.atomically(|tx| Ok(tx.fetch_exams(&Filter::visible_to(principal))?))
}

/// Non-deleted exams of one subject.
pub fn list_for_subject<S: Store>(
    store: &mut S,
    principal: &Principal,
    subject_id: i32,
) -> Result<Vec<Exam>> {
    debug!(
        "user {} lists exams of subject {}",
        principal.id, subject_id
    );
    store.atomically(|tx| {
        let subject = tx
            .fetch_subject(subject_id)?
            .ok_or(Error::SubjectNotFound)?;
        access::resolve_access(principal, &subject, Operation::Read)?;
        Ok(tx.fetch_exams(&Filter::visible_to(principal).in_subject(subject_id))?)
    })
}

/// Checks run in order: the subject exists, the principal owns it, the role
/// may mutate.
pub fn create<S: Store>(store: &mut S, principal: &Principal, data: NewExam) -> Result<Exam> {
    let exam = store.atomically(|tx| {
        let subject = tx
            .fetch_subject(data.subject_id)?
            .ok_or(Error::SubjectNotFound)?;
        access::resolve_access(principal, &subject, Operation::Create)?;
        Ok(tx.insert_exam(&data, now())?)
    })?;
    info!(
        "user {} created exam {} in subject {}",
        principal.id, exam.id, exam.subject_id
    );
    Ok(exam)
}

pub fn update<S: Store>(
    store: &mut S,
    principal: &Principal,
    id: i32,
    patch: ExamPatch,
) -> Result<Exam> {
    let exam = store.atomically(|tx| {
        let exam = tx.fetch_exam(id)?.ok_or(Error::ExamNotFound)?;
        access::authorize_exam(tx, principal, &exam, Operation::Update)?;
        Ok(tx.update_exam(id, &patch, now())?)
    })?;
    info!("user {} updated exam {}", principal.id, id);
    Ok(exam)
}

/// Soft-deletes an exam. Authorization comes before the deletion state, so a
/// non-owner cannot learn whether a foreign exam was deleted.
pub fn delete<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Exam> {
    let exam = store.atomically(|tx| {
        let exam = tx.fetch_exam(id)?.ok_or(Error::ExamNotFound)?;
        access::authorize_exam(tx, principal, &exam, Operation::Delete)?;
        if exam.is_deleted() {
            return Err(Error::ExamAlreadyDeleted);
        }
        tx.mark_exam_deleted(id, now())?
            .ok_or(Error::ExamAlreadyDeleted)
    })?;
    info!("user {} deleted exam {}", principal.id, id);
    Ok(exam)
}
