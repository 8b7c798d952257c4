//! Subject CRUD. The subject holds the only direct ownership edge.
//!
//! Reads are filter-scoped: a subject owned by someone else is
//! indistinguishable from one that does not exist. Writes fetch unscoped and
//! then authorize, failing with [`Error::PermissionDenied`] for both a
//! foreign subject and an insufficient role.

use log::{debug, info, warn};

use crate::access;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::models::{NewSubject, Subject, SubjectPatch};
use crate::now;
use crate::role::Principal;
use crate::store::Store;

pub fn get<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Subject> {
    debug!("user {} fetches subject {}", principal.id, id);
    store.atomically(|tx| {
        tx.fetch_subject(id)?
            .filter(|subject| principal.is_superuser() || principal.owns(subject.owner_user_id))
            .ok_or(Error::SubjectNotFound)
    })
}

/// All non-deleted subjects visible to the principal.
pub fn list<S: Store>(store: &mut S, principal: &Principal) -> Result<Vec<Subject>> {
    debug!("user {} lists subjects", principal.id);
    store.atomically(|tx| Ok(tx.fetch_subjects(&Filter::visible_to(principal))?))
}

pub fn create<S: Store>(store: &mut S, principal: &Principal, data: NewSubject) -> Result<Subject> {
    access::require_mutation_rights(principal)?;
    if !principal.is_superuser() && !principal.owns(data.owner_user_id) {
        warn!(
            "user {} tried to create a subject for user {}",
            principal.id, data.owner_user_id
        );
        return Err(Error::InvalidSubjectOwner);
    }

    let subject = store.atomically(|tx| Ok(tx.insert_subject(&data, now())?))?;
    info!(
        "user {} created subject {} for user {}",
        principal.id, subject.id, subject.owner_user_id
    );
    Ok(subject)
}

pub fn update<S: Store>(
    store: &mut S,
    principal: &Principal,
    id: i32,
    patch: SubjectPatch,
) -> Result<Subject> {
    let subject = store.atomically(|tx| {
        let subject = tx.fetch_subject(id)?.ok_or(Error::SubjectNotFound)?;
        authorize_change(principal, &subject)?;
        Ok(tx.update_subject(id, &patch, now())?)
    })?;
    info!("user {} updated subject {}", principal.id, id);
    Ok(subject)
}

/// Soft-deletes a subject. Deleting twice fails with
/// [`Error::SubjectAlreadyDeleted`].
pub fn delete<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Subject> {
    let subject = store.atomically(|tx| {
        let subject = tx.fetch_subject(id)?.ok_or(Error::SubjectNotFound)?;
        if subject.is_deleted() {
            return Err(Error::SubjectAlreadyDeleted);
        }
        authorize_change(principal, &subject)?;
        tx.mark_subject_deleted(id, now())?
            .ok_or(Error::SubjectAlreadyDeleted)
    })?;
    info!("user {} deleted subject {}", principal.id, id);
    Ok(subject)
}

fn authorize_change(principal: &Principal, subject: &Subject) -> Result<()> {
    access::require_mutation_rights(principal)?;
    if principal.is_superuser() || principal.owns(subject.owner_user_id) {
        Ok(())
    } else {
        warn!(
            "user {} may not change subject {} owned by {}",
            principal.id, subject.id, subject.owner_user_id
        );
        Err(Error::PermissionDenied)
    }
}
