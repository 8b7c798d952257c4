//! Grade CRUD. Grades sit two hops below their owner and are removed for
//! good on delete.

use log::{debug, info};

use crate::access::{self, Operation};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::models::{Grade, GradePatch, GradeValue, NewGrade};
use crate::role::Principal;
use crate::store::Store;

pub fn get<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Grade> {
    debug!("user {} fetches grade {}", principal.id, id);
    store.atomically(|tx| resolve(tx, principal, id))
}

pub fn list<S: Store>(store: &mut S, principal: &Principal) -> Result<Vec<Grade>> {
    debug!("user {} lists grades", principal.id);
    store.atomically(|tx| Ok(tx.fetch_grades(&Filter::visible_to(principal))?))
}

pub fn list_for_exam<S: Store>(
    store: &mut S,
    principal: &Principal,
    exam_id: i32,
) -> Result<Vec<Grade>> {
    debug!("user {} lists grades of exam {}", principal.id, exam_id);
    store.atomically(|tx| {
        let exam = tx.fetch_exam(exam_id)?.ok_or(Error::ExamNotFound)?;
        access::authorize_exam(tx, principal, &exam, Operation::Read)?;
        Ok(tx.fetch_grades(&Filter::visible_to(principal).in_exam(exam_id))?)
    })
}

/// The role is checked first, then the exam, its subject and the subject's
/// owner, and the grade label last.
pub fn create<S: Store>(store: &mut S, principal: &Principal, data: NewGrade) -> Result<Grade> {
    access::require_mutation_rights(principal)?;
    let grade = store.atomically(|tx| {
        let exam = tx.fetch_exam(data.exam_id)?.ok_or(Error::ExamNotFound)?;
        let subject = access::subject_of_exam(tx, &exam)?;
        access::resolve_access(principal, &subject, Operation::Create)?;
        let value = GradeValue::parse(&data.grade)?;
        Ok(tx.insert_grade(exam.id, value)?)
    })?;
    info!(
        "user {} graded exam {} with {}",
        principal.id, grade.exam_id, grade.grade
    );
    Ok(grade)
}

pub fn update<S: Store>(
    store: &mut S,
    principal: &Principal,
    id: i32,
    patch: GradePatch,
) -> Result<Grade> {
    let grade = store.atomically(|tx| {
        let grade = resolve(tx, principal, id)?;
        access::require_mutation_rights(principal)?;
        match patch.grade.as_deref() {
            Some(label) => Ok(tx.update_grade(id, GradeValue::parse(label)?)?),
            None => Ok(grade),
        }
    })?;
    info!("user {} updated grade {}", principal.id, id);
    Ok(grade)
}

/// Removes the grade row and returns it as it was.
pub fn delete<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Grade> {
    let grade = store.atomically(|tx| {
        let grade = resolve(tx, principal, id)?;
        access::require_mutation_rights(principal)?;
        tx.remove_grade(id)?;
        Ok(grade)
    })?;
    info!("user {} removed grade {}", principal.id, id);
    Ok(grade)
}

fn resolve<S: Store>(store: &mut S, principal: &Principal, id: i32) -> Result<Grade> {
    let grade = store.fetch_grade(id)?.ok_or(Error::GradeNotFound)?;
    access::authorize_grade(store, principal, &grade, Operation::Read)?;
    Ok(grade)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{Exam, NewExam, NewSubject};
    use crate::role::Role;
    use crate::{exam, subject};

    const ROOT: Principal = Principal {
        id: 1,
        role: Role::Superuser,
    };
    const EDITOR: Principal = Principal {
        id: 2,
        role: Role::Editor,
    };
    const VIEWER: Principal = Principal {
        id: 3,
        role: Role::Viewer,
    };

    fn exam_for(store: &mut MemoryStore, owner: i32) -> Exam {
        let subject = subject::create(
            store,
            &ROOT,
            NewSubject {
                owner_user_id: owner,
                name: "Testfach".into(),
                description: None,
                semester: Some("1".into()),
                teacher_name: Some("Prof. Beispiel".into()),
            },
        )
        .unwrap();
        exam::create(
            store,
            &ROOT,
            NewExam {
                subject_id: subject.id,
                title: "Schularbeit".into(),
                date: NaiveDate::from_ymd_opt(2025, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .unwrap(),
                exam_type: Some("schriftlich".into()),
                weight: Some(1.0),
                max_score: Some(100.0),
            },
        )
        .unwrap()
    }

    fn new_grade(exam_id: i32, label: &str) -> NewGrade {
        NewGrade {
            exam_id,
            grade: label.to_string(),
        }
    }

    #[test]
    fn owner_grades_exam() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, EDITOR.id);

        let grade = create(&mut store, &EDITOR, new_grade(exam.id, "Gut"))?;
        assert_eq!(grade.exam_id, exam.id);
        assert_eq!(grade.grade, GradeValue::Gut);
        assert_eq!(get(&mut store, &EDITOR, grade.id)?, grade);
        Ok(())
    }

    #[test]
    fn create_checks_role_before_chain() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            create(&mut store, &VIEWER, new_grade(9999, "Gut")),
            Err(Error::PermissionDenied)
        ));
    }

    #[test]
    fn create_walks_the_chain_in_order() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            create(&mut store, &EDITOR, new_grade(9999, "Sehr gut")),
            Err(Error::ExamNotFound)
        ));

        let exam = exam_for(&mut store, ROOT.id);
        assert!(matches!(
            create(&mut store, &EDITOR, new_grade(exam.id, "Befriedigend")),
            Err(Error::SubjectAccessDenied)
        ));

        store.drop_subject(exam.subject_id);
        assert!(matches!(
            create(&mut store, &EDITOR, new_grade(exam.id, "Befriedigend")),
            Err(Error::SubjectNotFound)
        ));
    }

    #[test]
    fn invalid_label_is_rejected_after_ownership() {
        let mut store = MemoryStore::new();
        let own = exam_for(&mut store, EDITOR.id);
        let foreign = exam_for(&mut store, ROOT.id);

        assert!(matches!(
            create(&mut store, &EDITOR, new_grade(own.id, "Ausgezeichnet")),
            Err(Error::InvalidGradeData(_))
        ));
        assert!(matches!(
            create(&mut store, &EDITOR, new_grade(foreign.id, "Ausgezeichnet")),
            Err(Error::SubjectAccessDenied)
        ));
    }

    #[test]
    fn get_distinguishes_missing_from_foreign() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, ROOT.id);
        let grade = create(&mut store, &ROOT, new_grade(exam.id, "Gut"))?;

        assert!(matches!(
            get(&mut store, &EDITOR, grade.id),
            Err(Error::SubjectAccessDenied)
        ));
        assert!(matches!(
            get(&mut store, &EDITOR, 9999),
            Err(Error::GradeNotFound)
        ));
        Ok(())
    }

    #[test]
    fn orphaned_grade_reports_missing_exam() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, EDITOR.id);
        let grade = create(&mut store, &EDITOR, new_grade(exam.id, "Gut"))?;

        store.drop_exam(exam.id);
        assert!(matches!(
            get(&mut store, &EDITOR, grade.id),
            Err(Error::ExamNotFound)
        ));
        // Superusers are not walked up the chain.
        assert_eq!(get(&mut store, &ROOT, grade.id)?.id, grade.id);
        Ok(())
    }

    #[test]
    fn update_changes_the_grade() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, EDITOR.id);
        let grade = create(&mut store, &EDITOR, new_grade(exam.id, "Genügend"))?;

        let patch = GradePatch {
            grade: Some("Sehr gut".into()),
        };
        let updated = update(&mut store, &EDITOR, grade.id, patch)?;
        assert_eq!(updated.grade, GradeValue::SehrGut);

        let untouched = update(&mut store, &EDITOR, grade.id, GradePatch::default())?;
        assert_eq!(untouched.grade, GradeValue::SehrGut);
        Ok(())
    }

    #[test]
    fn update_failures() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let foreign = exam_for(&mut store, ROOT.id);
        let grade = create(&mut store, &ROOT, new_grade(foreign.id, "Befriedigend"))?;
        let patch = GradePatch {
            grade: Some("Nicht Genügend".into()),
        };

        assert!(matches!(
            update(&mut store, &EDITOR, 9999, patch.clone()),
            Err(Error::GradeNotFound)
        ));
        assert!(matches!(
            update(&mut store, &EDITOR, grade.id, patch.clone()),
            Err(Error::SubjectAccessDenied)
        ));

        let viewers = exam_for(&mut store, VIEWER.id);
        let viewed = create(&mut store, &ROOT, new_grade(viewers.id, "Gut"))?;
        assert!(matches!(
            update(&mut store, &VIEWER, viewed.id, patch),
            Err(Error::PermissionDenied)
        ));
        assert_eq!(get(&mut store, &VIEWER, viewed.id)?.grade, GradeValue::Gut);
        Ok(())
    }

    #[test]
    fn delete_removes_the_row() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, EDITOR.id);
        let grade = create(&mut store, &EDITOR, new_grade(exam.id, "Genügend"))?;

        let removed = delete(&mut store, &EDITOR, grade.id)?;
        assert_eq!(removed.id, grade.id);
        assert!(matches!(
            get(&mut store, &EDITOR, grade.id),
            Err(Error::GradeNotFound)
        ));
        assert!(matches!(
            delete(&mut store, &EDITOR, grade.id),
            Err(Error::GradeNotFound)
        ));
        Ok(())
    }

    #[test]
    fn delete_of_foreign_grade_is_denied() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, ROOT.id);
        let grade = create(&mut store, &ROOT, new_grade(exam.id, "Gut"))?;

        assert!(matches!(
            delete(&mut store, &EDITOR, grade.id),
            Err(Error::SubjectAccessDenied)
        ));
        assert_eq!(get(&mut store, &ROOT, grade.id)?.id, grade.id);
        Ok(())
    }

    #[test]
    fn lists_follow_the_two_hop_chain() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let mine = exam_for(&mut store, EDITOR.id);
        let theirs = exam_for(&mut store, ROOT.id);
        create(&mut store, &EDITOR, new_grade(mine.id, "Gut"))?;
        create(&mut store, &EDITOR, new_grade(mine.id, "Sehr gut"))?;
        create(&mut store, &ROOT, new_grade(theirs.id, "Genügend"))?;

        assert_eq!(list(&mut store, &EDITOR)?.len(), 2);
        assert_eq!(list(&mut store, &ROOT)?.len(), 3);
        assert!(list(&mut store, &VIEWER)?.is_empty());

        assert_eq!(list_for_exam(&mut store, &EDITOR, mine.id)?.len(), 2);
        assert_eq!(list_for_exam(&mut store, &ROOT, theirs.id)?.len(), 1);
        assert!(matches!(
            list_for_exam(&mut store, &EDITOR, theirs.id),
            Err(Error::SubjectAccessDenied)
        ));
        Ok(())
    }

    #[test]
    fn superuser_updates_and_deletes_foreign_grade() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, EDITOR.id);
        let grade = create(&mut store, &EDITOR, new_grade(exam.id, "Gut"))?;

        let patch = GradePatch {
            grade: Some("Befriedigend".into()),
        };
        let updated = update(&mut store, &ROOT, grade.id, patch)?;
        assert_eq!(updated.grade, GradeValue::Befriedigend);

        let removed = delete(&mut store, &ROOT, grade.id)?;
        assert_eq!(removed.grade, GradeValue::Befriedigend);
        assert!(list(&mut store, &EDITOR)?.is_empty());
        Ok(())
    }

    #[test]
    fn grades_of_a_soft_deleted_exam_stay_listed() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let exam = exam_for(&mut store, EDITOR.id);
        let grade = create(&mut store, &EDITOR, new_grade(exam.id, "Sehr gut"))?;

        exam::delete(&mut store, &EDITOR, exam.id)?;

        assert_eq!(list(&mut store, &EDITOR)?, vec![grade.clone()]);
        assert_eq!(list(&mut store, &ROOT)?, vec![grade.clone()]);
        assert_eq!(list_for_exam(&mut store, &EDITOR, exam.id)?, vec![grade]);
        Ok(())
    }
}
