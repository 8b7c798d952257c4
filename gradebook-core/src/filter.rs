use crate::models::{Exam, Grade, Subject};
use crate::role::Principal;

/// Visibility rules for list queries.
///
/// Built from the principal so that ownership scoping is decided here and
/// nowhere else. Soft-deleted subjects and exams are never admitted. Stores translate it into their
/// own query language; [`Filter::admits_subject`] and friends are the
/// reference semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    /// Only rows whose chain ends at this user.
    pub owner_id: Option<i32>,
    pub subject_id: Option<i32>,
    pub exam_id: Option<i32>,
}

impl Filter {
    pub fn visible_to(principal: &Principal) -> Self {
        Filter {
            owner_id: if principal.is_superuser() {
                None
            } else {
                Some(principal.id)
            },
            ..Default::default()
        }
    }

    pub fn in_subject(mut self, subject_id: i32) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn in_exam(mut self, exam_id: i32) -> Self {
        self.exam_id = Some(exam_id);
        self
    }

    pub fn admits_subject(&self, subject: &Subject) -> bool {
        !subject.is_deleted()
            && self.owner_id.map_or(true, |o| subject.owner_user_id == o)
            && self.subject_id.map_or(true, |s| subject.id == s)
    }

    pub fn admits_exam(&self, exam: &Exam, subject: &Subject) -> bool {
        !exam.is_deleted()
            && self.owner_id.map_or(true, |o| subject.owner_user_id == o)
            && self.subject_id.map_or(true, |s| exam.subject_id == s)
            && self.exam_id.map_or(true, |e| exam.id == e)
    }

    /// Grades have no deletion marker; a soft-deleted exam keeps its grades
    /// listed.
    pub fn admits_grade(&self, grade: &Grade, exam: &Exam, subject: &Subject) -> bool {
        self.owner_id.map_or(true, |o| subject.owner_user_id == o)
            && self.subject_id.map_or(true, |s| exam.subject_id == s)
            && self.exam_id.map_or(true, |e| grade.exam_id == e)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::role::Role;

    fn subject(id: i32, owner: i32, deleted: bool) -> Subject {
        let at = NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        Subject {
            id,
            owner_user_id: owner,
            name: format!("subject {}", id),
            description: None,
            semester: None,
            teacher_name: None,
            created_at: at,
            updated_at: at,
            deleted_at: if deleted { Some(at) } else { None },
        }
    }

    #[test]
    fn superuser_is_not_scoped_by_owner() {
        let filter = Filter::visible_to(&Principal::new(1, Role::Superuser));
        assert_eq!(filter.owner_id, None);
        assert!(filter.admits_subject(&subject(1, 42, false)));
    }

    #[test]
    fn others_only_see_their_own_rows() {
        let filter = Filter::visible_to(&Principal::new(2, Role::Viewer));
        assert!(filter.admits_subject(&subject(1, 2, false)));
        assert!(!filter.admits_subject(&subject(2, 3, false)));
    }

    #[test]
    fn soft_deleted_rows_are_hidden_even_from_superusers() {
        let filter = Filter::visible_to(&Principal::new(1, Role::Superuser));
        assert!(!filter.admits_subject(&subject(1, 1, true)));
    }
}
