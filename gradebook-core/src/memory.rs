//! An in-memory [`Store`], used by the test suite and for local experiments.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::Error;
use crate::filter::Filter;
use crate::models::{
    Exam, ExamPatch, Grade, GradeValue, NewExam, NewSubject, Subject, SubjectPatch,
};
use crate::store::{Store, StoreError, StoreResult};

#[derive(Clone, Debug, Default)]
struct Tables {
    subjects: BTreeMap<i32, Subject>,
    exams: BTreeMap<i32, Exam>,
    grades: BTreeMap<i32, Grade>,
    last_subject_id: i32,
    last_exam_id: i32,
    last_grade_id: i32,
}

/// Keeps every table in ordered maps. A unit of work snapshots the tables and
/// restores them when the operation fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn drop_subject(&mut self, id: i32) {
        self.tables.subjects.remove(&id);
    }

    #[cfg(test)]
    pub(crate) fn drop_exam(&mut self, id: i32) {
        self.tables.exams.remove(&id);
    }
}

fn missing(table: &str, id: i32) -> StoreError {
    StoreError::new(format!("no row {} in {}", id, table))
}

impl Store for MemoryStore {
    fn atomically<T, F>(&mut self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let snapshot = self.tables.clone();
        let result = op(&mut *self);
        if result.is_err() {
            self.tables = snapshot;
        }
        result
    }

    fn fetch_subject(&mut self, id: i32) -> StoreResult<Option<Subject>> {
        Ok(self.tables.subjects.get(&id).cloned())
    }

    fn fetch_subjects(&mut self, filter: &Filter) -> StoreResult<Vec<Subject>> {
        Ok(self
            .tables
            .subjects
            .values()
            .filter(|subject| filter.admits_subject(subject))
            .cloned()
            .collect())
    }

    fn insert_subject(&mut self, data: &NewSubject, now: NaiveDateTime) -> StoreResult<Subject> {
        self.tables.last_subject_id += 1;
        let subject = Subject {
            id: self.tables.last_subject_id,
            owner_user_id: data.owner_user_id,
            name: data.name.clone(),
            description: data.description.clone(),
            semester: data.semester.clone(),
            teacher_name: data.teacher_name.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tables.subjects.insert(subject.id, subject.clone());
        Ok(subject)
    }

    fn update_subject(
        &mut self,
        id: i32,
        patch: &SubjectPatch,
        now: NaiveDateTime,
    ) -> StoreResult<Subject> {
        let subject = self
            .tables
            .subjects
            .get_mut(&id)
            .ok_or_else(|| missing("subjects", id))?;
        patch.apply_to(subject);
        subject.updated_at = now;
        Ok(subject.clone())
    }

    fn mark_subject_deleted(
        &mut self,
        id: i32,
        at: NaiveDateTime,
    ) -> StoreResult<Option<Subject>> {
        let subject = self
            .tables
            .subjects
            .get_mut(&id)
            .ok_or_else(|| missing("subjects", id))?;
        if subject.is_deleted() {
            return Ok(None);
        }
        subject.deleted_at = Some(at);
        Ok(Some(subject.clone()))
    }

    fn fetch_exam(&mut self, id: i32) -> StoreResult<Option<Exam>> {
        Ok(self.tables.exams.get(&id).cloned())
    }

    /// Exams whose subject row is gone are dropped even without an owner
    /// scope, matching the inner join of the SQL store. Under the foreign keys
    /// of the real schema no such orphans exist.
    fn fetch_exams(&mut self, filter: &Filter) -> StoreResult<Vec<Exam>> {
        let subjects = &self.tables.subjects;
        Ok(self
            .tables
            .exams
            .values()
            .filter(|exam| {
                subjects
                    .get(&exam.subject_id)
                    .map_or(false, |subject| filter.admits_exam(exam, subject))
            })
            .cloned()
            .collect())
    }

    fn insert_exam(&mut self, data: &NewExam, now: NaiveDateTime) -> StoreResult<Exam> {
        if !self.tables.subjects.contains_key(&data.subject_id) {
            return Err(missing("subjects", data.subject_id));
        }
        self.tables.last_exam_id += 1;
        let exam = Exam {
            id: self.tables.last_exam_id,
            subject_id: data.subject_id,
            title: data.title.clone(),
            date: data.date,
            exam_type: data.exam_type.clone(),
            weight: data.weight,
            max_score: data.max_score,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tables.exams.insert(exam.id, exam.clone());
        Ok(exam)
    }

    fn update_exam(
        &mut self,
        id: i32,
        patch: &ExamPatch,
        now: NaiveDateTime,
    ) -> StoreResult<Exam> {
        let exam = self
            .tables
            .exams
            .get_mut(&id)
            .ok_or_else(|| missing("exams", id))?;
        patch.apply_to(exam);
        exam.updated_at = now;
        Ok(exam.clone())
    }

    fn mark_exam_deleted(&mut self, id: i32, at: NaiveDateTime) -> StoreResult<Option<Exam>> {
        let exam = self
            .tables
            .exams
            .get_mut(&id)
            .ok_or_else(|| missing("exams", id))?;
        if exam.is_deleted() {
            return Ok(None);
        }
        exam.deleted_at = Some(at);
        Ok(Some(exam.clone()))
    }

    fn fetch_grade(&mut self, id: i32) -> StoreResult<Option<Grade>> {
        Ok(self.tables.grades.get(&id).cloned())
    }

    /// Like [`MemoryStore::fetch_exams`], a grade is only listed while its
    /// exam and that exam's subject still exist.
    fn fetch_grades(&mut self, filter: &Filter) -> StoreResult<Vec<Grade>> {
        let Tables {
            subjects,
            exams,
            grades,
            ..
        } = &self.tables;
        Ok(grades
            .values()
            .filter(|grade| {
                exams
                    .get(&grade.exam_id)
                    .and_then(|exam| subjects.get(&exam.subject_id).map(|s| (exam, s)))
                    .map_or(false, |(exam, subject)| {
                        filter.admits_grade(grade, exam, subject)
                    })
            })
            .cloned()
            .collect())
    }

    fn insert_grade(&mut self, exam_id: i32, grade: GradeValue) -> StoreResult<Grade> {
        if !self.tables.exams.contains_key(&exam_id) {
            return Err(missing("exams", exam_id));
        }
        self.tables.last_grade_id += 1;
        let grade = Grade {
            id: self.tables.last_grade_id,
            exam_id,
            grade,
        };
        self.tables.grades.insert(grade.id, grade.clone());
        Ok(grade)
    }

    fn update_grade(&mut self, id: i32, value: GradeValue) -> StoreResult<Grade> {
        let grade = self
            .tables
            .grades
            .get_mut(&id)
            .ok_or_else(|| missing("grades", id))?;
        grade.grade = value;
        Ok(grade.clone())
    }

    fn remove_grade(&mut self, id: i32) -> StoreResult<()> {
        self.tables
            .grades
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing("grades", id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn new_subject(owner: i32) -> NewSubject {
        NewSubject {
            owner_user_id: owner,
            name: "Latin".into(),
            description: None,
            semester: None,
            teacher_name: None,
        }
    }

    #[test]
    fn failed_unit_of_work_is_rolled_back() {
        let mut store = MemoryStore::new();
        let result: Result<(), Error> = store.atomically(|tx| {
            tx.insert_subject(&new_subject(1), at())?;
            Err(Error::PermissionDenied)
        });

        assert!(result.is_err());
        assert!(store.tables.subjects.is_empty());
    }

    #[test]
    fn successful_unit_of_work_is_kept() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let subject = store.atomically(|tx| Ok(tx.insert_subject(&new_subject(1), at())?))?;

        assert_eq!(subject.id, 1);
        assert_eq!(store.fetch_subject(1)?, Some(subject));
        Ok(())
    }

    #[test]
    fn exams_of_missing_subjects_are_not_listed() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let subject = store.insert_subject(&new_subject(1), at())?;
        store.insert_exam(
            &NewExam {
                subject_id: subject.id,
                title: "Vokabeltest".into(),
                date: at(),
                exam_type: None,
                weight: None,
                max_score: None,
            },
            at(),
        )?;

        assert_eq!(store.fetch_exams(&Filter::default())?.len(), 1);
        store.drop_subject(subject.id);
        assert!(store.fetch_exams(&Filter::default())?.is_empty());
        Ok(())
    }

    #[test]
    fn marking_twice_leaves_the_first_timestamp() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let subject = store.insert_subject(&new_subject(1), at())?;
        let later = at() + chrono::Duration::hours(1);

        let marked = store.mark_subject_deleted(subject.id, at())?;
        assert_eq!(marked.and_then(|s| s.deleted_at), Some(at()));
        assert_eq!(store.mark_subject_deleted(subject.id, later)?, None);
        assert_eq!(
            store.fetch_subject(subject.id)?.and_then(|s| s.deleted_at),
            Some(at())
        );
        Ok(())
    }

    #[test]
    fn updating_a_missing_row_is_a_store_error() {
        let mut store = MemoryStore::new();
        assert!(store
            .update_subject(3, &SubjectPatch::default(), at())
            .is_err());
        assert!(store.remove_grade(3).is_err());
    }
}
