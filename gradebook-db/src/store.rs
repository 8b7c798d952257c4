//! The PostgreSQL side of [`Store`].

use chrono::NaiveDateTime;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::QueryResult;
use gradebook_core::{
    Error, Exam as ExamModel, ExamPatch, Filter, Grade as GradeModel, GradeValue,
    NewExam as NewExamModel, NewSubject as NewSubjectModel, Store, StoreError, StoreResult,
    Subject as SubjectModel, SubjectPatch,
};
use log::{error, warn};

use crate::connection::{Conn, PgPool};
use crate::models::exam::{Exam, ExamChanges, NewExam};
use crate::models::grade::{Grade, NewGrade};
use crate::models::subject::{NewSubject, Subject, SubjectChanges};
use crate::models::user::User;

trait OrStore<T> {
    fn or_store(self) -> StoreResult<T>;
}

impl<T> OrStore<T> for QueryResult<T> {
    fn or_store(self) -> StoreResult<T> {
        self.map_err(StoreError::new)
    }
}

/// One pooled connection serving one request.
pub struct PgStore {
    conn: Conn,
}

impl PgStore {
    pub fn new(conn: Conn) -> Self {
        PgStore { conn }
    }

    pub fn from_pool(pool: &PgPool) -> StoreResult<Self> {
        pool.get().map(PgStore::new).map_err(StoreError::new)
    }

    pub fn find_user(&mut self, uid: i32) -> StoreResult<Option<User>> {
        User::find(uid, &mut self.conn).or_store()
    }
}

impl Store for PgStore {
    fn atomically<T, F>(&mut self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        AnsiTransactionManager::begin_transaction(&mut *self.conn).or_store()?;
        match op(&mut *self) {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(&mut *self.conn).or_store()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = AnsiTransactionManager::rollback_transaction(&mut *self.conn)
                {
                    error!("rollback failed after `{}`: {}", err, rollback);
                } else if let Error::Store(_) = err {
                    warn!("rolled back after storage failure: {}", err);
                }
                Err(err)
            }
        }
    }

    fn fetch_subject(&mut self, id: i32) -> StoreResult<Option<SubjectModel>> {
        Ok(Subject::find(id, &mut self.conn).or_store()?.map(Into::into))
    }

    fn fetch_subjects(&mut self, filter: &Filter) -> StoreResult<Vec<SubjectModel>> {
        let rows = Subject::list(filter, &mut self.conn).or_store()?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn insert_subject(
        &mut self,
        data: &NewSubjectModel,
        now: NaiveDateTime,
    ) -> StoreResult<SubjectModel> {
        let row = NewSubject::new(data, now)
            .create(&mut self.conn)
            .or_store()?;
        Ok(row.into())
    }

    fn update_subject(
        &mut self,
        id: i32,
        patch: &SubjectPatch,
        now: NaiveDateTime,
    ) -> StoreResult<SubjectModel> {
        let changes = SubjectChanges::new(patch, now);
        Ok(Subject::update(id, &changes, &mut self.conn)
            .or_store()?
            .into())
    }

    fn mark_subject_deleted(
        &mut self,
        id: i32,
        at: NaiveDateTime,
    ) -> StoreResult<Option<SubjectModel>> {
        Ok(Subject::mark_deleted(id, at, &mut self.conn)
            .or_store()?
            .map(Into::into))
    }

    fn fetch_exam(&mut self, id: i32) -> StoreResult<Option<ExamModel>> {
        Ok(Exam::find(id, &mut self.conn).or_store()?.map(Into::into))
    }

    fn fetch_exams(&mut self, filter: &Filter) -> StoreResult<Vec<ExamModel>> {
        let rows = Exam::list(filter, &mut self.conn).or_store()?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn insert_exam(&mut self, data: &NewExamModel, now: NaiveDateTime) -> StoreResult<ExamModel> {
        let row = NewExam::new(data, now).create(&mut self.conn).or_store()?;
        Ok(row.into())
    }

    fn update_exam(
        &mut self,
        id: i32,
        patch: &ExamPatch,
        now: NaiveDateTime,
    ) -> StoreResult<ExamModel> {
        let changes = ExamChanges::new(patch, now);
        Ok(Exam::update(id, &changes, &mut self.conn).or_store()?.into())
    }

    fn mark_exam_deleted(&mut self, id: i32, at: NaiveDateTime) -> StoreResult<Option<ExamModel>> {
        Ok(Exam::mark_deleted(id, at, &mut self.conn)
            .or_store()?
            .map(Into::into))
    }

    fn fetch_grade(&mut self, id: i32) -> StoreResult<Option<GradeModel>> {
        Grade::find(id, &mut self.conn)
            .or_store()?
            .map(Grade::into_model)
            .transpose()
    }

    fn fetch_grades(&mut self, filter: &Filter) -> StoreResult<Vec<GradeModel>> {
        Grade::list(filter, &mut self.conn)
            .or_store()?
            .into_iter()
            .map(Grade::into_model)
            .collect()
    }

    fn insert_grade(&mut self, exam_id: i32, grade: GradeValue) -> StoreResult<GradeModel> {
        NewGrade::new(exam_id, grade)
            .create(&mut self.conn)
            .or_store()?
            .into_model()
    }

    fn update_grade(&mut self, id: i32, grade: GradeValue) -> StoreResult<GradeModel> {
        Grade::update_grade(id, grade, &mut self.conn)
            .or_store()?
            .into_model()
    }

    fn remove_grade(&mut self, id: i32) -> StoreResult<()> {
        match Grade::remove(id, &mut self.conn).or_store()? {
            0 => Err(StoreError::new(format!("grade {} vanished before removal", id))),
            _ => Ok(()),
        }
    }
}
