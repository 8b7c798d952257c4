use crate::schema::{exams, subjects};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use gradebook_core::{Exam as ExamModel, ExamPatch, Filter, NewExam as NewExamModel};

#[derive(Queryable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = exams)]
pub struct Exam {
    pub id: i32,
    pub subject_id: i32,
    pub title: String,
    pub date: NaiveDateTime,
    pub exam_type: Option<String>,
    pub weight: Option<f64>,
    pub max_score: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Exam {
    pub fn find(eid: i32, conn: &mut PgConnection) -> QueryResult<Option<Self>> {
        exams::table.find(eid).first(conn).optional()
    }

    /// Joins the owning subject so the owner scope is applied in SQL.
    pub fn list(filter: &Filter, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let mut query = exams::table
            .inner_join(subjects::table)
            .select(exams::all_columns)
            .into_boxed();
        if let Some(owner) = filter.owner_id {
            query = query.filter(subjects::user_id.eq(owner));
        }
        if let Some(sid) = filter.subject_id {
            query = query.filter(exams::subject_id.eq(sid));
        }
        if let Some(eid) = filter.exam_id {
            query = query.filter(exams::id.eq(eid));
        }
        query = query.filter(exams::deleted_at.is_null());
        query.order(exams::id.asc()).load(conn)
    }

    pub fn update(eid: i32, changes: &ExamChanges, conn: &mut PgConnection) -> QueryResult<Self> {
        diesel::update(exams::table.find(eid))
            .set(changes)
            .get_result(conn)
    }

    pub fn mark_deleted(
        eid: i32,
        at: NaiveDateTime,
        conn: &mut PgConnection,
    ) -> QueryResult<Option<Self>> {
        diesel::update(exams::table.find(eid).filter(exams::deleted_at.is_null()))
            .set(exams::deleted_at.eq(Some(at)))
            .get_result(conn)
            .optional()
    }
}

impl From<Exam> for ExamModel {
    fn from(row: Exam) -> Self {
        ExamModel {
            id: row.id,
            subject_id: row.subject_id,
            title: row.title,
            date: row.date,
            exam_type: row.exam_type,
            weight: row.weight,
            max_score: row.max_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = exams)]
pub struct NewExam<'a> {
    pub subject_id: i32,
    pub title: &'a str,
    pub date: NaiveDateTime,
    pub exam_type: Option<&'a str>,
    pub weight: Option<f64>,
    pub max_score: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewExam<'a> {
    pub fn new(data: &'a NewExamModel, now: NaiveDateTime) -> Self {
        NewExam {
            subject_id: data.subject_id,
            title: &data.title,
            date: data.date,
            exam_type: data.exam_type.as_deref(),
            weight: data.weight,
            max_score: data.max_score,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<Exam> {
        diesel::insert_into(exams::table)
            .values(self)
            .get_result(conn)
    }
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = exams)]
pub struct ExamChanges<'a> {
    pub title: Option<&'a str>,
    pub date: Option<NaiveDateTime>,
    pub exam_type: Option<&'a str>,
    pub weight: Option<f64>,
    pub max_score: Option<f64>,
    pub updated_at: NaiveDateTime,
}

impl<'a> ExamChanges<'a> {
    pub fn new(patch: &'a ExamPatch, now: NaiveDateTime) -> Self {
        ExamChanges {
            title: patch.title.as_deref(),
            date: patch.date,
            exam_type: patch.exam_type.as_deref(),
            weight: patch.weight,
            max_score: patch.max_score,
            updated_at: now,
        }
    }
}
