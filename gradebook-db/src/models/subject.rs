use crate::schema::subjects;
use crate::schema::subjects::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use gradebook_core::{
    Filter, NewSubject as NewSubjectModel, Subject as SubjectModel, SubjectPatch,
};

#[derive(Queryable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = subjects)]
pub struct Subject {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub teacher_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Subject {
    pub fn find(sid: i32, conn: &mut PgConnection) -> QueryResult<Option<Self>> {
        subjects.find(sid).first(conn).optional()
    }

    pub fn list(filter: &Filter, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let mut query = subjects.into_boxed();
        if let Some(owner) = filter.owner_id {
            query = query.filter(user_id.eq(owner));
        }
        if let Some(sid) = filter.subject_id {
            query = query.filter(id.eq(sid));
        }
        query = query.filter(deleted_at.is_null());
        query.order(id.asc()).load(conn)
    }

    pub fn update(sid: i32, changes: &SubjectChanges, conn: &mut PgConnection) -> QueryResult<Self> {
        diesel::update(subjects.find(sid))
            .set(changes)
            .get_result(conn)
    }

    /// Guarded by `deleted_at IS NULL`; a row marked by a concurrent
    /// transaction yields `None`.
    pub fn mark_deleted(
        sid: i32,
        at: NaiveDateTime,
        conn: &mut PgConnection,
    ) -> QueryResult<Option<Self>> {
        diesel::update(subjects.find(sid).filter(deleted_at.is_null()))
            .set(deleted_at.eq(Some(at)))
            .get_result(conn)
            .optional()
    }
}

impl From<Subject> for SubjectModel {
    fn from(row: Subject) -> Self {
        SubjectModel {
            id: row.id,
            owner_user_id: row.user_id,
            name: row.name,
            description: row.description,
            semester: row.semester,
            teacher_name: row.teacher_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = subjects)]
pub struct NewSubject<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub semester: Option<&'a str>,
    pub teacher_name: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewSubject<'a> {
    pub fn new(data: &'a NewSubjectModel, now: NaiveDateTime) -> Self {
        NewSubject {
            user_id: data.owner_user_id,
            name: &data.name,
            description: data.description.as_deref(),
            semester: data.semester.as_deref(),
            teacher_name: data.teacher_name.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<Subject> {
        diesel::insert_into(subjects::table)
            .values(self)
            .get_result(conn)
    }
}

/// `None` fields are left out of the `UPDATE`.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = subjects)]
pub struct SubjectChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub semester: Option<&'a str>,
    pub teacher_name: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl<'a> SubjectChanges<'a> {
    pub fn new(patch: &'a SubjectPatch, now: NaiveDateTime) -> Self {
        SubjectChanges {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            semester: patch.semester.as_deref(),
            teacher_name: patch.teacher_name.as_deref(),
            updated_at: now,
        }
    }
}
