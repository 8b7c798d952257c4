use crate::schema::{exams, grades, subjects};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use gradebook_core::{Filter, Grade as GradeModel, GradeValue, StoreError, StoreResult};

#[derive(Queryable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = grades)]
pub struct Grade {
    pub id: i32,
    pub exam_id: i32,
    pub grade: String,
}

impl Grade {
    pub fn find(gid: i32, conn: &mut PgConnection) -> QueryResult<Option<Self>> {
        grades::table.find(gid).first(conn).optional()
    }

    /// Walks `grades -> exams -> subjects` for the owner scope.
    pub fn list(filter: &Filter, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        let mut query = grades::table
            .inner_join(exams::table.inner_join(subjects::table))
            .select(grades::all_columns)
            .into_boxed();
        if let Some(owner) = filter.owner_id {
            query = query.filter(subjects::user_id.eq(owner));
        }
        if let Some(sid) = filter.subject_id {
            query = query.filter(exams::subject_id.eq(sid));
        }
        if let Some(eid) = filter.exam_id {
            query = query.filter(grades::exam_id.eq(eid));
        }
        query.order(grades::id.asc()).load(conn)
    }

    pub fn update_grade(gid: i32, value: GradeValue, conn: &mut PgConnection) -> QueryResult<Self> {
        diesel::update(grades::table.find(gid))
            .set(grades::grade.eq(value.to_string()))
            .get_result(conn)
    }

    pub fn remove(gid: i32, conn: &mut PgConnection) -> QueryResult<usize> {
        diesel::delete(grades::table.find(gid)).execute(conn)
    }

    pub fn into_model(self) -> StoreResult<GradeModel> {
        Ok(GradeModel {
            id: self.id,
            exam_id: self.exam_id,
            grade: self.grade.parse().map_err(StoreError::new)?,
        })
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = grades)]
pub struct NewGrade {
    pub exam_id: i32,
    pub grade: String,
}

impl NewGrade {
    pub fn new(exam_id: i32, value: GradeValue) -> Self {
        NewGrade {
            exam_id,
            grade: value.to_string(),
        }
    }

    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<Grade> {
        diesel::insert_into(grades::table)
            .values(self)
            .get_result(conn)
    }
}
