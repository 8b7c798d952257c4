use async_graphql::*;
use chrono::NaiveDateTime;
use gradebook_core::{grade as grades, subject as subjects};
use gradebook_core::{Exam as ExamData, ExamPatch, NewExam};

use super::grade::Grade;
use super::subject::Subject;
use crate::run;

#[derive(SimpleObject)]
#[graphql(complex)]
pub(crate) struct Exam {
    id: i32,
    subject_id: i32,
    title: String,
    date: NaiveDateTime,
    exam_type: Option<String>,
    weight: Option<f64>,
    max_score: Option<f64>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    deleted_at: Option<NaiveDateTime>,
}

#[ComplexObject]
impl Exam {
    async fn subject(&self, ctx: &Context<'_>) -> Result<Subject> {
        let sid = self.subject_id;
        let ref subject = run(ctx, |store, me| subjects::get(store, me, sid))?;
        Ok(subject.into())
    }

    async fn grades(&self, ctx: &Context<'_>) -> Result<Vec<Grade>> {
        let eid = self.id;
        Ok(run(ctx, |store, me| grades::list_for_exam(store, me, eid))?
            .iter()
            .map(|g| g.into())
            .collect())
    }
}

impl From<&ExamData> for Exam {
    fn from(exam: &ExamData) -> Self {
        Exam {
            id: exam.id,
            subject_id: exam.subject_id,
            title: exam.title.clone(),
            date: exam.date,
            exam_type: exam.exam_type.clone(),
            weight: exam.weight,
            max_score: exam.max_score,
            created_at: exam.created_at,
            updated_at: exam.updated_at,
            deleted_at: exam.deleted_at,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct ExamInput {
    pub(crate) subject_id: i32,
    pub(crate) title: String,
    pub(crate) date: NaiveDateTime,
    pub(crate) exam_type: Option<String>,
    pub(crate) weight: Option<f64>,
    pub(crate) max_score: Option<f64>,
}

impl From<ExamInput> for NewExam {
    fn from(input: ExamInput) -> Self {
        NewExam {
            subject_id: input.subject_id,
            title: input.title,
            date: input.date,
            exam_type: input.exam_type,
            weight: input.weight,
            max_score: input.max_score,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct ExamUpdateInput {
    pub(crate) title: Option<String>,
    pub(crate) date: Option<NaiveDateTime>,
    pub(crate) exam_type: Option<String>,
    pub(crate) weight: Option<f64>,
    pub(crate) max_score: Option<f64>,
}

impl From<ExamUpdateInput> for ExamPatch {
    fn from(input: ExamUpdateInput) -> Self {
        ExamPatch {
            title: input.title,
            date: input.date,
            exam_type: input.exam_type,
            weight: input.weight,
            max_score: input.max_score,
        }
    }
}
