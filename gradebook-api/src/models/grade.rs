use async_graphql::*;
use gradebook_core::exam as exams;
use gradebook_core::{Grade as GradeData, GradePatch, NewGrade};

use super::exam::Exam;
use crate::run;

#[derive(SimpleObject)]
#[graphql(complex)]
pub(crate) struct Grade {
    id: i32,
    exam_id: i32,
    /// One of `Sehr gut`, `Gut`, `Befriedigend`, `Genügend`, `Nicht Genügend`.
    grade: String,
    passing: bool,
}

#[ComplexObject]
impl Grade {
    async fn exam(&self, ctx: &Context<'_>) -> Result<Exam> {
        let eid = self.exam_id;
        let ref exam = run(ctx, |store, me| exams::get(store, me, eid))?;
        Ok(exam.into())
    }
}

impl From<&GradeData> for Grade {
    fn from(grade: &GradeData) -> Self {
        Grade {
            id: grade.id,
            exam_id: grade.exam_id,
            grade: grade.grade.to_string(),
            passing: grade.grade.is_passing(),
        }
    }
}

#[derive(InputObject)]
pub(crate) struct GradeInput {
    pub(crate) exam_id: i32,
    pub(crate) grade: String,
}

impl From<GradeInput> for NewGrade {
    fn from(input: GradeInput) -> Self {
        NewGrade {
            exam_id: input.exam_id,
            grade: input.grade,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct GradeUpdateInput {
    pub(crate) grade: Option<String>,
}

impl From<GradeUpdateInput> for GradePatch {
    fn from(input: GradeUpdateInput) -> Self {
        GradePatch { grade: input.grade }
    }
}
