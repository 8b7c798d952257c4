use async_graphql::{Context, EmptySubscription, Object, Result, Schema};
use gradebook_core::{exam as exams, grade as grades, subject as subjects};

use exam::{Exam, ExamInput, ExamUpdateInput};
use grade::{Grade, GradeInput, GradeUpdateInput};
use subject::{Subject, SubjectInput, SubjectUpdateInput};
use user::User;

use crate::{principal_from_ctx, run};

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub struct Query;

#[Object]
impl Query {
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        Ok(principal_from_ctx(ctx)?.into())
    }

    async fn subject(&self, ctx: &Context<'_>, id: i32) -> Result<Subject> {
        let ref subject = run(ctx, |store, me| subjects::get(store, me, id))?;
        Ok(subject.into())
    }

    async fn subjects(&self, ctx: &Context<'_>) -> Result<Vec<Subject>> {
        Ok(run(ctx, |store, me| subjects::list(store, me))?
            .iter()
            .map(|s| s.into())
            .collect())
    }

    async fn exam(&self, ctx: &Context<'_>, id: i32) -> Result<Exam> {
        let ref exam = run(ctx, |store, me| exams::get(store, me, id))?;
        Ok(exam.into())
    }

    /// All visible exams, or those of one subject.
    async fn exams(&self, ctx: &Context<'_>, subject_id: Option<i32>) -> Result<Vec<Exam>> {
        let list = match subject_id {
            Some(sid) => run(ctx, |store, me| exams::list_for_subject(store, me, sid))?,
            None => run(ctx, |store, me| exams::list(store, me))?,
        };
        Ok(list.iter().map(|e| e.into()).collect())
    }

    async fn grade(&self, ctx: &Context<'_>, id: i32) -> Result<Grade> {
        let ref grade = run(ctx, |store, me| grades::get(store, me, id))?;
        Ok(grade.into())
    }

    /// All visible grades, or those of one exam.
    async fn grades(&self, ctx: &Context<'_>, exam_id: Option<i32>) -> Result<Vec<Grade>> {
        let list = match exam_id {
            Some(eid) => run(ctx, |store, me| grades::list_for_exam(store, me, eid))?,
            None => run(ctx, |store, me| grades::list(store, me))?,
        };
        Ok(list.iter().map(|g| g.into()).collect())
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    async fn create_subject(&self, ctx: &Context<'_>, input: SubjectInput) -> Result<Subject> {
        let ref subject = run(ctx, |store, me| subjects::create(store, me, input.into()))?;
        Ok(subject.into())
    }

    async fn update_subject(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: SubjectUpdateInput,
    ) -> Result<Subject> {
        let ref subject = run(ctx, |store, me| {
            subjects::update(store, me, id, input.into())
        })?;
        Ok(subject.into())
    }

    async fn delete_subject(&self, ctx: &Context<'_>, id: i32) -> Result<Subject> {
        let ref subject = run(ctx, |store, me| subjects::delete(store, me, id))?;
        Ok(subject.into())
    }

    async fn create_exam(&self, ctx: &Context<'_>, input: ExamInput) -> Result<Exam> {
        let ref exam = run(ctx, |store, me| exams::create(store, me, input.into()))?;
        Ok(exam.into())
    }

    async fn update_exam(&self, ctx: &Context<'_>, id: i32, input: ExamUpdateInput) -> Result<Exam> {
        let ref exam = run(ctx, |store, me| exams::update(store, me, id, input.into()))?;
        Ok(exam.into())
    }

    async fn delete_exam(&self, ctx: &Context<'_>, id: i32) -> Result<Exam> {
        let ref exam = run(ctx, |store, me| exams::delete(store, me, id))?;
        Ok(exam.into())
    }

    async fn create_grade(&self, ctx: &Context<'_>, input: GradeInput) -> Result<Grade> {
        let ref grade = run(ctx, |store, me| grades::create(store, me, input.into()))?;
        Ok(grade.into())
    }

    async fn update_grade(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: GradeUpdateInput,
    ) -> Result<Grade> {
        let ref grade = run(ctx, |store, me| grades::update(store, me, id, input.into()))?;
        Ok(grade.into())
    }

    /// Grades are removed outright.
    async fn delete_grade(&self, ctx: &Context<'_>, id: i32) -> Result<Grade> {
        let ref grade = run(ctx, |store, me| grades::delete(store, me, id))?;
        Ok(grade.into())
    }
}

pub mod exam;
pub mod grade;
pub mod subject;
pub mod user;
