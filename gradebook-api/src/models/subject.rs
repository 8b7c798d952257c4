use async_graphql::*;
use chrono::NaiveDateTime;
use gradebook_core::exam as exams;
use gradebook_core::{NewSubject, Subject as SubjectData, SubjectPatch};

use super::exam::Exam;
use crate::run;

#[derive(SimpleObject)]
#[graphql(complex)]
pub(crate) struct Subject {
    id: i32,
    user_id: i32,
    name: String,
    description: Option<String>,
    semester: Option<String>,
    teacher_name: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    deleted_at: Option<NaiveDateTime>,
}

#[ComplexObject]
impl Subject {
    async fn exams(&self, ctx: &Context<'_>) -> Result<Vec<Exam>> {
        let sid = self.id;
        Ok(run(ctx, |store, me| exams::list_for_subject(store, me, sid))?
            .iter()
            .map(|e| e.into())
            .collect())
    }
}

impl From<&SubjectData> for Subject {
    fn from(subject: &SubjectData) -> Self {
        Subject {
            id: subject.id,
            user_id: subject.owner_user_id,
            name: subject.name.clone(),
            description: subject.description.clone(),
            semester: subject.semester.clone(),
            teacher_name: subject.teacher_name.clone(),
            created_at: subject.created_at,
            updated_at: subject.updated_at,
            deleted_at: subject.deleted_at,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct SubjectInput {
    pub(crate) user_id: i32,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) semester: Option<String>,
    pub(crate) teacher_name: Option<String>,
}

impl From<SubjectInput> for NewSubject {
    fn from(input: SubjectInput) -> Self {
        NewSubject {
            owner_user_id: input.user_id,
            name: input.name,
            description: input.description,
            semester: input.semester,
            teacher_name: input.teacher_name,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct SubjectUpdateInput {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) semester: Option<String>,
    pub(crate) teacher_name: Option<String>,
}

impl From<SubjectUpdateInput> for SubjectPatch {
    fn from(input: SubjectUpdateInput) -> Self {
        SubjectPatch {
            name: input.name,
            description: input.description,
            semester: input.semester,
            teacher_name: input.teacher_name,
        }
    }
}
