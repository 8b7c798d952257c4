use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i32,
    pub owner_user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub teacher_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Subject {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub owner_user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub teacher_name: Option<String>,
}

/// Fields left as `None` keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub teacher_name: Option<String>,
}

impl SubjectPatch {
    pub fn apply_to(&self, subject: &mut Subject) {
        if let Some(name) = &self.name {
            subject.name = name.clone();
        }
        if let Some(description) = &self.description {
            subject.description = Some(description.clone());
        }
        if let Some(semester) = &self.semester {
            subject.semester = Some(semester.clone());
        }
        if let Some(teacher_name) = &self.teacher_name {
            subject.teacher_name = Some(teacher_name.clone());
        }
    }
}

/// An exam is owned by whoever owns its subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
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
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExam {
    pub subject_id: i32,
    pub title: String,
    pub date: NaiveDateTime,
    pub exam_type: Option<String>,
    pub weight: Option<f64>,
    pub max_score: Option<f64>,
}

/// Fields left as `None` keep their stored value. An exam never moves to
/// another subject.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub exam_type: Option<String>,
    pub weight: Option<f64>,
    pub max_score: Option<f64>,
}

impl ExamPatch {
    pub fn apply_to(&self, exam: &mut Exam) {
        if let Some(title) = &self.title {
            exam.title = title.clone();
        }
        if let Some(date) = self.date {
            exam.date = date;
        }
        if let Some(exam_type) = &self.exam_type {
            exam.exam_type = Some(exam_type.clone());
        }
        if let Some(weight) = self.weight {
            exam.weight = Some(weight);
        }
        if let Some(max_score) = self.max_score {
            exam.max_score = Some(max_score);
        }
    }
}

/// The five marks of the grading scale, best first.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum GradeValue {
    #[serde(rename = "Sehr gut")]
    #[strum(serialize = "Sehr gut")]
    SehrGut,
    #[serde(rename = "Gut")]
    #[strum(serialize = "Gut")]
    Gut,
    #[serde(rename = "Befriedigend")]
    #[strum(serialize = "Befriedigend")]
    Befriedigend,
    #[serde(rename = "Genügend")]
    #[strum(serialize = "Genügend")]
    Genuegend,
    #[serde(rename = "Nicht Genügend")]
    #[strum(serialize = "Nicht Genügend")]
    NichtGenuegend,
}

impl GradeValue {
    /// Parses a grade label, failing with [`Error::InvalidGradeData`].
    pub fn parse(label: &str) -> Result<Self, Error> {
        label.parse().map_err(|_| {
            let allowed: Vec<String> = GradeValue::iter().map(|g| g.to_string()).collect();
            Error::InvalidGradeData(format!(
                "`{}` is not one of {}",
                label,
                allowed.join(", ")
            ))
        })
    }

    pub fn is_passing(self) -> bool {
        self != GradeValue::NichtGenuegend
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i32,
    pub exam_id: i32,
    pub grade: GradeValue,
}

/// Grade input as received; the label is validated after the ownership
/// chain has been resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGrade {
    pub exam_id: i32,
    pub grade: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradePatch {
    pub grade: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn subject() -> Subject {
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        Subject {
            id: 1,
            owner_user_id: 7,
            name: "Biology".into(),
            description: Some("Cells and DNA".into()),
            semester: Some("1".into()),
            teacher_name: Some("Dr. Darwin".into()),
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    #[test]
    fn subject_patch_only_touches_present_fields() {
        let mut subject = subject();
        let patch = SubjectPatch {
            name: Some("Advanced Biology".into()),
            ..Default::default()
        };
        patch.apply_to(&mut subject);

        assert_eq!(subject.name, "Advanced Biology");
        assert_eq!(subject.description.as_deref(), Some("Cells and DNA"));
        assert_eq!(subject.teacher_name.as_deref(), Some("Dr. Darwin"));
    }

    #[test]
    fn grade_labels_parse() {
        assert_eq!(GradeValue::parse("Sehr gut").unwrap(), GradeValue::SehrGut);
        assert_eq!(
            GradeValue::parse("Nicht Genügend").unwrap(),
            GradeValue::NichtGenuegend
        );
        assert_eq!(GradeValue::Genuegend.to_string(), "Genügend");
        assert!(!GradeValue::NichtGenuegend.is_passing());
    }

    #[test]
    fn unknown_grade_label_is_invalid_data() {
        match GradeValue::parse("A+") {
            Err(Error::InvalidGradeData(message)) => assert!(message.contains("Sehr gut")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
