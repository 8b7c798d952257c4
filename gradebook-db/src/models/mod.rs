pub mod exam;
pub mod grade;
pub mod subject;
pub mod user;
