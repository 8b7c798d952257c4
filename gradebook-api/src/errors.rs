//! Maps core errors onto HTTP status codes and GraphQL error extensions.

use actix_web::http::StatusCode;
use async_graphql::ErrorExtensions;
use gradebook_core::Error;
use log::error;

pub fn status_code(err: &Error) -> StatusCode {
    match err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        e if e.is_denied() => StatusCode::FORBIDDEN,
        Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub fn error_code(err: &Error) -> &'static str {
    match err {
        Error::SubjectNotFound => "SUBJECT_NOT_FOUND",
        Error::ExamNotFound => "EXAM_NOT_FOUND",
        Error::GradeNotFound => "GRADE_NOT_FOUND",
        Error::SubjectAccessDenied => "SUBJECT_ACCESS_DENIED",
        Error::PermissionDenied => "PERMISSION_DENIED",
        Error::SubjectAlreadyDeleted => "SUBJECT_ALREADY_DELETED",
        Error::ExamAlreadyDeleted => "EXAM_ALREADY_DELETED",
        Error::InvalidSubjectOwner => "INVALID_SUBJECT_OWNER",
        Error::InvalidGradeData(_) => "INVALID_GRADE_DATA",
        Error::Store(_) => "INTERNAL_ERROR",
    }
}

/// Store failures are logged and reported without their cause.
pub fn into_graphql_error(err: Error) -> async_graphql::Error {
    let message = match &err {
        Error::Store(source) => {
            error!("store failure: {}", source);
            "internal error".to_string()
        }
        other => other.to_string(),
    };
    let code = error_code(&err);
    let status = status_code(&err).as_u16() as i32;
    async_graphql::Error::new(message).extend_with(|_, e| {
        e.set("code", code);
        e.set("status", status);
    })
}

pub fn unauthenticated() -> async_graphql::Error {
    let status = StatusCode::UNAUTHORIZED.as_u16() as i32;
    async_graphql::Error::new("authentication required").extend_with(|_, e| {
        e.set("code", "UNAUTHENTICATED");
        e.set("status", status);
    })
}

#[cfg(test)]
mod tests {
    use gradebook_core::StoreError;

    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(status_code(&Error::ExamNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_code(&Error::GradeNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_code(&Error::SubjectAccessDenied), StatusCode::FORBIDDEN);
        assert_eq!(status_code(&Error::PermissionDenied), StatusCode::FORBIDDEN);
        assert_eq!(status_code(&Error::SubjectAlreadyDeleted), StatusCode::BAD_REQUEST);
        assert_eq!(status_code(&Error::InvalidSubjectOwner), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_code(&Error::InvalidGradeData("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_code(&Error::Store(StoreError::new("down"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_details_stay_private() {
        let err = into_graphql_error(Error::Store(StoreError::new("password=hunter2")));
        assert_eq!(err.message, "internal error");
        assert!(err.extensions.is_some());
    }

    #[test]
    fn domain_messages_pass_through() {
        let err = into_graphql_error(Error::ExamAlreadyDeleted);
        assert_eq!(err.message, "exam is already deleted");
        assert_eq!(error_code(&Error::ExamAlreadyDeleted), "EXAM_ALREADY_DELETED");
    }
}
