diesel::table! {
    exams (id) {
        id -> Int4,
        subject_id -> Int4,
        title -> Varchar,
        date -> Timestamp,
        exam_type -> Nullable<Varchar>,
        weight -> Nullable<Float8>,
        max_score -> Nullable<Float8>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    grades (id) {
        id -> Int4,
        exam_id -> Int4,
        grade -> Varchar,
    }
}

diesel::table! {
    subjects (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        semester -> Nullable<Varchar>,
        teacher_name -> Nullable<Varchar>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        hash_pwd -> Varchar,
        user_role -> Varchar,
        created_at -> Timestamp,
        updated_at -> Nullable<Timestamp>,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(exams -> subjects (subject_id));
diesel::joinable!(grades -> exams (exam_id));
diesel::joinable!(subjects -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(exams, grades, subjects, users,);
