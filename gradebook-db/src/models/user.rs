use crate::schema::users;
use crate::schema::users::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use gradebook_core::{Principal, Role, StoreError, StoreResult};

#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub hash_pwd: String,
    pub user_role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl User {
    pub fn find(uid: i32, conn: &mut PgConnection) -> QueryResult<Option<Self>> {
        users.find(uid).first(conn).optional()
    }

    pub fn role(&self) -> StoreResult<Role> {
        self.user_role.parse().map_err(StoreError::new)
    }

    /// A deactivated account keeps its row but carries `deleted_at`.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn principal(&self) -> StoreResult<Principal> {
        Ok(Principal::new(self.id, self.role()?))
    }

    /// `None` for a deactivated account.
    pub fn active_principal(&self) -> StoreResult<Option<Principal>> {
        if !self.is_active() {
            return Ok(None);
        }
        self.principal().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn user(role: &str, deleted: bool) -> User {
        let at = NaiveDate::from_ymd_opt(2025, 4, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        User {
            id: 7,
            username: "lehrer".into(),
            email: "lehrer@schule.at".into(),
            hash_pwd: String::new(),
            user_role: role.into(),
            created_at: at,
            updated_at: None,
            deleted_at: if deleted { Some(at) } else { None },
        }
    }

    #[test]
    fn stored_role_decides_the_principal() -> anyhow::Result<()> {
        let principal = user("EDITOR", false).active_principal()?;
        assert_eq!(principal, Some(Principal::new(7, Role::Editor)));
        Ok(())
    }

    #[test]
    fn deactivated_user_has_no_principal() -> anyhow::Result<()> {
        assert_eq!(user("SUPERUSER", true).active_principal()?, None);
        Ok(())
    }

    #[test]
    fn unknown_role_is_a_store_error() {
        assert!(user("RACE_CONTROL", false).principal().is_err());
    }
}
