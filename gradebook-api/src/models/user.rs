use async_graphql::*;
use gradebook_core::Principal;

/// The authenticated caller.
#[derive(SimpleObject)]
pub(crate) struct User {
    id: i32,
    role: String,
    superuser: bool,
}

impl From<Principal> for User {
    fn from(principal: Principal) -> Self {
        User {
            id: principal.id,
            role: principal.role.to_string(),
            superuser: principal.is_superuser(),
        }
    }
}
