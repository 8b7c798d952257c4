//! Bearer token handling. The token only names the user; the role always
//! comes from the stored user row.

use actix_web::http::header;
use actix_web::HttpRequest;
use gradebook_core::{Principal, StoreResult};
use gradebook_db::connection::PgPool;
use gradebook_db::PgStore;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn decode_token(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Reads the claims of a valid `Authorization: Bearer` header, if any.
pub fn get_claims(http_req: &HttpRequest, secret: &str) -> Option<Claims> {
    let value = http_req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    match decode_token(token.trim(), secret) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!("rejected bearer token: {}", e);
            None
        }
    }
}

/// Loads the principal named by `claims.sub`. Unknown and deactivated users
/// resolve to `None`.
pub fn resolve_principal(pool: &PgPool, claims: &Claims) -> StoreResult<Option<Principal>> {
    let uid: i32 = match claims.sub.parse() {
        Ok(uid) => uid,
        Err(_) => return Ok(None),
    };
    let mut store = PgStore::from_pool(pool)?;
    match store.find_user(uid)? {
        Some(user) if !user.is_active() => {
            warn!("deactivated user {} presented a token", user.id);
            Ok(None)
        }
        Some(user) => user.active_principal(),
        None => Ok(None),
    }
}
