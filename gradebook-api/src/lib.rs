use actix_web::web;
use async_graphql::{Context, EmptySubscription, Result, Schema};
use gradebook_core::Principal;
use gradebook_db::connection::PgPool;
use gradebook_db::PgStore;
use log::error;
use models::{AppSchema, Mutation, Query};

pub use config::Config;

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::index)
        .service(handlers::index_playground);
}

pub fn create_schema_with_context(pool: PgPool) -> AppSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(pool)
        .finish()
}

pub(crate) fn store_from_ctx(ctx: &Context<'_>) -> Result<PgStore> {
    let pool = ctx.data::<PgPool>()?;
    PgStore::from_pool(pool).map_err(|e| {
        error!("cannot get DB connection: {}", e);
        errors::into_graphql_error(e.into())
    })
}

pub(crate) fn principal_from_ctx(ctx: &Context<'_>) -> Result<Principal> {
    ctx.data_opt::<Principal>()
        .copied()
        .ok_or_else(errors::unauthenticated)
}

/// Runs one core operation for the requesting principal on a fresh store.
pub(crate) fn run<T, F>(ctx: &Context<'_>, op: F) -> Result<T>
where
    F: FnOnce(&mut PgStore, &Principal) -> gradebook_core::Result<T>,
{
    let principal = principal_from_ctx(ctx)?;
    let mut store = store_from_ctx(ctx)?;
    op(&mut store, &principal).map_err(errors::into_graphql_error)
}

pub mod auth;
mod config;
pub mod errors;
mod handlers;
pub mod models;
