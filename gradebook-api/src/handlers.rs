use actix_web::{get, post, web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use gradebook_db::connection::PgPool;
use log::{debug, error};

use crate::auth::{get_claims, resolve_principal};
use crate::models::AppSchema;
use crate::Config;

#[post("/")]
pub(crate) async fn index(
    schema: web::Data<AppSchema>,
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut query = req.into_inner();

    if let Some(claims) = get_claims(&http_req, &config.jwt_secret) {
        match resolve_principal(pool.get_ref(), &claims) {
            Ok(Some(principal)) => query = query.data(principal),
            Ok(None) => debug!("token names unknown user {}", claims.sub),
            Err(e) => error!("cannot resolve principal: {}", e),
        }
    }

    schema.execute(query).await.into()
}

#[get("/")]
pub(crate) async fn index_playground(config: web::Data<Config>) -> HttpResponse {
    let endpoint = format!("{}/", config.api_prefix.trim_end_matches('/'));
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(&endpoint).finish())
}
