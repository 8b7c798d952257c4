use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::anyhow;
use dotenv::dotenv;
use gradebook_api::{configure_service, create_schema_with_context, Config};
use gradebook_db::connection::create_connection_pool;
use gradebook_db::run_migrations;
use log::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let pool = create_connection_pool(&config.database_url)?;
    run_migrations(&pool).map_err(|e| anyhow!("cannot run migrations: {}", e))?;

    let schema = create_schema_with_context(pool.clone());
    let bind_address = config.bind_address.clone();
    let config = web::Data::new(config);

    info!("serving {} on {}", config.api_prefix, bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .service(web::scope(&config.api_prefix).configure(configure_service))
    })
    .bind(bind_address)?
    .run()
    .await?;
    Ok(())
}
