//! Server construction and wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::users::{create_user, delete_user, list_users, update_user};
use crate::inbound::http::{json_error_handler, state::HttpState};
use crate::middleware::trace::Trace;
use crate::outbound::persistence::{connect, MongoUserRepository};

/// Compose the application: routes, state, and middleware.
///
/// Shared with the integration tests so they exercise the same app the
/// binary serves.
pub fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(health_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(create_user)
        .service(list_users)
        .service(update_user)
        .service(delete_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Connect to the document store and serve until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let database = connect(&config.mongodb_uri, &config.mongodb_database)
        .await
        .map_err(|err| {
            std::io::Error::other(format!("failed to initialise document store client: {err}"))
        })?;
    let state = web::Data::new(HttpState::new(Arc::new(MongoUserRepository::new(&database))));
    let health_state = web::Data::new(HealthState::new());

    let server_state = state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, database = %config.mongodb_database, "listening");
    server.run().await
}
