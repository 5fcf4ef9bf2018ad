//! OpenAPI document exposed by Swagger UI in debug builds.

use utoipa::OpenApi;

/// Aggregate OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::inbound::http::users::CreateUserRequest,
        crate::inbound::http::users::UpdateUserRequest,
        crate::inbound::http::users::CreatedResponse,
        crate::inbound::http::users::MessageResponse,
        crate::inbound::http::users::UserResponse,
        crate::inbound::http::users::UsersResponse,
        crate::inbound::http::schemas::ErrorSchema,
    )),
    tags(
        (name = "users", description = "User CRUD operations"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
