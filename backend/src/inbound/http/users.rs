//! Users API handlers.
//!
//! ```text
//! POST   /users              {"name":"Alex","email":"a@x.com","age":30}
//! GET    /get_users
//! PUT    /update_user/{id}   any subset of {name, email, age}
//! DELETE /delete_user/{id}
//! ```
//!
//! Each handler is stateless: it parses the request, validates it, issues
//! one repository operation, and maps the outcome onto the wire contract.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::UserRepositoryError;
use crate::domain::{
    EmailAddress, Error, NewUser, User, UserId, UserName, UserPatch, UserValidationError,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_field, missing_field, validation_error, FieldError};
use crate::inbound::http::ApiResult;

/// Request body for `POST /users`.
///
/// `name` and `email` are optional at the serde level so that missing
/// fields join the per-field validation list instead of failing
/// deserialisation wholesale; `age` is taken as a raw JSON value for the
/// same reason, so a wrong-typed value joins the list too.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub age: Option<Value>,
}

/// Request body for `PUT /update_user/{id}`; every field optional.
///
/// Absent and explicitly-null fields are both excluded from the update
/// set, so a field can never be nulled out through this endpoint.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub age: Option<Value>,
}

/// Response body for a successful create.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    /// Store-assigned identifier for the new user.
    pub id: String,
}

/// Response body for successful update and delete operations.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// One user record as returned by the list endpoint.
///
/// `age` is serialised as `null` when unset, matching stored records that
/// never carried the field.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            email: value.email().to_string(),
            age: value.age(),
        }
    }
}

/// Response body for `GET /get_users`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UsersResponse {
    pub data: Vec<UserResponse>,
}

fn parse_name(raw: Option<String>, errors: &mut Vec<FieldError>) -> Option<UserName> {
    match raw {
        Some(value) => match UserName::new(value) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.push(invalid_field("name", &err));
                None
            }
        },
        None => None,
    }
}

fn parse_email(raw: Option<String>, errors: &mut Vec<FieldError>) -> Option<EmailAddress> {
    match raw {
        Some(value) => match EmailAddress::new(value) {
            Ok(email) => Some(email),
            Err(err) => {
                errors.push(invalid_field("email", &err));
                None
            }
        },
        None => None,
    }
}

/// Extract an integral `age`, treating an explicit null like an absent
/// field. Any other non-integer value joins the error list.
fn parse_age(raw: Option<Value>, errors: &mut Vec<FieldError>) -> Option<i64> {
    match raw {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_i64() {
            Some(age) => Some(age),
            None => {
                errors.push(invalid_field("age", &UserValidationError::InvalidAge));
                None
            }
        },
    }
}

/// Validate the create shape, collecting every field failure.
fn parse_create_request(payload: CreateUserRequest) -> Result<NewUser, Error> {
    let mut errors = Vec::new();

    if payload.name.is_none() {
        errors.push(missing_field("name"));
    }
    if payload.email.is_none() {
        errors.push(missing_field("email"));
    }
    let name = parse_name(payload.name, &mut errors);
    let email = parse_email(payload.email, &mut errors);
    let age = parse_age(payload.age, &mut errors);

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(NewUser::new(name, email, age)),
        _ => Err(validation_error(errors)),
    }
}

/// Validate the update shape; present fields follow the create constraints.
fn parse_update_request(payload: UpdateUserRequest) -> Result<UserPatch, Error> {
    let mut errors = Vec::new();
    let name = parse_name(payload.name, &mut errors);
    let email = parse_email(payload.email, &mut errors);
    let age = parse_age(payload.age, &mut errors);
    if !errors.is_empty() {
        return Err(validation_error(errors));
    }

    let patch = UserPatch { name, email, age };
    if patch.is_empty() {
        return Err(Error::invalid_request(
            "update payload must contain at least one field",
        ));
    }
    Ok(patch)
}

/// Parse the path segment into a domain id.
fn parse_path_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Map repository failures onto the closed domain error set.
fn map_repository_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::MalformedId { value } => {
            Error::invalid_request(format!("user id `{value}` is not a valid identifier"))
        }
        UserRepositoryError::NotFound { .. } => Error::not_found("user not found"),
        UserRepositoryError::Unavailable { message } => Error::store_unavailable(message),
        UserRepositoryError::Query { message } => Error::internal(message),
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreatedResponse),
        (status = 400, description = "Validation failure", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = parse_create_request(payload.into_inner())?;
    let id = state
        .users
        .insert(&new_user)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Created().json(CreatedResponse { id: id.to_string() }))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/get_users",
    responses(
        (status = 200, description = "All users", body = UsersResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/get_users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.users.list().await.map_err(map_repository_error)?;
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(web::Json(UsersResponse { data }))
}

/// Apply a partial update to one user.
#[utoipa::path(
    put,
    path = "/update_user/{id}",
    request_body = UpdateUserRequest,
    params(("id" = String, Path, description = "Store-assigned user identifier")),
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Validation failure or malformed id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/update_user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_path_id(path.into_inner())?;
    let patch = parse_update_request(payload.into_inner())?;
    state
        .users
        .update(&id, &patch)
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(MessageResponse {
        message: "user updated successfully".to_owned(),
    }))
}

/// Delete one user.
#[utoipa::path(
    delete,
    path = "/delete_user/{id}",
    params(("id" = String, Path, description = "Store-assigned user identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/delete_user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_path_id(path.into_inner())?;
    state
        .users
        .delete(&id)
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(MessageResponse {
        message: "user deleted successfully".to_owned(),
    }))
}
