//! User registry handlers.
//!
//! ```text
//! POST /register-user
//! GET /users
//! GET /users/{userID}
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::registry::User;
use crate::domain::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterUserResponse {
    #[schema(example = "Successfully registered: Ada Kidd")]
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

/// Register a shopper.
#[utoipa::path(
    post,
    path = "/register-user",
    request_body(content = User, description = "User registration"),
    responses(
        (status = 200, description = "User registered", body = RegisterUserResponse),
        (status = 600, description = "Validation failure", body = ErrorBody),
        (status = 950, description = "Undefined field", body = ErrorBody),
        (status = 500, description = "Duplicate or storage failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/register-user")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<RegisterUserResponse>> {
    let user = state.registry.register_user(&payload).await?;
    Ok(web::Json(RegisterUserResponse {
        message: format!("Successfully registered: {}", user.full_name()),
        user,
    }))
}

/// List registered users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = UserListResponse),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListResponse>> {
    let users = state.registry_query.list_users().await?;
    Ok(web::Json(UserListResponse { users }))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{userID}",
    params(("userID" = String, Path, description = "Ten-character user id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorBody),
        (status = 600, description = "Invalid user id", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    user_id: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.registry_query.find_user(&user_id).await?;
    Ok(web::Json(UserResponse { user }))
}
