//! User handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::domain::{User, UserPayload};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users ordered by name", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Get user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<User>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created; the Location header holds the new resource URI", body = User),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Created<User>> {
    let user = state.user_service.create_user(payload).await?;

    Ok(Created {
        location: format!("api/users/{}", user.id),
        body: user,
    })
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    request_body = UserPayload,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "User not found")
    )
)]
// TODO: decide whether updates should run the same field validation as
// create; today an empty name or bogus email is stored verbatim.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> AppResult<NoContent> {
    // The body is parsed but, unlike create, not field-validated.
    let Json(payload) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    state.user_service.update_user(id, payload).await?;
    Ok(NoContent)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}
