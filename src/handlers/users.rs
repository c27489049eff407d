// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::RequireGerente,
    models::user::{CreateUserPayload, UpdateRolePayload, User},
};

// POST /api/admin/users — cadastro de operador (gerência)
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Usuários",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 409, description = "Username ou e-mail já em uso"),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.user_service.create_user(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/admin/users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Usuários",
    responses((status = 200, description = "Usuários cadastrados", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_users().await?;
    Ok((StatusCode::OK, Json(users)))
}

// PUT /api/admin/users/{id}/role — o último gerente não pode ser rebaixado
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Papel atualizado", body = User),
        (status = 409, description = "Seria o último gerente"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.update_role(id, payload.role).await?;
    Ok((StatusCode::OK, Json(user)))
}

// DELETE /api/admin/users/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário excluído"),
        (status = 409, description = "Último gerente ou usuário com vendas"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
