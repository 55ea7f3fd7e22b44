use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query},
    response::Json,
    Extension,
};
use tracing::info;

use crate::api::rest::dto::{
    CreatePageReq, DeletedDto, ListPagesQuery, LoginForm, PageDto, RegisterReq, StatusDto,
    TokenDto, UpdatePageReq, UserDto,
};
use crate::api::rest::error::ApiError;
use crate::api::rest::extract::CurrentUser;
use crate::domain::service::Service;

/// Liveness check
pub async fn status() -> Json<StatusDto> {
    Json(StatusDto {
        status: "ok".to_string(),
        msg: "Pagestack API running".to_string(),
    })
}

/// Register a new user
pub async fn register(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<Json<UserDto>, ApiError> {
    info!("Registering user: {}", req.email);

    let user = svc.register(req.into()).await?;
    Ok(Json(UserDto::from(user)))
}

/// Exchange credentials for a bearer token
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenDto>, ApiError> {
    info!("Login attempt: {}", form.username);

    let token = svc.login(&form.username, &form.password).await?;
    Ok(Json(TokenDto::bearer(token)))
}

/// Create a page owned by the caller (unless the payload overrides the owner)
pub async fn create_page(
    Extension(svc): Extension<Arc<Service>>,
    current_user: CurrentUser,
    Json(req): Json<CreatePageReq>,
) -> Result<Json<PageDto>, ApiError> {
    let page = svc.create_page(&current_user.0, req.into()).await?;
    Ok(Json(PageDto::from(page)))
}

/// Fetch a single page by its public identifier
pub async fn get_page(
    Extension(svc): Extension<Arc<Service>>,
    current_user: CurrentUser,
    Path(uid): Path<String>,
) -> Result<Json<PageDto>, ApiError> {
    let page = svc.get_page(&current_user.0, &uid).await?;
    Ok(Json(PageDto::from(page)))
}

/// List pages, defaulting to the caller's own
pub async fn list_pages(
    Extension(svc): Extension<Arc<Service>>,
    current_user: CurrentUser,
    Query(query): Query<ListPagesQuery>,
) -> Result<Json<Vec<PageDto>>, ApiError> {
    let pages = svc.list_pages(&current_user.0, query.owner_id).await?;
    Ok(Json(pages.into_iter().map(PageDto::from).collect()))
}

/// Partially update a page's title/content
pub async fn update_page(
    Extension(svc): Extension<Arc<Service>>,
    current_user: CurrentUser,
    Path(uid): Path<String>,
    Json(req): Json<UpdatePageReq>,
) -> Result<Json<PageDto>, ApiError> {
    let page = svc.update_page(&current_user.0, &uid, req.into()).await?;
    Ok(Json(PageDto::from(page)))
}

/// Delete a page
pub async fn delete_page(
    Extension(svc): Extension<Arc<Service>>,
    current_user: CurrentUser,
    Path(uid): Path<String>,
) -> Result<Json<DeletedDto>, ApiError> {
    svc.delete_page(&current_user.0, &uid).await?;
    Ok(Json(DeletedDto {
        ok: true,
        message: "Page deleted".to_string(),
    }))
}
