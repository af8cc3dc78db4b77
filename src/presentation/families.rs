use crate::domain::family::CreateFamily;
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

#[instrument(skip(state, user, req), fields(user_id = %user.user_id))]
pub async fn create_family(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateFamily>,
) -> Result<HttpResponse, ApiError> {
    let family = state
        .family_service
        .create_family(req.into_inner(), &user.user_id)
        .await?;
    info!(family_id = %family.id, "Family created via API");
    Ok(HttpResponse::Created().json(family))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn list_my_families(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let families = state
        .family_service
        .list_families_for_user(&user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(families))
}

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn get_family(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let family = state.family_service.get_family(&path).await?;
    Ok(HttpResponse::Ok().json(family))
}

#[instrument(skip(state, user), fields(family_id = %*path, user_id = %user.user_id))]
pub async fn join_family(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let outcome = state
        .family_service
        .join_family(&path, &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn list_members(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let members = state.family_service.list_members(&path).await?;
    Ok(HttpResponse::Ok().json(members))
}
