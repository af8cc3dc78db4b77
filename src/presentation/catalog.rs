use crate::domain::catalog::{CreateCategory, CreateProduct, UpdateProduct};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn list_categories(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let categories = state.catalog_service.list_categories(&path).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(state, req), fields(family_id = %*path))]
pub async fn create_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<CreateCategory>,
) -> Result<HttpResponse, ApiError> {
    let category = state
        .catalog_service
        .add_category(&path, req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn list_products(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let products = state.catalog_service.list_products(&path).await?;
    info!(count = products.len(), "Products listed");
    Ok(HttpResponse::Ok().json(products))
}

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn list_low_stock(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let products = state.catalog_service.list_low_stock(&path).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[instrument(skip(state, user, req), fields(family_id = %*path, user_id = %user.user_id))]
pub async fn create_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CreateProduct>,
) -> Result<HttpResponse, ApiError> {
    let family_id = path.into_inner();
    let product = state
        .catalog_service
        .add_product(&family_id, &user.user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(family_id = %family_id, error = %e, "Failed to create product");
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Created().json(product))
}

#[instrument(skip(state), fields(product_id = %*path))]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let product = state.catalog_service.get_product(&path).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[instrument(skip(state, req), fields(product_id = %*path))]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateProduct>,
) -> Result<HttpResponse, ApiError> {
    let product = state
        .catalog_service
        .update_product(&path, req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[instrument(skip(state), fields(product_id = %*path))]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.catalog_service.delete_product(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}
