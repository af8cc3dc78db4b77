use crate::domain::shopping_list::{CreateShoppingList, SetPurchased};
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn list_shopping_lists(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let lists = state.shopping_service.list_lists(&path).await?;
    Ok(HttpResponse::Ok().json(lists))
}

#[instrument(skip(state, req), fields(family_id = %*path))]
pub async fn create_shopping_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<CreateShoppingList>,
) -> Result<HttpResponse, ApiError> {
    let list = state
        .shopping_service
        .create_list(&path, req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(list))
}

#[instrument(skip(state), fields(family_id = %*path))]
pub async fn generate_auto_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let list = state.shopping_service.generate_auto_list(&path).await?;
    info!(list_id = %list.id, items = list.items.len(), "Auto list generated via API");
    Ok(HttpResponse::Created().json(list))
}

#[instrument(skip(state), fields(list_id = %*path))]
pub async fn get_shopping_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let list = state.shopping_service.get_list(&path).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[instrument(skip(state, req))]
pub async fn set_item_purchased(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    req: web::Json<SetPurchased>,
) -> Result<HttpResponse, ApiError> {
    let (list_id, item_id) = path.into_inner();
    let list = state
        .shopping_service
        .set_item_purchased(&list_id, &item_id, req.is_purchased)
        .await?;
    Ok(HttpResponse::Ok().json(list))
}
