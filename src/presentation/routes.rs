use crate::presentation::handlers::{health_check, json_error_handler, not_found};
use crate::presentation::{auth, catalog, families, shopping};
use actix_web::web;

/// Mounts the whole `/api` surface plus the JSON error handler and the
/// 404 fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .route("/auth/register", web::post().to(auth::register))
                .route("/auth/login", web::post().to(auth::login))
                .route("/auth/me", web::get().to(auth::me))
                .route("/families", web::get().to(families::list_my_families))
                .route("/families", web::post().to(families::create_family))
                .route("/families/{family_id}", web::get().to(families::get_family))
                .route("/families/{family_id}/join", web::post().to(families::join_family))
                .route("/families/{family_id}/members", web::get().to(families::list_members))
                .route("/families/{family_id}/categories", web::get().to(catalog::list_categories))
                .route("/families/{family_id}/categories", web::post().to(catalog::create_category))
                .route("/families/{family_id}/products", web::get().to(catalog::list_products))
                .route("/families/{family_id}/products", web::post().to(catalog::create_product))
                .route(
                    "/families/{family_id}/products/low-stock",
                    web::get().to(catalog::list_low_stock),
                )
                .route("/products/{product_id}", web::get().to(catalog::get_product))
                .route("/products/{product_id}", web::put().to(catalog::update_product))
                .route("/products/{product_id}", web::delete().to(catalog::delete_product))
                .route(
                    "/families/{family_id}/shopping-lists",
                    web::get().to(shopping::list_shopping_lists),
                )
                .route(
                    "/families/{family_id}/shopping-lists",
                    web::post().to(shopping::create_shopping_list),
                )
                .route(
                    "/families/{family_id}/shopping-lists/auto",
                    web::post().to(shopping::generate_auto_list),
                )
                .route("/shopping-lists/{list_id}", web::get().to(shopping::get_shopping_list))
                .route(
                    "/shopping-lists/{list_id}/items/{item_id}",
                    web::patch().to(shopping::set_item_purchased),
                ),
        )
        .default_service(web::to(not_found));
}
