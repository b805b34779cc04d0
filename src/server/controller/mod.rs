pub(crate) mod cart;
pub(crate) mod error;
pub(crate) mod menu;
pub(crate) mod receipt;

use actix_web::web;
use crate::server::upstream::Backend;

/// Register every route against a backend implementation.
pub(crate) fn configure<B: Backend + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/menu", web::get().to(menu::get_menu::<B>))
        .route("/v1/table/{id}/cart", web::get().to(cart::get_cart::<B>))
        .route("/v1/table/{id}/cart/items", web::post().to(cart::post_cart_item::<B>))
        .route("/v1/table/{id}/cart/items/{dish_id}", web::patch().to(cart::patch_cart_item::<B>))
        .route("/v1/table/{id}/checkout", web::post().to(cart::post_checkout::<B>))
        .route("/v1/table/{id}/orders", web::get().to(cart::get_orders::<B>))
        .route("/v1/receipt", web::get().to(receipt::get_receipt::<B>))
        .route("/v1/receipt", web::put().to(receipt::put_receipt::<B>))
        .service(receipt::post_receipt_edits)
        .service(receipt::post_text_measure);
}
