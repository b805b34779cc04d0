use actix_web::{web, Responder};
use log::info;
use crate::server::controller::error::CustomError;
use crate::server::model::dish::DishId;
use crate::server::model::order::{
    CheckoutResponse, GetCartResponse, GetOrdersResponse, PatchCartItemRequest, PostCartItemRequest, TableId,
};
use crate::server::session::OrderingSession;
use crate::server::state::AppState;
use crate::server::upstream::Backend;

fn cart_response(session: &OrderingSession) -> GetCartResponse {
    GetCartResponse {
        table_id: session.table_id(),
        lines: session.cart().lines().to_vec(),
        total: session.cart().total(),
        count: session.cart().count(),
    }
}

/// GET /v1/table/{id}/cart
pub(crate) async fn get_cart<B: Backend + 'static>(
    id: web::Path<TableId>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let session = data.session(id.into_inner()).await?;
    let session = session.lock().await;
    Ok(web::Json(cart_response(&session)))
}

/// POST /v1/table/{id}/cart/items
pub(crate) async fn post_cart_item<B: Backend + 'static>(
    id: web::Path<TableId>,
    body: web::Json<PostCartItemRequest>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let PostCartItemRequest { dish_id, quantity } = body.into_inner();
    let Some(dish) = data.find_dish(dish_id).await? else {
        return Err(CustomError::ResourceNotFound);
    };
    let session = data.session(id.into_inner()).await?;
    let mut session = session.lock().await;
    session.add_dish(data.backend(), dish, quantity).await?;
    Ok(web::Json(cart_response(&session)))
}

/// PATCH /v1/table/{id}/cart/items/{dish_id}
pub(crate) async fn patch_cart_item<B: Backend + 'static>(
    path: web::Path<(TableId, DishId)>,
    body: web::Json<PatchCartItemRequest>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let (table_id, dish_id) = path.into_inner();
    let session = data.session(table_id).await?;
    let mut session = session.lock().await;
    if !session.cart().contains(dish_id) {
        return Err(CustomError::ResourceNotFound);
    }
    session.set_quantity(dish_id, body.quantity);
    Ok(web::Json(cart_response(&session)))
}

/// POST /v1/table/{id}/checkout
pub(crate) async fn post_checkout<B: Backend + 'static>(
    id: web::Path<TableId>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let session = data.session(id.into_inner()).await?;
    let mut session = session.lock().await;
    let order = session.checkout(data.backend()).await?;
    if order.is_none() {
        info!("checkout on empty cart for table={}", session.table_id());
    }
    Ok(web::Json(CheckoutResponse { order }))
}

/// GET /v1/table/{id}/orders
pub(crate) async fn get_orders<B: Backend + 'static>(
    id: web::Path<TableId>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let session = data.session(id.into_inner()).await?;
    let session = session.lock().await;
    Ok(web::Json(GetOrdersResponse {
        table_id: session.table_id(),
        orders: session.history().to_vec(),
    }))
}
