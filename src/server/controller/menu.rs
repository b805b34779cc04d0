use actix_web::{web, Responder};
use crate::server::controller::error::CustomError;
use crate::server::model::dish::{CategoryView, GetMenuParams, GetMenuResponse};
use crate::server::state::AppState;
use crate::server::upstream::Backend;

/// GET /v1/menu?locale=
/// Always refetches, so back-office edits show up on the next navigation.
pub(crate) async fn get_menu<B: Backend + 'static>(
    params: web::Query<GetMenuParams>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let locale = params.locale.unwrap_or_default();
    let menu = data.refresh_menu().await?;
    Ok(web::Json(GetMenuResponse {
        locale,
        categories: menu.categories.iter().map(|c| CategoryView::localize(c, locale)).collect(),
    }))
}
