use actix_web::{post, web, Responder};
use log::error;
use crate::server::controller::error::CustomError;
use crate::server::domain::print_lines::PrintDocument;
use crate::server::domain::text_width::{capacity, clamp_by_visual_width, visual_width};
use crate::server::model::receipt::{MeasureRequest, MeasureResponse, PostEditRequest, PutReceiptRequest, ReceiptResponse};
use crate::server::state::AppState;
use crate::server::upstream::{Backend, UpstreamError};

fn receipt_response(document: PrintDocument) -> ReceiptResponse {
    ReceiptResponse {
        remaining: document.remaining_units(),
        lines: document.into_lines(),
    }
}

/// GET /v1/receipt
pub(crate) async fn get_receipt<B: Backend + 'static>(
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let content = data.backend().fetch_receipt_template().await?.unwrap_or_default();
    let document = PrintDocument::from_json(&content).map_err(UpstreamError::from)?;
    Ok(web::Json(receipt_response(document)))
}

/// PUT /v1/receipt
pub(crate) async fn put_receipt<B: Backend + 'static>(
    body: web::Json<PutReceiptRequest>,
    data: web::Data<AppState<B>>,
) -> Result<impl Responder, CustomError> {
    let document = PrintDocument::from_stored(body.into_inner().lines);
    let content = document.to_json().map_err(|e| {
        error!("failed to encode receipt lines, {}", e);
        CustomError::BadRequest
    })?;
    data.backend().save_receipt_template(content).await?;
    Ok(web::Json(receipt_response(document)))
}

#[post("/v1/receipt/edits")]
/// apply one editor action to the posted lines
pub(crate) async fn post_receipt_edits(body: web::Json<PostEditRequest>) -> Result<impl Responder, CustomError> {
    let PostEditRequest { lines, edit } = body.into_inner();
    let mut document = PrintDocument::from_stored(lines);
    document.apply(edit)?;
    Ok(web::Json(receipt_response(document)))
}

#[post("/v1/text/measure")]
/// measure and clamp text for one printer line
pub(crate) async fn post_text_measure(body: web::Json<MeasureRequest>) -> impl Responder {
    let capacity = capacity(body.font_size);
    let clamped = clamp_by_visual_width(&body.text, capacity);
    web::Json(MeasureResponse {
        width: visual_width(&body.text),
        capacity,
        truncated: clamped.len() < body.text.len(),
        clamped: clamped.to_string(),
    })
}
