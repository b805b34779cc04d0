use actix_web::{error, HttpResponse};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use derive_more::{Display, Error};
use log::warn;
use crate::server::domain::print_lines::EditError;
use crate::server::upstream::UpstreamError;

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub(crate) enum CustomError {
    #[display("invalid request")]
    BadRequest,
    #[display("resource not found")]
    ResourceNotFound,
    #[display("something went wrong, please try again")]
    UpstreamFailed,
    #[display("timeout occurred")]
    Timeout,
}

impl error::ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::BadRequest => StatusCode::BAD_REQUEST,
            CustomError::ResourceNotFound => StatusCode::NOT_FOUND,
            CustomError::UpstreamFailed => StatusCode::BAD_GATEWAY,
            CustomError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}

impl From<UpstreamError> for CustomError {
    fn from(e: UpstreamError) -> Self {
        warn!("upstream call failed, {}", e);
        match e {
            UpstreamError::Timeout => CustomError::Timeout,
            UpstreamError::Status { status: 404 } => CustomError::ResourceNotFound,
            UpstreamError::Transport { .. } | UpstreamError::Status { .. } | UpstreamError::Decode { .. } => {
                CustomError::UpstreamFailed
            }
        }
    }
}

impl From<EditError> for CustomError {
    fn from(e: EditError) -> Self {
        warn!("rejected receipt edit, {}", e);
        CustomError::BadRequest
    }
}
