use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::inference::InferenceError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No image uploaded")]
    NoImage,
    #[error("{0}")]
    Multipart(#[from] actix_multipart::MultipartError),
    #[error("{0}")]
    Upload(#[from] std::io::Error),
    #[error("{0}")]
    Inference(#[from] InferenceError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoImage => StatusCode::BAD_REQUEST,
            AppError::Multipart(_) | AppError::Upload(_) | AppError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
