use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use medica_client::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Redirecting to {0}")]
    Redirect(&'static str),

    #[error(transparent)]
    Backend(#[from] Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Redirect(path) => {
                return (StatusCode::SEE_OTHER, [(LOCATION, *path)]).into_response();
            }
            AppError::Backend(Error::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Backend(Error::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
