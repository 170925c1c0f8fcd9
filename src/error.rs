use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failure taxonomy for the scraping endpoints.
///
/// Field-level extraction failures never appear here: a selector that does not
/// match degrades the field to `null` at the point of use. Only input
/// validation, city/destination resolution and browser/upstream failures reach
/// the HTTP layer.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    Validation(String),

    #[error("could not determine a destination city from address '{address}'")]
    CityResolution { address: String },

    #[error("no shipping destination found for city '{city}'")]
    DestinationResolution { city: String },

    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl ResponseError for ScrapeError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScrapeError::Validation(_) | ScrapeError::CityResolution { .. } => {
                StatusCode::BAD_REQUEST
            }
            ScrapeError::DestinationResolution { .. } => StatusCode::NOT_FOUND,
            ScrapeError::Render(_) | ScrapeError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
