use actix_web::{
    error::InternalError,
    http::{header, Method, StatusCode},
    middleware::DefaultHeaders,
    web, HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};
use utoipa::OpenApi;

pub mod vegetable;

#[derive(OpenApi)]
#[openapi(
    paths(
        vegetable::get_vegetables,
        vegetable::predict_price,
        vegetable::get_historical_data
    ),
    components(schemas(
        vegetable::VegetableQuery,
        vegetable::Prediction,
        vegetable::HistoricalPrice,
        ErrorBody
    ))
)]
pub struct ApiDoc;

/// Register the API endpoints, their CORS preflight & the JSON body error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(vegetable::get_vegetables)
        .service(vegetable::predict_price)
        .service(vegetable::get_historical_data)
        .service(
            web::resource(vec![
                "/get_vegetables",
                "/predict_price",
                "/get_historical_data",
            ])
            .route(web::method(Method::OPTIONS).to(preflight)),
        );
}

/// Any origin may call the API; the landing page is often hosted elsewhere.
pub fn cors() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {err}");
        let body = ErrorBody {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Error payload
///
/// ```json
/// { "error": "no price data found for `Pumpkin`" }
/// ```
#[derive(Deserialize, Serialize, Debug, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps price-store errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(vprice::Error);

impl From<vprice::Error> for ApiError {
    fn from(e: vprice::Error) -> Self {
        ApiError(e)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            vprice::Error::CommodityNotFound(_) => StatusCode::NOT_FOUND,
            vprice::Error::Degenerate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::warn!("{}", self.0);
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.0.to_string(),
        })
    }
}
