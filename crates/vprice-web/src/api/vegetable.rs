use super::{ApiError, ErrorBody};
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vprice::{Dataset, MonthlyAverage};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// List of all vegetables
///
/// ```json
/// ["Tomato Big(Nepali)", "Potato Red", ...]
/// ```
#[utoipa::path(
    get,
    path = "/get_vegetables",
    responses(
        (
            status = 200, description = "Every vegetable in the price file, in the order first seen",
            body = [String], content_type = "application/json",
            example = json!(["Tomato Big(Nepali)", "Potato Red"])
        )
    )
)]
#[get("/get_vegetables")]
pub async fn get_vegetables(dataset: web::Data<Dataset>) -> impl Responder {
    HttpResponse::Ok().json(dataset.commodities())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Request body naming one vegetable
#[derive(Deserialize, Serialize, Debug, utoipa::ToSchema)]
pub struct VegetableQuery {
    #[schema(example = "Potato Red")]
    pub vegetable: String,
}

/// Predicted price for the next day
///
/// ```json
/// { "predicted_price": 28.0 }
/// ```
#[derive(Deserialize, Serialize, Debug, utoipa::ToSchema)]
pub struct Prediction {
    pub predicted_price: f64,
}

#[utoipa::path(
    post,
    path = "/predict_price",
    request_body = VegetableQuery,
    responses(
        (
            status = 200, description = "Linear trend of the daily average price, extrapolated one day past the last record",
            body = Prediction, content_type = "application/json",
            example = json!({ "predicted_price": 28.0 })
        ),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 404, description = "No price data for the vegetable", body = ErrorBody),
    )
)]
#[post("/predict_price")]
pub async fn predict_price(
    dataset: web::Data<Dataset>,
    query: web::Json<VegetableQuery>,
) -> Result<HttpResponse, ApiError> {
    let predicted_price = vprice::predict_next_day(dataset.get_ref(), &query.vegetable)?;
    Ok(HttpResponse::Ok().json(Prediction { predicted_price }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Monthly average price
///
/// ```json
/// [
///     { "Date": "2024-01-01", "Average": 15.0 },
///     { "Date": "2024-02-01", "Average": 30.0 }
/// ]
/// ```
#[derive(Deserialize, Serialize, Debug, PartialEq, utoipa::ToSchema)]
pub struct HistoricalPrice {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Average")]
    pub average: f64,
}

impl From<MonthlyAverage> for HistoricalPrice {
    fn from(month: MonthlyAverage) -> Self {
        HistoricalPrice {
            date: month.date,
            average: month.average,
        }
    }
}

#[utoipa::path(
    post,
    path = "/get_historical_data",
    request_body = VegetableQuery,
    responses(
        (
            status = 200, description = "Mean price per calendar month, oldest first; empty for an unknown vegetable",
            body = [HistoricalPrice], content_type = "application/json",
            example = json!([
                { "Date": "2024-01-01", "Average": 15.0 },
                { "Date": "2024-02-01", "Average": 30.0 }
            ])
        ),
        (status = 400, description = "Malformed request body", body = ErrorBody),
    )
)]
#[post("/get_historical_data")]
pub async fn get_historical_data(
    dataset: web::Data<Dataset>,
    query: web::Json<VegetableQuery>,
) -> impl Responder {
    let data: Vec<HistoricalPrice> = vprice::monthly_history(dataset.get_ref(), &query.vegetable)
        .into_iter()
        .map(HistoricalPrice::from)
        .collect();

    HttpResponse::Ok().json(data)
}
