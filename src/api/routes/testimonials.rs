use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Testimonial;
use crate::store::NewTestimonial;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialRequest {
    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,
    pub review_title: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<u8>,
    pub genuine_opinion: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub message: String,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::BadRequest(format!(
            "missing required field: {}",
            name
        ))),
    }
}

impl TestimonialRequest {
    fn validate(self) -> Result<NewTestimonial, ApiError> {
        Ok(NewTestimonial {
            reviewer_name: required(self.reviewer_name, "reviewerName")?,
            reviewer_email: required(self.reviewer_email, "reviewerEmail")?,
            review_title: self.review_title,
            review_text: required(self.review_text, "reviewText")?,
            rating: self
                .rating
                .ok_or_else(|| ApiError::BadRequest("missing required field: rating".into()))?,
            genuine_opinion: self.genuine_opinion.ok_or_else(|| {
                ApiError::BadRequest("missing required field: genuineOpinion".into())
            })?,
        })
    }
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    Json(request): Json<TestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    let new = request.validate()?;
    let mut store = state.testimonials.write().await;
    let testimonial = store.add(new)?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

pub async fn list_testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    let store = state.testimonials.read().await;
    Json(store.list())
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    let mut store = state.testimonials.write().await;
    store.remove(id)?;
    Ok(Json(ConfirmationResponse {
        message: format!("Testimonial {} removed", id),
    }))
}
