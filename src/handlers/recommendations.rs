use crate::{
    error::ApiError,
    services::{CatalogClient, RecommendationService},
};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub user_id: Option<String>,
}

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommend").route(web::get().to(get_recommendations)));
}

/// Get song recommendations for a user.
pub async fn get_recommendations(
    query: web::Query<RecommendQuery>,
    catalog_client: web::Data<CatalogClient>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    // Validate the id before touching the upstream API.
    let raw_id = query
        .user_id
        .as_deref()
        .ok_or_else(|| ApiError::InvalidInput("User ID is required".to_string()))?;
    let user_id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidInput("User ID must be an integer".to_string()))?;

    let users = catalog_client.fetch_users().await?;
    if users.is_empty() {
        return Err(ApiError::EmptyCatalog(
            "Upstream returned no usable users".to_string(),
        ));
    }
    let catalog = catalog_client.fetch_songs().await?;
    if catalog.is_empty() {
        return Err(ApiError::EmptyCatalog(
            "Upstream returned no usable songs".to_string(),
        ));
    }

    let user = users
        .into_iter()
        .find(|u| u.id == Some(user_id))
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))?;

    info!(
        "Generating recommendations for user {} over {} songs",
        user_id,
        catalog.len()
    );
    let response = recommendation_service.recommend(&user, &catalog)?;
    Ok(HttpResponse::Ok().json(response))
}
