//! FAQ endpoint handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    into_new_faqs, ApiError, CreateFaqRequest, DeleteFaqResponse, FaqDetailResponse,
    FaqListResponse, Json, LangQuery, SearchQuery, UpdateFaqRequest, WarmCacheResponse,
};
use crate::domain::faq::{FaqId, FaqView};

/// Routes under `/faqs`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/faqs", get(list_faqs).post(create_faq))
        .route("/faqs/search", get(search_faqs))
        .route("/faqs/bulk_create", post(bulk_create_faqs))
        .route("/faqs/warm_cache", post(warm_cache))
        .route(
            "/faqs/{id}",
            get(get_faq).put(update_faq).delete(delete_faq),
        )
        .route("/faqs/{id}/deactivate", post(deactivate_faq))
}

/// GET /faqs?lang=<code>
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<FaqListResponse>, ApiError> {
    debug!(lang = %query.lang(), "Listing FAQs");

    let read = state.faqs.list(query.lang()).await.map_err(ApiError::from)?;

    Ok(Json(FaqListResponse {
        data: read.data,
        cache_hit: read.cache_hit,
    }))
}

/// GET /faqs/search?q=<text>&lang=<code>
pub async fn search_faqs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<FaqListResponse>, ApiError> {
    debug!(query = %query.query(), lang = %query.lang(), "Searching FAQs");

    let read = state
        .faqs
        .search(query.query(), query.lang())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(FaqListResponse {
        data: read.data,
        cache_hit: read.cache_hit,
    }))
}

/// POST /faqs/bulk_create
pub async fn bulk_create_faqs(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Json(requests): Json<Vec<CreateFaqRequest>>,
) -> Result<(StatusCode, Json<Vec<FaqView>>), ApiError> {
    debug!(count = requests.len(), "Bulk creating FAQs");

    let entries = into_new_faqs(requests).map_err(ApiError::from)?;
    let created = state
        .faqs
        .bulk_create(entries)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(FaqView::render_all(&created, query.lang())),
    ))
}

/// POST /faqs/warm_cache
pub async fn warm_cache(
    State(state): State<AppState>,
) -> Result<Json<WarmCacheResponse>, ApiError> {
    debug!("Warming FAQ cache");

    let languages = state.faqs.warm_cache().await.map_err(ApiError::from)?;

    Ok(Json(WarmCacheResponse {
        status: "Cache warmed successfully".to_string(),
        languages,
    }))
}

/// POST /faqs
pub async fn create_faq(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Json(request): Json<CreateFaqRequest>,
) -> Result<(StatusCode, Json<FaqView>), ApiError> {
    let entry = request.into_new_faq().map_err(ApiError::from)?;
    let faq = state.faqs.create(entry).await.map_err(ApiError::from)?;

    debug!(faq_id = %faq.id(), "Created FAQ");

    Ok((
        StatusCode::CREATED,
        Json(FaqView::render(&faq, Some(query.lang()))),
    ))
}

/// GET /faqs/{id}?lang=<code>
pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<FaqDetailResponse>, ApiError> {
    let id = FaqId::parse(&id).map_err(ApiError::from)?;

    debug!(faq_id = %id, "Getting FAQ");

    let read = state.faqs.retrieve(&id).await.map_err(ApiError::from)?;

    Ok(Json(FaqDetailResponse {
        data: FaqView::render(&read.data, Some(query.lang())),
        cache_hit: read.cache_hit,
    }))
}

/// PUT /faqs/{id}
pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
    Json(request): Json<UpdateFaqRequest>,
) -> Result<Json<FaqView>, ApiError> {
    let id = FaqId::parse(&id).map_err(ApiError::from)?;
    let update = request.into_update().map_err(ApiError::from)?;

    debug!(faq_id = %id, "Updating FAQ");

    let faq = state
        .faqs
        .update(&id, update)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(FaqView::render(&faq, Some(query.lang()))))
}

/// DELETE /faqs/{id}
pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteFaqResponse>, ApiError> {
    let id = FaqId::parse(&id).map_err(ApiError::from)?;

    debug!(faq_id = %id, "Deleting FAQ");

    state.faqs.delete(&id).await.map_err(ApiError::from)?;

    Ok(Json(DeleteFaqResponse {
        deleted: true,
        id: id.to_string(),
    }))
}

/// POST /faqs/{id}/deactivate
pub async fn deactivate_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<FaqView>, ApiError> {
    let id = FaqId::parse(&id).map_err(ApiError::from)?;

    debug!(faq_id = %id, "Deactivating FAQ");

    let faq = state.faqs.deactivate(&id).await.map_err(ApiError::from)?;

    Ok(Json(FaqView::render(&faq, Some(query.lang()))))
}
