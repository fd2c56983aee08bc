use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::{delete, get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::CurrentUser,
    commissions::{
        dto::{CommissionItem, CreatedCommission, MessageResponse},
        repo_types::NewCommission,
    },
    error::ApiError,
    extract::ApiPath,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/commisions", get(list_commissions))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/commision",
            post(create_commission).delete(delete_all_commissions),
        )
        .route("/commision/:id", delete(delete_commission))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /commision (multipart)
/// Fields: commision_name, commision_desc, optional commision_image file.
#[instrument(skip(state, user, mp), fields(owner = %user.email))]
pub async fn create_commission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<Json<CreatedCommission>, ApiError> {
    let mut mp = mp?;
    let mut name = None;
    let mut desc = None;
    let mut image: Option<Bytes> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("commision_name") => {
                name = Some(field.text().await.map_err(|e| ApiError::BadRequest(e.body_text()))?)
            }
            Some("commision_desc") => {
                desc = Some(field.text().await.map_err(|e| ApiError::BadRequest(e.body_text()))?)
            }
            Some("commision_image") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                // An empty file part means no image was chosen.
                image = (!data.is_empty()).then_some(data);
            }
            other => warn!(field = ?other, "ignoring unknown multipart field"),
        }
    }

    let name = name.ok_or(ApiError::MissingField("commision_name"))?;
    let desc = desc.ok_or(ApiError::MissingField("commision_desc"))?;
    let image_len = image.as_ref().map_or(0, Bytes::len);

    let row = state
        .commissions
        .create(NewCommission { name, desc, image })
        .await?;

    info!(commission_id = row.id, image_len, "commission created");
    Ok(Json(CreatedCommission {
        id: row.id,
        commision_name: row.commision_name,
        commision_desc: row.commision_desc,
        is_taken: row.is_taken,
        owner: user.email,
    }))
}

/// GET /commisions
#[instrument(skip(state))]
pub async fn list_commissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommissionItem>>, ApiError> {
    let rows = state.commissions.list().await?;
    Ok(Json(rows.into_iter().map(CommissionItem::from).collect()))
}

/// DELETE /commision/:id
#[instrument(skip(state, user), fields(by = %user.email))]
pub async fn delete_commission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.commissions.delete(id).await? {
        warn!(commission_id = id, "commission not found");
        return Err(ApiError::NotFound);
    }

    info!(commission_id = id, "commission deleted");
    Ok(Json(MessageResponse {
        message: "Commission taken and removed successfully",
    }))
}

/// DELETE /commision
/// Removes every commission except those named in the configured keep list.
#[instrument(skip(state, user), fields(by = %user.email))]
pub async fn delete_all_commissions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .commissions
        .delete_all_except(&state.config.keep_names)
        .await?;

    info!(removed, kept = ?state.config.keep_names, "commissions bulk deleted");
    Ok(Json(MessageResponse { message: "Deleted" }))
}
