use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    assets::{
        dto::{parse_magnitude, AssetBody, AssetResponse, MessageResponse},
        repo::Asset,
    },
    auth::extractors::CurrentUser,
    db::AppState,
    error::ApiError,
};

pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets).post(create_asset))
        .route(
            "/assets/:id",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn list_assets(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let assets = Asset::list_by_owner(&state.db, user.0.id).await?;
    Ok(Json(assets))
}

#[instrument(skip(state, user, body), fields(user_id = user.0.id))]
pub async fn create_asset(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<AssetBody>,
) -> Result<(StatusCode, Json<AssetResponse>), ApiError> {
    let missing = || {
        ApiError::InvalidInput("Missing required fields: name, type, quantity, cost_basis".into())
    };
    let name = body.name.filter(|n| !n.is_empty()).ok_or_else(missing)?;
    let asset_type = body
        .asset_type
        .filter(|t| !t.is_empty())
        .ok_or_else(missing)?;
    let quantity = parse_magnitude(&body.quantity.ok_or_else(missing)?)?;
    let cost_basis = parse_magnitude(&body.cost_basis.ok_or_else(missing)?)?;

    let asset =
        Asset::create(&state.db, user.0.id, &name, &asset_type, quantity, cost_basis).await?;

    info!(asset_id = %asset.id, "asset created");
    Ok((
        StatusCode::CREATED,
        Json(AssetResponse {
            message: "Asset created successfully".into(),
            asset,
        }),
    ))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn get_asset(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Asset>, ApiError> {
    let asset = Asset::find_by_owner(&state.db, user.0.id, id)
        .await?
        .ok_or(ApiError::NotFoundOrForbidden)?;
    Ok(Json(asset))
}

#[instrument(skip(state, user, body), fields(user_id = user.0.id))]
pub async fn update_asset(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<AssetBody>,
) -> Result<Json<AssetResponse>, ApiError> {
    let current = Asset::find_by_owner(&state.db, user.0.id, id)
        .await?
        .ok_or(ApiError::NotFoundOrForbidden)?;

    // Partial update: fields absent from the body keep their current value
    let name = body.name.unwrap_or(current.name);
    let asset_type = body.asset_type.unwrap_or(current.asset_type);
    let quantity = match &body.quantity {
        Some(v) => parse_magnitude(v)?,
        None => current.quantity,
    };
    let cost_basis = match &body.cost_basis {
        Some(v) => parse_magnitude(v)?,
        None => current.cost_basis,
    };

    let asset = Asset::update(
        &state.db, user.0.id, id, &name, &asset_type, quantity, cost_basis,
    )
    .await?
    .ok_or(ApiError::NotFoundOrForbidden)?;

    info!(asset_id = %asset.id, "asset updated");
    Ok(Json(AssetResponse {
        message: "Asset updated successfully".into(),
        asset,
    }))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn delete_asset(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !Asset::delete(&state.db, user.0.id, id).await? {
        return Err(ApiError::NotFoundOrForbidden);
    }
    info!(asset_id = %id, "asset deleted");
    Ok(Json(MessageResponse {
        message: "Asset deleted successfully".into(),
    }))
}
