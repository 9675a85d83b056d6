use crate::error::AppError;
use crate::models::ItemsQuery;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use types::ids::ItemId;
use types::item::FoodItem;

/// Candidate items for a category, optionally narrowed by tag filters.
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<Vec<FoodItem>>, AppError> {
    let items = state
        .store
        .items_by_category(query.category, &query.filter_set());
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<FoodItem>, AppError> {
    Ok(Json(state.store.item(&id)?))
}
