use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{NameList, NameResolver};

/// Available name lists
///
/// Lists with too few colors to name a palette are left out.
#[utoipa::path(
    get,
    path = "/api/lists",
    responses(
        (status = 200, description = "Name lists", body = Vec<NameList>),
        (status = 502, description = "Name service unavailable"),
    ),
    tag = "Names"
)]
pub async fn handle_lists(
    State(resolver): State<Arc<dyn NameResolver>>,
) -> Result<Json<Vec<NameList>>, ApiError> {
    let lists = resolver.lists().await?;
    Ok(Json(lists))
}
