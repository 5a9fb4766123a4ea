//! Model catalog handler.

use axum::Json;

use polychat_types::model::{MODEL_CATALOG, ModelEntry};

/// GET /api/models - the static catalog.
pub async fn list_models() -> Json<&'static [ModelEntry]> {
    Json(MODEL_CATALOG)
}
