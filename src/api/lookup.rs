use axum::{extract::State, Json};

use super::error::PathParam;
use crate::infrastructure::AppState;
use crate::modules::integrations::brasil_api::PostalLookup;

/// Address lookup by postal code. Always answers 200; failures of the
/// external service surface as `invalid_code` or `unreachable`.
#[utoipa::path(
    get,
    path = "/cep/{cep}",
    tag = "cep",
    params(("cep" = String, Path, description = "Postal code, with or without separators")),
    responses((status = 200, description = "Lookup outcome tagged by status"))
)]
pub async fn lookup_postal_code(
    State(state): State<AppState>,
    PathParam(cep): PathParam<String>,
) -> Json<PostalLookup> {
    Json(state.postal_lookup.lookup(&cep).await)
}
