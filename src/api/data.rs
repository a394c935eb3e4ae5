use axum::Json;
use serde_json::{json, Value};

/// Static directory of the available endpoints
#[utoipa::path(
    get,
    path = "/dados",
    responses((status = 200, description = "Endpoint directory"))
)]
pub async fn endpoint_directory() -> Json<Value> {
    Json(json!({
        "message": "API da Biblioteca funcionando!",
        "endpoints": {
            "estados": "/estados",
            "cidades": "/cidades",
            "bairros": "/bairros",
            "usuarios": "/usuarios",
            "autores": "/autores",
            "categorias": "/categorias",
            "livros": "/livros",
            "cep": "/cep/{cep}",
            "health": "/health",
            "docs": "/docs"
        }
    }))
}
