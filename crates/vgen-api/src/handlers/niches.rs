//! Niche listing.

use axum::Json;
use serde::Serialize;
use vgen_models::Niche;

#[derive(Serialize)]
pub struct NicheOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct NichesResponse {
    pub niches: Vec<NicheOption>,
}

/// List the known niches in display order.
pub async fn list_niches() -> Json<NichesResponse> {
    let niches = Niche::ALL
        .iter()
        .map(|n| NicheOption {
            value: n.as_str(),
            label: n.label(),
        })
        .collect();

    Json(NichesResponse { niches })
}
