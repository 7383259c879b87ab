//! The public aggregate: profile, skills, projects and experiences in one response.

use crate::error::{AppError, ErrorBody};
use crate::service::StoreSource;
use crate::state::AppState;
use crate::view::PortfolioView;
use axum::{extract::State, Json};

/// Loads the four lists concurrently; any failure fails the whole response.
#[utoipa::path(
    get,
    path = "/api/portfolio",
    tag = "portfolio",
    responses(
        (status = 200, description = "Everything the public page shows", body = PortfolioView),
        (status = 500, description = "One of the lists failed", body = ErrorBody)
    )
)]
pub async fn portfolio(State(state): State<AppState>) -> Result<Json<PortfolioView>, AppError> {
    let source = StoreSource::new(state.store.as_ref(), &state.model);
    let view = PortfolioView::load(&source).await?;
    Ok(Json(view))
}
