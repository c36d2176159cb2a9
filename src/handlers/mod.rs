/// HTTP request handlers
use crate::errors::AppResult;
use crate::services::GalleryService;
use crate::views::IndexPage;
use askama::Template;
use axum::{extract::State, response::Html};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<GalleryService>,
}

/// Gallery page, refreshing the daily cache first when it is stale
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let snapshot = state.gallery.ensure_fresh().await;
    let html = IndexPage::from_snapshot(&snapshot).render()?;
    Ok(Html(html))
}
