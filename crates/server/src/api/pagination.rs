//! Paging through the most recent file listing.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use chartshelf_core::PaginationState;

use crate::state::AppState;

/// A move within the current listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    First,
    Previous,
    Next,
    Last,
    Goto(usize),
}

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub action: PageAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// Whether the current page changed
    pub moved: bool,
    pub pagination: PaginationState,
    pub pages: Vec<usize>,
    pub has_next: bool,
    pub has_previous: bool,
}

/// POST /api/pagination
///
/// Moves are bounded by the last listing's page count. A move past either
/// end leaves the page unchanged and reports `moved: false`.
pub async fn move_page(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PageRequest>,
) -> Json<PageResponse> {
    let mut paginator = state.paginator();
    let before = paginator.current_page();

    match request.action {
        PageAction::First => paginator.first_page(),
        PageAction::Previous => {
            paginator.previous_page();
        }
        PageAction::Next => {
            paginator.next_page();
        }
        PageAction::Last => paginator.last_page(),
        PageAction::Goto(page) => {
            paginator.set_page(page);
        }
    }

    Json(PageResponse {
        moved: paginator.current_page() != before,
        pagination: paginator.state(),
        pages: paginator.page_window(state.max_visible_pages()),
        has_next: paginator.has_next_page(),
        has_previous: paginator.has_previous_page(),
    })
}
