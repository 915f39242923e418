pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Question generation
        .route(
            "/api/v1/questions/generate",
            post(generation::handle_generate_questions),
        )
        .route(
            "/api/v1/questions/draft",
            post(generation::handle_draft_questions),
        )
        // Interview records
        .route(
            "/api/v1/interview",
            get(interview::handle_get_interview)
                .post(interview::handle_create_interview)
                .put(interview::handle_update_interview)
                .delete(interview::handle_delete_interview),
        )
        .route(
            "/api/v1/interviews",
            get(interview::handle_list_interviews),
        )
        .with_state(state)
}
