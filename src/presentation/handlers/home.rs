use axum::response::IntoResponse;

pub async fn home_handler() -> impl IntoResponse {
    "Report generator backend is running"
}
