use axum::response::Html;

/// Control panel page
pub async fn handle_panel() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
