use axum::response::Html;

static INDEX_HTML: &str = include_str!("../../static/index.html");

/// The form surface: thirteen numeric inputs and one submit action.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
