use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /`: the bundled admin page.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
