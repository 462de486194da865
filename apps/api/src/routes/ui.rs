use axum::response::Html;

/// GET /
/// Embedded two-step form: upload + summarize, then edit + share.
pub async fn index_handler() -> Html<&'static str> {
    const INDEX: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));
    Html(INDEX)
}
