use axum::response::Html;

use crate::utils::page;

pub async fn show() -> Html<String> {
    Html(page::about_page().render())
}
