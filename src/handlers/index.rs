use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{error, info};

use super::AppState;
use crate::models::{Series, SeriesSelection};
use crate::services::quote_service;
use crate::utils::errors::EMPTY_TICKER_MESSAGE;
use crate::utils::flash;
use crate::utils::page::{self, IndexView};

/// Longest slice of raw form input written to the log
const MAX_LOGGED_CHARS: usize = 32;

/// Tickers listed under the form as suggestions
pub const EXAMPLE_TICKERS: [&str; 3] = ["AAPL", "GOOG", "MSFT"];

/// Fields posted by the ticker form
///
/// Each series field carries the series name as its value when checked.
#[derive(Debug, Default, Deserialize)]
pub struct TickerForm {
    #[serde(default)]
    pub ticker: String,
    pub open: Option<String>,
    pub close: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
}

impl TickerForm {
    pub fn selection(&self) -> SeriesSelection {
        SeriesSelection::from_names(
            [&self.open, &self.close, &self.high, &self.low]
                .into_iter()
                .flatten()
                .map(String::as_str),
        )
    }
}

/// GET / - the empty form, plus any notice left by a failed submit
pub async fn show(headers: HeaderMap) -> Response {
    let notice = flash::read(&headers);

    let mut selection = SeriesSelection::default();
    selection.insert(Series::Close);

    let html = page::index_page(&IndexView {
        notice: notice.as_deref(),
        ticker: "",
        selection: &selection,
        chart: None,
        examples: &EXAMPLE_TICKERS,
    })
    .render();

    if notice.is_some() {
        ([(SET_COOKIE, flash::clear_cookie())], Html(html)).into_response()
    } else {
        Html(html).into_response()
    }
}

/// POST / - fetch the ticker and render its chart, or bounce back with a notice
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<TickerForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            info!("Rejected unreadable form submission: {}", rejection.body_text());
            return redirect_with_notice(EMPTY_TICKER_MESSAGE);
        }
    };
    let selection = form.selection();

    match quote_service::build_chart(&state.client, &form.ticker, &selection).await {
        Ok(result) => {
            let html = page::index_page(&IndexView {
                notice: None,
                ticker: result.ticker.as_str(),
                selection: &selection,
                chart: Some(&result.fragments),
                examples: &EXAMPLE_TICKERS,
            })
            .render();
            Html(html).into_response()
        }
        Err(e) => {
            if e.is_user_error() {
                info!("Rejected chart request for {:?}: {}", loggable(&form.ticker), e);
            } else {
                error!("Chart request for {:?} failed: {}", loggable(&form.ticker), e);
            }
            redirect_with_notice(&e.user_message())
        }
    }
}

/// Trimmed and length-capped copy of user input for log lines
fn loggable(raw: &str) -> String {
    raw.trim().chars().take(MAX_LOGGED_CHARS).collect()
}

/// 303 back to the form, leaving a notice for the next page view
fn redirect_with_notice(message: &str) -> Response {
    ([(SET_COOKIE, flash::set_cookie(message))], Redirect::to("/")).into_response()
}
