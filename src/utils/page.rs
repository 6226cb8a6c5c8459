use crate::models::{ChartFragments, Series, SeriesSelection};

/// A complete HTML page sharing the site layout
pub struct Page {
    pub title: String,
    pub body: String,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Page {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Render the page inside the site layout
    pub fn render(&self) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <style>\n\
             body {{ font-family: sans-serif; margin: 2em auto; max-width: 860px; }}\n\
             nav a {{ margin-right: 1em; }}\n\
             .notice {{ background: #fdecea; border: 1px solid #e0b4b4; padding: 0.5em 1em; }}\n\
             fieldset {{ border: none; padding: 0; margin: 0.5em 0; }}\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <nav><a href=\"/\">Chart</a><a href=\"/about\">About</a></nav>\n\
             {body}\n\
             </body>\n\
             </html>\n",
            title = escape_html(&self.title),
            body = self.body,
        )
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the form page shows
pub struct IndexView<'a> {
    pub notice: Option<&'a str>,
    pub ticker: &'a str,
    pub selection: &'a SeriesSelection,
    pub chart: Option<&'a ChartFragments>,
    pub examples: &'a [&'a str],
}

pub fn index_page(view: &IndexView<'_>) -> Page {
    let mut body = String::from("<h1>Stock price chart</h1>\n");

    if let Some(notice) = view.notice {
        body.push_str(&format!("<p class=\"notice\">{}</p>\n", escape_html(notice)));
    }

    body.push_str("<form method=\"post\" action=\"/\">\n");
    body.push_str(&format!(
        "<label>Ticker <input type=\"text\" name=\"ticker\" value=\"{}\" autofocus></label>\n",
        escape_html(view.ticker)
    ));
    body.push_str("<fieldset>\n");
    for series in Series::ALL {
        let checked = if view.selection.contains(series) { " checked" } else { "" };
        body.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"{name}\" value=\"{name}\"{checked}> {legend}</label>\n",
            name = series.column(),
            checked = checked,
            legend = series.style().legend,
        ));
    }
    body.push_str("</fieldset>\n<button type=\"submit\">Plot</button>\n</form>\n");

    if let Some(chart) = view.chart {
        body.push_str(&chart.markup);
        body.push('\n');
        body.push_str(&chart.script);
        body.push('\n');
    }

    body.push_str("<p>Try one of these tickers:</p>\n<ul>\n");
    for example in view.examples {
        body.push_str(&format!("<li>{}</li>\n", escape_html(example)));
    }
    body.push_str("</ul>\n");

    Page::new("Stock price chart", body)
}

pub fn about_page() -> Page {
    Page::new(
        "About",
        "<h1>About</h1>\n\
         <p>Enter a stock ticker and pick the daily price series to plot. \
         Prices are the last 100 trading days from \
         <a href=\"https://www.alphavantage.co/\">Alpha Vantage</a>.</p>\n\
         <p>Hover over the chart to read every plotted series for a single day.</p>",
    )
}
