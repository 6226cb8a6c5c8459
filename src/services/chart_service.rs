use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use serde::Serialize;

use crate::models::{ChartFragments, ChartLine, ChartSpec, PriceHistory, SeriesSelection, TickerSymbol};
use crate::utils::errors::ChartError;

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 300;

/// Map the selected series onto chart lines
///
/// Series missing from the history are skipped, never an error.
pub fn build_spec(history: &PriceHistory, ticker: &TickerSymbol, selection: &SeriesSelection) -> ChartSpec {
    let lines = selection
        .iter()
        .filter_map(|series| {
            let points = history.points(series)?;
            let style = series.style();
            Some(ChartLine {
                series,
                color: style.color,
                legend: style.legend,
                points,
            })
        })
        .collect();

    ChartSpec {
        title: ticker.to_string(),
        lines,
        timestamps: history.records().iter().map(|r| r.timestamp).collect(),
    }
}

/// Format a price the way the y axis and hover readout show it
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value)
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn time_range(timestamps: &[DateTime<Utc>]) -> (DateTime<Utc>, DateTime<Utc>) {
    match (timestamps.iter().min(), timestamps.iter().max()) {
        (Some(&min), Some(&max)) if min < max => (min, max),
        (Some(&only), _) => (only - Duration::days(1), only + Duration::days(1)),
        _ => {
            let now = Utc::now();
            (now - Duration::days(1), now)
        }
    }
}

fn price_range(lines: &[ChartLine]) -> (f64, f64) {
    let values = lines.iter().flat_map(|l| l.points.iter().map(|p| p.1));
    let (min_price, max_price) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min_price.is_finite() || !max_price.is_finite() {
        return (0.0, 1.0);
    }

    // Pad so lines do not touch the frame
    let spread = (max_price - min_price).max(max_price.abs() * 0.01).max(1e-8);
    let padding = spread * 0.1;
    ((min_price - padding).max(0.0), max_price + padding)
}

#[derive(Serialize)]
struct HoverValue {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct HoverPoint {
    x: i32,
    date: String,
    values: Vec<HoverValue>,
}

fn hover_points(spec: &ChartSpec, pixel_x: &[i32]) -> Vec<HoverPoint> {
    spec.timestamps
        .iter()
        .zip(pixel_x)
        .map(|(ts, &x)| HoverPoint {
            x,
            date: ts.format("%Y-%m-%d").to_string(),
            values: spec
                .lines
                .iter()
                .filter_map(|line| {
                    line.points.iter().find(|p| p.0 == *ts).map(|p| HoverValue {
                        label: line.legend,
                        value: format_currency(p.1),
                    })
                })
                .collect(),
        })
        .collect()
}

fn container_id(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("tickerplot-{}", slug)
}

const HOVER_SCRIPT: &str = r#"<script type="text/javascript">
(function () {
  var root = document.getElementById("__ID__");
  if (!root) { return; }
  var points = __POINTS__;
  var svg = root.querySelector("svg");
  var tip = root.querySelector(".tickerplot-hover");
  root.addEventListener("mousemove", function (ev) {
    if (!points.length || !svg) { return; }
    var rect = svg.getBoundingClientRect();
    var scale = rect.width / __WIDTH__;
    var x = (ev.clientX - rect.left) / scale;
    var best = points[0];
    for (var i = 1; i < points.length; i++) {
      if (Math.abs(points[i].x - x) < Math.abs(best.x - x)) { best = points[i]; }
    }
    var html = "<strong>" + best.date + "</strong>";
    best.values.forEach(function (v) { html += "<br>" + v.label + ": " + v.value; });
    tip.innerHTML = html;
    tip.style.left = (best.x * scale + 12) + "px";
    tip.style.display = best.values.length ? "block" : "none";
  });
  root.addEventListener("mouseleave", function () { tip.style.display = "none"; });
})();
</script>"#;

/// Draw the chart as inline SVG plus its hover script
pub fn render(spec: &ChartSpec) -> Result<ChartFragments, ChartError> {
    let (x_min, x_max) = time_range(&spec.timestamps);
    let (y_min, y_max) = price_range(&spec.lines);

    let mut svg = String::new();
    let pixel_x = {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(8)
            .x_label_formatter(&|d: &DateTime<Utc>| d.format("%b %d").to_string())
            .y_label_formatter(&|v: &f64| format_currency(*v))
            .draw()
            .map_err(render_err)?;

        for line in &spec.lines {
            let color = RGBColor(line.color.0, line.color.1, line.color.2);
            chart
                .draw_series(LineSeries::new(line.points.iter().copied(), &color))
                .map_err(render_err)?
                .label(line.legend)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if !spec.lines.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;
        }

        let pixel_x: Vec<i32> = spec
            .timestamps
            .iter()
            .map(|ts| chart.backend_coord(&(*ts, y_min)).0)
            .collect();

        root.present().map_err(render_err)?;
        pixel_x
    };

    let id = container_id(&spec.title);
    let points = serde_json::to_string(&hover_points(spec, &pixel_x)).map_err(render_err)?;

    let script = HOVER_SCRIPT
        .replace("__ID__", &id)
        .replace("__POINTS__", &points)
        .replace("__WIDTH__", &CHART_WIDTH.to_string());
    let markup = format!(
        "<div id=\"{id}\" class=\"tickerplot-chart\" style=\"position:relative;width:{w}px\">{svg}\
         <div class=\"tickerplot-hover\" style=\"display:none;position:absolute;top:40px;\
         background:#fff;border:1px solid #999;padding:4px 8px;font:12px sans-serif;pointer-events:none\"></div></div>",
        id = id,
        w = CHART_WIDTH,
        svg = svg,
    );

    Ok(ChartFragments { script, markup })
}

/// Build and draw the chart for one ticker
pub fn generate_chart(
    history: &PriceHistory,
    ticker: &TickerSymbol,
    selection: &SeriesSelection,
) -> Result<(ChartSpec, ChartFragments), ChartError> {
    let spec = build_spec(history, ticker, selection);
    let fragments = render(&spec)?;
    Ok((spec, fragments))
}
