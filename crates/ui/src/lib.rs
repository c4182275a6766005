pub mod chart;
pub mod format;

pub use chart::equity_polyline;
pub use format::{format_currency, format_percent, format_ratio};

pub fn index_html() -> &'static str {
    include_str!("../static/index.html")
}

pub fn styles_css() -> &'static str {
    include_str!("../static/styles.css")
}

pub fn app_js() -> &'static str {
    include_str!("../static/app.js")
}
