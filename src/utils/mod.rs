pub mod errors;
pub mod flash;
pub mod page;

pub use errors::{AppError, ChartError, ConfigError, InputError};
pub use page::{escape_html, Page};
