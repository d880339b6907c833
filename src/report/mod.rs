// Report rendering: markdown text and JSON, both built purely from SalesReport.

pub mod json;
pub mod markdown;

pub use json::to_json;
pub use markdown::render_markdown;
