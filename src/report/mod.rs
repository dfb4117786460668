//! Document output.

pub mod generator;

pub use generator::{
    generate_error_json, generate_error_markdown, generate_json_report, generate_markdown_report,
};
