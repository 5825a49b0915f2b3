//! Common utilities shared across the peerscore codebase.
//!
//! - **Text utilities**: string-literal masking, comment stripping and
//!   word-boundary keyword scanning used by the line-based analyzers

pub mod text;

pub use text::{code_portion, count_keyword, indent_width, mask_strings, strip_line_comment};
