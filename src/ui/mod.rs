//! Console output for CLI commands
//!
//! Uses `cliclack` for styled output in a terminal, with plain lines in
//! CI and when output is piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "Bookstore");
//! ui::key_value(&ctx, "Address", "http://127.0.0.1:8080");
//! ui::step_warn_hint(&ctx, "Config already exists", "Use --force to overwrite");
//! ui::outro_success(&ctx, "Bookstore stopped");
//! ```

mod context;
mod output;

pub use context::{OutputMode, UiContext};
pub use output::{
    intro, key_value, key_value_status, outro_success, remark, step_info, step_ok_detail,
    step_warn_hint,
};
