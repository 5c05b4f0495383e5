//! Web page handlers rendering Askama templates.

pub mod guidelines;
pub mod register;

pub use guidelines::guidelines_handler;
pub use register::{register_page_handler, register_submit_handler};
