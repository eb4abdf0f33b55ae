//! Property test modules

mod error_tests;
mod export_tests;
mod record_tests;
