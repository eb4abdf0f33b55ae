//! Integration test modules

mod output_file_tests;
mod pipeline_tests;
