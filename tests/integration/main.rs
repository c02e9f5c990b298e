//! Integration tests driving the full plugin through its dispatcher.

mod helpers;

mod case_test;
mod catalog_test;
mod ffi_test;
mod file_test;
