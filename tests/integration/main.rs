//! Integration tests against an in-process mock backend

mod api_tests;
mod session_tests;
