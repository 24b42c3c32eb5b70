//! End-to-end tests against a running server

mod api_tests;
mod fixtures;
mod loan_tests;
