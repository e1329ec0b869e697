//! Integration tests for the scraper
//!
//! These tests use wiremock as the upstream proxy: requests for
//! `http://books.test/...` reach the mock server in absolute form, so the
//! whole fetch / extract / paginate cycle runs end-to-end without a network.

mod fetch_tests;
mod support;
