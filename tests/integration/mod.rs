//! Integration tests
//!
//! `api_test`, `generator_test` and `sse_test` drive a real server over HTTP.
//! `hub_test` exercises the hub and write sinks through the public API only.

mod api_test;
mod generator_test;
mod hub_test;
mod sse_test;
