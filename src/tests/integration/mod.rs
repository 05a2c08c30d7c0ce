//! Integration tests against a mock HTTP server.

mod fetch;
