//! HTTP access to the TestUZ REST API.

mod client;

pub use client::{ApiClient, DashboardData};
