//! Jobportal - a small job-listing web application
//!
//! Signup/login with hashed passwords and stateless session tokens, plus
//! role-scoped CRUD and keyword search over job postings.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
