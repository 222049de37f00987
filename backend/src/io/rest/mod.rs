//! # REST API Interface Layer
//!
//! HTTP endpoints for the revenue distribution service. Handlers are thin:
//! they log the request, call the domain service, and map results and
//! errors to responses. No business logic lives here.

pub mod distribution_apis;
pub mod health_apis;
pub mod mappers;
