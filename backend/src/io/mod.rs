//! # IO Module
//!
//! Interface layer between external callers and the domain logic. It
//! translates HTTP requests into domain commands, maps domain results to the
//! DTOs of the `shared` crate and turns domain errors into status codes.
//!
//! ## Supported Operations
//!
//! - **POST /api/distributions/build**: build or rebuild a department's month
//! - **GET /api/distributions**: list distribution summaries
//! - **GET /api/distributions/:name**: fetch a record with its line items
//! - **GET /api/health**: liveness probe

pub mod rest;

pub use rest::*;
