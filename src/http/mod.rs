//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, JSON body → field map)
//!     → validation.rs (required fields per route)
//!     → projects.rs / palettes.rs (one store call per request)
//!     → response.rs (errors → status + { error })
//!     → Send to client
//! ```

pub mod palettes;
pub mod projects;
pub mod request;
pub mod response;
pub mod server;
pub mod validation;

pub use request::{JsonPayload, MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody};
pub use server::{AppServer, AppState};
