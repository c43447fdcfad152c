//! textop: stateless text-operation services.
//!
//! Each service computes one fact about its input text and reports it under a
//! fixed key, using an envelope shared by every operator so an orchestrator
//! can chain them. The HTTP scaffold lives here once; operators are plain
//! functions registered in [`operator`].

pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod metrics;
pub mod middleware;
pub mod operator;
pub mod routes;
pub mod state;

pub use envelope::{Dependencies, HealthStatus, OperationRequest, OperationResponse};
pub use error::{AppError, ConfigError, ServerError};
pub use operator::{Operator, OperatorKind, OperatorValue};
pub use routes::create_router;
pub use state::AppState;
