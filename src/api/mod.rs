//! HTTP API module: JSON endpoints, CORS policy and documentation serving.

pub mod cors;
pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::{ApiDoc, DocFormat};
pub use handlers::AppState;
pub use routes::create_router;
