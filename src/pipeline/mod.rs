mod adapter;
pub mod invoker;
pub mod mapper;
pub mod response;
mod service;
mod types;

pub use adapter::{AdaptedTable, SchemaAdapter};
pub use mapper::OutputPolicy;
pub use response::{BatchShape, ErrorResponse};
pub use service::InferenceService;
pub use types::*;
