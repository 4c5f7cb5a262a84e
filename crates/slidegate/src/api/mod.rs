//! The `/api/` surface: request dispatch, response shapes, error mapping

mod dispatch;
mod error;
mod response;

pub use dispatch::{dispatch, shape_response};
pub use error::ApiError;
pub use response::GatewayResponse;
