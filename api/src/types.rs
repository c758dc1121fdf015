pub use hystats_shared::errors::{ApiError, ApiResponse};

pub use crate::api::types::*;
