mod error;

pub use error::{GatewayError as Error, Result};
