mod health;
mod result;
mod submit;

use serde::Serialize;

pub use health::health_handler;
pub use result::result_handler;
pub use submit::submit_handler;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
