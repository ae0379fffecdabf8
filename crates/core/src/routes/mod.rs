mod health;
mod page;

pub use health::*;
pub use page::*;

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    message: &'static str,
}
