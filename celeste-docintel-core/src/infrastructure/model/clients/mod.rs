//! Document clients

mod base;
mod gemini;

pub use base::HttpTransport;
pub use gemini::GeminiDocClient;
