//! Celeste Document Intelligence
//!
//! Multi-provider document processing clients. Every provider implements the
//! [`DocClient`] contract; [`create_doc_client`] resolves a provider name to a
//! concrete client using explicit [`Settings`].
//!
//! ```no_run
//! use celeste_docintel_core::{ClientOptions, DocClient, Document, MimeType, RequestOptions, Settings};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let client = celeste_docintel_core::create_doc_client("google", &settings, ClientOptions::default())?;
//! let document = Document::new("data/report.pdf", MimeType::Pdf);
//! let response = client
//!     .generate_content("Provide a summary of the document.", &[document], RequestOptions::default())
//!     .await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use config::{ConfigError, ProviderSettings, Settings};
pub use domain::types::{
    AIResponse, AIUsage, Document, GeminiModel, MimeType, ModelInfo, Provider,
};
pub use infrastructure::model::{
    AIResponseStream, ClientOptions, DocClient, DocClientFactory, DocError, ErrorKind,
    GenerationConfig, RequestOptions, collect_response, create_doc_client, list_models,
    supported_providers,
};
pub use infrastructure::model::clients::{GeminiDocClient, HttpTransport};
pub use infrastructure::model::transport::{JsonStream, Transport, TransportRequest};
