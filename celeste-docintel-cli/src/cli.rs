use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PROMPT: &str = "Provide a summary of the document.";

#[derive(Parser, Debug)]
#[command(
    name = "celeste-docintel",
    version,
    about = "Ask questions about documents using configurable AI providers"
)]
pub struct Cli {
    /// Documents to attach (PDF, text, markdown, source files, ...)
    #[arg(value_name = "DOCUMENT")]
    pub documents: Vec<PathBuf>,
    #[arg(long, short, default_value = DEFAULT_PROMPT)]
    pub prompt: String,
    #[arg(long, default_value = "google")]
    pub provider: String,
    #[arg(long, short)]
    pub model: Option<String>,
    /// MIME type applied to every document instead of guessing from the extension
    #[arg(long)]
    pub mime: Option<String>,
    #[arg(long)]
    pub system: Option<String>,
    /// Print the response as it is generated
    #[arg(long, short)]
    pub stream: bool,
    /// TOML settings file; environment variables are used when absent
    #[arg(long)]
    pub config: Option<String>,
    /// List the provider's models and exit
    #[arg(long)]
    pub list_models: bool,
}
