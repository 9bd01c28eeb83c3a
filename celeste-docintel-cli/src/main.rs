mod cli;

use celeste_docintel_core::config::CONFIG_PATH;
use celeste_docintel_core::{
    AIResponse, ClientOptions, DocClient, DocClientFactory, DocError, Document, MimeType,
    Provider, RequestOptions, Settings, collect_response, list_models,
};
use clap::Parser;
use cli::Cli;
use futures::StreamExt;
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    debug!(?cli, "CLI arguments parsed");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Document request failed");
            let message = match err.downcast_ref::<DocError>() {
                Some(doc_error) => doc_error.user_message(),
                None => err.to_string(),
            };
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let provider: Provider = cli.provider.parse()?;

    if cli.list_models {
        for model in list_models(provider) {
            println!("{:<40} {}", model.id, model.display_name);
        }
        return Ok(());
    }

    if cli.documents.is_empty() {
        return Err("no documents given; pass at least one file path".into());
    }

    let settings = load_settings(cli.config.as_deref())?;
    let documents = build_documents(&cli.documents, cli.mime.as_deref())?;

    let mut options = ClientOptions::default();
    if let Some(model) = cli.model.clone() {
        options = options.with_model(model);
    }
    let client = DocClientFactory::create(provider, &settings, options)?;

    let mut request = RequestOptions::default();
    if let Some(system) = cli.system.clone() {
        request = request.with_system_instruction(system);
    }

    info!(
        provider = provider.as_str(),
        model = client.model(),
        documents = documents.len(),
        streaming = cli.stream,
        "Generating response"
    );

    let response = if cli.stream {
        stream_response(client.as_ref(), &cli.prompt, &documents, request).await?
    } else {
        let response = client
            .generate_content(&cli.prompt, &documents, request)
            .await?;
        println!("{}", response.text);
        response
    };

    show_details(client.as_ref(), &documents, &response)?;
    Ok(())
}

fn load_settings(config: Option<&str>) -> Result<Settings, Box<dyn Error>> {
    match config {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            let settings = Settings::load(Some(Path::new(&*expanded)))?;
            info!(path = %expanded, "Loaded configuration from file");
            Ok(settings)
        }
        None if Path::new(CONFIG_PATH).exists() => {
            let settings = Settings::load(None)?;
            info!(path = CONFIG_PATH, "Loaded configuration from default path");
            Ok(settings)
        }
        None => {
            debug!("No configuration file, reading environment");
            Ok(Settings::from_env()?)
        }
    }
}

fn build_documents(paths: &[PathBuf], mime: Option<&str>) -> Result<Vec<Document>, DocError> {
    let mime = mime.map(str::parse::<MimeType>).transpose()?;
    paths
        .iter()
        .map(|path| match mime {
            Some(mime) => Ok(Document::new(path.clone(), mime)),
            None => Document::from_path(path.clone()),
        })
        .collect()
}

/// Print chunks as they arrive and return the combined response.
async fn stream_response(
    client: &dyn DocClient,
    prompt: &str,
    documents: &[Document],
    request: RequestOptions,
) -> Result<AIResponse, Box<dyn Error>> {
    let stream = client
        .stream_generate_content(prompt, documents, request)
        .await?
        .inspect(|chunk| {
            if let Ok(chunk) = chunk {
                let mut stdout = io::stdout();
                let _ = write!(stdout, "{}", chunk.text);
                let _ = stdout.flush();
            }
        })
        .boxed();
    let response = collect_response(stream).await?;
    println!();
    Ok(response)
}

fn show_details(
    client: &dyn DocClient,
    documents: &[Document],
    response: &AIResponse,
) -> Result<(), Box<dyn Error>> {
    println!();
    println!("Provider: {}", client.provider().display_name());
    println!("Model:    {}", client.model());
    for document in documents {
        let name = document
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| document.file_path.display().to_string());
        println!("Document: {name} ({})", document.mime_type);
    }
    if let Some(usage) = &response.usage {
        println!("Usage:    {}", serde_json::to_string_pretty(usage)?);
    }
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
    });
}
