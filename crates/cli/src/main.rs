use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::settings::Settings;

/// Bookshelf service command line
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until interrupted
    Serve {
        /// Override `server.port` from configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document as JSON
    Openapi {
        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => serve(port),
        Command::Openapi { pretty } => print_openapi(pretty),
    }
}

fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    if let Some(port) = port {
        settings.server.port = port;
    }

    bookshelf_telemetry::init(&settings.telemetry)?;
    tracing::info!(env = ?settings.environment, "bookshelf CLI serving");

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(bookshelf_app::run(settings))
}

fn print_openapi(pretty: bool) -> anyhow::Result<()> {
    let registry = bookshelf_app::build_registry();
    let document = bookshelf_http::router::openapi_document(&registry);

    let rendered = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .context("failed to render OpenAPI document")?;

    println!("{rendered}");
    Ok(())
}
