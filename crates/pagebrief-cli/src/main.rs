//! PageBrief CLI - summarization server and one-shot summaries

use clap::{Args, Parser, Subcommand, ValueEnum};
use pagebrief::{
    router, serve, CompletionConfig, FetchOptions, Summarizer, SummarizeRequest, SummaryResult,
};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for the summarize subcommand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Summary text only
    #[default]
    Text,
    /// JSON envelope, as returned by the HTTP endpoint
    Json,
}

/// PageBrief - summarize web pages and text with a hosted language model
#[derive(Parser, Debug)]
#[command(name = "pagebrief")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand
#[derive(Args, Debug)]
struct Settings {
    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Model identifier used for every request
    #[arg(long, env = "PAGEBRIEF_MODEL", global = true)]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", global = true)]
    api_base: Option<String>,

    /// Custom User-Agent for page fetches
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Page fetch timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    fetch_timeout_secs: Option<u64>,

    /// Completion call timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    completion_timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "PAGEBRIEF_BIND", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,

        /// Directory with the built frontend (serves index.html as fallback)
        #[arg(long, env = "PAGEBRIEF_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },
    /// Summarize a URL or a block of text and print the result
    Summarize {
        /// Page to summarize
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        url: Option<String>,

        /// Text to summarize
        #[arg(long)]
        text: Option<String>,

        /// Summary length, passed to the model as-is
        #[arg(long)]
        length: Option<String>,

        /// Summary style, passed to the model as-is
        #[arg(long)]
        style: Option<String>,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
}

impl Settings {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: self.fetch_timeout_secs.map(Duration::from_secs),
        }
    }

    fn completion_config(&self) -> Result<CompletionConfig, pagebrief::ConfigError> {
        let mut config = CompletionConfig::new(self.api_key.clone().unwrap_or_default())?
            .timeout(self.completion_timeout_secs.map(Duration::from_secs));
        if let Some(ref model) = self.model {
            config = config.model(model);
        }
        if let Some(ref api_base) = self.api_base {
            config = config.api_base(api_base);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let summarizer = build_summarizer(&cli.settings);

    match cli.command {
        Commands::Serve { bind, static_dir } => run_server(summarizer, bind, static_dir).await,
        Commands::Summarize {
            url,
            text,
            length,
            style,
            output,
        } => {
            let request = SummarizeRequest {
                url,
                text,
                length,
                summary_style: style,
            };
            run_summarize(&summarizer, request, output).await;
        }
    }
}

/// Build the pipeline or exit before doing any work
fn build_summarizer(settings: &Settings) -> Summarizer {
    let completion = settings.completion_config().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    tracing::info!(model = completion.model_name(), "Completion service configured");

    Summarizer::from_config(settings.fetch_options(), completion).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

async fn run_server(summarizer: Summarizer, bind: SocketAddr, static_dir: Option<PathBuf>) {
    if let Some(ref dir) = static_dir {
        if !dir.join("index.html").is_file() {
            tracing::warn!(dir = %dir.display(), "Static directory has no index.html");
        }
    }

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to bind {}: {}", bind, e);
            std::process::exit(1);
        });

    let app = router(Arc::new(summarizer), static_dir);
    if let Err(e) = serve(listener, app).await {
        eprintln!("Error: server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_summarize(summarizer: &Summarizer, request: SummarizeRequest, output: OutputFormat) {
    let result = summarizer.summarize(request).await;

    let failed = result.is_err();
    let result = match result {
        Ok(summary) => SummaryResult::summary(summary),
        Err(e) => SummaryResult::error(e.to_string()),
    };

    writeln_safe(&format_result(&result, output));

    if failed {
        std::process::exit(1);
    }
}

/// Render a result for stdout
fn format_result(result: &SummaryResult, output: OutputFormat) -> String {
    match (output, result) {
        (OutputFormat::Json, _) => {
            serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                eprintln!("Error serializing result: {}", e);
                std::process::exit(1);
            })
        }
        (OutputFormat::Text, SummaryResult::Summary { summary }) => summary.clone(),
        (OutputFormat::Text, SummaryResult::Error { error }) => format!("Error: {}", error),
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
