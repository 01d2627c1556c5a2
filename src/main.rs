//! tubenote - CLI front end for the transcript analysis service.
//!
//! Wires configuration, logging, the typed API client, and the shared
//! session store together. Each subcommand maps to one service operation;
//! `run` drives the combined collect -> analyze workflow the way the
//! Analyze view does.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use url::Url;

use tubenote_client::{ApiClient, ClientConfig};
use tubenote_core::protocol::{CollectRequest, RegisterModifications};
use tubenote_store::{Notification, NotificationKind, SessionStore};

#[derive(Parser)]
#[command(name = "tubenote", version, about = "Client for the tubenote analysis service")]
struct Cli {
    /// Override the API base URL (defaults to config / TUBENOTE_API_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe the service health endpoint.
    Health,
    /// Submit a video URL for transcript collection.
    Collect {
        url: Url,
        #[arg(long)]
        channel_id: Option<String>,
    },
    /// Analyze the transcript held by an existing session.
    Analyze { session_id: String },
    /// Register reviewed results into the note store.
    Register {
        session_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        summary: String,
        /// Comma-separated category labels.
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
        #[arg(long)]
        emotions: String,
    },
    /// Look up a session's state and data.
    Session { session_id: String },
    /// Collect and analyze in one pass.
    Run {
        url: Url,
        #[arg(long)]
        channel_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.base_url.clone())?;

    info!(base_url = %config.api_base_url, "starting tubenote client");

    let client = ApiClient::from_config(&config).context("Failed to create API client")?;

    match cli.command {
        Command::Health => {
            client.health().await.context("Health check failed")?;
            println!("service is healthy");
        }
        Command::Collect { url, channel_id } => {
            let mut request = CollectRequest::new(url);
            if let Some(channel_id) = channel_id {
                request = request.with_channel_id(channel_id);
            }
            let outcome = client.collect(&request).await?;
            println!("session:  {}", outcome.session_id);
            println!("video:    {} ({})", outcome.video.title, outcome.video.video_id);
            println!("channel:  {}", outcome.video.channel_name);
        }
        Command::Analyze { session_id } => {
            let analysis = client.analyze(&session_id).await?;
            println!("summary:\n{}\n", analysis.summary);
            println!("suggested titles:\n{}\n", analysis.suggested_titles);
            println!("categories: {}", analysis.categories.join(", "));
            println!("emotions:   {}", analysis.emotions);
        }
        Command::Register {
            session_id,
            title,
            summary,
            categories,
            emotions,
        } => {
            let modifications = RegisterModifications {
                title,
                summary,
                categories,
                emotions,
            };
            let notion_url = client.register(&session_id, &modifications).await?;
            println!("registered: {notion_url}");
        }
        Command::Session { session_id } => {
            let session = client.session(&session_id).await?;
            println!("session:  {}", session.session_id);
            println!("status:   {}", session.status.as_str());
            println!("video:    {}", session.video_data.title);
            println!("language: {}", session.transcript_language);
            println!("expires:  {}", session.expires_at);
            if let Some(analysis) = &session.analysis_result {
                println!("summary:\n{}", analysis.summary);
            }
        }
        Command::Run { url, channel_id } => {
            run_workflow(&client, url, channel_id).await?;
        }
    }

    Ok(())
}

/// Collect -> analyze, with results flowing through the shared store the way
/// the views consume them.
async fn run_workflow(client: &ApiClient, url: Url, channel_id: Option<String>) -> Result<()> {
    let store = SessionStore::new();

    let mut request = CollectRequest::new(url);
    if let Some(channel_id) = channel_id {
        request = request.with_channel_id(channel_id);
    }

    let outcome = match client.collect(&request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            store.notify(Notification::error(format!("collection failed: {e}")));
            render_notification(&store);
            return Err(e.into());
        }
    };
    store.set_session_id(outcome.session_id.clone());
    println!("collected '{}' (session {})", outcome.video.title, outcome.session_id);

    let session_id = store
        .session_id()
        .context("session id missing after collect")?;
    let analysis = match client.analyze(&session_id).await {
        Ok(analysis) => analysis,
        Err(e) => {
            // Analysis failed: the session id stays, no result is written.
            store.notify(Notification::error(format!("analysis failed: {e}")));
            render_notification(&store);
            return Err(e.into());
        }
    };
    store.set_analysis_result(analysis);
    store.notify(Notification::success("analysis complete"));
    render_notification(&store);

    let analysis = store
        .analysis_result()
        .context("analysis result missing after analyze")?;
    println!("\nsummary:\n{}\n", analysis.summary);
    println!("suggested titles:\n{}\n", analysis.suggested_titles);
    println!("categories: {}", analysis.categories.join(", "));
    println!("emotions:   {}", analysis.emotions);
    println!(
        "\nnext: tubenote register {} --title ... --summary ...",
        session_id
    );

    Ok(())
}

fn render_notification(store: &SessionStore) {
    if let Some(notification) = store.notification() {
        match notification.kind {
            NotificationKind::Success => println!("[ok] {}", notification.message),
            NotificationKind::Error => eprintln!("[error] {}", notification.message),
        }
    }
}

/// Load configuration from defaults, optional config file, and environment.
fn load_config(base_url_override: Option<String>) -> Result<ClientConfig> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&ClientConfig::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables (TUBENOTE_API_BASE_URL)
        .add_source(
            config::Environment::default()
                .prefix("TUBENOTE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: ClientConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if let Some(base_url) = base_url_override {
        config.api_base_url = base_url;
    }

    Ok(config)
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let json = std::env::var("LOG_JSON")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
