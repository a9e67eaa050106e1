use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yells_client::api::ApiClient;
use yells_client::config::Config;
use yells_client::dom::{ids, Element, Page};
use yells_client::feed::{FeedConfig, FeedController};
use yells_client::model::{ContentKind, ItemRef, Lookup, Namespace};
use yells_client::pages::{load_detail, load_home};
use yells_client::render::CardRenderer;
use yells_client::search::{SearchConfig, SearchSession};
use yells_client::viewport::AutoScroller;

/// Render yells pages headlessly and print them as HTML.
#[derive(Parser, Debug)]
#[command(name = "yells-client", version, about)]
struct Cli {
    /// Stop scrolling after this many scroll events.
    #[arg(long, global = true)]
    max_scrolls: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Highest rated and most recent items.
    Home,
    /// Infinite feed of the newest items.
    Discover {
        /// Restrict the feed to one kind (post, request, comment).
        #[arg(long)]
        kind: Option<ContentKind>,
    },
    /// One item and its comments.
    Item { kind: ContentKind, id: u64 },
    /// A yell from the legacy routes.
    Legacy { id: u64 },
    /// Search results streamed over the search channel.
    Search { query: String },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    info!(base_url = %config.base_url, "Configuration loaded");

    let api = ApiClient::new(&config).context("Failed to build API client")?;
    let renderer = CardRenderer::new(api);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            info!("Interrupted, stopping");
            cancel.cancel();
        }
    });

    let (title, page) = match cli.command {
        Command::Home => {
            let page = Page::home();
            load_home(&renderer, &page).await.context("Failed to load home page")?;
            ("Home".to_string(), page)
        }
        Command::Discover { kind } => {
            let namespace = kind.map_or(Namespace::Yell, Namespace::Kind);
            let page = Page::discover();
            let feed = FeedController::new(
                renderer,
                page.clone(),
                FeedConfig::from_config(&config, namespace),
                cancel.clone(),
            );

            let (tx, rx) = mpsc::channel(16);
            let scroller_cancel = cancel.child_token();
            let scroller =
                AutoScroller::spawn(tx, config.auto_scroll_interval, cli.max_scrolls, scroller_cancel.clone());
            let summary = feed.run(rx).await.context("Feed failed")?;
            scroller_cancel.cancel();
            if let Err(e) = scroller.await {
                warn!(error = %e, "Auto-scroller failed");
            }

            info!(
                requested = summary.requested,
                appended = summary.appended,
                interrupted = summary.interrupted,
                "Discover finished"
            );
            ("Discover".to_string(), page)
        }
        Command::Item { kind, id } => {
            let page = Page::detail();
            let summary = load_detail(&renderer, &page, kind, id)
                .await
                .with_context(|| format!("Failed to load {kind} {id}"))?;
            if !summary.item_found {
                warn!(%kind, id, "Item not found");
            }
            (format!("{kind} {id}"), page)
        }
        Command::Legacy { id } => {
            let page = Page::new().with_element(ids::MAIN, Element::new());
            match renderer
                .load_legacy_card(ItemRef::Id(id))
                .await
                .with_context(|| format!("Failed to load yell {id}"))?
            {
                Lookup::Found(card) => page.append(ids::MAIN, card)?,
                Lookup::NotFound => warn!(id, "Legacy yell not found"),
            }
            (format!("yell {id}"), page)
        }
        Command::Search { query } => {
            let page = Page::search(&query);
            let session = SearchSession::new(
                renderer,
                page.clone(),
                SearchConfig::from_config(&config),
                cancel.clone(),
            );
            let query = session.query_from_page()?;
            let socket = session
                .connect(&query)
                .await
                .context("Failed to open search channel")?;

            let (tx, rx) = mpsc::channel(16);
            let scroller_cancel = cancel.child_token();
            let scroller =
                AutoScroller::spawn(tx, config.auto_scroll_interval, cli.max_scrolls, scroller_cancel.clone());
            let summary = session.run(socket, rx).await.context("Search failed")?;
            scroller_cancel.cancel();
            if let Err(e) = scroller.await {
                warn!(error = %e, "Auto-scroller failed");
            }

            info!(
                ids = summary.ids_received,
                appended = summary.appended,
                exhausted = summary.exhausted,
                "Search finished"
            );
            (format!("Search: {query}"), page)
        }
    };

    println!("{}", page.render_document(&title).into_string());
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,yells_client=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the rendered page.
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
