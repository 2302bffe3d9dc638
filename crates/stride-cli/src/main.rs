mod tracing_setup;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stride_core::{
    HttpNotificationApi, ListingScope, NotificationApi, NotificationFeed, PushHub,
    SocketPushClient,
};

#[derive(Parser)]
#[command(name = "stride-notify")]
#[command(about = "Notification feed client for the Stride backend")]
struct Cli {
    /// Base URL of the notification API
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    /// Bearer token for authenticated endpoints
    #[arg(long)]
    token: Option<String>,

    /// Page size for listing fetches
    #[arg(long, default_value_t = 20)]
    page_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the notification feed
    List {
        /// How many pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Print the authoritative unread count
    Unread,

    /// Follow the push socket and reprint the feed as it changes
    Watch {
        /// Push socket path (defaults to $XDG_RUNTIME_DIR/stride-push.sock)
        #[arg(long)]
        socket: Option<PathBuf>,
    },

    /// Mark every notification read
    MarkAllRead,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_setup::init_tracing();
    let cli = Cli::parse();

    let mut api = HttpNotificationApi::new(&cli.api_url)?;
    if let Some(token) = &cli.token {
        api = api.with_auth_token(token);
    }
    let api: Arc<dyn NotificationApi> = Arc::new(api);
    let feed = NotificationFeed::new(api, ListingScope::All, cli.page_size);

    match cli.command {
        Commands::List { pages } => {
            feed.load_initial().await?;
            for _ in 1..pages {
                if !feed.load_more().await? {
                    break;
                }
            }
            feed.reconcile_unread().await?;
            print_feed(&feed);
        }
        Commands::Unread => {
            feed.reconcile_unread().await?;
            println!("{}", feed.unread_count());
        }
        Commands::Watch { socket } => watch(feed, socket).await?,
        Commands::MarkAllRead => {
            feed.mark_all_read().await?;
            println!("ok");
        }
    }

    Ok(())
}

async fn watch(feed: NotificationFeed, socket: Option<PathBuf>) -> Result<()> {
    let hub = PushHub::new();
    let client = match socket {
        Some(path) => SocketPushClient::with_path(path),
        None => SocketPushClient::new(),
    };
    tracing::info!("watching push socket at {:?}", client.socket_path());
    tokio::spawn(client.run(hub.clone()));
    let mut subscription = hub.subscribe();

    feed.load_initial().await?;
    feed.reconcile_unread().await?;
    print_feed(&feed);

    while let Some(event) = subscription.recv().await {
        if let Err(err) = feed.on_push(event).await {
            tracing::warn!(%err, "failed to apply push event");
        }
        print_feed(&feed);
    }

    Ok(())
}

fn print_feed(feed: &NotificationFeed) {
    let snapshot = feed.snapshot();
    println!(
        "-- {} unread, {} loaded{}",
        snapshot.unread,
        snapshot.items.len(),
        if snapshot.has_more { ", more available" } else { "" }
    );
    for n in &snapshot.items {
        println!(
            "[{}] {}  {}: {}",
            if n.is_read { ' ' } else { '*' },
            n.created_at.format("%Y-%m-%d %H:%M"),
            n.sender.display_name,
            n.content
        );
    }
}
