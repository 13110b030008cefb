use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, Instrument};

use courier_orders::app_system::{setup_tracing, OrderSystem};
use courier_orders::config::Settings;
use courier_orders::console::{self, Command, Step};
use courier_orders::notify::{self, ChannelNotifier, Notification};
use courier_orders::session::Session;

#[derive(Debug, Parser)]
#[command(name = "courier-orders", about = "Courier marketplace in the terminal")]
struct Cli {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Display name for this session, overrides the configured one.
    #[arg(long)]
    name: Option<String>,
    /// Start with an empty order store.
    #[arg(long)]
    no_seed: bool,
    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(name) = cli.name {
        settings.user_name = name;
    }
    if cli.no_seed {
        settings.seed_sample_orders = false;
    }

    setup_tracing(&settings.log_filter);
    info!(user = %settings.user_name, "Starting courier orders");

    let system = OrderSystem::start(&settings).await?;

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let (notifier, notifications) = ChannelNotifier::new();
    let session = Session::new(settings.user_name.clone(), system.order_client.clone(), Arc::new(notifier));

    let span = tracing::info_span!("session", user = %settings.user_name);
    let outcome = run_session(session, input, notifications).instrument(span).await;

    system.shutdown().await?;
    outcome?;

    info!("Goodbye");
    Ok(())
}

async fn run_session(
    mut session: Session,
    input: Box<dyn AsyncBufRead + Unpin + Send>,
    mut notifications: tokio::sync::mpsc::UnboundedReceiver<Notification>,
) -> anyhow::Result<()> {
    print_screen(&session).await;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading input")? {
        if line.trim().is_empty() {
            continue;
        }
        let step = match line.parse::<Command>() {
            Ok(command) => Some(console::execute(&mut session, command).await),
            Err(e) => {
                session.notify(Notification::error(e.to_string()));
                None
            }
        };

        for notification in notify::drain(&mut notifications) {
            println!("{notification}");
        }
        match step {
            Some(Step::Render) => print_screen(&session).await,
            Some(Step::Print(text)) => println!("{text}"),
            Some(Step::Quit) => break,
            None => {}
        }
    }
    Ok(())
}

async fn print_screen(session: &Session) {
    match session.render().await {
        Ok(text) => println!("\n{text}"),
        Err(e) => error!(error = %e, "Failed to render screen"),
    }
}
