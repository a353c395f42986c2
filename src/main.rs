use std::path::PathBuf;

use clap::{Parser, Subcommand};
use duojeu::{db::Db, router, seed, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database path or URL.
    #[arg(long, env = "DATABASE_URL", default_value = "duojeu.db")]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wipe and reload the game catalog from a JSON definition file.
    Seed { path: PathBuf },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "duojeu=debug,tower_http=info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;

    if let Some(Command::Seed { path }) = args.command {
        return seed::run(&db, &path).await;
    }

    let app = router(AppState { db });

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, app).await?;

    Ok(())
}
