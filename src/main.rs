use clap::Parser;
use tast::db::Db;
use tast::generator::Generator;
use tast::services::courses::CourseService;
use tast::storage::Storage;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database URL.
    #[arg(long, env, default_value = "sqlite://tast.db")]
    database_url: String,

    /// Directory that keeps the uploaded course material.
    #[arg(long, env, default_value = "uploads")]
    uploads_dir: std::path::PathBuf,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Mark cookies Secure. Enable when serving over TLS.
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,tower_http=debug,tast=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;
    let storage = Storage::new(args.uploads_dir);

    let generator = Generator::from_env();
    match &generator {
        Some(_) => tracing::info!("question generator configured"),
        None => tracing::warn!("GENERATOR_URL not set; course creation is disabled"),
    }

    let courses = CourseService::new(generator, db.clone(), storage);

    let state = tast::AppState {
        db,
        courses,
        secure_cookies: args.secure_cookies,
    };

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, tast::router(state)).await?;

    Ok(())
}
