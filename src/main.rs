use clap::{Parser, Subcommand};
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use altitudes::api;
use altitudes::models::{AppConfig, Secret, SizeParams, TokenRequest};
use altitudes::server;
use altitudes::services::{generate_token, SignedUrlService};

#[derive(Parser)]
#[command(name = "altitudes")]
#[command(about = "Altitudes - signed CDN media URLs for a drone photography portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print a signed CDN URL for a resource path
    Sign {
        /// Resource path relative to the CDN root (e.g. "/folder/file.webp")
        path: String,

        /// Display width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Display height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
    /// Print the raw token for a path and expiry timestamp
    Token {
        /// Resource path including any query string
        path: String,

        /// Expiry as a Unix timestamp in seconds
        #[arg(short, long)]
        expires: u64,

        /// Restrict the token to one client IP
        #[arg(long)]
        client_ip: Option<String>,

        /// Sign this path instead of the resource path (adds token_path)
        #[arg(long)]
        token_path: Option<String>,

        /// Comma-separated country codes allowed to fetch the resource
        #[arg(long)]
        countries: Option<String>,

        /// Comma-separated country codes blocked from fetching the resource
        #[arg(long)]
        countries_blocked: Option<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Altitudes API",
        description = "Signed CDN media URLs for a drone photography portfolio",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_sign_url, api::handle_items),
    components(schemas(
        api::SignUrlRequest,
        api::SignUrlResponse,
        altitudes::models::MediaItem,
        altitudes::models::MediaUrls,
    )),
    tags((name = "Media", description = "Media URL signing and listing"))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Sign {
            path,
            width,
            height,
        }) => run_sign_command(&path, width, height),
        Some(Commands::Token {
            path,
            expires,
            client_ip,
            token_path,
            countries,
            countries_blocked,
        }) => run_token_command(
            path,
            expires,
            client_ip,
            token_path,
            countries,
            countries_blocked,
        ),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_logging() {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "altitudes=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Sign a single path using the environment configuration
fn run_sign_command(path: &str, width: Option<u32>, height: Option<u32>) -> anyhow::Result<()> {
    init_cli_logging();

    let config = AppConfig::from_env()?;
    let signer = SignedUrlService::new(config.signer);
    let signed_url = signer.signed_url(path, &SizeParams::new(width, height))?;

    println!("{signed_url}");
    Ok(())
}

/// Compute a raw token for a fixed expiry
fn run_token_command(
    path: String,
    expires: u64,
    client_ip: Option<String>,
    token_path: Option<String>,
    countries: Option<String>,
    countries_blocked: Option<String>,
) -> anyhow::Result<()> {
    init_cli_logging();

    let secret = std::env::var("BUNNYCDN_TOKEN_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("BUNNYCDN_TOKEN_SECRET is not set"))?;

    let request = TokenRequest {
        client_ip,
        path_override: token_path,
        allowed_countries: countries,
        blocked_countries: countries_blocked,
        ..TokenRequest::new(path, Secret::new(secret), expires)
    };
    let token = generate_token(&request)?;

    println!("Path    : {}", request.path);
    println!("Expires : {}", token.expires);
    println!("Token   : {}", token.token);
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    let base_url = var("BUNNYCDN_BASE_URL").or_else(|| var("VITE_BUNNYCDN_BASE_URL"));

    println!("Altitudes v{VERSION}");
    println!("Signed CDN media URLs for a drone photography portfolio\n");

    println!("Environment Variables:");
    println!(
        "  BUNNYCDN_TOKEN_SECRET = {}",
        if var("BUNNYCDN_TOKEN_SECRET").is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!(
        "  BUNNYCDN_BASE_URL     = {}",
        base_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  BIND_ADDR             = {}",
        var("BIND_ADDR").as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CATALOG_FILE          = {}",
        var("CATALOG_FILE").as_deref().unwrap_or("(not set)")
    );
    println!(
        "  STATIC_DIR            = {}",
        var("STATIC_DIR").as_deref().unwrap_or("(not set)")
    );

    match AppConfig::from_env() {
        Ok(config) => println!(
            "\nConfiguration: OK (token validity {}s, URL cache {}s)",
            config.signer.token_validity_secs(),
            config.signer.cache_ttl_secs()
        ),
        Err(e) => println!("\nConfiguration: {e}"),
    }

    println!("\nCommands:");
    println!("  altitudes serve    Start the HTTP server");
    println!("  altitudes sign     Print a signed CDN URL");
    println!("  altitudes token    Print the raw token for a path and expiry");
    println!("\nRun 'altitudes --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "altitudes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing secret or base URL stops the process here, before any request
    let config = AppConfig::from_env()?;

    tracing::info!(
        cdn_base_url = config.signer.cdn_base_url(),
        token_validity_secs = config.signer.token_validity_secs(),
        cache_ttl_secs = config.signer.cache_ttl_secs(),
        catalog = ?config.catalog_file.as_ref().map(|p| p.display().to_string()),
        "Signing configured"
    );

    let state = server::create_app_state(&config)?;

    // Build router: start with shared API routes, add production-only routes
    let mut app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Built frontend (production only)
    if let Some(static_dir) = &config.static_dir {
        tracing::info!(dir = %static_dir.display(), "Serving frontend");
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Altitudes server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
