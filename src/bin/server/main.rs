use anyhow::{Context, Result};
use bulk_export_proxy::{
    adapters::outbound::storage::{AzureConfig, S3Config},
    app::{AppBuilder, AppConfig, DEFAULT_TEMPLATE_CONTAINER, StorageBackend},
    domain::models::{DEFAULT_TEMPLATE_CATEGORY, SynthesizedCategories},
};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bulk-export-proxy")]
#[command(about = "Owner-isolating proxy for bulk export manifests and files", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Public host manifest URLs are rewritten to
    #[arg(long, env = "PROXY_HOST")]
    proxy_host: String,

    /// Optional API-management path prefix
    #[arg(long, env = "API_PREFIX")]
    api_prefix: Option<String>,

    /// Base URL of the FHIR service running export jobs
    #[arg(long, env = "FHIR_UPSTREAM_URL")]
    fhir_upstream_url: String,

    /// Bearer token presented to the FHIR service
    #[arg(long, env = "FHIR_UPSTREAM_TOKEN")]
    fhir_upstream_token: Option<String>,

    /// Trusted header carrying the verified owner id
    #[arg(long, env = "OWNER_HEADER", default_value = "x-owner-id")]
    owner_header: String,

    /// Container holding template files for synthesized categories
    #[arg(long, env = "TEMPLATE_CONTAINER", default_value = DEFAULT_TEMPLATE_CONTAINER)]
    template_container: String,

    /// Category synthesized entries derive their URL from
    #[arg(long, env = "TEMPLATE_CATEGORY", default_value = DEFAULT_TEMPLATE_CATEGORY)]
    template_category: String,

    /// Ordered list of synthesized categories as Name:count
    #[arg(
        long,
        env = "SYNTHESIZED_CATEGORIES",
        default_value = "Practitioner:6,Device:3,Organization:6"
    )]
    synthesized_categories: String,

    /// Echo internal error detail to clients
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Storage backend type
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Azure storage account name
    #[arg(long, env = "AZURE_STORAGE_ACCOUNT")]
    azure_account: Option<String>,

    /// Azure storage access key
    #[arg(long, env = "AZURE_STORAGE_KEY")]
    azure_access_key: Option<String>,

    /// Use the local Azure storage emulator
    #[arg(long, env = "AZURE_USE_EMULATOR", default_value = "false")]
    azure_use_emulator: bool,

    /// S3 endpoint URL
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET")]
    s3_bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "azure" => {
                let account = self
                    .azure_account
                    .clone()
                    .context("AZURE_STORAGE_ACCOUNT is required for Azure backend")?;

                StorageBackend::Azure(AzureConfig {
                    account,
                    access_key: self.azure_access_key.clone(),
                    use_emulator: self.azure_use_emulator,
                })
            }
            "s3" => {
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET is required for S3 backend")?;

                StorageBackend::S3(S3Config {
                    bucket,
                    region: self.s3_region.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                    endpoint: self.s3_endpoint.clone(),
                })
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let synthesized_categories =
            SynthesizedCategories::parse(&self.template_category, &self.synthesized_categories)
                .context("Invalid SYNTHESIZED_CATEGORIES")?;

        Ok(AppConfig {
            storage_backend,
            proxy_host: self.proxy_host.clone(),
            api_prefix: self.api_prefix.clone(),
            fhir_upstream_url: self.fhir_upstream_url.clone(),
            upstream_token: self.fhir_upstream_token.clone(),
            template_container: self.template_container.clone(),
            synthesized_categories,
            owner_header: self.owner_header.clone(),
            debug: self.debug,
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter)))
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting bulk export proxy");
    info!("Storage backend: {}", cli.storage_backend);
    info!("Proxy host: {}", cli.proxy_host);

    let config = cli.to_app_config()?;

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = app_services.router();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
