use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pixy_imagery::{
    ClientConfig, ImageUrlOptions, ImageryClient, ImageryService, MockImageryClient,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "pixy")]
#[command(about = "Upload images to a Pixy Imagery server and build retrieval URLs")]
struct CliArgs {
    /// Service base URL (overrides PIXY_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API key appended to every request (overrides PIXY_API_KEY).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Request timeout in seconds (overrides PIXY_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Skip the network and answer uploads from an in-memory mock.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload one or more image files in a single request.
    Upload {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the retrieval URL for a stored image.
    Url {
        image_id: String,
        #[command(flatten)]
        options: UrlArgs,
    },
    /// Print the URL of a random stored image.
    Random {
        #[command(flatten)]
        options: UrlArgs,
    },
}

#[derive(Debug, Args)]
struct UrlArgs {
    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    maintain_aspect_ratio: bool,
}

impl From<&UrlArgs> for ImageUrlOptions {
    fn from(args: &UrlArgs) -> Self {
        ImageUrlOptions {
            width: args.width,
            height: args.height,
            maintain_aspect_ratio: args.maintain_aspect_ratio,
        }
    }
}

fn resolve_config(args: &CliArgs, env: ClientConfig) -> ClientConfig {
    let config = ClientConfig::new(
        args.base_url.clone().unwrap_or(env.base_url),
        args.api_key.clone().or(env.api_key),
    );
    match args.timeout_secs.map(Duration::from_secs).or(env.timeout) {
        Some(timeout) => config.with_timeout(timeout),
        None => config,
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = resolve_config(&args, ClientConfig::from_env()?);

    let service: Box<dyn ImageryService> = if args.dry_run {
        info!("Dry run: uploads will not reach {}", config.base_url);
        Box::new(MockImageryClient::new().with_config(config))
    } else {
        Box::new(ImageryClient::new(config)?)
    };

    match &args.command {
        Command::Upload { paths } => {
            let result = service.upload_images(paths).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Url { image_id, options } => {
            println!("{}", service.image_url(image_id, Some(&ImageUrlOptions::from(options))));
        }
        Command::Random { options } => {
            println!("{}", service.random_image_url(Some(&ImageUrlOptions::from(options))));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixy_imagery=info,pixy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("pixy failed: {}", e);
            std::process::exit(1);
        }
    }
}
