//! CLI binary for the public-cloud-info crate.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use public_cloud_info::{
    InfoClient, InfoError, PublicCloudInfo, QueryOptions, ResultFormat, ALL_REGIONS,
    DEFAULT_BASE_URL,
};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pint")]
#[command(
    author,
    version,
    about = "Query the public cloud information service for images, servers and more"
)]
struct Cli {
    /// Information service base URL
    #[arg(long, env = "PINT_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Emit JSON
    #[arg(long, global = true, conflicts_with = "xml")]
    json: bool,

    /// Emit XML (the default)
    #[arg(long, global = true)]
    xml: bool,

    /// Log requests and filter steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported cloud providers
    Providers {
        #[command(flatten)]
        scope: Scope,
    },

    /// List images of a framework
    Images {
        /// Cloud framework (amazon, google, microsoft, oracle)
        framework: String,

        /// Image state (active, inactive, deprecated, deleted)
        #[arg(long)]
        state: Option<String>,

        #[command(flatten)]
        scope: Scope,
    },

    /// List update servers of a framework
    Servers {
        /// Cloud framework (amazon, google, microsoft, oracle)
        framework: String,

        /// Server type (smt, regionserver, ...)
        #[arg(long = "type")]
        server_type: Option<String>,

        #[command(flatten)]
        scope: Scope,
    },

    /// List regions of a framework
    Regions {
        /// Cloud framework (amazon, google, microsoft, oracle)
        framework: String,

        #[command(flatten)]
        scope: Scope,
    },

    /// List the image states
    States {
        /// Cloud framework
        framework: Option<String>,

        #[command(flatten)]
        scope: Scope,
    },

    /// List the server types
    Types {
        /// Cloud framework
        framework: Option<String>,

        #[command(flatten)]
        scope: Scope,
    },

    /// Show the current version of the server data
    ServersVersion {
        /// Cloud framework
        framework: String,

        #[command(flatten)]
        scope: Scope,
    },

    /// Show the current version of the image data
    ImagesVersion {
        /// Cloud framework
        framework: String,

        #[command(flatten)]
        scope: Scope,
    },
}

#[derive(Args)]
struct Scope {
    /// Region to query, or "all"
    #[arg(short, long, default_value = ALL_REGIONS)]
    region: String,

    /// Comma-separated filters, e.g. "name~sles,publishedon>20230101"
    #[arg(short, long)]
    filter: Option<String>,
}

impl Cli {
    fn format(&self) -> ResultFormat {
        if self.json {
            ResultFormat::Json
        } else {
            ResultFormat::Xml
        }
    }
}

fn options(scope: Scope, format: ResultFormat) -> QueryOptions {
    QueryOptions {
        format,
        region: scope.region,
        filter: scope.filter,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, InfoError> {
    let format = cli.format();
    let client = InfoClient::new(Duration::from_secs(cli.timeout), &cli.base_url)?;
    let info = PublicCloudInfo::with_client(client)
        .with_diagnostics(Arc::new(|message: &str| eprintln!("Warning: {}", message)));

    match cli.command {
        Commands::Providers { scope } => {
            info.providers(None, None, &options(scope, format)).await
        }
        Commands::Images {
            framework,
            state,
            scope,
        } => {
            info.images(Some(framework.as_str()), state.as_deref(), &options(scope, format))
                .await
        }
        Commands::Servers {
            framework,
            server_type,
            scope,
        } => {
            info.servers(
                Some(framework.as_str()),
                server_type.as_deref(),
                &options(scope, format),
            )
            .await
        }
        Commands::Regions { framework, scope } => {
            info.regions(Some(framework.as_str()), None, &options(scope, format))
                .await
        }
        Commands::States { framework, scope } => {
            info.image_states(framework.as_deref(), None, &options(scope, format))
                .await
        }
        Commands::Types { framework, scope } => {
            info.server_types(framework.as_deref(), None, &options(scope, format))
                .await
        }
        Commands::ServersVersion { framework, scope } => {
            info.servers_version(Some(framework.as_str()), None, &options(scope, format))
                .await
        }
        Commands::ImagesVersion { framework, scope } => {
            info.images_version(Some(framework.as_str()), None, &options(scope, format))
                .await
        }
    }
}
