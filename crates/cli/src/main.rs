use std::process::ExitCode;

use clap::Parser;
use specimark_client::{AnnotationClient, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Command};

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "specimark=info,specimark_client=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    let connect = || -> anyhow::Result<AnnotationClient> {
        tracing::debug!(api_url = %config.api_url, "Using labels server");
        Ok(AnnotationClient::from_config(&config)?)
    };

    match cli.command {
        Command::Fetch {
            media,
            annotation_type,
            link,
            context,
        } => {
            commands::fetch(&connect()?, media.scope()?, annotation_type, link, context.filter())
                .await?
        }
        Command::Stats {
            media,
            annotation_type,
        } => commands::stats(&connect()?, media.scope()?, &annotation_type).await?,
        Command::Export {
            media,
            annotation_type,
            format,
            context,
        } => {
            commands::export(
                &connect()?,
                media.scope()?,
                &annotation_type,
                &format,
                context.filter(),
            )
            .await?
        }
        Command::Delete { media, ids } => {
            commands::delete(&connect()?, media.scope()?, ids).await?
        }
        Command::Validate { file } => {
            let (report, all_valid) = commands::validate_file(&file)?;
            print!("{report}");
            if !all_valid {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
