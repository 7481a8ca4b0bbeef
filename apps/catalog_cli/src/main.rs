use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, search_query,
    views::{LoginForm, LoginView, LogoutAction},
    ClientSettings, HttpRpcTransport, ImageUploader, RpcClient, SearchOpts, SelectedFile,
    UiEffect, UploadOutcome, DEFAULT_CONFIG_FILE,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Command-line client for the graffiti catalog")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    root_url: Option<String>,
    #[arg(long)]
    cors_token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks a login/password pair against the server.
    Login {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Uploads JPEG files in order, stopping at the first failure.
    Upload {
        #[arg(long, value_enum)]
        target: Target,
        #[arg(long, requires = "password")]
        login: Option<String>,
        #[arg(long, requires = "login")]
        password: Option<String>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Prints the listing url for a search filter read from a JSON file.
    EncodeSearch {
        #[arg(long)]
        json: PathBuf,
    },
    DecodeSearch { segment: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Target {
    Graffiti,
    Author,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(root_url) = args.root_url {
        settings.root_url = root_url;
    }
    if let Some(cors_token) = args.cors_token {
        settings.cors_token = cors_token;
    }

    match args.command {
        Command::Login { login, password } => {
            let rpc = connect(&settings, "/login")?;
            sign_in(&rpc, login, password).await?;
            println!("Signed in.");
        }
        Command::Logout => {
            let rpc = connect(&settings, "/")?;
            match LogoutAction::new(rpc).trigger().await {
                UiEffect::Navigate(url) => println!("Signed out, continue at {url}"),
                other => bail!("logout failed: {}", describe(&other)),
            }
        }
        Command::Upload {
            target,
            login,
            password,
            files,
        } => {
            let (route, target) = match target {
                Target::Graffiti => ("/graffiti/add", settings.graffiti_target()),
                Target::Author => ("/author/add", settings.author_target()),
            };
            let rpc = connect(&settings, route)?;
            if let (Some(login), Some(password)) = (login, password) {
                sign_in(&rpc, login, password).await?;
            }

            let mut selected = Vec::with_capacity(files.len());
            for path in &files {
                let media_type = mime_guess::from_path(path)
                    .first_raw()
                    .unwrap_or("application/octet-stream");
                selected.push(
                    SelectedFile::from_path(path, media_type)
                        .await
                        .with_context(|| format!("failed to stat {}", path.display()))?,
                );
            }

            let uploader = ImageUploader::new(rpc, target);
            let outcome = uploader.upload(selected).await;
            for id in uploader.image_ids().await {
                println!("{id}");
            }
            match outcome {
                UploadOutcome::Completed { uploaded } => info!(uploaded, "upload finished"),
                UploadOutcome::Halted { index, message } => {
                    bail!("upload stopped at {}: {message}", files[index].display())
                }
                UploadOutcome::Rejected(message) => bail!(message),
                UploadOutcome::Busy => bail!("an upload is already running"),
            }
        }
        Command::EncodeSearch { json } => {
            let raw = tokio::fs::read_to_string(&json)
                .await
                .with_context(|| format!("failed to read {}", json.display()))?;
            let filter: SearchOpts =
                serde_json::from_str(&raw).context("search filter is not valid JSON")?;
            let navigator = settings.navigator("/graffitis")?;
            println!("{}", search_query::listing_url(&navigator, &filter)?);
        }
        Command::DecodeSearch { segment } => {
            let filter: SearchOpts = search_query::decode(&segment)?;
            println!("{}", serde_json::to_string_pretty(&filter)?);
        }
    }

    Ok(())
}

fn connect(settings: &ClientSettings, route: &str) -> Result<Arc<RpcClient>> {
    let http = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .context("failed to build http client")?;
    Ok(Arc::new(RpcClient::with_transport(
        settings.navigator(route)?,
        settings.cors_token.clone(),
        Arc::new(HttpRpcTransport::with_client(http)),
    )))
}

async fn sign_in(rpc: &Arc<RpcClient>, login: String, password: String) -> Result<()> {
    match LoginView::new(rpc.clone())
        .submit(LoginForm { login, password })
        .await
    {
        UiEffect::Reload => Ok(()),
        other => bail!("login failed: {}", describe(&other)),
    }
}

fn describe(effect: &UiEffect) -> String {
    match effect {
        UiEffect::ShowError(message) => message.clone(),
        UiEffect::Highlight(fields) => format!("missing {}", fields.join(", ")),
        other => format!("{other:?}"),
    }
}
