//! `ddesk`, the dispatch-registry console.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use dispatchdesk::api::{ApiClient, DocumentService};
use dispatchdesk::chat::ChatTranscript;
use dispatchdesk::config::load_settings;
use dispatchdesk::notice::{Locale, Notice};
use dispatchdesk::search::{SearchOutcome, SearchPresenter};
use dispatchdesk::state::AppState;
use dispatchdesk::term;
use dispatchdesk::upload::{FilePart, UploadForm};
use dispatchdesk::view::{document_cards, document_page, registry_stats_rows, stats_rows};
use dispatchdesk::{ApiError, Settings};

#[derive(Parser)]
#[command(name = "ddesk", version)]
#[command(about = "Console and web front for a dispatch-registry document API")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Registry API base URL
    #[arg(long, global = true, env = "DISPATCHDESK_API_URL")]
    api_url: Option<String>,

    /// Display language (vi or en)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web interface
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// List the registry's documents
    List,

    /// Search the registry
    Search {
        /// Search terms; blank input shows the full list
        query: String,
    },

    /// Interactive search session
    Browse,

    /// Show one document in full
    Show { id: String },

    /// Upload a document
    Upload(UploadArgs),

    /// Download a document's original file
    Download {
        id: String,

        /// Treat the id as an attachment id
        #[arg(long)]
        attachment: bool,

        /// Directory to write into (defaults to the configured downloads dir)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Talk to the registry assistant
    Chat {
        /// One-shot message; omit for an interactive session
        message: Option<String>,
    },

    /// Registry-wide statistics
    Stats,

    /// Check the registry connection
    Health,
}

#[derive(Args)]
struct UploadArgs {
    /// The document file (pdf, doc, docx or txt)
    file: PathBuf,

    /// Title; defaults to the file name
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    document_type: Option<String>,

    #[arg(long)]
    document_number: Option<String>,

    #[arg(long)]
    sender: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,

    #[arg(long)]
    priority: Option<String>,

    /// Extra file to attach; repeatable
    #[arg(long = "attach", value_name = "FILE")]
    attachments: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("dispatchdesk={level}").parse()?)
                .add_directive(format!("ddesk={level}").parse()?)
                .add_directive(format!("tower_http={level}").parse()?),
        )
        .init();

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(api_url) = cli.api_url.as_deref() {
        settings.api_base_url = api_url.trim_end_matches('/').to_string();
    }
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }

    match cli.command {
        Commands::Serve { host, port } => dispatchdesk::server::serve(&settings, &host, port).await,
        Commands::List => cmd_list(&settings).await,
        Commands::Search { query } => cmd_search(&settings, &query).await,
        Commands::Browse => cmd_browse(&settings).await,
        Commands::Show { id } => cmd_show(&settings, &id).await,
        Commands::Upload(args) => cmd_upload(&settings, args).await,
        Commands::Download {
            id,
            attachment,
            output,
        } => cmd_download(&settings, &id, attachment, output).await,
        Commands::Chat { message } => cmd_chat(&settings, message).await,
        Commands::Stats => cmd_stats(&settings).await,
        Commands::Health => cmd_health(&settings).await,
    }
}

async fn cmd_list(settings: &Settings) -> Result<()> {
    let client = ApiClient::new(settings)?;

    let mut state = AppState::new();
    state.documents_loaded(client.list_documents().await?);
    print_document_list(&state, settings.locale);
    Ok(())
}

fn print_document_list(state: &AppState, locale: Locale) {
    let cards = document_cards(state.documents(), locale);
    if cards.is_empty() {
        println!("{}", term::empty_registry(locale));
        return;
    }
    println!("{}", term::document_list(&cards, locale));
    let stats = state.stats(Local::now().naive_local());
    println!("{}", term::labelled_rows(&stats_rows(&stats, locale)));
}

async fn cmd_search(settings: &Settings, query: &str) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let locale = settings.locale;

    let mut state = AppState::new();
    // Blank input falls back to the full list, like the web UI.
    if query.trim().is_empty() {
        state.documents_loaded(client.list_documents().await?);
    }

    let presenter = SearchPresenter::new(&client, locale);
    match presenter.search(&mut state, query).await {
        SearchOutcome::Reset => print_document_list(&state, locale),
        SearchOutcome::Empty { .. } => {
            println!("{}", term::notice_line(&Notice::info(locale.no_results())));
        }
        SearchOutcome::Results(view) => println!("{}", term::search_results(&view, locale)),
        SearchOutcome::Superseded => {}
        SearchOutcome::Failed(notice) => bail!("{}", notice.message),
    }
    Ok(())
}

async fn cmd_browse(settings: &Settings) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let locale = settings.locale;

    let mut state = AppState::new();
    state.documents_loaded(client.list_documents().await?);
    print_document_list(&state, locale);

    let terminal = console::Term::stdout();
    let presenter = SearchPresenter::new(&client, locale);
    loop {
        terminal.write_str("> ")?;
        let line = terminal.read_line()?;
        let input = line.trim();
        if matches!(input, "q" | "quit" | "exit") {
            break;
        }
        match presenter.search(&mut state, input).await {
            SearchOutcome::Reset => print_document_list(&state, locale),
            SearchOutcome::Empty { .. } => {
                println!("{}", term::notice_line(&Notice::info(locale.no_results())));
            }
            SearchOutcome::Results(view) => println!("{}", term::search_results(&view, locale)),
            SearchOutcome::Superseded => {}
            SearchOutcome::Failed(notice) => println!("{}", term::notice_line(&notice)),
        }
    }
    Ok(())
}

async fn cmd_show(settings: &Settings, id: &str) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let locale = settings.locale;

    let document = client.get_document(id).await?;
    let page = document_page(&document, locale);
    println!("{}", term::document_page(&page, locale));
    Ok(())
}

async fn cmd_upload(settings: &Settings, args: UploadArgs) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let locale = settings.locale;

    let form = UploadForm {
        file: Some(read_file_part(&args.file)?),
        title: args.title.unwrap_or_default(),
        document_type: args.document_type.unwrap_or_default(),
        document_number: args.document_number.unwrap_or_default(),
        sender: args.sender.unwrap_or_default(),
        tags: args.tags.unwrap_or_default(),
        priority: args.priority.unwrap_or_default(),
        attachments: args
            .attachments
            .iter()
            .map(|path| read_file_part(path))
            .collect::<Result<_>>()?,
    };
    let payload = form
        .prepare()
        .map_err(|err| anyhow::anyhow!(err.notice(locale).message))?;

    let spinner = progress_spinner(args.file.display().to_string());
    let outcome = client.upload(payload).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(document) => {
            println!("{}", term::notice_line(&Notice::success(locale.upload_ok())));
            if let Some(document) = document {
                println!("id: {}", document.id);
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!("upload rejected: {err}");
            let message = match err.server_message() {
                Some(text) => text.to_string(),
                None => match err {
                    ApiError::Status { .. } => locale.generic_error().to_string(),
                    _ => locale.upload_failed().to_string(),
                },
            };
            bail!("{message}");
        }
    }
}

fn progress_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").expect("template is valid"));
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn read_file_part(path: &Path) -> Result<FilePart> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(FilePart::new(filename, bytes))
}

async fn cmd_download(
    settings: &Settings,
    id: &str,
    attachment: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let locale = settings.locale;

    let dir = match output {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            dir
        }
        None => {
            settings
                .ensure_directories()
                .context("creating the downloads directory")?;
            settings.downloads_dir.clone()
        }
    };

    let spinner = progress_spinner(id.to_string());
    let result = if attachment {
        client.download_attachment(id).await
    } else {
        client.download_document(id).await
    };
    spinner.finish_and_clear();

    let file = result.with_context(|| locale.download_failed().to_string())?;
    let path = file.write_to_dir(&dir)?;
    let saved = locale.saved_file(&path.display().to_string());
    println!("{}", term::notice_line(&Notice::success(saved)));
    Ok(())
}

async fn cmd_chat(settings: &Settings, message: Option<String>) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let locale = settings.locale;
    let mut transcript = ChatTranscript::new(locale);

    if let Some(message) = message {
        let message = message.trim().to_string();
        if message.is_empty() {
            bail!("empty message");
        }
        for rendered in exchange(&client, &mut transcript, &message).await {
            println!("{rendered}");
        }
        return Ok(());
    }

    for entry in transcript.entries() {
        println!("{}", term::chat_entry(entry));
    }
    let terminal = console::Term::stdout();
    loop {
        terminal.write_str("> ")?;
        let line = terminal.read_line()?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "q" | "quit" | "exit") {
            break;
        }
        for rendered in exchange(&client, &mut transcript, input).await {
            println!("{rendered}");
        }
    }
    Ok(())
}

/// Send one message and return the assistant entries it produced, rendered.
async fn exchange(client: &ApiClient, transcript: &mut ChatTranscript, message: &str) -> Vec<String> {
    transcript.push_user(message);
    let from = transcript.entries().len();
    match client.chat(transcript.session_id(), message).await {
        Ok(reply) => transcript.push_reply(reply),
        Err(err) => {
            tracing::warn!("chat request failed: {err}");
            transcript.push_failure();
        }
    }
    transcript.entries()[from..]
        .iter()
        .map(term::chat_entry)
        .collect()
}

async fn cmd_stats(settings: &Settings) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let stats = client.statistics().await?;
    let rows = registry_stats_rows(&stats, settings.locale);
    println!("{}", term::labelled_rows(&rows));
    Ok(())
}

async fn cmd_health(settings: &Settings) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let health = client
        .health()
        .await
        .with_context(|| format!("no registry behind {}", client.base_url()))?;

    let text = health.message.unwrap_or(health.status);
    if health.success {
        println!("{}", term::notice_line(&Notice::success(text)));
        Ok(())
    } else {
        bail!("{text}");
    }
}
