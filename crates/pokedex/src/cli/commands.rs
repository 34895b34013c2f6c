use super::browse;
use super::render::{render_created, render_error, render_page, render_violations};
use super::setup::{Cli, Commands};
use crate::client::HttpClient;
use crate::server::{self, AppState};
use anyhow::{bail, Context};
use pokedexapp::api::PokedexApi;
use pokedexapp::config::PokedexConfig;
use pokedexapp::model::{CreateOutcome, NewRecord, PageResponse};
use pokedexapp::query::PageQuery;
use pokedexapp::store::fs::FileStore;
use pokedexapp::store::memory::InMemoryStore;
use pokedexapp::store::RecordStore;
use pokedexapp::validation::candidate_from_form;
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Where list and create calls go: the data file, or a running server.
pub enum Connection {
    Local(PokedexApi<Box<dyn RecordStore>>),
    Remote(HttpClient),
}

impl Connection {
    pub fn open(config: &PokedexConfig, local: bool) -> anyhow::Result<Self> {
        if local {
            return Ok(Connection::Local(open_api(config)?));
        }
        let client = HttpClient::new(
            &config.server_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Connection::Remote(client))
    }

    pub async fn list(&self, query: &PageQuery) -> anyhow::Result<PageResponse> {
        match self {
            Connection::Local(api) => Ok(api.list_page(
                Some(query.page),
                Some(query.page_size),
                query.query.as_deref(),
            )?),
            Connection::Remote(client) => Ok(client.list_page(query).await?),
        }
    }

    pub async fn create(&self, candidate: NewRecord) -> CreateOutcome {
        match self {
            Connection::Local(api) => api.create_record(candidate).into(),
            Connection::Remote(client) => client.create_record(&candidate).await,
        }
    }
}

/// The configured store: the data file when set, else in memory.
pub fn open_store(config: &PokedexConfig) -> anyhow::Result<Box<dyn RecordStore>> {
    match &config.data_file {
        Some(path) => {
            let store = FileStore::open_file(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(store))
        }
        None => {
            warn!("no data file configured, records are kept in memory only");
            Ok(Box::new(InMemoryStore::new()))
        }
    }
}

fn open_api(config: &PokedexConfig) -> anyhow::Result<PokedexApi<Box<dyn RecordStore>>> {
    Ok(PokedexApi::new(open_store(config)?).with_default_page_size(config.page_size()))
}

pub async fn dispatch(cli: Cli, config: PokedexConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { .. } => serve(&config).await,
        Commands::List {
            page,
            page_size,
            query,
        } => {
            let connection = Connection::open(&config, cli.local)?;
            let page_size = page_size.unwrap_or_else(|| config.page_size());
            list(&connection, PageQuery::new(page, page_size, query)).await
        }
        Commands::Create { name, types, sprite } => {
            let connection = Connection::open(&config, cli.local)?;
            create(&connection, candidate_from_form(&name, &types, &sprite)).await
        }
        Commands::Import { file } => {
            let connection = Connection::open(&config, cli.local)?;
            import(&connection, &file).await
        }
        Commands::Browse { page_size, query } => {
            let connection = Connection::open(&config, cli.local)?;
            let page_size = page_size.unwrap_or(config.default_page_size);
            browse::run(connection, page_size, query).await
        }
    }
}

async fn serve(config: &PokedexConfig) -> anyhow::Result<()> {
    let api = open_api(config)?;
    let location = match &config.data_file {
        Some(path) => path.display().to_string(),
        None => "memory".to_string(),
    };
    info!(store = %location, default_page_size = api.default_page_size(), "opened store");
    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    server::serve(listener, AppState::new(api)).await?;
    Ok(())
}

async fn list(connection: &Connection, query: PageQuery) -> anyhow::Result<()> {
    let page = connection.list(&query).await?;
    let page_number = usize::try_from(query.page).unwrap_or(1);
    let page_size = usize::try_from(query.page_size.max(1)).unwrap_or(usize::MAX);
    print!("{}", render_page(&page, page_number, page_size));
    Ok(())
}

async fn create(connection: &Connection, candidate: NewRecord) -> anyhow::Result<()> {
    match connection.create(candidate).await {
        CreateOutcome::Created(record) => {
            println!("{}", render_created(&record));
            Ok(())
        }
        CreateOutcome::Invalid(violations) => {
            eprintln!("{}", render_violations(&violations));
            bail!("record was not created")
        }
        CreateOutcome::Failed(message) => bail!(message),
    }
}

async fn import(connection: &Connection, file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let candidates: Vec<NewRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of records", file.display()))?;

    let total = candidates.len();
    let mut created = 0;
    for (i, candidate) in candidates.into_iter().enumerate() {
        match connection.create(candidate).await {
            CreateOutcome::Created(record) => {
                created += 1;
                println!("{:>3}: {}", i + 1, render_created(&record));
            }
            CreateOutcome::Invalid(violations) => {
                eprintln!("{:>3}: rejected", i + 1);
                eprintln!("{}", render_violations(&violations));
            }
            CreateOutcome::Failed(message) => {
                eprintln!("{:>3}: {}", i + 1, render_error(&message));
            }
        }
    }

    println!("Imported {} of {} records", created, total);
    if created < total {
        bail!("{} records were not imported", total - created);
    }
    Ok(())
}
