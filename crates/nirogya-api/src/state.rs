//! Application state wiring the workflows together.
//!
//! The workflows are generic over repository/storage/client traits, but
//! AppState pins them to the concrete infra implementations. Everything is
//! constructed once at startup; handlers never touch the environment.

use std::sync::Arc;

use nirogya_core::analysis::workflow::AnalysisWorkflow;
use nirogya_core::chat::assistant::ChatAssistant;
use nirogya_infra::config::AppConfig;
use nirogya_infra::llm::{ChatCompletionsClient, ResolvedProvider};
use nirogya_infra::sqlite::appointment::SqliteAppointmentRepository;
use nirogya_infra::sqlite::file::SqliteFileRepository;
use nirogya_infra::sqlite::pool::DatabasePool;
use nirogya_infra::sqlite::summary::SqliteSummaryRepository;
use nirogya_infra::storage::LocalObjectStore;

/// Concrete type aliases for the workflow generics pinned to infra
/// implementations.
pub type ConcreteWorkflow =
    AnalysisWorkflow<SqliteSummaryRepository, LocalObjectStore, ChatCompletionsClient>;

pub type ConcreteAssistant =
    ChatAssistant<SqliteSummaryRepository, SqliteAppointmentRepository, ChatCompletionsClient>;

/// Shared application state holding the wired workflows and repositories.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<ConcreteWorkflow>,
    pub assistant: Arc<ConcreteAssistant>,
    pub files: Arc<SqliteFileRepository>,
    pub appointments: Arc<SqliteAppointmentRepository>,
    pub uploads: Arc<LocalObjectStore>,
    /// Model and provider identifiers for span attributes.
    pub model: String,
    pub provider: &'static str,
}

impl AppState {
    /// Initialize the application state: connect to the database, resolve
    /// the completion provider, wire the workflows.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let database_url = config.database_url();
        let uploads_dir = config.uploads_dir();
        let db_pool = DatabasePool::new(&database_url).await?;

        // Provider resolution happens once here; a missing credential fails
        // startup instead of every request.
        let provider =
            ResolvedProvider::resolve(config.openrouter_api_key, config.openai_api_key)?;
        let client = ChatCompletionsClient::new(provider, config.model_override)?;
        let model = client.model().to_string();
        let provider_name = client.provider().name();

        let workflow = AnalysisWorkflow::new(
            SqliteSummaryRepository::new(db_pool.clone()),
            LocalObjectStore::new(uploads_dir.clone()),
            client.clone(),
        );

        let assistant = ChatAssistant::new(
            SqliteSummaryRepository::new(db_pool.clone()),
            SqliteAppointmentRepository::new(db_pool.clone()),
            client,
        );

        Ok(Self {
            workflow: Arc::new(workflow),
            assistant: Arc::new(assistant),
            files: Arc::new(SqliteFileRepository::new(db_pool.clone())),
            appointments: Arc::new(SqliteAppointmentRepository::new(db_pool)),
            uploads: Arc::new(LocalObjectStore::new(uploads_dir)),
            model,
            provider: provider_name,
        })
    }
}
