use crate::auth::AuthGate;
use crate::config::Config;
use crate::corpus::Corpus;
use crate::dispatch::McpServer;
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Application state shared across all request handlers.
/// Everything in here is immutable after construction except the ready flag.
pub struct AppState {
    pub server: Arc<McpServer>,
    pub auth: AuthGate,
    /// Flag indicating the corpus and tool catalog are loaded
    pub ready: AtomicBool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the corpus (built-in or from `CORPUS_PATH`), the dispatcher and
    /// the auth gate.
    pub fn new(config: Config) -> Result<Self> {
        let corpus = match &config.corpus_path {
            Some(path) => Corpus::from_path(path)?,
            None => Corpus::builtin(),
        };

        tracing::info!(documents = corpus.len(), "Corpus ready");

        let server = McpServer::new(Arc::new(corpus));

        tracing::info!(
            methods = ?server.methods(),
            tools = server.tools().len(),
            "Dispatcher ready"
        );

        let state = Self {
            server: Arc::new(server),
            auth: AuthGate::new(&config.token),
            ready: AtomicBool::new(false),
            config: Arc::new(config),
        };

        state.ready.store(true, Ordering::SeqCst);

        Ok(state)
    }

    /// Check if the service is ready to handle requests.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
