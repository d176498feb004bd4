use pagerag_client::RagClient;
use pagerag_common::config::RagConfig;

#[derive(Clone)]
pub struct AppState {
    pub client: RagClient,
    pub config: RagConfig,
}

impl AppState {
    pub fn new(config: &RagConfig) -> anyhow::Result<Self> {
        let client = RagClient::new(config)?;
        tracing::info!("RAG client configured at {}", config.base_url);

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}
