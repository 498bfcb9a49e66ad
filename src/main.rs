use std::error::Error;

use tracing_subscriber::EnvFilter;

mod startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from a .env file, if present.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("starting RAG system");

    let state = startup::build_state().await?;
    startup::load_initial_documents(&state.rag).await;

    api::start(state).await?;

    Ok(())
}
