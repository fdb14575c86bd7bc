mod config;
mod console;
mod errors;
mod interview;
mod llm_client;
mod questions;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::Interview;
use crate::llm_client::GeminiClient;
use crate::questions::{QuestionGenerator, DEFAULT_MODELS};
use crate::storage::{CandidateStore, DEFAULT_DATA_DIR};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Logs go to stderr so the dialogue on stdout stays readable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting TalentScout interviewer v{}", env!("CARGO_PKG_VERSION"));

    let llm = GeminiClient::new(config.gemini_api_key.clone())?;
    let generator = QuestionGenerator::new(Arc::new(llm.clone()), DEFAULT_MODELS);
    info!("Question generator ready (models: {})", generator.models().join(", "));

    let store = CandidateStore::new(DEFAULT_DATA_DIR);
    info!("Candidate records go to {}", store.dir().display());

    let interview = Interview::new(generator, store);
    console::run(interview, llm).await
}
