//! Interactive smoke-test loop for the retrieval pipeline
//!
//! Reads questions from stdin and prints the generated narrative with the
//! retrieval context summary. Credentials come from the environment
//! (OPENAI_API_KEY, NEWS_API_KEY, NEO4J_URI/NEO4J_USER/NEO4J_PASSWORD).

use finrag_engine::{EngineConfig, RetrievalOrchestrator};
use finrag_llm::providers::{OpenAiEmbeddings, OpenAiProvider};
use std::io::{BufRead, Write};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    finrag_utils::init_tracing();

    let mut config = EngineConfig::default().with_env_credentials();
    config.generation_model = finrag_utils::env_or("FINRAG_MODEL", &config.generation_model);
    let generator = Arc::new(OpenAiProvider::from_env()?);
    let embedder = Arc::new(OpenAiEmbeddings::from_env()?);

    let orchestrator = RetrievalOrchestrator::from_config(config, generator, embedder).await?;

    println!("Financial RAG - ask a question, or 'quit' to exit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if matches!(query, "quit" | "exit" | "q") {
            break;
        }

        let bundle = orchestrator.answer(query).await;

        println!("\n{}\n", bundle.answer);
        if !bundle.tickers.is_empty() {
            println!("Tickers: {}", bundle.tickers.join(", "));
        }
        if !bundle.ranked_articles.is_empty() {
            println!("Sources:");
            for doc in bundle.ranked_articles.iter().take(3) {
                println!(
                    "  - {} ({}) score {:.3}",
                    doc.metadata.title, doc.metadata.source, doc.score
                );
            }
        }
        println!();
    }

    Ok(())
}
