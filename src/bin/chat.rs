//! Terminal front end for the assistant.
//!
//! One-shot mode when a prompt is given as arguments, otherwise an
//! interactive loop. All pipeline behavior lives in the library; this
//! binary only collects input and prints output.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use hedera_assistant::{config::Config, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the terminal clean by default; RUST_LOG still overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hedera_assistant=warn".into()),
        )
        .init();

    let config = Config::from_env()?;
    let session = Session::new(&config);

    // One-shot mode: prompt supplied as arguments.
    let cli_prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !cli_prompt.trim().is_empty() {
        let response = session.dispatch(cli_prompt.trim()).await?;
        println!("{}", response.content);
        return Ok(());
    }

    // Interactive mode.
    println!("Hedera assistant. Type your question, or \"exit\" to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match session.dispatch(input).await {
            Ok(response) => println!("Assistant: {}\n", response.content),
            Err(e) => eprintln!("Error: {}\n", e),
        }
    }

    Ok(())
}
