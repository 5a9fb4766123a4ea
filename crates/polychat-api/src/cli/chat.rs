//! Interactive chat session command.
//!
//! Drives a `ChatSession` against a running API server: history loads
//! from the store on startup, each input runs one exchange, and slash
//! commands cover attachments, feedback, model switching, and clearing.

use std::path::Path;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use polychat_core::repository::MessageRepository;
use polychat_core::session::attachment::declared_media_type;
use polychat_core::session::{Attachment, ChatSession, ExchangeClient};
use polychat_infra::http_client::HttpExchangeClient;
use polychat_infra::sqlite::message::SqliteMessageRepository;
use polychat_types::message::{ChatMessage, Feedback, MessageRole};
use polychat_types::model;

use crate::state::AppState;

/// Run the interactive chat loop until the user quits.
pub async fn run(state: &AppState, user_id: &str, model_id: &str, server: &str) -> Result<()> {
    let repo = SqliteMessageRepository::new(state.db_pool.clone());
    let exchange = HttpExchangeClient::new(server);
    let mut session = ChatSession::new(user_id, repo, exchange);

    session.load_history().await?;

    let mut selected_model = model_id.to_string();
    if model::find(&selected_model).is_none() {
        println!(
            "  {} '{}' is not in the catalog; replies will use the fallback",
            style("!").yellow().bold(),
            selected_model
        );
    }

    println!();
    println!(
        "  {} Chatting as {} with {}",
        style("⚡").bold(),
        style(user_id).cyan(),
        style(&selected_model).cyan()
    );
    println!(
        "  {}",
        style("/attach <file>  /good  /bad  /model <id>  /models  /clear  /quit").dim()
    );
    println!();

    for message in session.messages() {
        render_message(message);
    }

    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim().to_string();

        if line.is_empty() && session.pending_attachment().is_none() {
            continue;
        }

        match line.split_once(' ').map_or((line.as_str(), ""), |(a, b)| (a, b.trim())) {
            ("/quit", _) | ("/exit", _) => break,

            ("/models", _) => super::model::list_models(),

            ("/model", id) => {
                if id.is_empty() {
                    println!("  {} usage: /model <id>", style("!").yellow().bold());
                } else {
                    selected_model = id.to_string();
                    println!(
                        "  {} model set to {}",
                        style("✓").green().bold(),
                        style(&selected_model).cyan()
                    );
                }
            }

            ("/attach", path) => attach_file(&mut session, path).await,

            ("/good", _) => give_feedback(&mut session, Feedback::Positive).await,
            ("/bad", _) => give_feedback(&mut session, Feedback::Negative).await,

            ("/clear", _) => {
                let confirmed = Confirm::new()
                    .with_prompt("Clear the chat history? This cannot be undone.")
                    .default(false)
                    .interact()?;
                if confirmed {
                    let deleted = session.clear().await?;
                    println!(
                        "  {} cleared {} messages",
                        style("✓").green().bold(),
                        deleted
                    );
                }
            }

            _ => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message(format!("Waiting for {selected_model}..."));
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));

                let reply = session.send(&line, &selected_model).await.cloned();

                spinner.finish_and_clear();

                if let Some(reply) = reply {
                    render_message(&reply);
                }
            }
        }
    }

    Ok(())
}

/// Stage a text or PDF attachment for the next send.
async fn attach_file<R: MessageRepository, X: ExchangeClient>(
    session: &mut ChatSession<R, X>,
    path: &str,
) {
    if path.is_empty() {
        println!("  {} usage: /attach <file>", style("!").yellow().bold());
        return;
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());

    // Media type comes from the declared extension alone; the bytes are
    // never sniffed.
    let Some(media_type) = declared_media_type(&file_name) else {
        println!(
            "  {} Please attach only .txt or .pdf files",
            style("✗").red().bold()
        );
        return;
    };

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            println!("  {} cannot read {path}: {err}", style("✗").red().bold());
            return;
        }
    };

    match Attachment::from_bytes(&file_name, media_type, &bytes) {
        Ok(attachment) => {
            println!(
                "  {} attached {} ({} chars)",
                style("✓").green().bold(),
                style(&attachment.name).cyan(),
                attachment.text.chars().count()
            );
            session.attach(attachment);
        }
        Err(err) => println!("  {} {err}", style("✗").red().bold()),
    }
}

/// Record feedback on the most recent real assistant message.
async fn give_feedback<R: MessageRepository, X: ExchangeClient>(
    session: &mut ChatSession<R, X>,
    feedback: Feedback,
) {
    let target = session
        .messages()
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant && !m.is_synthetic())
        .map(|m| m.id);

    let Some(id) = target else {
        println!(
            "  {} nothing to rate yet",
            style("!").yellow().bold()
        );
        return;
    };

    match session.record_feedback(&id, feedback).await {
        Ok(()) => println!(
            "  {} feedback recorded: {feedback}",
            style("✓").green().bold()
        ),
        Err(err) => println!("  {} {err}", style("✗").red().bold()),
    }
}

/// Print one message in the transcript style.
fn render_message(message: &ChatMessage) {
    match message.role {
        MessageRole::User => {
            println!("  {} {}", style("you ❯").bold().cyan(), message.content);
        }
        MessageRole::Assistant => {
            let tag = message.model.as_deref().unwrap_or("offline");
            let feedback = match message.feedback {
                Some(Feedback::Positive) => " 👍",
                Some(Feedback::Negative) => " 👎",
                None => "",
            };
            println!(
                "  {}{}",
                style(format!("{tag} ❯")).dim(),
                style(feedback).dim()
            );
            for line in message.content.lines() {
                println!("  {line}");
            }
        }
    }
    println!();
}
