//! Ask command - one conversation exchange without the dashboard

use std::sync::Arc;

use aegis_core::{
    AegisConfig, ConversationController, Message, SimulatedConversation, SubmitOutcome, Template,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Question text (words are joined with spaces)
    #[arg(required_unless_present = "template")]
    pub text: Vec<String>,

    /// Start from a prompt template (health, climate, policy)
    #[arg(long, short)]
    pub template: Option<Template>,

    /// Override the simulated reply delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Print the conversation as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_ask(args: AskArgs, mut config: AegisConfig) -> Result<()> {
    if let Some(ms) = args.delay_ms {
        config.conversation.response_delay_ms = ms;
    }

    let backend = Arc::new(SimulatedConversation::new(config.conversation.delay()));
    let mut chat = ConversationController::new(backend).with_deadline(config.conversation.deadline());

    if let Some(template) = args.template {
        chat.apply_template(template);
    }
    if !args.text.is_empty() {
        chat.set_input(args.text.join(" "));
    }

    match chat.submit_input() {
        SubmitOutcome::Sent => info!("waiting for reply"),
        SubmitOutcome::Empty => bail!("Nothing to ask: the question is empty"),
        other => bail!("Question was not sent ({:?})", other),
    }

    chat.settle().await;

    if let Some(failure) = chat.failure() {
        bail!("Reply failed: {}", failure.error);
    }

    if args.json {
        let json = serde_json::to_string_pretty(chat.messages())
            .context("Failed to serialize conversation")?;
        println!("{}", json);
    } else {
        for message in chat.messages() {
            print_message(message);
        }
    }

    Ok(())
}

fn print_message(message: &Message) {
    let speaker = if message.is_user() { "You" } else { "AEGIS" };
    println!("{}: {}", speaker, message.content);

    let citations = message.citations();
    if !citations.is_empty() {
        println!("  Sources:");
        for citation in citations {
            println!(
                "    • {} [{}] {}",
                citation.source,
                citation.category.label(),
                citation.url
            );
        }
    }
    println!();
}
