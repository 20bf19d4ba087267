//! Sends one sample layout request straight to the completion API and prints
//! the raw HTTP status and body. Handy for checking keys and model names.

use anyhow::{bail, Result};
use clap::Parser;

use tinyhome_api::errors::excerpt;
use tinyhome_api::layout::prompts::build_layout_messages;
use tinyhome_api::{ChatClient, Config, LayoutRequest, LlmError};

/// Max characters of the response body printed.
const BODY_PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Parser)]
#[command(name = "probe", about = "Probe the chat-completion API with a sample layout prompt")]
struct Args {
    /// Number of occupants
    #[arg(long, default_value_t = 2)]
    people: u32,

    #[arg(long, default_value = "50000")]
    budget: String,

    #[arg(long, default_value = "kitchen,bathroom")]
    needs: String,

    #[arg(long)]
    climate: Option<String>,

    #[arg(long)]
    style: Option<String>,

    /// Override LLM_MODEL for this call
    #[arg(long, env = "LLM_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(model) = args.model {
        config.llm.model = model;
    }

    let request = LayoutRequest {
        occupant_count: args.people.max(1),
        budget: args.budget,
        needs: args.needs,
        climate: args.climate,
        style: args.style,
    };
    let (system, user) = build_layout_messages(&request);

    let client = ChatClient::new(config.llm)?;
    let reply = match client.send_raw(system, &user).await {
        Ok(reply) => reply,
        Err(LlmError::MissingApiKey) => bail!("LLM_API_KEY is not set; nothing was sent"),
        Err(e) => return Err(e.into()),
    };

    println!("Status Code: {}", reply.status);
    println!("Response: {}", excerpt(&reply.body, BODY_PREVIEW_CHARS));

    Ok(())
}
