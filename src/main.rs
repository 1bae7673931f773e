use clap::Parser;
use kitchen_critic::{
    ChatCompletionClient, CommentaryPipeline, EmojiCatalog, DEFAULT_PROMPT,
};
use std::path::PathBuf;
use tracing::{error, info};

/// Resolve an emoji-kitchen combination and generate a snark commentary
/// for the pair.
#[derive(Parser)]
#[command(name = "kitchen-critic")]
struct Cli {
    /// Path to the emoji metadata JSON file.
    catalog: PathBuf,

    /// Codepoint id of the left emoji.
    left: String,

    /// Codepoint id of the right emoji.
    right: String,

    /// Prompt template to use instead of the built-in one. Read from a file
    /// if the value names one, otherwise used literally.
    #[arg(long)]
    prompt: Option<String>,

    /// Only resolve the combination, skip the generation call.
    #[arg(long)]
    no_commentary: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let catalog = EmojiCatalog::from_file(&cli.catalog)?;
    info!("Loaded catalog with {} emoji", catalog.len());

    match catalog.resolve(&cli.left, &cli.right) {
        Some(variant) => {
            println!("Combination: {} ({})", variant.alt, variant.g_static_url);
        }
        None => {
            println!("No combination for ({}, {})", cli.left, cli.right);
        }
    }

    if cli.no_commentary {
        return Ok(());
    }

    let template = match &cli.prompt {
        Some(value) => {
            let path = PathBuf::from(value);
            if path.is_file() {
                std::fs::read_to_string(path)?
            } else {
                value.clone()
            }
        }
        None => DEFAULT_PROMPT.to_string(),
    };

    let client = ChatCompletionClient::try_from_env()?;
    let mut pipeline = CommentaryPipeline::new(client);

    match pipeline.generate(&catalog, &cli.left, &cli.right, &template).await {
        Ok(Some(commentary)) => {
            println!("组合: {}", commentary.combination);
            println!("解读: {}", commentary.interpretation);
            println!("锐评: {}", commentary.critique);
            println!("补刀: {}", commentary.postscript);
        }
        Ok(None) => {
            println!("Selection incomplete or unknown; nothing generated.");
        }
        Err(e) => {
            // A failed attempt is a displayable outcome, not a crash; it is
            // already recorded in history.
            error!("Generation failed: {}", e);
            println!("Generation failed: {}", e);
        }
    }

    info!("{} attempt(s) in history", pipeline.history_len());
    Ok(())
}
