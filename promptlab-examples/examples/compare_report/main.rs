use anyhow::Result;
use serde_json::json;
use promptlab::config::PlaygroundConfig;
use promptlab::playground::Playground;
use promptlab::technique::{Technique, TechniqueCall};
use promptlab::utils::printing::ComparisonPrinter;

const PROMPT: &str = "Explain quantum computing to a 5-year-old";

/// Needs OPENAI_API_KEY in the environment.
#[tokio::main]
async fn main() -> Result<()> {
    println!("available techniques:");
    for technique in Technique::ALL {
        println!("  {}: {}", technique.name(), technique.description());
    }
    println!();

    let playground = Playground::new(PlaygroundConfig::default());

    // preview before spending anything
    let estimate = playground.estimate(&TechniqueCall::ZeroShot { prompt: PROMPT.to_string() })?;
    println!("zero-shot prompt: {} tokens, about ${}\n", estimate.prompt_tokens, estimate.cost);

    let comparison = playground.compare(PROMPT, None).await;
    ComparisonPrinter::default().print(&comparison);

    let args = json!({"problem": "A train travels 120 miles in 2 hours. What is its speed?"})
        .as_object()
        .expect("object literal")
        .clone();
    let record = playground.record("Chain-of-Thought Prompting", &args).await?;
    println!(
        "\nrecorded {} ({} tokens, ${})",
        record.technique, record.output.tokens, record.output.cost
    );
    Ok(())
}
