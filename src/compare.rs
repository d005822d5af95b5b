//! # Comparison runner
//!
//! Runs one prompt across several techniques side by side. Each technique gets the
//! shared prompt adapted to its own parameter shape. A technique that fails, or a
//! name that matches nothing, yields an isolated error entry and never aborts the
//! rest of the batch.

use std::collections::HashMap;
use serde::Serialize;

use crate::backend::Complete;
use crate::playground::{Playground, PromptResult};
use crate::pricing;
use crate::technique::{Technique, TechniqueCall};

/// Techniques compared when the caller does not pick any.
pub const DEFAULT_COMPARISON: [&str; 3] = [
    "Zero-Shot Prompting",
    "Few-Shot Prompting",
    "Chain-of-Thought Prompting",
];

/// One technique's slot in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparisonEntry {
    Completed(PromptResult),
    Failed { error: String },
}

/// Side-by-side outputs of one prompt across several techniques.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub prompt: String,
    pub techniques_compared: usize,
    pub results: HashMap<String, ComparisonEntry>,
    pub total_tokens: u32,
    pub total_cost: f64,
}

impl Comparison {
    /// Render the comparison as a markdown report, techniques in name order.
    pub fn to_markdown(&self) -> String {
        let mut report = format!(
            "# Technique Comparison\n\n**Prompt:** {}\n\n**Techniques:** {} | **Total tokens:** {} | **Total cost:** ${}\n",
            self.prompt, self.techniques_compared, self.total_tokens, self.total_cost,
        );
        let mut names: Vec<&String> = self.results.keys().collect();
        names.sort();
        for name in names {
            report.push_str(&format!("\n## {}\n\n", name));
            match &self.results[name] {
                ComparisonEntry::Completed(result) => {
                    report.push_str(&format!("{}\n\n*Tokens: {} | Cost: ${}*\n", result.response, result.tokens, result.cost));
                }
                ComparisonEntry::Failed { error } => {
                    report.push_str(&format!("**Error:** {}\n", error));
                }
            }
        }
        report
    }
}

/// Adapt the shared prompt to one technique's parameter shape.
fn comparison_call(technique: Technique, prompt: &str) -> TechniqueCall {
    match technique {
        Technique::ZeroShot => TechniqueCall::ZeroShot { prompt: prompt.to_string() },
        Technique::FewShot => TechniqueCall::FewShot {
            prompt: format!("Translate to French: {}", prompt),
            examples: None,
        },
        Technique::ChainOfThought => TechniqueCall::ChainOfThought { problem: prompt.to_string() },
        Technique::RolePlaying => TechniqueCall::RolePlaying {
            role: "expert consultant".to_string(),
            task: prompt.to_string(),
        },
        Technique::PersonaBased => TechniqueCall::PersonaBased {
            persona: "experienced professional".to_string(),
            query: prompt.to_string(),
        },
        Technique::ReAct => TechniqueCall::ReAct { task: prompt.to_string() },
        Technique::SelfConsistency => TechniqueCall::SelfConsistency {
            problem: prompt.to_string(),
            num_samples: None,
        },
        Technique::TreeOfThoughts => TechniqueCall::TreeOfThoughts { problem: prompt.to_string() },
    }
}

impl<B: Complete> Playground<B> {
    /// Run `prompt` through each named technique ([DEFAULT_COMPARISON] when `None`),
    /// accumulating tokens and (rounded) cost over the completed entries.
    pub async fn compare(&self, prompt: &str, techniques: Option<&[&str]>) -> Comparison {
        let names: Vec<&str> = techniques.map_or_else(|| DEFAULT_COMPARISON.to_vec(), <[&str]>::to_vec);

        let mut results = HashMap::with_capacity(names.len());
        let mut total_tokens: u32 = 0;
        let mut total_cost: f64 = 0.0;
        for name in &names {
            let entry = match Technique::from_name(name) {
                None => ComparisonEntry::Failed { error: "Technique not found".to_string() },
                Some(technique) => {
                    let result = self.run(comparison_call(technique, prompt)).await;
                    total_tokens += result.tokens;
                    total_cost += result.cost;
                    ComparisonEntry::Completed(result)
                }
            };
            results.insert(name.to_string(), entry);
        }

        Comparison {
            prompt: prompt.to_string(),
            techniques_compared: names.len(),
            results,
            total_tokens,
            total_cost: pricing::round_usd(total_cost),
        }
    }
}
