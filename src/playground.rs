//! # Playground
//!
//! The playground owns a completion backend plus a [PlaygroundConfig] and exposes the
//! technique operations on top of them.
//!
//! Every operation builds a deterministic message sequence (a fixed technique-specific
//! system string followed by user text produced by filling a fixed template) and issues
//! exactly one completion request. Self-consistency is the one exception: it issues
//! `num_samples` sequential requests at an elevated sampling temperature and aggregates
//! the paths into one labeled report.
//!
//! [Playground::run] never fails; a backend failure becomes a [PromptResult] whose text
//! is an error message prefixed with the technique name, with zero tokens and zero cost,
//! so display code renders success and failure the same way. [Playground::run_checked]
//! is the typed-union variant underneath it.

use anyhow::Result;
use lazy_static::lazy_static;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::backend::{ChatMsg, Complete, Completion, CompletionRequest, OpenAiBackend};
use crate::config::PlaygroundConfig;
use crate::pricing;
use crate::prompt::PromptTemplate;
use crate::technique::{Exemplar, Technique, TechniqueCall};
use crate::technique::errors::DispatchError;
use crate::utils::JsonMap;
use crate::utils::token::tiktoken::{max_tokens, Tiktoken};

/// Sampling temperature for self-consistency paths. Higher than the backend default
/// to encourage diverse reasoning.
pub const SELF_CONSISTENCY_TEMPERATURE: f32 = 0.7;

const ZERO_SHOT_SYSTEM: &str = "You are a helpful assistant.";
const FEW_SHOT_SYSTEM: &str = "You are a helpful translation assistant.";
const CHAIN_OF_THOUGHT_SYSTEM: &str = "You are an expert problem solver who explains reasoning clearly.";
const REACT_SYSTEM: &str = "You are an AI assistant that uses the ReAct framework (Reasoning + Acting) to solve problems step by step.";
const SELF_CONSISTENCY_SYSTEM: &str = "You are an expert problem solver. Think step by step and show your reasoning.";
const TREE_OF_THOUGHTS_SYSTEM: &str = "You are an expert at exploring multiple solution paths and selecting the best approach.";

lazy_static! {
    static ref CHAIN_OF_THOUGHT_TEMPLATE: PromptTemplate = PromptTemplate::new(
        r#"Let's solve this problem step by step:
{{problem}}

Break down your reasoning into clear, logical steps:
1. First, identify the key components of the problem.
2. Then, outline the approach to solve it.
3. Show the detailed calculation or reasoning.
4. Provide the final solution."#);

    static ref ROLE_SYSTEM_TEMPLATE: PromptTemplate = PromptTemplate::new("You are a {{role}}.");

    static ref ROLE_PLAYING_TEMPLATE: PromptTemplate = PromptTemplate::new(
        r#"You are a {{role}}.
Task: {{task}}

Please respond as if you were truly in this role, using appropriate language,
expertise, and perspective of the assigned persona."#);

    static ref PERSONA_SYSTEM_TEMPLATE: PromptTemplate = PromptTemplate::new("You are a {{persona}}");

    static ref PERSONA_TEMPLATE: PromptTemplate = PromptTemplate::new(
        r#"You are a {{persona}}.
Consider your unique background, knowledge, and communication style.

Respond to the following query:
{{query}}

Ensure your response reflects the specific perspective of this persona."#);

    static ref REACT_TEMPLATE: PromptTemplate = PromptTemplate::new(
        r#"Task: {{task}}

Use the ReAct framework to solve this task:
1. Thought: What do I need to think about?
2. Action: What action should I take?
3. Observation: What did I observe?
4. (Repeat as needed)
5. Answer: Final solution

Format your response with clear Thought, Action, and Observation steps."#);

    static ref SELF_CONSISTENCY_TEMPLATE: PromptTemplate = PromptTemplate::new(
        r#"Solve this problem and explain your reasoning:
{{problem}}

Show your step-by-step thinking process."#);

    static ref TREE_OF_THOUGHTS_TEMPLATE: PromptTemplate = PromptTemplate::new(
        r#"Problem: {{problem}}

Use Tree-of-Thoughts approach:
1. Generate 3 initial solution approaches
2. For each approach, evaluate its strengths and weaknesses
3. Select the most promising approach
4. Develop that approach with detailed steps
5. Provide the final solution

Format your response clearly showing:
- Initial Branches (3 approaches)
- Evaluation of each branch
- Selected branch with reasoning
- Detailed solution"#);
}

/// Built-in few-shot exemplars used when the caller supplies none.
pub fn default_few_shot_examples() -> Vec<Exemplar> {
    vec![
        Exemplar::new("Translate to French: Hello", "Bonjour"),
        Exemplar::new("Translate to French: Goodbye", "Au revoir"),
    ]
}

/// The uniform output shape of every technique operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResult {
    /// Generated text, or an error description when the backend failed.
    pub response: String,
    /// Total tokens reported by the backend; summed over paths for self-consistency.
    pub tokens: u32,
    /// Estimated USD cost of the invocation.
    pub cost: f64,
    /// Number of reasoning paths, set by self-consistency only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_paths: Option<usize>,
}

/// Token/cost preview of a call, computed without sending anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEstimate {
    /// Prompt-side tokens of one request's message sequence.
    pub prompt_tokens: usize,
    /// Requests the call would issue (1, or `num_samples` for self-consistency).
    pub requests: usize,
    /// Estimated USD cost of the prompt-side tokens across all requests.
    pub cost: f64,
}

/// Deterministic message sequence and sampling temperature of one request of `call`.
pub(crate) fn build_messages(call: &TechniqueCall) -> Result<(Vec<ChatMsg>, Option<f32>)> {
    let built = match call {
        TechniqueCall::ZeroShot { prompt } => (
            vec![ChatMsg::system(ZERO_SHOT_SYSTEM), ChatMsg::user(prompt)],
            None,
        ),
        TechniqueCall::FewShot { prompt, examples } => {
            let examples = examples.clone().unwrap_or_else(default_few_shot_examples);
            let mut messages = Vec::with_capacity(examples.len() * 2 + 2);
            messages.push(ChatMsg::system(FEW_SHOT_SYSTEM));
            for example in &examples {
                messages.push(ChatMsg::user(&example.input));
                messages.push(ChatMsg::assistant(&example.output));
            }
            messages.push(ChatMsg::user(prompt));
            (messages, None)
        }
        TechniqueCall::ChainOfThought { problem } => {
            let user = CHAIN_OF_THOUGHT_TEMPLATE.construct_prompt().fill("problem", problem).complete()?;
            (vec![ChatMsg::system(CHAIN_OF_THOUGHT_SYSTEM), ChatMsg::user(user)], None)
        }
        TechniqueCall::RolePlaying { role, task } => {
            let system = ROLE_SYSTEM_TEMPLATE.construct_prompt().fill("role", role).complete()?;
            let user = ROLE_PLAYING_TEMPLATE.construct_prompt()
                .fill("role", role)
                .fill("task", task)
                .complete()?;
            (vec![ChatMsg::system(system), ChatMsg::user(user)], None)
        }
        TechniqueCall::PersonaBased { persona, query } => {
            let system = PERSONA_SYSTEM_TEMPLATE.construct_prompt().fill("persona", persona).complete()?;
            let user = PERSONA_TEMPLATE.construct_prompt()
                .fill("persona", persona)
                .fill("query", query)
                .complete()?;
            (vec![ChatMsg::system(system), ChatMsg::user(user)], None)
        }
        TechniqueCall::ReAct { task } => {
            let user = REACT_TEMPLATE.construct_prompt().fill("task", task).complete()?;
            (vec![ChatMsg::system(REACT_SYSTEM), ChatMsg::user(user)], None)
        }
        TechniqueCall::SelfConsistency { problem, .. } => {
            let user = SELF_CONSISTENCY_TEMPLATE.construct_prompt().fill("problem", problem).complete()?;
            (
                vec![ChatMsg::system(SELF_CONSISTENCY_SYSTEM), ChatMsg::user(user)],
                Some(SELF_CONSISTENCY_TEMPERATURE),
            )
        }
        TechniqueCall::TreeOfThoughts { problem } => {
            let user = TREE_OF_THOUGHTS_TEMPLATE.construct_prompt().fill("problem", problem).complete()?;
            (vec![ChatMsg::system(TREE_OF_THOUGHTS_SYSTEM), ChatMsg::user(user)], None)
        }
    };
    Ok(built)
}

/// The playground: a completion backend plus configuration, exposing every technique
/// operation, the dispatcher, the comparison runner and the demonstration recorder.
pub struct Playground<B: Complete> {
    backend: B,
    config: PlaygroundConfig,
}

impl Playground<OpenAiBackend> {
    /// Playground backed by an OpenAI-compatible API described by `config`.
    pub fn new(config: PlaygroundConfig) -> Self {
        let backend = OpenAiBackend::from_config(&config);
        Self { backend, config }
    }
}

impl<B: Complete> Playground<B> {
    /// Playground with a caller-supplied backend, e.g. a scripted one in tests.
    pub fn with_backend(backend: B, config: PlaygroundConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// Dispatch by technique name with a JSON argument map. Unknown names and schema
    /// violations fail typed, before any request is built or sent.
    pub async fn invoke(&self, name: &str, args: &JsonMap) -> Result<PromptResult, DispatchError> {
        let technique = Technique::from_name(name)
            .ok_or_else(|| DispatchError::UnknownTechnique { name: name.to_string() })?;
        let call = TechniqueCall::parse(technique, args)?;
        Ok(self.run(call).await)
    }

    /// Run one technique. Always returns a [PromptResult]: backend failures are folded
    /// into an error-text result with zero tokens and zero cost.
    pub async fn run(&self, call: TechniqueCall) -> PromptResult {
        let technique = call.technique();
        match self.run_checked(call).await {
            Ok(result) => result,
            Err(error) => PromptResult {
                response: format!("Error in {}: {}", technique.name(), error),
                tokens: 0,
                cost: 0.0,
                num_paths: None,
            },
        }
    }

    /// Run one technique, surfacing backend failures as typed errors.
    pub async fn run_checked(&self, call: TechniqueCall) -> Result<PromptResult> {
        if let TechniqueCall::SelfConsistency { problem, num_samples } = &call {
            let num_samples = num_samples.unwrap_or(self.config.default_num_samples);
            return self.self_consistency(problem, num_samples).await;
        }
        let (messages, temperature) = build_messages(&call)?;
        let completion = self.send(messages, temperature).await?;
        Ok(PromptResult {
            cost: pricing::cost(completion.total_tokens, &self.config.model),
            response: completion.text,
            tokens: completion.total_tokens,
            num_paths: None,
        })
    }

    /// Preview the prompt-side tokens and cost of a call without issuing any request.
    /// Warns when a single request would not fit the model's context window.
    pub fn estimate(&self, call: &TechniqueCall) -> Result<RequestEstimate> {
        let (messages, _) = build_messages(call)?;
        let counter = Tiktoken::new(&self.config.model)?;
        let prompt_tokens = counter.count_request_tokens(&messages);
        if let Some(limit) = max_tokens(&self.config.model) {
            if prompt_tokens > limit {
                warn!("prompt for {} needs {} tokens, over the {}-token context window of {}",
                      call.technique().name(), prompt_tokens, limit, self.config.model);
            }
        }
        let requests = match call {
            TechniqueCall::SelfConsistency { num_samples, .. } =>
                num_samples.unwrap_or(self.config.default_num_samples),
            _ => 1,
        };
        let cost = pricing::cost((prompt_tokens * requests) as u32, &self.config.model);
        Ok(RequestEstimate { prompt_tokens, requests, cost })
    }

    async fn send(&self, messages: Vec<ChatMsg>, temperature: Option<f32>) -> Result<Completion> {
        self.backend.complete(CompletionRequest {
            model: self.config.model.clone(),
            temperature,
            messages,
        }).await
    }

    /// `num_samples` sequential requests over the same messages, aggregated into one
    /// labeled report. Token counts are summed across paths.
    async fn self_consistency(&self, problem: &str, num_samples: usize) -> Result<PromptResult> {
        let call = TechniqueCall::SelfConsistency {
            problem: problem.to_string(),
            num_samples: Some(num_samples),
        };
        let (messages, temperature) = build_messages(&call)?;

        let mut responses = Vec::with_capacity(num_samples);
        let mut total_tokens: u32 = 0;
        for _ in 0..num_samples {
            let completion = self.send(messages.clone(), temperature).await?;
            responses.push(completion.text);
            total_tokens += completion.total_tokens;
        }

        let mut report = format!("Self-Consistency Analysis ({} reasoning paths):\n\n", num_samples);
        for (index, response) in responses.iter().enumerate() {
            report.push_str(&format!("--- Path {} ---\n{}\n\n", index + 1, response));
        }
        report.push_str("--- Consensus ---\nMultiple reasoning paths generated. Review the different approaches above.");

        Ok(PromptResult {
            response: report,
            tokens: total_tokens,
            cost: pricing::cost(total_tokens, &self.config.model),
            num_paths: Some(num_samples),
        })
    }
}
