//! # Techniques
//!
//! The closed set of prompting techniques and the dispatch boundary.
//!
//! [Technique] enumerates the eight supported techniques; [TechniqueCall] is one
//! invocation's worth of parameters. A call is either built directly, so the compiler
//! guarantees the parameter schema, or parsed from a technique name plus a JSON
//! argument map, the surface a UI speaks. Parsing rejects unknown names and missing
//! or ill-typed arguments before any request is built.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::technique::errors::DispatchError;
use crate::utils::JsonMap;

/// A named strategy for constructing a prompt and invoking the completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    ZeroShot,
    FewShot,
    ChainOfThought,
    RolePlaying,
    PersonaBased,
    ReAct,
    SelfConsistency,
    TreeOfThoughts,
}

impl Technique {
    /// Every technique, in presentation order.
    pub const ALL: [Technique; 8] = [
        Technique::ZeroShot,
        Technique::FewShot,
        Technique::ChainOfThought,
        Technique::RolePlaying,
        Technique::PersonaBased,
        Technique::ReAct,
        Technique::SelfConsistency,
        Technique::TreeOfThoughts,
    ];

    /// Canonical display name, also the dispatch key.
    pub fn name(&self) -> &'static str {
        match self {
            Technique::ZeroShot => "Zero-Shot Prompting",
            Technique::FewShot => "Few-Shot Prompting",
            Technique::ChainOfThought => "Chain-of-Thought Prompting",
            Technique::RolePlaying => "Role-Playing Prompting",
            Technique::PersonaBased => "Persona-Based Prompting",
            Technique::ReAct => "ReAct Prompting",
            Technique::SelfConsistency => "Self-Consistency Prompting",
            Technique::TreeOfThoughts => "Tree-of-Thoughts Prompting",
        }
    }

    /// One-line explanation suitable for a technique picker.
    pub fn description(&self) -> &'static str {
        match self {
            Technique::ZeroShot => "No examples provided, testing the model's base knowledge",
            Technique::FewShot => "Provide examples to guide the model",
            Technique::ChainOfThought => "Break down complex reasoning step-by-step",
            Technique::RolePlaying => "Assign a specific role to the AI",
            Technique::PersonaBased => "Use a specific persona with unique characteristics",
            Technique::ReAct => "Reasoning + Acting framework for problem-solving",
            Technique::SelfConsistency => "Generate multiple reasoning paths and find consensus",
            Technique::TreeOfThoughts => "Explore multiple solution branches before selecting the best",
        }
    }

    /// Parse a display name back into a technique.
    pub fn from_name(name: &str) -> Option<Technique> {
        Self::ALL.iter().copied().find(|technique| technique.name() == name)
    }
}

/// One worked input/output pair for few-shot prompting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemplar {
    pub input: String,
    pub output: String,
}

impl Exemplar {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self { input: input.into(), output: output.into() }
    }
}

/// A technique invocation with its parameters. The variant dictates the parameter
/// schema, so a constructed call is always well-formed.
#[derive(Debug, Clone, PartialEq)]
pub enum TechniqueCall {
    ZeroShot { prompt: String },
    /// `examples: None` falls back to the built-in French-translation exemplars.
    FewShot { prompt: String, examples: Option<Vec<Exemplar>> },
    ChainOfThought { problem: String },
    RolePlaying { role: String, task: String },
    PersonaBased { persona: String, query: String },
    ReAct { task: String },
    /// `num_samples: None` falls back to the configured default.
    SelfConsistency { problem: String, num_samples: Option<usize> },
    TreeOfThoughts { problem: String },
}

impl TechniqueCall {
    /// The technique this call invokes.
    pub fn technique(&self) -> Technique {
        match self {
            TechniqueCall::ZeroShot { .. } => Technique::ZeroShot,
            TechniqueCall::FewShot { .. } => Technique::FewShot,
            TechniqueCall::ChainOfThought { .. } => Technique::ChainOfThought,
            TechniqueCall::RolePlaying { .. } => Technique::RolePlaying,
            TechniqueCall::PersonaBased { .. } => Technique::PersonaBased,
            TechniqueCall::ReAct { .. } => Technique::ReAct,
            TechniqueCall::SelfConsistency { .. } => Technique::SelfConsistency,
            TechniqueCall::TreeOfThoughts { .. } => Technique::TreeOfThoughts,
        }
    }

    /// Check a JSON argument map against a technique's parameter schema.
    pub fn parse(technique: Technique, args: &JsonMap) -> Result<TechniqueCall, DispatchError> {
        let call = match technique {
            Technique::ZeroShot => TechniqueCall::ZeroShot {
                prompt: required_str(technique, args, "prompt")?,
            },
            Technique::FewShot => TechniqueCall::FewShot {
                prompt: required_str(technique, args, "prompt")?,
                examples: optional_examples(technique, args)?,
            },
            Technique::ChainOfThought => TechniqueCall::ChainOfThought {
                problem: required_str(technique, args, "problem")?,
            },
            Technique::RolePlaying => TechniqueCall::RolePlaying {
                role: required_str(technique, args, "role")?,
                task: required_str(technique, args, "task")?,
            },
            Technique::PersonaBased => TechniqueCall::PersonaBased {
                persona: required_str(technique, args, "persona")?,
                query: required_str(technique, args, "query")?,
            },
            Technique::ReAct => TechniqueCall::ReAct {
                task: required_str(technique, args, "task")?,
            },
            Technique::SelfConsistency => TechniqueCall::SelfConsistency {
                problem: required_str(technique, args, "problem")?,
                num_samples: optional_num_samples(technique, args)?,
            },
            Technique::TreeOfThoughts => TechniqueCall::TreeOfThoughts {
                problem: required_str(technique, args, "problem")?,
            },
        };
        Ok(call)
    }
}

fn required_str(technique: Technique, args: &JsonMap, key: &str) -> Result<String, DispatchError> {
    match args.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(DispatchError::InvalidArguments {
            technique: technique.name(),
            reason: format!("'{}' must be a string", key),
        }),
        None => Err(DispatchError::InvalidArguments {
            technique: technique.name(),
            reason: format!("'{}' is required", key),
        }),
    }
}

fn optional_examples(technique: Technique, args: &JsonMap) -> Result<Option<Vec<Exemplar>>, DispatchError> {
    match args.get("examples") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|parse_error| DispatchError::InvalidArguments {
                technique: technique.name(),
                reason: format!("'examples' must be a list of input/output pairs: {}", parse_error),
            }),
    }
}

fn optional_num_samples(technique: Technique, args: &JsonMap) -> Result<Option<usize>, DispatchError> {
    match args.get("num_samples") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_u64() {
            Some(0) => Err(DispatchError::InvalidArguments {
                technique: technique.name(),
                reason: "'num_samples' must be at least 1".to_string(),
            }),
            Some(n) => Ok(Some(n as usize)),
            None => Err(DispatchError::InvalidArguments {
                technique: technique.name(),
                reason: "'num_samples' must be a positive integer".to_string(),
            }),
        },
    }
}

pub mod errors {
    use std::error::Error;
    use std::fmt;
    use std::fmt::Formatter;

    /// Failure at the dispatch boundary, before any request is issued.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum DispatchError {
        /// The name matches none of the registered techniques.
        UnknownTechnique { name: String },
        /// The argument map does not satisfy the technique's parameter schema.
        InvalidArguments { technique: &'static str, reason: String },
    }

    impl fmt::Display for DispatchError {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            match self {
                DispatchError::UnknownTechnique { name } =>
                    write!(f, "Technique {} not found", name),
                DispatchError::InvalidArguments { technique, reason } =>
                    write!(f, "Invalid arguments for {}: {}", technique, reason),
            }
        }
    }

    impl Error for DispatchError {}
}

#[cfg(test)]
mod test_technique {
    use serde_json::json;
    use super::*;
    use super::errors::DispatchError;

    fn args(value: serde_json::Value) -> JsonMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_names_round_trip() {
        for technique in Technique::ALL {
            assert_eq!(Some(technique), Technique::from_name(technique.name()));
            assert!(!technique.description().is_empty());
        }
        assert_eq!(None, Technique::from_name("NoSuchTechnique"));
    }

    #[test]
    fn test_parse_zero_shot() {
        let call = TechniqueCall::parse(Technique::ZeroShot, &args(json!({"prompt": "hi"}))).unwrap();
        assert_eq!(TechniqueCall::ZeroShot { prompt: "hi".to_string() }, call);
    }

    #[test]
    fn test_parse_missing_argument() {
        let error = TechniqueCall::parse(Technique::RolePlaying, &args(json!({"role": "historian"}))).unwrap_err();
        assert_eq!(
            DispatchError::InvalidArguments {
                technique: "Role-Playing Prompting",
                reason: "'task' is required".to_string(),
            },
            error
        );
    }

    #[test]
    fn test_parse_wrong_type() {
        let error = TechniqueCall::parse(Technique::ZeroShot, &args(json!({"prompt": 42}))).unwrap_err();
        assert!(matches!(error, DispatchError::InvalidArguments { .. }));
    }

    #[test]
    fn test_parse_examples() {
        let call = TechniqueCall::parse(Technique::FewShot, &args(json!({
            "prompt": "Translate to German: Hello",
            "examples": [{"input": "Hi", "output": "Hallo"}],
        }))).unwrap();
        match call {
            TechniqueCall::FewShot { examples: Some(examples), .. } => {
                assert_eq!(vec![Exemplar::new("Hi", "Hallo")], examples);
            }
            other => panic!("unexpected call: {:?}", other),
        }

        let error = TechniqueCall::parse(Technique::FewShot, &args(json!({
            "prompt": "x",
            "examples": "not a list",
        }))).unwrap_err();
        assert!(matches!(error, DispatchError::InvalidArguments { .. }));
    }

    #[test]
    fn test_parse_num_samples() {
        let call = TechniqueCall::parse(Technique::SelfConsistency, &args(json!({"problem": "p", "num_samples": 5}))).unwrap();
        assert_eq!(
            TechniqueCall::SelfConsistency { problem: "p".to_string(), num_samples: Some(5) },
            call
        );

        let call = TechniqueCall::parse(Technique::SelfConsistency, &args(json!({"problem": "p"}))).unwrap();
        assert_eq!(
            TechniqueCall::SelfConsistency { problem: "p".to_string(), num_samples: None },
            call
        );

        for bad in [json!({"problem": "p", "num_samples": 0}), json!({"problem": "p", "num_samples": -2})] {
            let error = TechniqueCall::parse(Technique::SelfConsistency, &args(bad)).unwrap_err();
            assert!(matches!(error, DispatchError::InvalidArguments { .. }));
        }
    }
}
