//! # promptlab
//!
//! Prompt-centric playground for exploring LLM prompting techniques in Rust
//!
//! ## Why `promptlab`
//!
//! Prompting guides love to name techniques (zero-shot, few-shot, chain-of-thought,
//! ReAct and friends), but every one of them boils down to the same thing: a fixed
//! instructional frame, a template with slots, and one call to a chat-completion
//! endpoint. `promptlab` makes that explicit. Every technique is data you can read,
//! run, price, compare and record, not a method buried in an inheritance hierarchy.
//!
//! ## Concepts and Design
//!
//! The API is designed to be as explicit as possible, so users can track every step
//! that composes a prompt. Cycle speed is NOT a top priority since an LLM takes
//! trillions of cycles to respond to a request.
//!
//! ### Prompt Template and Placeholder
//!
//! A template is a string with named slots, for example
//!
//! ```text
//! Translate the following text to {{language}}: {{text}}
//! ```
//!
//! `{{language}}` is a placeholder with the name `"language"`. Placeholder names can
//! be any string that does not contain line breaks `"\n"` and `"\r\n"`.
//!
//! A [`PartialPrompt`](crate::prompt::PartialPrompt) is an incomplete construction of
//! a template. It records which placeholder gets filled by what value and which are
//! still empty. When every slot is filled, [`PartialPrompt::complete`](crate::prompt::PartialPrompt::complete)
//! yields the literal prompt string; otherwise it fails naming the unfilled slots.
//!
//! A fixed catalog of ready-made templates lives in [`catalog`], grouped by category
//! (translation, summarization, code and so on).
//!
//! ### Technique
//!
//! The eight prompting techniques form a closed set, the
//! [`Technique`](crate::technique::Technique) enum. A
//! [`TechniqueCall`](crate::technique::TechniqueCall) carries the parameters one
//! invocation needs, built directly in code or parsed from a name plus a JSON
//! argument map at the dispatch boundary, where unknown names and bad arguments are
//! rejected before anything touches the network.
//!
//! ### Endpoint or LLM
//!
//! The endpoint of the `template -> filled prompt -> messages` pipeline is a
//! chat-completion backend behind the [`Complete`](crate::backend::Complete) trait.
//! The stock implementation talks to an OpenAI-compatible API via `async_openai`;
//! tests script their own.
//!
//! Running a technique always yields a [`PromptResult`](crate::playground::PromptResult):
//! generated text, token usage and estimated USD cost. Backend failures are folded
//! into an error-text result so display code never has to branch; callers who want
//! the typed error use the `_checked` variants.
//!
//! ## License
//!
//! `promptlab` will always remain free under Apache license.
//!
//! ## Attribution
//! * `tiktoken-rs`: in [crate::utils::token::tiktoken], we re-export the `tiktoken-rs` crate.


pub mod prompt;
pub mod catalog;
pub mod pricing;
pub mod config;
pub mod backend;
pub mod technique;
pub mod playground;
pub mod compare;
pub mod recorder;
pub mod utils;
