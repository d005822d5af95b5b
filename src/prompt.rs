//! # Prompt
//! A prompt is simply a string.
//! ## PromptTemplate
//! A prompt template is a string with placeholders. It can also have metadata in JSON
//! format; the bundled catalog uses the metadata to carry a template's category and name.
//!
//! ## Placeholder
//! A placeholder is a string in the format of `{{name}}`. It can be filled with a value.
//!
//! ## PartialPrompt
//! A partial prompt is a prompt template with some placeholders filled. A partial prompt
//! can only be constructed from a prompt template via [PromptTemplate::construct_prompt].
//!
//! Placeholders get filled via [PartialPrompt::fill], [PartialPrompt::try_fill] or
//! [PartialPrompt::fill_many]. Filling the same placeholder again updates its value.
//! When all placeholders are filled, [PartialPrompt::complete] replaces the placeholders
//! in the template with the filling values and returns the resulting prompt.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use crate::prompt::errors::{PlaceholderNotExist, UnfilledPlaceholders};
use crate::utils::prompt_processing::{get_placeholders, replace_all_placeholders};
use log::warn;
use crate::utils::JsonMap;


/// A prompt template with some placeholders filled. Constructed via [PromptTemplate::construct_prompt].
#[derive(Debug, Clone)]
#[readonly::make]
pub struct PartialPrompt {
    /// The template this partial prompt was constructed from.
    pub template: PromptTemplate,

    /// Mapping from placeholder name to its filling value
    pub(crate) placeholder_to_vals: HashMap<String, Option<String>>,

    /// Record the placeholders that are not filled yet
    pub(crate) unfilled_placeholders: HashSet<String>,
}

impl PartialPrompt {
    /// Fill a placeholder with the given value.
    /// Panics if the placeholder does not exist.
    pub fn fill(&mut self, placeholder: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.try_fill(placeholder, value).unwrap()
    }

    /// Fill a placeholder with the given value.
    /// Returns an error if the placeholder does not exist.
    pub fn try_fill(&mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Result<&mut Self, PlaceholderNotExist> {
        let placeholder = placeholder.into();
        if self.placeholder_to_vals.contains_key(&placeholder) {
            self.unfilled_placeholders.remove(&placeholder);
            self.placeholder_to_vals.insert(placeholder, Some(value.into()));
            Ok(self)
        } else {
            Err(PlaceholderNotExist::new(placeholder, value, &self.template.placeholders))
        }
    }

    /// Fill several placeholders at once.
    /// Returns an error on the first placeholder that does not exist; earlier
    /// entries of the iteration may already have been applied by then.
    pub fn fill_many<K, V>(&mut self, values: impl IntoIterator<Item=(K, V)>) -> Result<&mut Self, PlaceholderNotExist>
        where K: Into<String>, V: Into<String> {
        for (placeholder, value) in values {
            self.try_fill(placeholder, value)?;
        }
        Ok(self)
    }

    /// Complete the partial prompt and return the completed prompt.
    /// Returns an error if there are still unfilled placeholders.
    pub fn complete(&self) -> Result<String, UnfilledPlaceholders> {
        if self.unfilled_placeholders.is_empty() {
            let template = self.template.str();
            let prompt = unsafe { replace_all_placeholders(template, &self.placeholder_to_vals) };
            Ok(prompt)
        } else {
            Err(UnfilledPlaceholders {
                all_placeholders: self.template.placeholders.iter().map(Clone::clone).collect(),
                unfilled_placeholders: self.unfilled_placeholders.iter().map(|s| (*s).clone()).collect(),
            })
        }
    }
}

/// A prompt template with placeholders. It can also have metadata in JSON format.
#[derive(Debug, Clone)]
#[readonly::make]
pub struct PromptTemplate {
    /// The template string, immutable
    template: Arc<String>,

    /// The placeholders in the template, readonly
    pub placeholders: HashSet<String>,

    /// The metadata of the prompt template, readonly
    pub meta_data: Arc<JsonMap>,
}

impl PromptTemplate {
    /// Create a prompt template from a string without metadata.
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_metadata(template, JsonMap::new())
    }

    /// Create a prompt template from a string with metadata. Warns if the template does not have any placeholder.
    pub fn with_metadata(template: impl Into<String>, metadata: JsonMap) -> Self {
        let template = template.into();
        let placeholders = get_placeholders(&template);
        if placeholders.is_empty() {
            warn!("Your prompt template does not have a placeholder. If this is intended, ignore this message. \
            Otherwise, check whether you have written placeholders correctly.\n\
            Got prompt template:\n\
            {}", template);
        }
        Self {
            template: Arc::new(template),
            meta_data: Arc::new(metadata),
            placeholders,
        }
    }

    /// Get the prompt template as a string.
    #[inline]
    pub fn str(&self) -> &str {
        &self.template
    }

    /// Construct a partial prompt from the prompt template.
    pub fn construct_prompt(&self) -> PartialPrompt {
        PartialPrompt {
            template: self.clone(),
            placeholder_to_vals: self.placeholders.iter().map(|p| (p.clone(), None)).collect(),
            unfilled_placeholders: self.placeholders.clone(),
        }
    }
}

pub mod errors {
    use std::collections::HashSet;
    use std::error::Error;
    use std::fmt;
    use std::fmt::Formatter;

    /// Error when trying to complete a partial prompt but there are still unfilled placeholders.
    #[derive(Debug)]
    pub struct UnfilledPlaceholders {
        pub unfilled_placeholders: Vec<String>,
        pub all_placeholders: Vec<String>,
    }

    impl fmt::Display for UnfilledPlaceholders {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "UnfilledPlaceholders: to complete the prompt template,\n  Requires Placeholders:{:?}\n  Unfilled Placeholders:{:?}",
                   self.all_placeholders, self.unfilled_placeholders)
        }
    }

    impl Error for UnfilledPlaceholders {}

    /// Error when trying to fill a placeholder that does not exist in the prompt template of the partial prompt.
    #[derive(Debug)]
    pub struct PlaceholderNotExist {
        pub try_fill_placeholder: String,
        pub value: String,
        pub available_placeholders: Vec<String>,
    }

    impl PlaceholderNotExist {
        pub(crate) fn new(try_fill_placeholder: impl Into<String>,
                          value: impl Into<String>,
                          available_placeholders: &HashSet<String>) -> Self {
            let available_placeholders = available_placeholders.iter().cloned().collect();
            PlaceholderNotExist {
                try_fill_placeholder: try_fill_placeholder.into(),
                value: value.into(),
                available_placeholders,
            }
        }
    }

    impl fmt::Display for PlaceholderNotExist {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "PlaceholderNotExist: try to fill placeholder = {} with value = {}, but available placeholders are {:?}",
                   self.try_fill_placeholder,
                   self.value,
                   self.available_placeholders)
        }
    }

    impl Error for PlaceholderNotExist {}
}

#[cfg(test)]
mod test_prompt {
    use super::PromptTemplate;

    #[test]
    fn test_fill_and_complete() {
        let template = PromptTemplate::new("Translate the following text to {{language}}: {{text}}");
        let mut partial_prompt = template.construct_prompt();
        partial_prompt.fill("language", "French").fill("text", "Hello");
        let prompt = partial_prompt.complete().unwrap();
        assert_eq!("Translate the following text to French: Hello", prompt);
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_refill_updates_value() {
        let template = PromptTemplate::new("Hi {{name}}");
        let mut partial_prompt = template.construct_prompt();
        partial_prompt.fill("name", "alice").fill("name", "bob");
        assert_eq!("Hi bob", partial_prompt.complete().unwrap());
    }

    #[test]
    fn test_complete_unfilled() {
        let template = PromptTemplate::new("{{a}} and {{b}}");
        let mut partial_prompt = template.construct_prompt();
        partial_prompt.fill("a", "alice");
        let error = partial_prompt.complete().expect_err("b is unfilled");
        assert_eq!(vec!["b".to_string()], error.unfilled_placeholders);
    }

    #[test]
    fn test_try_fill_unknown_placeholder() {
        let template = PromptTemplate::new("{{a}}");
        let mut partial_prompt = template.construct_prompt();
        let error = partial_prompt.try_fill("nope", "x").expect_err("placeholder does not exist");
        assert_eq!("nope", error.try_fill_placeholder);
        assert_eq!(vec!["a".to_string()], error.available_placeholders);
    }

    #[test]
    fn test_fill_many() {
        let template = PromptTemplate::new("{{a}}+{{b}}");
        let mut partial_prompt = template.construct_prompt();
        partial_prompt.fill_many([("a", "1"), ("b", "2")]).unwrap();
        assert_eq!("1+2", partial_prompt.complete().unwrap());
    }
}
