//! # Template catalog
//!
//! A fixed library of ready-made prompt templates, grouped by category. Pure data
//! plus a lookup-and-fill operation; the substitution itself is done by
//! [crate::prompt].
//!
//! Lookup keys are the human-readable category and template names as displayed by
//! a UI, e.g. `("Translation", "Simple")`.

use std::collections::HashMap;
use lazy_static::lazy_static;
use serde_json::Value;
use crate::catalog::errors::CatalogError;
use crate::prompt::PromptTemplate;
use crate::utils::JsonMap;

lazy_static! {
    /// The full nested catalog: category -> template name -> format string.
    pub static ref TEMPLATES: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::from([
        ("Translation", HashMap::from([
            ("Simple", "Translate the following text to {{language}}: {{text}}"),
            ("Formal", "Provide a formal translation of this text to {{language}}, maintaining professional tone: {{text}}"),
            ("Context", "Translate this {{context}} text to {{language}}: {{text}}"),
        ])),
        ("Summarization", HashMap::from([
            ("Brief", "Summarize this in 2-3 sentences: {{text}}"),
            ("Bullet Points", "Summarize the key points as a bullet list: {{text}}"),
            ("Executive", "Provide an executive summary highlighting main insights: {{text}}"),
        ])),
        ("Code", HashMap::from([
            ("Explain", "Explain what this code does in simple terms: {{code}}"),
            ("Debug", "Find and explain the bug in this code: {{code}}"),
            ("Optimize", "Suggest optimizations for this code: {{code}}"),
            ("Convert", "Convert this code from {{from_lang}} to {{to_lang}}: {{code}}"),
        ])),
        ("Creative Writing", HashMap::from([
            ("Story", "Write a {{length}} story about {{topic}} in the style of {{style}}"),
            ("Poem", "Write a {{type}} poem about {{topic}}"),
            ("Dialogue", "Write a dialogue between {{character1}} and {{character2}} about {{topic}}"),
        ])),
        ("Analysis", HashMap::from([
            ("Pros and Cons", "Analyze the pros and cons of {{topic}}"),
            ("Compare", "Compare and contrast {{item1}} and {{item2}}"),
            ("SWOT", "Perform a SWOT analysis of {{topic}}"),
        ])),
        ("Business", HashMap::from([
            ("Email", "Write a {{tone}} email about {{topic}} to {{recipient}}"),
            ("Proposal", "Draft a business proposal for {{project}}"),
            ("Report", "Create an executive report on {{topic}}"),
        ])),
    ]);
}

/// The whole catalog, category by category.
pub fn templates() -> &'static HashMap<&'static str, HashMap<&'static str, &'static str>> {
    &TEMPLATES
}

/// Look up one catalog entry as a [PromptTemplate]. The template's metadata carries
/// its `category` and `name`.
pub fn template(category: &str, name: &str) -> Result<PromptTemplate, CatalogError> {
    let group = TEMPLATES.get(category)
        .ok_or_else(|| CatalogError::CategoryNotFound { category: category.to_string() })?;
    let format_string = group.get(name)
        .ok_or_else(|| CatalogError::TemplateNotFound {
            category: category.to_string(),
            name: name.to_string(),
        })?;
    let mut metadata = JsonMap::new();
    metadata.insert("category".to_string(), Value::String(category.to_string()));
    metadata.insert("name".to_string(), Value::String(name.to_string()));
    Ok(PromptTemplate::with_metadata(*format_string, metadata))
}

/// Placeholder names of one catalog entry, sorted. Useful for building input forms.
pub fn placeholders(category: &str, name: &str) -> Result<Vec<String>, CatalogError> {
    let template = template(category, name)?;
    let mut names: Vec<String> = template.placeholders.iter().cloned().collect();
    names.sort();
    Ok(names)
}

/// Fill a catalog template with the given values and return the literal prompt.
///
/// Values whose name does not appear in the template are ignored. A placeholder
/// without a value fails with [CatalogError::MissingVariable] naming it.
pub fn fill(category: &str, name: &str, values: &HashMap<String, String>) -> Result<String, CatalogError> {
    let template = template(category, name)?;
    let mut partial_prompt = template.construct_prompt();
    for (placeholder, value) in values {
        if template.placeholders.contains(placeholder) {
            partial_prompt.fill(placeholder, value);
        }
    }
    partial_prompt.complete().map_err(|unfilled| {
        let mut missing = unfilled.unfilled_placeholders;
        missing.sort();
        CatalogError::MissingVariable { name: missing.swap_remove(0) }
    })
}

pub mod errors {
    use std::error::Error;
    use std::fmt;
    use std::fmt::Formatter;

    /// Lookup or fill failure for the template catalog.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum CatalogError {
        CategoryNotFound { category: String },
        TemplateNotFound { category: String, name: String },
        MissingVariable { name: String },
    }

    impl fmt::Display for CatalogError {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            match self {
                CatalogError::CategoryNotFound { category } =>
                    write!(f, "Category '{}' not found", category),
                CatalogError::TemplateNotFound { category, name } =>
                    write!(f, "Template '{}' not found in category '{}'", name, category),
                CatalogError::MissingVariable { name } =>
                    write!(f, "Missing variable: '{}'", name),
            }
        }
    }

    impl Error for CatalogError {}
}

#[cfg(test)]
mod test_catalog {
    use std::collections::HashMap;
    use super::{fill, placeholders, template, templates};
    use super::errors::CatalogError;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_fill_translation_simple() {
        let prompt = fill("Translation", "Simple", &values(&[("language", "French"), ("text", "Hello")])).unwrap();
        assert_eq!("Translate the following text to French: Hello", prompt);
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_fill_ignores_extra_values() {
        let prompt = fill("Summarization", "Brief", &values(&[("text", "a report"), ("unused", "x")])).unwrap();
        assert_eq!("Summarize this in 2-3 sentences: a report", prompt);
    }

    #[test]
    fn test_missing_variable_is_named() {
        let error = fill("Translation", "Simple", &values(&[("language", "French")])).unwrap_err();
        assert_eq!(CatalogError::MissingVariable { name: "text".to_string() }, error);
    }

    #[test]
    fn test_unknown_category_and_template() {
        let error = fill("Nope", "Simple", &values(&[])).unwrap_err();
        assert_eq!(CatalogError::CategoryNotFound { category: "Nope".to_string() }, error);

        let error = fill("Translation", "Nope", &values(&[])).unwrap_err();
        assert_eq!(
            CatalogError::TemplateNotFound { category: "Translation".to_string(), name: "Nope".to_string() },
            error
        );
    }

    #[test]
    fn test_placeholder_listing() {
        let names = placeholders("Code", "Convert").unwrap();
        assert_eq!(vec!["code".to_string(), "from_lang".to_string(), "to_lang".to_string()], names);
    }

    #[test]
    fn test_catalog_metadata() {
        let template = template("Business", "Email").unwrap();
        assert_eq!("Business", template.meta_data["category"]);
        assert_eq!("Email", template.meta_data["name"]);
    }

    #[test]
    fn test_every_entry_parses_placeholders() {
        for (category, group) in templates().iter() {
            for name in group.keys() {
                let template = template(category, name).unwrap();
                assert!(!template.placeholders.is_empty(), "{}/{} has no placeholders", category, name);
                assert_eq!(*category, template.meta_data["category"]);
            }
        }
    }
}
