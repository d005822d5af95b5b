//! # Demonstration recorder
//!
//! Runs one technique through the dispatcher and persists a snapshot of the
//! invocation (technique name, input arguments and output) as pretty-printed JSON
//! under the configured output directory. One file per technique; recording the same
//! technique again overwrites the prior snapshot.
//!
//! Writes are plain filesystem writes with no locking; concurrent recorders racing on
//! the same path is an accepted limitation.

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::backend::Complete;
use crate::playground::{Playground, PromptResult};
use crate::utils::JsonMap;

/// A persisted snapshot of one technique invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemonstrationRecord {
    pub technique: String,
    pub input: JsonMap,
    pub output: PromptResult,
}

/// Where the record for `technique_name` lives under `output_dir`: the name
/// lower-cased, spaces replaced with underscores, with a `_demo.json` suffix.
pub fn record_path(output_dir: &Path, technique_name: &str) -> PathBuf {
    let slug = technique_name.to_lowercase().replace(' ', "_");
    output_dir.join(format!("{}_demo.json", slug))
}

impl<B: Complete> Playground<B> {
    /// Run a technique by name and persist the demonstration. Dispatch failures pass
    /// through typed, before anything is written or sent.
    pub async fn record(&self, name: &str, args: &JsonMap) -> Result<DemonstrationRecord> {
        let output = self.invoke(name, args).await?;
        let record = DemonstrationRecord {
            technique: name.to_string(),
            input: args.clone(),
            output,
        };

        let output_dir = &self.config().output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
        let path = record_path(output_dir, name);
        if path.exists() {
            warn!("overwriting demonstration record at {}", path.display());
        }
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json)
            .with_context(|| format!("writing demonstration record to {}", path.display()))?;
        Ok(record)
    }
}

#[cfg(test)]
mod test_recorder {
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::tempdir;
    use super::*;
    use crate::backend::{Completion, CompletionRequest};
    use crate::config::PlaygroundConfig;
    use crate::technique::errors::DispatchError;

    struct EchoBackend {
        reply: Mutex<String>,
    }

    impl EchoBackend {
        fn set_reply(&self, reply: &str) {
            *self.reply.lock().unwrap() = reply.to_string();
        }
    }

    #[async_trait]
    impl Complete for EchoBackend {
        async fn complete(&self, _request: CompletionRequest) -> Result<Completion> {
            Ok(Completion { text: self.reply.lock().unwrap().clone(), total_tokens: 7 })
        }
    }

    fn playground(output_dir: &Path) -> Playground<Arc<EchoBackend>> {
        Playground::with_backend(
            Arc::new(EchoBackend { reply: Mutex::new("first".to_string()) }),
            PlaygroundConfig::default().with_output_dir(output_dir),
        )
    }

    #[test]
    fn test_record_path_slug() {
        assert_eq!(
            Path::new("outputs/zero-shot_prompting_demo.json"),
            record_path(Path::new("outputs"), "Zero-Shot Prompting"),
        );
    }

    #[tokio::test]
    async fn test_record_writes_json() {
        let dir = tempdir().unwrap();
        let playground = playground(dir.path());
        let args = json!({"prompt": "Explain quantum computing to a 5-year-old"})
            .as_object().unwrap().clone();

        let record = playground.record("Zero-Shot Prompting", &args).await.unwrap();
        assert_eq!("Zero-Shot Prompting", record.technique);
        assert_eq!("first", record.output.response);

        let path = record_path(dir.path(), "Zero-Shot Prompting");
        let written: DemonstrationRecord = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(record, written);
        assert_eq!(args, written.input);
    }

    #[tokio::test]
    async fn test_record_overwrites_prior() {
        let dir = tempdir().unwrap();
        let backend = Arc::new(EchoBackend { reply: Mutex::new("first".to_string()) });
        let playground = Playground::with_backend(
            backend.clone(),
            PlaygroundConfig::default().with_output_dir(dir.path()),
        );
        let args = json!({"prompt": "hi"}).as_object().unwrap().clone();

        playground.record("Zero-Shot Prompting", &args).await.unwrap();
        backend.set_reply("second");
        playground.record("Zero-Shot Prompting", &args).await.unwrap();

        let path = record_path(dir.path(), "Zero-Shot Prompting");
        let written: DemonstrationRecord = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!("second", written.output.response);
        assert_eq!(1, fs::read_dir(dir.path()).unwrap().count());
    }

    #[tokio::test]
    async fn test_unknown_technique_writes_nothing() {
        let dir = tempdir().unwrap();
        let playground = playground(dir.path());

        let error = playground.record("NoSuchTechnique", &JsonMap::new()).await.unwrap_err();
        let dispatch_error = error.downcast_ref::<DispatchError>().expect("typed dispatch error");
        assert_eq!(
            &DispatchError::UnknownTechnique { name: "NoSuchTechnique".to_string() },
            dispatch_error
        );
        assert_eq!(0, fs::read_dir(dir.path()).unwrap().count());
    }
}
