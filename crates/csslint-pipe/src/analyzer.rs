//! Analyzer stage: lints each file record and attaches a [`Report`].

use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use csslint_pipe_core::{
    AnalyzerOptions, ConfigLoader, FileRecord, LintEngine, PluginError, Report, RuleSet,
};

use crate::stream::Transform;

/// Lints CSS file records.
///
/// The rule catalogue is captured once, at construction, as an immutable
/// baseline. Every file gets a fresh rule set derived from it, so neither
/// rules registered later nor another file's configuration can affect a run.
///
/// # Example
///
/// ```ignore
/// use csslint_pipe::{run, AnalyzerStage, AnalyzerOptions};
///
/// let mut stage = AnalyzerStage::new(csslint_pipe::engine(), AnalyzerOptions::None);
/// let output = run(&mut stage, files).await;
/// ```
pub struct AnalyzerStage {
    engine: Arc<dyn LintEngine>,
    base: Arc<RuleSet>,
    loader: ConfigLoader,
}

impl AnalyzerStage {
    /// Creates a stage that lints with `engine`.
    #[must_use]
    pub fn new(engine: Arc<dyn LintEngine>, options: impl Into<AnalyzerOptions>) -> Self {
        let base = RuleSet::all_enabled(&engine.rules());
        debug!("Analyzer baseline has {} rules", base.len());

        Self {
            engine,
            base: Arc::new(base),
            loader: ConfigLoader::new(options.into()),
        }
    }

    /// Returns the baseline every file's rule set is derived from.
    #[must_use]
    pub fn baseline(&self) -> &RuleSet {
        &self.base
    }

    /// Lints one file record.
    ///
    /// Null records and records decoding to an empty string are returned
    /// without a report. Whitespace-only content is linted.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::StreamingUnsupported`] for streaming records and
    /// [`PluginError::ConfigResolution`] if the file's configuration cannot be
    /// resolved.
    pub async fn lint(&self, mut file: FileRecord) -> Result<FileRecord, PluginError> {
        if file.is_null() {
            return Ok(file);
        }
        if file.is_stream() {
            return Err(PluginError::StreamingUnsupported);
        }

        let text = file.text().map(|text| text.into_owned()).unwrap_or_default();
        if text.is_empty() {
            debug!("Skipping empty file: {}", file.display_path());
            return Ok(file);
        }

        let overrides = self.loader.resolve(file.path.as_deref()).await?;
        let ruleset = self.base.merged(&overrides);

        let path = file.display_path();
        let original = self.engine.verify(&text, &ruleset);
        let report = Report::new(original, &path, &ruleset);
        debug!("Linted {}: {} messages", path, report.error_count);

        file.report = Some(report);
        Ok(file)
    }
}

impl Transform for AnalyzerStage {
    fn transform(
        &mut self,
        file: FileRecord,
    ) -> impl Future<Output = Result<FileRecord, PluginError>> {
        self.lint(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csslint_pipe_core::{ConfigError, Contents, RC_FILE_NAME};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn stage(options: AnalyzerOptions) -> AnalyzerStage {
        AnalyzerStage::new(Arc::new(crate::default_engine()), options)
    }

    fn rules(value: serde_json::Value) -> RuleSet {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn null_file_passes_without_report() {
        let file = stage(AnalyzerOptions::None)
            .lint(FileRecord::null("a.css"))
            .await
            .unwrap();
        assert!(file.report.is_none());
        assert_eq!(file.contents, Contents::Null);
    }

    #[tokio::test]
    async fn streaming_file_is_rejected() {
        let err = stage(AnalyzerOptions::None)
            .lint(FileRecord::streaming("a.css"))
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::StreamingUnsupported));
    }

    #[tokio::test]
    async fn caller_rules_disable_and_escalate() {
        let stage = stage(AnalyzerOptions::Rules(rules(
            json!({ "lookup": false, "important": false, "ids": 2 }),
        )));
        let file = stage
            .lint(FileRecord::stdin("#a { color: red !important; }"))
            .await
            .unwrap();

        let report = file.report.unwrap();
        assert_eq!(report.error_count, 1);
        assert_eq!(report.messages()[0].rule.id, "ids");
        assert_eq!(report.messages()[0].severity.as_str(), "error");
        assert!(!report.options.unwrap().is_enabled("important"));
    }

    #[tokio::test]
    async fn baseline_is_not_mutated() {
        let stage = stage(AnalyzerOptions::Rules(rules(json!({ "important": false }))));
        let before = stage.baseline().clone();

        stage
            .lint(FileRecord::stdin("a { color: red !important; }"))
            .await
            .unwrap();

        assert_eq!(stage.baseline(), &before);
        assert!(stage.baseline().is_enabled("important"));
    }

    #[tokio::test]
    async fn config_failure_aborts_the_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(RC_FILE_NAME), "{ broken").unwrap();

        let err = stage(AnalyzerOptions::None)
            .lint(FileRecord::new(tmp.path().join("a.css"), "a { color: red; }"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PluginError::ConfigResolution(ConfigError::Parse { .. })
        ));
    }
}
