//! Integration tests for the analyzer stage.

mod common;

use std::sync::Arc;

use common::{fixture, fixtures, get_file, init_tracing};
use csslint_pipe::{
    add_rule, default_engine, run, AnalyzerOptions, AnalyzerStage, FileRecord, LintEngine,
    Listener, Reporter, RuleDescriptor, RuleSet, StartRule, STDIN,
};
use serde_json::json;

fn analyzer(options: AnalyzerOptions) -> AnalyzerStage {
    AnalyzerStage::new(Arc::new(default_engine()), options)
}

fn rules(value: serde_json::Value) -> RuleSet {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn passes_file_through() {
    init_tracing();
    let mut stage = analyzer(AnalyzerOptions::None);
    let output = run(&mut stage, [get_file("validCSS.css").await]).await;

    assert!(output.is_clean());
    assert_eq!(output.files.len(), 1);
    let file = &output.files[0];
    assert_eq!(file.path.as_deref(), Some(fixture("validCSS.css").as_path()));
    assert_eq!(file.relative(), "validCSS.css");
    assert!(file.text().is_some());
}

#[tokio::test]
async fn sends_success_status() {
    let file = analyzer(AnalyzerOptions::None)
        .lint(get_file("validCSS.css").await)
        .await
        .unwrap();

    let report = file.report.expect("report attached");
    assert!(report.success);
    assert_eq!(report.error_count, 0);
    assert!(report.results.is_none());
    assert!(report.options.is_none());
}

#[tokio::test]
async fn sends_failure_status() {
    let file = analyzer(AnalyzerOptions::None)
        .lint(get_file("duplicateProperties.css").await)
        .await
        .unwrap();

    let report = file.report.expect("report attached");
    assert!(!report.success);
    assert_eq!(report.messages()[0].message, "Duplicate property 'float' found.");

    let results = report.results.expect("failed report has results");
    assert_eq!(results.len(), report.error_count);
    let path = fixture("duplicateProperties.css").display().to_string();
    assert!(results.iter().all(|entry| entry.file == path));
}

#[tokio::test]
async fn lints_two_files_in_order() {
    let mut stage = analyzer(AnalyzerOptions::None);
    let output = run(
        &mut stage,
        [
            get_file("duplicateProperties.css").await,
            get_file("validCSS.css").await,
        ],
    )
    .await;

    let names: Vec<String> = output.files.iter().map(FileRecord::relative).collect();
    assert_eq!(names, vec!["duplicateProperties.css", "validCSS.css"]);
}

#[tokio::test]
async fn does_not_leak_options_across_files() {
    let mut stage = analyzer(AnalyzerOptions::Rules(RuleSet::new()));
    let output = run(
        &mut stage,
        [
            get_file("leak/disabled/leaktest1.css").await,
            get_file("leak/leaktest2.css").await,
        ],
    )
    .await;

    let failed: Vec<String> = output
        .files
        .iter()
        .filter(|file| file.has_failed())
        .map(FileRecord::relative)
        .collect();
    assert_eq!(failed, vec!["leaktest2.css"]);
}

#[tokio::test]
async fn concurrent_resolutions_stay_isolated() {
    let stage = analyzer(AnalyzerOptions::None);
    let (a, b) = tokio::join!(
        async { stage.lint(get_file("leak/disabled/leaktest1.css").await).await },
        async { stage.lint(get_file("leak/leaktest2.css").await).await },
    );

    assert!(!a.unwrap().has_failed());
    assert!(b.unwrap().has_failed());
}

#[tokio::test]
async fn supports_options() {
    let file = analyzer(AnalyzerOptions::Rules(rules(json!({ "important": false }))))
        .lint(get_file("usingImportant.css").await)
        .await
        .unwrap();

    let report = file.report.expect("report attached");
    assert!(report.success);
    assert!(report.results.is_none());
}

#[tokio::test]
async fn supports_explicit_config_file() {
    // zeroUnits.css copied next to no config, so only the explicit file applies
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("zeroUnits.css");
    std::fs::copy(fixture("rc/zeroUnits.css"), &path).unwrap();

    let stage = analyzer(AnalyzerOptions::File(fixture("rc/.csslintrc")));
    let file = stage.lint(FileRecord::read(path).await.unwrap()).await.unwrap();
    assert!(file.report.expect("report attached").success);

    let lookup = analyzer(AnalyzerOptions::None);
    let file = lookup
        .lint(FileRecord::read(tmp.path().join("zeroUnits.css")).await.unwrap())
        .await
        .unwrap();
    assert!(file.has_failed());
}

#[tokio::test]
async fn finds_csslintrc_automatically() {
    let file = analyzer(AnalyzerOptions::None)
        .lint(get_file("rc/zeroUnits.css").await)
        .await
        .unwrap();
    assert!(file.report.expect("report attached").success);
}

#[tokio::test]
async fn lookup_can_be_disabled() {
    let file = analyzer(AnalyzerOptions::Rules(rules(json!({ "lookup": false }))))
        .lint(get_file("rc/zeroUnits.css").await)
        .await
        .unwrap();
    assert!(file.has_failed());
}

#[tokio::test]
async fn broken_config_drops_only_its_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (bad, good) = (tmp.path().join("bad"), tmp.path().join("good"));
    for dir in [&bad, &good] {
        std::fs::create_dir_all(dir).unwrap();
    }
    let important = ".a { color: red !important; }";
    std::fs::write(bad.join(".csslintrc"), "{ not json").unwrap();
    std::fs::write(bad.join("x.css"), important).unwrap();
    std::fs::write(good.join(".csslintrc"), r#"{ "important": false }"#).unwrap();
    std::fs::write(good.join("y.css"), important).unwrap();
    std::fs::write(good.join("z.css"), important).unwrap();

    let mut stage = analyzer(AnalyzerOptions::None);
    let output = run(
        &mut stage,
        [
            FileRecord::read(bad.join("x.css")).await.unwrap(),
            FileRecord::read(good.join("y.css")).await.unwrap(),
        ],
    )
    .await;

    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.errors[0],
        csslint_pipe::PluginError::ConfigResolution(_)
    ));
    assert_eq!(output.files.len(), 1);
    assert_eq!(output.files[0].relative(), "y.css");
    assert!(!output.files[0].has_failed());

    // the parsed rc file outlives edits for this stage
    std::fs::write(good.join(".csslintrc"), "{}").unwrap();
    let file = stage
        .lint(FileRecord::read(good.join("z.css")).await.unwrap())
        .await
        .unwrap();
    assert!(!file.has_failed());
}

#[tokio::test]
async fn rule_options_reach_the_rule() {
    let css = ".a { margin: 0px 0%; }";
    let plain = analyzer(AnalyzerOptions::None)
        .lint(FileRecord::stdin(css))
        .await
        .unwrap();
    assert_eq!(plain.report.expect("report attached").error_count, 2);

    let configured = analyzer(AnalyzerOptions::Rules(rules(
        json!({ "zero-units": { "allow": ["%"] } }),
    )))
    .lint(FileRecord::stdin(css))
    .await
    .unwrap();
    let report = configured.report.expect("report attached");
    assert_eq!(report.error_count, 1);
    assert_eq!(
        report.options.expect("failed report has options").get("zero-units"),
        Some(&json!({ "allow": ["%"] }))
    );
}

#[tokio::test]
async fn does_not_lint_empty_files() {
    let file = analyzer(AnalyzerOptions::None)
        .lint(get_file("empty.css").await)
        .await
        .unwrap();
    assert!(file.report.is_none());
}

#[tokio::test]
async fn lints_whitespace_only_files() {
    let file = analyzer(AnalyzerOptions::None)
        .lint(get_file("whitespace.css").await)
        .await
        .unwrap();
    let report = file.report.expect("whitespace is not empty");
    assert!(report.success);
}

#[tokio::test]
async fn stdin_results_use_placeholder() {
    let file = analyzer(AnalyzerOptions::None)
        .lint(FileRecord::stdin(".a { color: red !important; }"))
        .await
        .unwrap();

    let results = file.report.and_then(|r| r.results).expect("results");
    assert_eq!(results[0].file, STDIN);
}

#[tokio::test]
async fn streaming_files_error_and_are_dropped() {
    let mut stage = analyzer(AnalyzerOptions::None);
    let output = run(
        &mut stage,
        [
            FileRecord::streaming(fixture("validCSS.css")),
            FileRecord::null(fixtures()),
        ],
    )
    .await;

    assert_eq!(output.files.len(), 1);
    assert!(output.files[0].report.is_none());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].to_string(),
        "csslint-pipe: Streaming not supported"
    );
    assert_eq!(output.errors[0].plugin(), "csslint-pipe");
}

struct Oocss;

impl Listener for Oocss {
    fn start_rule(&mut self, event: &StartRule, reporter: &mut Reporter<'_>) {
        for selector in &event.selectors {
            let name = selector.text.trim();
            if !name.starts_with('.') {
                continue;
            }
            let valid = ["o-", "c-", "u-", "is-", "has-", "js-", "qa-"]
                .iter()
                .any(|prefix| name[1..].starts_with(prefix));
            if !valid {
                reporter.warn(format!("Bad naming: {name}"), event.line, event.col);
            }
        }
    }
}

#[tokio::test]
async fn reports_added_rule_linting() {
    let engine = Arc::new(default_engine());
    let before = AnalyzerStage::new(engine.clone(), AnalyzerOptions::None);

    add_rule(
        engine.as_ref(),
        RuleDescriptor::new("oocss")
            .name("OOCSS")
            .desc("Class names must follow pattern")
            .browsers("All")
            .init(|| Box::new(Oocss)),
    )
    .unwrap();

    let after = AnalyzerStage::new(engine.clone(), AnalyzerOptions::None);
    assert!(after.baseline().is_enabled("oocss"));
    assert!(!before.baseline().is_enabled("oocss"));

    let file = after.lint(get_file("addRule.css").await).await.unwrap();
    let report = file.report.expect("report attached");
    assert!(!report.success);
    assert_eq!(report.messages()[0].message, "Bad naming: .foo");
    assert_eq!(report.messages()[0].rule.id, "oocss");

    engine.reset();
    assert!(!engine.rules().iter().any(|rule| rule.id == "oocss"));
}
