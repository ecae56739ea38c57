//! End-to-end scenarios: parse defaults and overrides, merge, resolve and
//! export, the way a release run drives the model.

use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use relkit_formats::{ConfigLoader, ParserRegistry};
use relkit_model::{
    ProjectContext, ReleaseModel, ResolutionEngine, ResolutionReport, RunContext,
};
use serde_json::json;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

const DEFAULTS: &str = r#"
[project]
name = "acme"
version = "2.0.0"

[assemble.jlink.app]
active = "release"
executable = "acme"
outputs = [{ path = "X" }, { path = "Y" }, { path = "Z" }]

[assemble.jlink.app.extraProperties]
team = "platform"

[assemble.jlink.app.java]
mainClass = "org.acme.Main"

[download.ftp.a]
active = "always"
host = "ftp.acme.org"

[download.http.b]
active = "always"
connectTimeout = 5
"#;

fn parse(registry: &ParserRegistry, format: &str, content: &str) -> ReleaseModel {
    registry
        .parser_for_format(format)
        .expect("builtin parser")
        .parse(content)
        .expect("valid document")
}

fn defaults(registry: &ParserRegistry) -> ReleaseModel {
    parse(registry, "toml", DEFAULTS)
}

fn evaluate(
    base: &ReleaseModel,
    layers: &[&ReleaseModel],
    context: &dyn ProjectContext,
) -> (ReleaseModel, ResolutionReport) {
    ResolutionEngine::new().evaluate(base, layers.iter().copied(), context)
}

#[test]
fn release_only_assembler_follows_run_type() {
    let registry = ParserRegistry::with_builtins();
    let base = defaults(&registry);

    let (_, snapshot) = evaluate(&base, &[], &RunContext::snapshot());
    assert!(!snapshot.is_enabled("jlink:app"));
    assert!(snapshot.is_enabled("ftp:a"));

    let (_, release) = evaluate(&base, &[], &RunContext::release());
    assert!(release.is_enabled("jlink:app"));
}

#[test]
fn override_download_section_replaces_sub_maps() {
    let registry = ParserRegistry::with_builtins();
    let base = defaults(&registry);
    let overrides = parse(
        &registry,
        "yml",
        "download:\n  ftp:\n    c:\n      active: always\n      host: ftp.eu.acme.org\n",
    );

    let (model, report) = evaluate(&base, &[&overrides], &RunContext::release());

    assert_eq!(model.download.ftp.keys().collect::<Vec<_>>(), vec!["c"]);
    assert!(model.download.http.is_empty());
    assert!(report.is_enabled("ftp:c"));
    assert!(!report.is_enabled("ftp:a"));
    // The override never declared `assemble`, so the defaults survive.
    assert!(model.assemble.jlink.contains_key("app"));
}

#[test]
fn replaced_assembler_keeps_only_override_settings() {
    let registry = ParserRegistry::with_builtins();
    let base = defaults(&registry);
    let overrides = parse(
        &registry,
        "json",
        r#"{
          "assemble": {
            "enabled": true,
            "jlink": {
              "app": {
                "imageName": "acme-runtime",
                "extraProperties": { "team": "release-eng", "tier": "gold" }
              }
            }
          }
        }"#,
    );

    let (model, _) = evaluate(&base, &[&overrides], &RunContext::release());
    let export = ResolutionEngine::new().export(&model, true).unwrap();
    let app = &export["assemble"]["jlink"]["app"];

    assert_eq!(app["enabled"], false);
    assert_eq!(app["active"], "NEVER");
    assert_eq!(app["imageName"], "acme-runtime");
    assert_eq!(
        app["extraProperties"],
        json!({ "jlinkTeam": "release-eng", "jlinkTier": "gold" })
    );
    assert!(app.get("java").is_none());
}

#[test]
fn dry_run_then_real_run_in_one_process() {
    let registry = ParserRegistry::with_builtins();
    let engine = ResolutionEngine::new();
    let (mut model, _) = evaluate(&defaults(&registry), &[], &RunContext::snapshot());

    let preview = engine.export(&model, false).unwrap();
    assert!(preview["assemble"].get("jlink").is_none());

    engine.resolve(&mut model, &RunContext::release());
    let actual = engine.export(&model, false).unwrap();
    let app = &actual["assemble"]["jlink"]["app"];
    let outputs: Vec<_> = app["outputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["path"].as_str().unwrap())
        .collect();

    assert_eq!(outputs, vec!["X", "Y", "Z"]);
    assert_eq!(app["extraProperties"], json!({ "jlinkTeam": "platform" }));
    assert_eq!(app["java"]["mainClass"], "org.acme.Main");
}

#[test]
fn empty_override_sub_map_clears_default_entries() {
    let registry = ParserRegistry::with_builtins();
    let base = defaults(&registry);
    let overrides = parse(&registry, "yml", "download:\n  ftp: {}\n");

    let (model, report) = evaluate(&base, &[&overrides], &RunContext::release());

    assert!(model.download.ftp.is_empty());
    assert!(model.download.http.is_empty());
    assert!(!report.is_enabled("ftp:a"));
    assert!(model.assemble.jlink.contains_key("app"));
}

#[test]
fn full_export_lists_disabled_nodes() {
    let registry = ParserRegistry::with_builtins();
    let (model, _) = evaluate(&defaults(&registry), &[], &RunContext::snapshot());

    let full = ResolutionEngine::new().export(&model, true).unwrap();

    assert_eq!(full["assemble"]["jlink"]["app"]["enabled"], false);
    assert_eq!(full["download"]["ftp"]["a"]["enabled"], true);
    assert_eq!(full["download"]["http"]["b"]["enabled"], true);
}

#[test]
fn defaults_are_reusable_across_units() {
    let registry = ParserRegistry::with_builtins();
    let base = defaults(&registry);
    let unit_a = parse(&registry, "yml", "download:\n  enabled: false\n");
    let unit_b = parse(&registry, "yml", "project:\n  version: 2.1.0\n");

    let (a, _) = evaluate(&base, &[&unit_a], &RunContext::release());
    let (b, _) = evaluate(&base, &[&unit_b], &RunContext::release());

    assert!(a.download.ftp.is_empty());
    assert!(!a.download.is_enabled());
    assert!(b.download.ftp.contains_key("a"));
    assert_eq!(b.project.version.as_deref(), Some("2.1.0"));
    assert_eq!(base.project.version.as_deref(), Some("2.0.0"));
}

#[test]
fn project_version_decides_the_run_type() {
    let temp = TempDir::new().unwrap();
    let defaults_path = temp.path().join("relkit.toml");
    let local_path = temp.path().join("relkit.local.yml");
    fs::write(&defaults_path, DEFAULTS).unwrap();
    fs::write(&local_path, "project:\n  version: 2.1.0-SNAPSHOT\n").unwrap();

    let registry = ParserRegistry::with_builtins();
    let loader = ConfigLoader::new(&registry);
    let base = loader.load(&defaults_path).unwrap();
    let layers = loader.load_layers(&[local_path]).unwrap();

    let engine = ResolutionEngine::new();
    let mut model = engine.merge_layers(&base, &layers);
    let report = engine.resolve_for_project(&mut model).unwrap();

    assert!(!report.is_enabled("jlink:app"));
    assert!(report.is_enabled("http:b"));
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn loading_and_merging_emit_debug_events() {
    let temp = TempDir::new().unwrap();
    let defaults_path = temp.path().join("relkit.toml");
    let local_path = temp.path().join("relkit.local.yml");
    fs::write(&defaults_path, DEFAULTS).unwrap();

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("relkit_model=debug,relkit_formats=debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let registry = ParserRegistry::with_builtins();
        let loader = ConfigLoader::new(&registry);
        let base = loader.load(&defaults_path).unwrap();
        let layers = loader.load_layers(&[local_path]).unwrap();
        assert!(layers.is_empty());

        let engine = ResolutionEngine::new();
        let mut model = engine.merge_layers(&base, [&base]);
        engine.resolve(&mut model, &RunContext::release());
    });

    let output = logs.contents();
    assert!(output.contains("Loading config"), "got: {}", output);
    assert!(output.contains("No config layer found, skipping"), "got: {}", output);
    assert!(output.contains("Merging override layer"), "got: {}", output);
    assert!(output.contains("layer=1"), "got: {}", output);
    assert!(output.contains("Resolved activation"), "got: {}", output);
}
