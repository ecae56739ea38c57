//! Merge, activation and export over whole release models
//!
//! The engine owns no state and performs no I/O. Each call works on the
//! trees it is handed, so independent units can be resolved in parallel
//! as long as every caller brings its own tree.

use serde_json::{Map, Value};

use crate::activation::ProjectContext;
use crate::error::Result;
use crate::model::ReleaseModel;
use crate::node::ConfigNode;

/// Which nodes came out enabled from a resolution pass, as `type:name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl ResolutionReport {
    fn record<N: ConfigNode>(&mut self, node: &N) {
        let id = format!("{}:{}", node.node_type(), node.name());
        if node.is_enabled() {
            self.enabled.push(id);
        } else {
            self.disabled.push(id);
        }
    }

    fn record_all<'a, N: ConfigNode + 'a>(&mut self, nodes: impl IntoIterator<Item = &'a N>) {
        for node in nodes {
            self.record(node);
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.iter().any(|e| e == id)
    }
}

/// Drives default → override → activation → export.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionEngine;

impl ResolutionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Effective tree of `default` overlaid with `override_model`.
    ///
    /// `default` is left untouched so it can seed further units.
    pub fn merge(&self, default: &ReleaseModel, override_model: &ReleaseModel) -> ReleaseModel {
        self.merge_layers(default, [override_model])
    }

    /// Fold override layers onto a copy of `default`, later layers win.
    pub fn merge_layers<'a>(
        &self,
        default: &ReleaseModel,
        layers: impl IntoIterator<Item = &'a ReleaseModel>,
    ) -> ReleaseModel {
        let mut effective = default.clone();
        for (index, layer) in layers.into_iter().enumerate() {
            tracing::debug!(layer = index + 1, "Merging override layer");
            effective.set_all(layer);
        }
        effective.normalize_names();
        effective
    }

    /// Resolve every node against `context`.
    ///
    /// Children resolve independently of their section. A section flag
    /// that is still unset is settled from whether it declares entries.
    pub fn resolve(
        &self,
        model: &mut ReleaseModel,
        context: &dyn ProjectContext,
    ) -> ResolutionReport {
        let count = model.resolve_enabled(context);
        let assemble = model.assemble.settle_enabled();
        let download = model.download.settle_enabled();
        tracing::debug!(
            enabled_nodes = count,
            assemble,
            download,
            snapshot = context.is_snapshot(),
            "Resolved activation"
        );

        let mut report = ResolutionReport::default();
        report.record_all(model.assemble.jlink.values());
        report.record_all(model.assemble.native_image.values());
        report.record_all(model.assemble.archive.values());
        report.record_all(model.download.ftp.values());
        report.record_all(model.download.http.values());
        report.record_all(model.download.scp.values());
        report.record_all(model.download.sftp.values());
        report
    }

    /// Resolve using the model's own project section as context.
    pub fn resolve_for_project(&self, model: &mut ReleaseModel) -> Result<ResolutionReport> {
        let context = model.project.context()?;
        Ok(self.resolve(model, &context))
    }

    /// Export; free of side effects and repeatable.
    pub fn export(&self, model: &ReleaseModel, full: bool) -> Result<Map<String, Value>> {
        model.as_map(full)
    }

    /// Merge every layer onto `default` and resolve the result.
    pub fn evaluate<'a>(
        &self,
        default: &ReleaseModel,
        layers: impl IntoIterator<Item = &'a ReleaseModel>,
        context: &dyn ProjectContext,
    ) -> (ReleaseModel, ResolutionReport) {
        let mut effective = self.merge_layers(default, layers);
        let report = self.resolve(&mut effective, context);
        (effective, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::{Active, RunContext};
    use crate::assemble::JlinkAssembler;
    use crate::download::FtpDownloader;
    use crate::project::Project;

    fn default_model() -> ReleaseModel {
        let mut model = ReleaseModel::default();
        let mut jlink = JlinkAssembler::named("app");
        jlink.set_active(Active::Release);
        model.assemble.add_jlink(jlink).unwrap();
        model
    }

    #[test]
    fn merge_leaves_default_untouched() {
        let default = default_model();
        let mut layer = ReleaseModel::default();
        layer.project = Project::new("app", "1.0.0");

        let effective = ResolutionEngine::new().merge(&default, &layer);

        assert!(default.project.name.is_none());
        assert_eq!(effective.project.name.as_deref(), Some("app"));
        assert!(effective.assemble.jlink.contains_key("app"));
    }

    #[test]
    fn later_layers_win() {
        let default = ReleaseModel::default();
        let mut first = ReleaseModel::default();
        first.project.version = Some("1.0.0".into());
        let mut second = ReleaseModel::default();
        second.project.version = Some("2.0.0".into());

        let effective = ResolutionEngine::new().merge_layers(&default, [&first, &second]);

        assert_eq!(effective.project.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn resolve_can_be_rerun_for_another_context() {
        let engine = ResolutionEngine::new();
        let mut model = default_model();

        let report = engine.resolve(&mut model, &RunContext::release());
        assert!(report.is_enabled("jlink:app"));

        let report = engine.resolve(&mut model, &RunContext::snapshot());
        assert!(!report.is_enabled("jlink:app"));
        assert_eq!(report.disabled, vec!["jlink:app"]);
    }

    #[test]
    fn resolve_settles_unset_sections() {
        let engine = ResolutionEngine::new();
        let mut model = default_model();
        engine.resolve(&mut model, &RunContext::release());

        assert_eq!(model.assemble.enabled, Some(true));
        assert_eq!(model.download.enabled, Some(false));
    }

    #[test]
    fn resolve_for_project_uses_project_version() {
        let engine = ResolutionEngine::new();
        let mut model = default_model();
        model.project = Project::new("app", "1.0.0-SNAPSHOT");

        let report = engine.resolve_for_project(&mut model).unwrap();
        assert!(!report.is_enabled("jlink:app"));
    }

    #[test]
    fn export_is_repeatable() {
        let engine = ResolutionEngine::new();
        let mut model = default_model();
        let mut ftp = FtpDownloader::named("mirror");
        ftp.set_active(Active::Always);
        model.download.add_ftp(ftp).unwrap();
        engine.resolve(&mut model, &RunContext::release());

        let first = engine.export(&model, false).unwrap();
        let second = engine.export(&model, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["project", "assemble", "download"]
        );
    }
}
