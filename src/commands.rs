//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::Context;
use modgraph_core::{
    CollapseRules, GraphError, PathFilter, RenderSettings, config_path, detect_project,
    normalize_path,
};
use modgraph_indexer::{BuildResult, GraphWalker, NodeResolver, ResolutionConfig, TsConfig};
use modgraph_render::{DotRenderer, JsonGraph, RenderOptions, render_symbol_report};

use crate::GraphArgs;

pub fn dot(entry: Option<PathBuf>, args: &GraphArgs) -> anyhow::Result<()> {
    let entry = entry.ok_or(GraphError::MissingRootArgument)?;
    let project = Project::load(args)?;

    let build = project.build(&entry)?;
    let options = RenderOptions {
        groups: project.settings.groups,
        symbols: project.settings.symbols,
    };
    let text = DotRenderer::new(options, &project.rules, &project.filter).render(&build.graph);
    print!("{text}");
    Ok(())
}

pub fn json(entry: Option<PathBuf>, out: PathBuf, args: &GraphArgs) -> anyhow::Result<()> {
    let entry = entry.ok_or(GraphError::MissingRootArgument)?;
    let project = Project::load(args)?;

    let build = project.build(&entry)?;
    JsonGraph::from_graph(&build.graph).write(&out)?;
    Ok(())
}

pub fn symbols(entry: Option<PathBuf>, args: &GraphArgs) -> anyhow::Result<()> {
    let entry = entry.ok_or(GraphError::MissingRootArgument)?;
    let mut project = Project::load(args)?;
    project.settings.symbols = true;

    let build = project.build(&entry)?;
    print!("{}", render_symbol_report(&build.graph, &project.filter));
    Ok(())
}

/// Everything fixed at startup: resolution config, render settings and the
/// compiled path patterns. Any error here aborts before traversal.
struct Project {
    cwd: PathBuf,
    resolution: ResolutionConfig,
    settings: RenderSettings,
    filter: PathFilter,
    rules: CollapseRules,
}

impl Project {
    fn load(args: &GraphArgs) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;

        let tsconfig = match &args.tsconfig {
            Some(path) => Some(TsConfig::load(&normalize_path(path, &cwd))?),
            None => TsConfig::find(&cwd).map(|path| TsConfig::load(&path)).transpose()?,
        };

        let root = match (&args.root, &tsconfig) {
            (Some(root), _) => normalize_path(root, &cwd),
            (None, Some(tsconfig)) => tsconfig
                .base_url
                .as_deref()
                .map(|base_url| normalize_path(base_url, &cwd))
                .unwrap_or_else(|| tsconfig.dir.clone()),
            (None, None) => detect_project(&cwd).unwrap_or_else(|| cwd.clone()),
        };
        tracing::debug!("Project root: {}", root.display());

        let settings = load_settings(args, &root, &cwd)?;
        let filter = settings.path_filter()?;
        let rules = settings.collapse_rules()?;

        let mut resolution = ResolutionConfig::new(normalize_path(&root, &cwd))
            .with_package_dir(settings.package_dir.clone());
        if let Some(tsconfig) = &tsconfig {
            resolution = resolution.with_tsconfig(tsconfig);
        }

        Ok(Project {
            cwd,
            resolution,
            settings,
            filter,
            rules,
        })
    }

    fn build(&self, entry: &Path) -> anyhow::Result<BuildResult> {
        let entry = normalize_path(entry, &self.cwd);
        anyhow::ensure!(entry.is_file(), "entry file {} does not exist", entry.display());

        let resolver = NodeResolver::new(&self.resolution);
        let build = GraphWalker::new(&resolver, &self.resolution)
            .with_symbols(self.settings.symbols)
            .walk(&entry);
        if !build.diagnostics.is_empty() {
            tracing::info!("{} problems found while building the graph", build.diagnostics.len());
        }
        Ok(build)
    }
}

fn load_settings(args: &GraphArgs, root: &Path, cwd: &Path) -> anyhow::Result<RenderSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let path = normalize_path(path, cwd);
            RenderSettings::load(&path)?
                .with_context(|| format!("settings file {} does not exist", path.display()))?
        }
        None => RenderSettings::load(&config_path(root))?.unwrap_or_default(),
    };

    if args.no_groups {
        settings.groups = false;
    }
    if args.symbols {
        settings.symbols = true;
    }
    replace_if_given(&mut settings.collapse, &args.collapse);
    replace_if_given(&mut settings.collapse_exclude, &args.collapse_exclude);
    replace_if_given(&mut settings.include, &args.include);
    replace_if_given(&mut settings.exclude, &args.exclude);
    if let Some(package_dir) = &args.package_dir {
        settings.package_dir = package_dir.clone();
    }

    Ok(settings)
}

fn replace_if_given(target: &mut Vec<String>, given: &[String]) {
    if !given.is_empty() {
        *target = given.to_vec();
    }
}
