//! Build command implementation.

use std::path::PathBuf;

use clap::Args;
use microdocs_builder::{BuildConfig, BuildReport, DocsBuilder, TemplateSource};
use microdocs_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for building a documentation page.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    /// Markdown files, in page order.
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Output HTML path (default: index.html).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Built-in template name or path to a template file (default: default).
    #[arg(short, long)]
    template: Option<String>,

    /// Repository URL shown in the navigation.
    #[arg(short, long, env = "MICRODOCS_REPO_URL")]
    repo_url: Option<String>,

    /// Documentation title (default: first heading of the first file).
    #[arg(long)]
    title: Option<String>,

    /// Footer text (default: build timestamp).
    #[arg(short, long)]
    footer: Option<String>,

    /// Path to configuration file (default: auto-discover microdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<BuildReport, CliError> {
        validate_inputs(&self.files)?;

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        tracing::debug!(
            config_path = ?config.config_path,
            settings = ?config.build,
            "Merged configuration"
        );
        if let Some(path) = &config.config_path {
            output.detail(&format!("Config: {}", path.display()));
        }

        let build_config = build_config(self.files, &config)?;
        tracing::info!(
            inputs = build_config.inputs.len(),
            output = %build_config.output.display(),
            template = %build_config.template,
            "Starting build"
        );
        output.info(&format!(
            "Building {} file(s) with template {}...",
            build_config.inputs.len(),
            build_config.template
        ));

        let report = DocsBuilder::new(build_config).build()?;

        output.success(&format!(
            "Documentation \"{}\" built: {} ({} section(s))",
            report.title,
            report.output.display(),
            report.sections
        ));
        Ok(report)
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            output: self.output.clone(),
            template: self.template.clone(),
            repo_url: self.repo_url.clone(),
            title: non_blank(self.title.as_ref()),
            footer: self.footer.clone(),
        }
    }
}

/// Check every input exists and is a regular file.
fn validate_inputs(files: &[PathBuf]) -> Result<(), CliError> {
    for path in files {
        if !path.exists() {
            return Err(CliError::Validation(format!(
                "Input file not found: {}",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(CliError::Validation(format!(
                "Input is not a regular file: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Turn the merged configuration into a builder configuration.
fn build_config(inputs: Vec<PathBuf>, config: &Config) -> Result<BuildConfig, CliError> {
    let template = TemplateSource::resolve(config.build.template.as_deref())?;
    Ok(BuildConfig {
        inputs,
        output: config.output_path(),
        template,
        repo_url: config.build.repo_url.clone(),
        title: non_blank(config.build.title.as_ref()),
        footer: config.build.footer.clone(),
    })
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}
