pub mod toml_config;

use crate::adapters::http::DEFAULT_API_URL;
use crate::core::session::SessionOptions;
use crate::core::templates::TemplateId;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_CONFIG_FILE: &str = "resume-wizard.toml";
pub const API_URL_ENV: &str = "RESUME_WIZARD_API_URL";

/// Fully resolved settings: defaults, then the TOML file, then the
/// environment, then command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub output_dir: String,
    pub default_template: TemplateId,
    pub preview_width: usize,
    pub sync_edits: bool,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
            output_dir: ".".to_string(),
            default_template: TemplateId::Modern,
            preview_width: 72,
            sync_edits: false,
        }
    }
}

impl WizardConfig {
    pub fn merge_file(mut self, file: &TomlConfig) -> Result<Self> {
        if let Some(api) = &file.api {
            if let Some(url) = &api.base_url {
                self.api_url = url.clone();
            }
            if let Some(timeout) = api.timeout_seconds {
                self.timeout_seconds = timeout;
            }
        }
        if let Some(dir) = file.output.as_ref().and_then(|o| o.directory.as_ref()) {
            self.output_dir = dir.clone();
        }
        if let Some(wizard) = &file.wizard {
            if let Some(template) = &wizard.default_template {
                self.default_template = template.parse()?;
            }
            if let Some(width) = wizard.preview_width {
                self.preview_width = width;
            }
            if let Some(sync) = wizard.sync_edits {
                self.sync_edits = sync;
            }
        }
        Ok(self)
    }

    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            preview_width: self.preview_width,
            sync_edits: self.sync_edits,
        }
    }
}

impl Validate for WizardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api_url)?;
        validation::validate_path("output.directory", &self.output_dir)?;
        validation::validate_positive_number("api.timeout_seconds", self.timeout_seconds as usize, 1)?;
        validation::validate_positive_number("wizard.preview_width", self.preview_width, 40)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, FormatChoice};

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::domain::model::ExportFormat;
    use clap::{Parser, Subcommand, ValueEnum};
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "resume-wizard")]
    #[command(about = "Turn a Word resume into a styled PDF or DOCX through the resume backend")]
    pub struct CliConfig {
        #[command(subcommand)]
        pub command: Option<Command>,

        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        /// Backend base URL, e.g. http://localhost:5000/api
        #[arg(long, global = true)]
        pub api_url: Option<String>,

        /// Directory downloads are saved to
        #[arg(short, long, global = true)]
        pub output_dir: Option<String>,

        /// Request timeout in seconds
        #[arg(long, global = true)]
        pub timeout: Option<u64>,

        /// Preview width in columns
        #[arg(long, global = true)]
        pub preview_width: Option<usize>,

        /// Send saved edits to the backend's update endpoint
        #[arg(long, global = true)]
        pub sync_edits: bool,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Run the interactive three-step wizard (default)
        Wizard,
        /// Upload, render and download without prompts
        Generate {
            /// The .doc or .docx resume
            #[arg(short, long)]
            file: PathBuf,

            /// Template id (modern, professional, creative, minimal)
            #[arg(short, long)]
            template: Option<String>,

            #[arg(long, value_enum, default_value_t = FormatChoice::Pdf)]
            format: FormatChoice,

            /// Print the text preview before downloading
            #[arg(long)]
            preview: bool,
        },
        /// List the available templates
        Templates,
        /// Check that the backend is reachable
        Health,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum FormatChoice {
        Pdf,
        Docx,
        Both,
    }

    impl FormatChoice {
        pub fn formats(&self) -> Vec<ExportFormat> {
            match self {
                FormatChoice::Pdf => vec![ExportFormat::Pdf],
                FormatChoice::Docx => vec![ExportFormat::Docx],
                FormatChoice::Both => vec![ExportFormat::Pdf, ExportFormat::Docx],
            }
        }
    }

    impl CliConfig {
        pub fn resolve(&self) -> Result<WizardConfig> {
            self.resolve_with(|key| std::env::var(key).ok())
        }

        pub fn resolve_with<F>(&self, env: F) -> Result<WizardConfig>
        where
            F: Fn(&str) -> Option<String>,
        {
            let mut config = WizardConfig::default();

            match &self.config {
                Some(path) => {
                    tracing::debug!("Loading configuration from {}", path.display());
                    config = config.merge_file(&TomlConfig::from_file(path)?)?;
                }
                None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                    tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                    config = config.merge_file(&TomlConfig::from_file(DEFAULT_CONFIG_FILE)?)?;
                }
                None => {}
            }

            config = config.merge_env(env);

            if let Some(url) = &self.api_url {
                config.api_url = url.clone();
            }
            if let Some(dir) = &self.output_dir {
                config.output_dir = dir.clone();
            }
            if let Some(timeout) = self.timeout {
                config.timeout_seconds = timeout;
            }
            if let Some(width) = self.preview_width {
                config.preview_width = width;
            }
            if self.sync_edits {
                config.sync_edits = true;
            }

            config.validate()?;
            Ok(config)
        }
    }
}
