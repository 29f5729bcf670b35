// src/config.rs
//! Command-line input and its resolution into a validated configuration.

use crate::api::{Credentials, OpenAiSettings};
use crate::constants::{DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::formatting::ExportFormat;
use crate::model::GenerationParams;
use crate::pipeline::ExportOptions;
use crate::store::FileSlot;
use crate::types::{ApiKey, Keywords, Tone, ValidatedUrl};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Page store file (defaults to $XDG_DATA_HOME/localpage/landingPages.json)
    #[arg(long, global = true, env = "LOCALPAGE_STORE")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a landing page and save it
    Generate(GenerateArgs),
    /// List saved landing pages, most recent first
    List,
    /// Show one saved landing page
    Show {
        /// Page ID, or a unique prefix of it
        id: String,
    },
    /// Delete a saved landing page
    Delete {
        /// Page ID, or a unique prefix of it
        id: String,
    },
    /// Export a saved landing page as text, HTML, or a print preview
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Target keywords, comma separated or repeated. The first is the primary keyword.
    #[arg(short, long = "keyword", value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,

    /// City the page targets
    #[arg(long)]
    pub city: String,

    /// State the page targets
    #[arg(long)]
    pub state: String,

    /// Tone of the generated copy
    #[arg(long, value_enum, default_value_t = Tone::Professional)]
    pub tone: Tone,

    /// Company name to mention in the copy
    #[arg(long)]
    pub company: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Model used for generation
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Use built-in sample copy instead of calling the API
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Print the page without saving it
    #[arg(long, default_value_t = false)]
    pub no_save: bool,

    /// Export the generated page right away
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Directory for exported files (defaults to the working directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Directory with landing.txt.hbs / landing.html.hbs overriding the built-in templates
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Page ID, or a unique prefix of it
    pub id: String,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Html)]
    pub format: ExportFormat,

    /// Directory for exported files (defaults to the working directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Write the export to stdout instead of a file
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Directory with landing.txt.hbs / landing.html.hbs overriding the built-in templates
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

/// Resolved configuration, validated and ready to drive a command.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub verbose: bool,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Generate(GenerateRequest),
    List,
    Show { id: String },
    Delete { id: String },
    Export { id: String, options: ExportOptions },
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub params: GenerationParams,
    pub credentials: Credentials,
    pub settings: OpenAiSettings,
    pub offline: bool,
    pub save: bool,
    pub export: Option<ExportOptions>,
}

impl AppConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let store_path = cli.store.unwrap_or_else(FileSlot::default_location);

        let action = match cli.command {
            Command::Generate(args) => Action::Generate(resolve_generate(args)?),
            Command::List => Action::List,
            Command::Show { id } => Action::Show { id: non_blank_id(id)? },
            Command::Delete { id } => Action::Delete { id: non_blank_id(id)? },
            Command::Export(args) => Action::Export {
                id: non_blank_id(args.id)?,
                options: ExportOptions {
                    format: args.format,
                    out_dir: args.out_dir,
                    stdout: args.stdout,
                    templates: args.templates,
                },
            },
        };

        Ok(Self {
            store_path,
            verbose: cli.verbose,
            action,
        })
    }
}

fn resolve_generate(args: GenerateArgs) -> Result<GenerateRequest, AppError> {
    let keywords = Keywords::collect(&args.keywords)?;
    let mut params = GenerationParams::new(keywords, args.city, args.state)?
        .with_tone(args.tone.as_str());
    if let Some(company) = args.company {
        params = params.with_company_name(company);
    }

    // A missing key is reported by the content source, before any request
    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .map(ApiKey::new)
        .transpose()?;

    let mut settings = match args.base_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => OpenAiSettings::new(ValidatedUrl::parse(url.trim())?),
        None => OpenAiSettings::openai()?,
    };
    settings = settings
        .with_model(args.model)
        .with_timeout(Duration::from_secs(args.timeout));

    let export = args.export.map(|format| ExportOptions {
        format,
        out_dir: args.out_dir.clone(),
        stdout: false,
        templates: args.templates.clone(),
    });

    Ok(GenerateRequest {
        params,
        credentials: Credentials::new(api_key),
        settings,
        offline: args.offline,
        save: !args.no_save,
        export,
    })
}

fn non_blank_id(id: String) -> Result<String, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(crate::types::ValidationError::InvalidRecordId(
            "record ID cannot be empty".to_string(),
        )
        .into());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(args).unwrap()
    }

    #[test]
    fn generate_resolves_params_and_settings() {
        let cli = parse(&[
            "localpage",
            "--store",
            "/tmp/pages.json",
            "generate",
            "-k",
            "plumbing, drain cleaning",
            "--keyword",
            "plumbing",
            "--city",
            " Austin ",
            "--state",
            "Texas",
            "--tone",
            "friendly",
            "--api-key",
            "sk-test",
            "--base-url",
            "http://localhost:8080/v1",
        ]);

        let config = AppConfig::resolve(cli).unwrap();

        assert_eq!(config.store_path, PathBuf::from("/tmp/pages.json"));
        let Action::Generate(request) = config.action else {
            panic!("expected generate");
        };
        assert_eq!(
            request.params.keywords.as_slice(),
            &["plumbing".to_string(), "drain cleaning".to_string()]
        );
        assert_eq!(request.params.city, "Austin");
        assert_eq!(request.params.tone_or_default(), "friendly");
        assert!(request.credentials.is_set());
        assert_eq!(request.settings.base_url.as_str(), "http://localhost:8080/v1");
        assert!(request.save);
        assert!(request.export.is_none());
    }

    #[test]
    fn blank_keywords_are_rejected() {
        let cli = parse(&[
            "localpage", "generate", "-k", " , ", "--city", "Austin", "--state", "Texas",
            "--api-key", "sk-test",
        ]);
        let err = AppConfig::resolve(cli).unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(crate::types::ValidationError::NoKeywords)
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let cli = parse(&[
            "localpage", "generate", "-k", "roofing", "--city", "Denver", "--state",
            "Colorado", "--api-key", "sk-test", "--base-url", "ftp://example.com",
        ]);
        assert!(AppConfig::resolve(cli).is_err());
    }

    #[test]
    fn export_defaults_to_html_file() {
        let cli = parse(&["localpage", "export", "abc123"]);
        let config = AppConfig::resolve(cli).unwrap();
        match config.action {
            Action::Export { id, options } => {
                assert_eq!(id, "abc123");
                assert_eq!(options.format, ExportFormat::Html);
                assert!(!options.stdout);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
