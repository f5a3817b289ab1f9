mod config;

use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sdkgen_codegen::{render_project, BackendConfig, BackendRegistry, LanguageBackend};
use sdkgen_model::{ApiDescriptor, ErrorEntry, Severity, TypesDescriptor, ValidationReport};

use crate::config::{GenerateSettings, GeneratorConfig, Overrides};

#[derive(Parser)]
#[command(name = "sdkgen", about = "sdkgen – multi-language client SDK generator")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Log engine activity (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available target languages
    List,
    /// Generate client SDKs
    Generate {
        /// Config file (defaults to ./sdkgen.config.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// API description (.json, .yaml or .yml)
        #[arg(long)]
        api: Option<PathBuf>,
        /// Type definitions (.json, .yaml or .yml)
        #[arg(long)]
        types: Option<PathBuf>,
        /// Target language; repeat for several (defaults to all)
        #[arg(short, long = "language")]
        languages: Vec<String>,
        /// Output directory (defaults to ./generated)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// SDK name used for packages and manifests
        #[arg(long)]
        sdk_name: Option<String>,
        /// SDK version written into manifests
        #[arg(long)]
        sdk_version: Option<String>,
    },
    /// Validate API and type descriptions
    Validate {
        /// API description
        #[arg(long)]
        api: PathBuf,
        /// Type definitions
        #[arg(long)]
        types: Option<PathBuf>,
    },
    /// Print the JSON Schema of an input document
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Api,
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::List => cmd_list(),
        Command::Generate {
            config,
            api,
            types,
            languages,
            output,
            sdk_name,
            sdk_version,
        } => GeneratorConfig::discover(config.as_deref())
            .and_then(|config| {
                config.resolve(Overrides {
                    api,
                    types,
                    output,
                    languages,
                    sdk_name,
                    version: sdk_version,
                })
            })
            .and_then(|settings| cmd_generate(&settings)),
        Command::Validate { api, types } => cmd_validate(&api, types.as_deref()),
        Command::Schema { kind } => cmd_schema(kind),
    };

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn cmd_list() -> Result<bool> {
    let registry = BackendRegistry::with_builtin_backends(&BackendConfig::default())?;
    println!("{}", "Available languages".bold().underline());
    for language in registry.list() {
        println!("  {language}");
    }
    Ok(true)
}

fn cmd_validate(api_path: &Path, types_path: Option<&Path>) -> Result<bool> {
    println!("{} {}", "Validating".bold(), api_path.display());
    let (api, mut report) = sdkgen_model::load_api(api_path)
        .with_context(|| format!("Failed to load API description '{}'", api_path.display()))?;

    let mut type_count = None;
    if let Some(path) = types_path {
        println!("{} {}", "Validating".bold(), path.display());
        let (types, types_report) = sdkgen_model::load_types(path)
            .with_context(|| format!("Failed to load type definitions '{}'", path.display()))?;
        report.merge(types_report);
        type_count = Some((types.types.len(), types.enums.len()));
    }

    print_report(&report);

    let error_count = report.count(Severity::Error);
    let warning_count = report.count(Severity::Warning);
    println!();
    if error_count == 0 && warning_count == 0 {
        let summary = match type_count {
            Some((types, enums)) => format!(
                "{} methods, {types} types, {enums} enums",
                api.methods.len()
            ),
            None => format!("{} methods", api.methods.len()),
        };
        println!("{} Description is valid ({summary})", "✓".green().bold());
        Ok(true)
    } else if error_count == 0 {
        println!(
            "{} Valid with {} warning(s)",
            "⚠".yellow().bold(),
            warning_count,
        );
        Ok(true)
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            "✗".red().bold(),
            error_count,
            warning_count,
        );
        Ok(false)
    }
}

fn cmd_schema(kind: SchemaKind) -> Result<bool> {
    let schema = match kind {
        SchemaKind::Api => sdkgen_model::schema_def::api_schema(),
        SchemaKind::Types => sdkgen_model::schema_def::types_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(true)
}

fn cmd_generate(settings: &GenerateSettings) -> Result<bool> {
    println!(
        "{} {}",
        "Generating SDKs from".bold(),
        settings.api.display()
    );

    // 1. Load & validate
    let (api, types, report) = load_model(settings)?;
    print_report(&report);
    let error_count = report.count(Severity::Error);
    if error_count > 0 {
        eprintln!(
            "{} {} validation error(s), fix them before generating",
            "✗".red().bold(),
            error_count
        );
        return Ok(false);
    }

    // 2. Backends
    let registry = BackendRegistry::with_builtin_backends(&settings.backend)?;
    let languages = if settings.languages.is_empty() {
        registry.list()
    } else {
        settings.languages.clone()
    };

    // 3. One language at a time; a failure does not stop the rest
    let mut failed = 0;
    for language in &languages {
        let backend = match registry.resolve(language) {
            Ok(backend) => backend,
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                failed += 1;
                continue;
            }
        };
        let dir = settings.output.join(language);
        match generate_language(backend.as_ref(), &api, &types, &dir) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(e) => {
                eprintln!("{} {language}: {e:#}", "error:".red().bold());
                failed += 1;
            }
        }
    }

    println!();
    if failed == 0 {
        println!(
            "{} Generated {} language(s) → {}",
            "✓".green().bold(),
            languages.len(),
            settings.output.display()
        );
        Ok(true)
    } else {
        println!(
            "{} {} of {} language(s) failed",
            "✗".red().bold(),
            failed,
            languages.len()
        );
        Ok(false)
    }
}

fn load_model(
    settings: &GenerateSettings,
) -> Result<(ApiDescriptor, TypesDescriptor, ValidationReport)> {
    let (api, mut report) = sdkgen_model::load_api(&settings.api).with_context(|| {
        format!("Failed to load API description '{}'", settings.api.display())
    })?;

    let types = match &settings.types {
        Some(path) => {
            let (types, types_report) = sdkgen_model::load_types(path)
                .with_context(|| format!("Failed to load type definitions '{}'", path.display()))?;
            report.merge(types_report);
            types
        }
        // Still emit a types file so the generated project is complete.
        None => TypesDescriptor::new(api.package.clone()),
    };

    Ok((api, types, report))
}

/// Render one backend and write its files under `dir`. Returns false when
/// any file failed to render.
fn generate_language(
    backend: &dyn LanguageBackend,
    api: &ApiDescriptor,
    types: &TypesDescriptor,
    dir: &Path,
) -> Result<bool> {
    let language = backend.language();
    info!(language, dir = %dir.display(), "generating");

    for sub in backend.output_structure().directories() {
        let path = dir.join(sub);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }

    let outcome = render_project(backend, api, Some(types));
    for (relative, content) in outcome.project.files() {
        let contained = Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            anyhow::bail!("refusing to write '{relative}' outside '{}'", dir.display());
        }
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        debug!(language, path = %path.display(), "wrote file");
    }

    for error in &outcome.errors {
        eprintln!("{} {error}", "error:".red().bold());
    }

    println!(
        "{} {} {} file(s) → {}",
        if outcome.is_ok() { "✓".green().bold() } else { "✗".red().bold() },
        language.bold(),
        outcome.project.file_count(),
        dir.display()
    );
    for relative in outcome.project.files().keys() {
        println!("  {} {}", "→".dimmed(), relative);
    }

    Ok(outcome.is_ok())
}

fn print_report(report: &ValidationReport) {
    for entry in &report.errors {
        print_entry(entry);
    }
}

fn print_entry(entry: &ErrorEntry) {
    let severity_str = match entry.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };

    println!(
        "  {} [{}] {} ({}:{})",
        severity_str,
        entry.code.dimmed(),
        entry.message,
        entry.file.dimmed(),
        entry.path.dimmed(),
    );

    if let Some(suggestion) = &entry.suggestion {
        println!("    {} {}", "hint:".cyan(), suggestion);
    }
}
