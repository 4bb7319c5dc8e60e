use clap::Parser;
use colored::Colorize;
use resume_wizard::app::{run_batch, run_interactive, BatchRequest, Terminal};
use resume_wizard::config::Command;
use resume_wizard::core::templates::TemplateId;
use resume_wizard::core::wizard::WizardState;
use resume_wizard::utils::error::ErrorSeverity;
use resume_wizard::utils::logger;
use resume_wizard::{CliConfig, HttpBackend, LocalStorage, WizardError, WizardSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_json);
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("{} {}", "✗".red().bold(), e.user_friendly_message());
            eprintln!("  {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::info!("Using backend at {}", config.api_url);

    let backend = HttpBackend::new(config.api_url.clone(), config.timeout())?;
    let storage = LocalStorage::new(config.output_dir.clone());
    let state = WizardState::with_template(config.default_template);
    let mut session = WizardSession::with_options(backend, storage, state, config.session_options());

    let outcome = match cli.command.clone().unwrap_or(Command::Wizard) {
        Command::Wizard => {
            let mut term = Terminal::stdio();
            run_interactive(&mut session, &mut term).await
        }
        Command::Generate {
            file,
            template,
            format,
            preview,
        } => {
            let template = match template.as_deref().map(str::parse::<TemplateId>).transpose() {
                Ok(template) => template,
                Err(e) => exit_with(&e),
            };
            let request = BatchRequest {
                file: &file,
                template,
                formats: format.formats(),
                preview,
            };
            run_batch(&mut session, request, &mut std::io::stdout())
                .await
                .map(|_| ())
        }
        Command::Templates => {
            let mut term = Terminal::stdio();
            term.template_list(config.default_template)
                .map_err(WizardError::from)
        }
        Command::Health => match session.health().await {
            Ok(health) => {
                println!(
                    "{} {} {}",
                    "✓".green().bold(),
                    health.status,
                    health.version.as_deref().unwrap_or("")
                );
                if let Some(message) = health.message {
                    println!("  {}", message);
                }
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &WizardError) -> ! {
    tracing::error!(
        "resume-wizard failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{} {}", "✗".red().bold(), e.user_friendly_message());
    eprintln!("  {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
