use crate::app::terminal::Terminal;
use crate::core::session::WizardSession;
use crate::core::templates::{render_extracted_summary, TemplateId};
use crate::core::wizard::WizardStep;
use crate::domain::model::{ExportFormat, ResumeField};
use crate::domain::ports::{ResumeBackend, Storage};
use crate::utils::error::{ErrorCategory, Result, WizardError};
use std::io::{BufRead, Write};
use std::path::PathBuf;

enum Flow {
    Continue,
    Quit,
}

/// Runs the wizard until the user quits or input ends.
pub async fn run_interactive<B, S, R, W>(
    session: &mut WizardSession<B, S>,
    term: &mut Terminal<R, W>,
) -> Result<()>
where
    B: ResumeBackend,
    S: Storage,
    R: BufRead,
    W: Write,
{
    loop {
        term.header(session.state())?;

        let flow = match session.state().step() {
            WizardStep::Upload => upload_step(session, term).await?,
            WizardStep::ChooseTemplate => template_step(session, term).await?,
            WizardStep::Generate => generate_step(session, term).await?,
        };

        if let Flow::Quit = flow {
            tracing::debug!("Wizard closed on step {}", session.state().step());
            return Ok(());
        }
    }
}

async fn upload_step<B, S, R, W>(
    session: &mut WizardSession<B, S>,
    term: &mut Terminal<R, W>,
) -> Result<Flow>
where
    B: ResumeBackend,
    S: Storage,
    R: BufRead,
    W: Write,
{
    if let Some(file) = session.state().file() {
        term.hint(&format!("Last file: {}", file.name))?;
    }
    term.line("Upload your Word document (supported: .doc, .docx)")?;

    let Some(input) = term.prompt("File path (q to quit)")? else {
        return Ok(Flow::Quit);
    };
    if input.is_empty() {
        return Ok(Flow::Continue);
    }
    if is_quit(&input) {
        return Ok(Flow::Quit);
    }

    let path = PathBuf::from(input);
    let spinner = term.spinner("Processing your document... AI is analyzing your resume");
    let outcome = session.upload(&path).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(data) => {
            let message = format!("Extracted resume for {}", data.name);
            term.success(&message)?;
        }
        // the banner carries the message on the next screen
        Err(e) => tracing::debug!("Upload step failed: {}", e),
    }
    Ok(Flow::Continue)
}

async fn template_step<B, S, R, W>(
    session: &mut WizardSession<B, S>,
    term: &mut Terminal<R, W>,
) -> Result<Flow>
where
    B: ResumeBackend,
    S: Storage,
    R: BufRead,
    W: Write,
{
    term.title("Choose a Template")?;
    term.template_list(session.state().selected_template())?;
    term.blank()?;
    term.title("AI Extracted Information")?;
    if let Some(data) = session.state().parsed() {
        term.line(render_extracted_summary(data))?;
    }
    term.blank()?;

    let Some(input) = term.prompt("[1-4] template, e edit, g generate, q quit")? else {
        return Ok(Flow::Quit);
    };

    match input.to_ascii_lowercase().as_str() {
        "" => {}
        "q" | "quit" => return Ok(Flow::Quit),
        "e" | "edit" => return edit_loop(session, term).await,
        "g" | "generate" => {
            let preview = session.generate()?;
            term.line(preview)?;
        }
        choice => match parse_template_choice(choice) {
            Ok(template) => session.choose_template(template)?,
            Err(e) => report(term, &e)?,
        },
    }
    Ok(Flow::Continue)
}

async fn generate_step<B, S, R, W>(
    session: &mut WizardSession<B, S>,
    term: &mut Terminal<R, W>,
) -> Result<Flow>
where
    B: ResumeBackend,
    S: Storage,
    R: BufRead,
    W: Write,
{
    let template = session.state().selected_template();
    term.title(&format!("Your Resume ({})", template.name()))?;
    term.line(session.preview()?)?;

    let Some(input) = term.prompt("pdf / docx to download, e edit, r create another, q quit")?
    else {
        return Ok(Flow::Quit);
    };

    match input.to_ascii_lowercase().as_str() {
        "" => {}
        "q" | "quit" => return Ok(Flow::Quit),
        "r" | "reset" => session.reset(),
        "e" | "edit" => return edit_loop(session, term).await,
        other => match other.parse::<ExportFormat>() {
            Ok(format) => {
                let spinner = term.spinner(&format!("Generating {}...", format));
                let outcome = session.download(format).await;
                spinner.finish_and_clear();
                if let Ok(saved) = outcome {
                    term.success(&format!("Saved {}", saved))?;
                }
            }
            Err(_) => term.error(&format!("Unknown command: {}", other))?,
        },
    }
    Ok(Flow::Continue)
}

async fn edit_loop<B, S, R, W>(
    session: &mut WizardSession<B, S>,
    term: &mut Terminal<R, W>,
) -> Result<Flow>
where
    B: ResumeBackend,
    S: Storage,
    R: BufRead,
    W: Write,
{
    session.start_editing()?;
    term.title("Edit Information")?;
    term.hint("Commands: set <field> <value>, skill add <name>, skill rm <number>, show, save, cancel")?;
    term.hint("Fields: name, email, phone, location, linkedin, summary")?;

    loop {
        let Some(input) = term.prompt("edit")? else {
            session.cancel_edits();
            return Ok(Flow::Quit);
        };

        let mut parts = input.splitn(3, char::is_whitespace);
        let command = parts.next().unwrap_or("").to_ascii_lowercase();
        let arg = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        let outcome = match command.as_str() {
            "" => Ok(()),
            "save" => {
                match session.save_edits().await {
                    Ok(_) => term.success("Changes saved")?,
                    // the sync error is already in the banner
                    Err(e) => {
                        tracing::debug!("Saving edits failed: {}", e);
                        term.hint("Saved locally")?;
                    }
                }
                return Ok(Flow::Continue);
            }
            "cancel" => {
                session.cancel_edits();
                term.hint("Changes discarded")?;
                return Ok(Flow::Continue);
            }
            "show" => {
                if let Some(edited) = session.state().edited() {
                    term.line(render_extracted_summary(edited))?;
                    for field in ResumeField::ALL {
                        term.line(format!("  {:<9} {}", field, edited.field(field)))?;
                    }
                }
                Ok(())
            }
            "set" => arg
                .parse::<ResumeField>()
                .and_then(|field| session.edit_field(field, rest)),
            "skill" => match arg.to_ascii_lowercase().as_str() {
                "add" => session.add_skill(rest).map(|added| {
                    if !added {
                        tracing::debug!("Skill '{}' ignored", rest);
                    }
                }),
                "rm" | "remove" => match rest.parse::<usize>() {
                    Ok(number) if number >= 1 => session.remove_skill(number - 1).map(|_| ()),
                    _ => Err(WizardError::UnknownField(format!("skill number '{}'", rest))),
                },
                other => Err(WizardError::UnknownField(format!("skill {}", other))),
            },
            other => Err(WizardError::UnknownField(other.to_string())),
        };

        if let Err(e) = outcome {
            report(term, &e)?;
        }
    }
}

fn parse_template_choice(choice: &str) -> Result<TemplateId> {
    if let Ok(number) = choice.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|idx| TemplateId::ALL.get(idx).copied())
            .ok_or_else(|| WizardError::UnknownTemplate(choice.to_string()));
    }
    choice.parse()
}

fn is_quit(input: &str) -> bool {
    matches!(input.to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

/// Prints an error that should not end the wizard, with a hint for input mistakes.
fn report<R: BufRead, W: Write>(term: &mut Terminal<R, W>, err: &WizardError) -> Result<()> {
    term.error(&err.user_friendly_message())?;
    if matches!(err.category(), ErrorCategory::Input | ErrorCategory::State) {
        term.hint(err.recovery_suggestion())?;
    }
    Ok(())
}
