use crate::core::session::WizardSession;
use crate::core::templates::TemplateId;
use crate::domain::model::ExportFormat;
use crate::domain::ports::{ResumeBackend, Storage};
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

pub struct BatchRequest<'a> {
    pub file: &'a Path,
    pub template: Option<TemplateId>,
    pub formats: Vec<ExportFormat>,
    pub preview: bool,
}

/// All three wizard steps without prompts. Returns the saved paths in the
/// order of `request.formats`.
pub async fn run_batch<B, S, W>(
    session: &mut WizardSession<B, S>,
    request: BatchRequest<'_>,
    out: &mut W,
) -> Result<Vec<String>>
where
    B: ResumeBackend,
    S: Storage,
    W: Write,
{
    let data = session.upload(request.file).await?;
    tracing::info!("Parsed '{}' from {}", data.name, request.file.display());

    if let Some(template) = request.template {
        session.choose_template(template)?;
    }

    let preview = session.generate()?;
    if request.preview {
        writeln!(out, "{}", preview)?;
    }

    let mut saved = Vec::with_capacity(request.formats.len());
    for format in request.formats {
        let path = session.download(format).await?;
        writeln!(out, "{}", path)?;
        saved.push(path);
    }
    Ok(saved)
}
