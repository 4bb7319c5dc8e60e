use crate::core::templates::{step_segments, Accent, TemplateId, STEP_SEPARATOR};
use crate::core::wizard::WizardState;
use colored::{Color, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Line-oriented terminal I/O for the wizard screens.
pub struct Terminal<R: BufRead, W: Write> {
    input: R,
    output: W,
    spinners: bool,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), true)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, spinners: bool) -> Self {
        Self {
            input,
            output,
            spinners,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `label` and reads one trimmed line. `None` on end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", format!("{}>", label).bold())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    pub fn title(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text.cyan().bold())
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{} {}", "✗".red().bold(), text.red())
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{} {}", "✓".green().bold(), text.green())
    }

    pub fn hint(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text.dimmed())
    }

    /// Step indicator plus the error banner, if any.
    pub fn header(&mut self, state: &WizardState) -> io::Result<()> {
        self.blank()?;
        self.title("AI Resume Generator")?;
        let segments: Vec<String> = step_segments(state.step())
            .into_iter()
            .map(|(highlighted, text)| {
                if highlighted {
                    text.bold().to_string()
                } else {
                    text.dimmed().to_string()
                }
            })
            .collect();
        writeln!(self.output, "{}", segments.join(STEP_SEPARATOR))?;
        if let Some(message) = state.error() {
            self.error(message)?;
        }
        self.blank()
    }

    pub fn template_list(&mut self, selected: TemplateId) -> io::Result<()> {
        for (idx, template) in TemplateId::ALL.iter().enumerate() {
            let marker = if *template == selected { "●" } else { "○" };
            let name = template.name().color(accent_color(template.accent())).bold();
            writeln!(
                self.output,
                "  {} {}. {} ({})",
                marker,
                idx + 1,
                name,
                template.id()
            )?;
        }
        Ok(())
    }

    pub fn spinner(&self, message: &str) -> ProgressBar {
        if !self.spinners {
            return ProgressBar::hidden();
        }
        let sp = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg} [{elapsed}]") {
            sp.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        sp.set_message(message.to_string());
        sp.enable_steady_tick(Duration::from_millis(80));
        sp
    }
}

pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Blue,
        Accent::Gray => Color::BrightBlack,
        Accent::Magenta => Color::Magenta,
        Accent::Green => Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_lines_until_eof() {
        let mut term = Terminal::new(Cursor::new("  cv.docx \n"), Vec::new(), false);
        assert_eq!(term.prompt("File").unwrap().as_deref(), Some("cv.docx"));
        assert_eq!(term.prompt("File").unwrap(), None);
    }

    #[test]
    fn test_template_list_marks_selection() {
        colored::control::set_override(false);
        let mut term = Terminal::new(Cursor::new(""), Vec::new(), false);
        term.template_list(TemplateId::Creative).unwrap();
        let out = String::from_utf8(term.into_output()).unwrap();
        assert!(out.contains("○ 1. Modern (modern)"));
        assert!(out.contains("● 3. Creative (creative)"));
    }

    #[test]
    fn test_header_brackets_current_step_and_shows_banner() {
        colored::control::set_override(false);
        let mut state = WizardState::new();
        state.record_error("Failed to process document");
        let mut term = Terminal::new(Cursor::new(""), Vec::new(), false);
        term.header(&state).unwrap();
        let out = String::from_utf8(term.into_output()).unwrap();
        assert!(out.contains("[1] Upload ── (2) Choose Template ── (3) Generate"));
        assert!(out.contains("✗ Failed to process document"));
    }
}
