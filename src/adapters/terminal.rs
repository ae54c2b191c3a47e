//! Terminal Adapters - Interactive Prompts and Report Rendering
//!
//! `TerminalInput` implements `InputCollector` with dialoguer prompts.
//! dialoguer blocks on the tty, so every prompt runs on the blocking
//! pool to keep the runtime responsive.
//!
//! `TerminalSink` implements `ReportSink` and prints reports to stdout,
//! colouring sections by tone. Logs go to stderr and never interleave
//! with report lines on the same stream.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dialoguer::console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::domain::{Report, Tone};
use crate::ports::display::ReportSink;
use crate::ports::input::InputCollector;

/// dialoguer-backed operator input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalInput;

impl TerminalInput {
    /// Create a terminal input collector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InputCollector for TerminalInput {
    async fn text(&self, message: &str) -> Result<String> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .context("Prompt task panicked")?
        .context("Failed to read answer")
    }

    async fn select(&self, message: &str, choices: &[String]) -> Result<usize> {
        let message = message.to_string();
        let choices = choices.to_vec();
        tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .items(&choices)
                .default(0)
                .interact()
        })
        .await
        .context("Prompt task panicked")?
        .context("Failed to read selection")
    }
}

/// Prints reports to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }

    fn paint(tone: Tone, text: &str) -> String {
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Success => style(text).green().to_string(),
            Tone::Alert => style(text).yellow().to_string(),
        }
    }
}

impl ReportSink for TerminalSink {
    fn show(&self, report: &Report) {
        println!("{}", style(&report.title).bold());
        for section in &report.sections {
            if let Some(heading) = &section.heading {
                println!("{}", style(heading).underlined());
            }
            for line in &section.lines {
                println!("  {}", Self::paint(section.tone, line));
            }
        }
        println!();
    }

    fn show_failure(&self, operation: &str, message: &str) {
        println!("{}", style(format!("{operation} failed: {message}")).red());
        println!();
    }
}
