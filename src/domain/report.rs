//! Display-ready operation results.
//!
//! Handlers never print. They return a `Report` and the dispatcher hands
//! it to a `ReportSink`, which decides how to render tones (the terminal
//! sink colours them, the test sink just records).

/// Visual emphasis of a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral output.
    Plain,
    /// Positive result (balances, prices, addresses).
    Success,
    /// Needs attention (policies, failures).
    Alert,
}

/// A titled block of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Optional heading shown above the lines.
    pub heading: Option<String>,
    /// Emphasis.
    pub tone: Tone,
    /// Body lines; may be empty.
    pub lines: Vec<String>,
}

/// Result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Operation label or summary.
    pub title: String,
    /// Ordered sections.
    pub sections: Vec<Section>,
}

impl Report {
    /// Empty report with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a single unheaded line.
    pub fn line(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: None,
            tone,
            lines: vec![text.into()],
        });
        self
    }

    /// Append a headed section.
    pub fn section(
        mut self,
        heading: impl Into<String>,
        tone: Tone,
        lines: Vec<String>,
    ) -> Self {
        self.sections.push(Section {
            heading: Some(heading.into()),
            tone,
            lines,
        });
        self
    }

    /// Find a section by heading.
    pub fn find(&self, heading: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.heading.as_deref() == Some(heading))
    }

    /// All body lines in order, headings excluded.
    pub fn body(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for section in &self.sections {
            if let Some(heading) = &section.heading {
                writeln!(f, "{heading}")?;
            }
            for line in &section.lines {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}
