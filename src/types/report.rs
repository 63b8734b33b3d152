//! Diagnostic report rendering for [`Error`].
//!
//! The default report (what `Display` prints) is:
//!
//! ```text
//! Title: message
//! Error code: 42
//! Identifier: req-7
//! key: value
//! <own stack trace>
//!  ---> InnerTitle: inner message
//! <inner stack trace>
//! nested:
//!   NestedTitle: nested message
//! ```
//!
//! Sensitive errors collapse to `Title[: code 42][ - req-7]`.

use std::fmt::{self, Display};

use crate::types::error::{Error, Extension};

/// How the sensitivity flag of an error is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redaction {
    /// Redact exactly the errors flagged as sensitive.
    #[default]
    Auto,
    /// Redact every error in the report.
    Always,
    /// Never redact; for trusted local diagnostics only.
    Never,
}

/// Configuration-based report renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub redaction: Redaction,
    pub show_extensions: bool,
    pub show_causes: bool,
    pub show_traces: bool,
    pub causal_marker: String,
    pub indent: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            redaction: Redaction::Auto,
            show_extensions: true,
            show_causes: true,
            show_traces: true,
            causal_marker: " ---> ".into(),
            indent: "  ".into(),
        }
    }
}

impl ReportConfig {
    /// Headline only: no extensions, causes or traces.
    #[inline]
    pub fn compact() -> Self {
        Self { show_extensions: false, show_causes: false, show_traces: false, ..Default::default() }
    }

    /// Everything redacted, regardless of the sensitivity flags.
    #[inline]
    pub fn redacted() -> Self {
        Self { redaction: Redaction::Always, ..Default::default() }
    }

    /// The full report without stack traces.
    #[inline]
    pub fn no_traces() -> Self {
        Self { show_traces: false, ..Default::default() }
    }

    fn redacts(&self, error: &Error) -> bool {
        match self.redaction {
            Redaction::Auto => error.is_sensitive(),
            Redaction::Always => true,
            Redaction::Never => false,
        }
    }

    /// Renders `error` according to this configuration.
    pub fn render(&self, error: &Error) -> String {
        let mut writer = ReportWriter::new(&self.indent);
        self.render_into(error, &mut writer);
        writer.finish()
    }

    fn render_into(&self, error: &Error, out: &mut ReportWriter<'_>) {
        if self.redacts(error) {
            out.line(redacted_headline(error));
            return;
        }

        out.line(format!("{}: {}", error.title(), error.message()));
        if let Some(code) = error.error_code() {
            out.line(format!("Error code: {code}"));
        }
        if let Some(identifier) = error.identifier() {
            out.line(format!("Identifier: {identifier}"));
        }

        if self.show_extensions {
            for (key, value) in error.extensions().iter().filter(|(_, value)| !value.is_error()) {
                out.line(format!("{key}: {value}"));
            }
        }

        if self.show_traces {
            out.block(error.stack_trace());
        }

        if self.show_causes {
            for inner in error.inner_errors() {
                let headline = if self.redacts(inner) {
                    redacted_headline(inner)
                } else {
                    format!("{}: {}", inner.title(), inner.message())
                };
                out.line(format!("{}{headline}", self.causal_marker));
                if self.show_traces && !self.redacts(inner) {
                    out.block(inner.stack_trace());
                }
            }
        }

        if self.show_extensions {
            for (key, value) in error.extensions().iter().filter(|(_, value)| value.is_error()) {
                let nested = value.nested_errors();
                let single = matches!(value, Extension::Error(_));
                for (index, nested_error) in nested.iter().enumerate() {
                    if single {
                        out.line(format!("{key}:"));
                    } else {
                        out.line(format!("{key}[{index}]:"));
                    }
                    out.depth += 1;
                    self.render_into(nested_error, out);
                    out.depth -= 1;
                }
            }
        }
    }
}

fn redacted_headline(error: &Error) -> String {
    let mut headline = error.title().to_owned();
    if let Some(code) = error.error_code() {
        headline.push_str(&format!(": code {code}"));
    }
    if let Some(identifier) = error.identifier() {
        headline.push_str(" - ");
        headline.push_str(identifier);
    }
    headline
}

struct ReportWriter<'a> {
    out: String,
    indent: &'a str,
    depth: usize,
}

impl<'a> ReportWriter<'a> {
    fn new(indent: &'a str) -> Self {
        Self { out: String::with_capacity(128), indent, depth: 0 }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth {
            self.out.push_str(self.indent);
        }
        self.out.push_str(text.as_ref());
    }

    fn block(&mut self, text: Option<&str>) {
        if let Some(text) = text {
            for line in text.lines() {
                self.line(line);
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Builder for customizing error display output.
pub struct ErrorReport<'a> {
    pub(crate) error: &'a Error,
    pub(crate) config: ReportConfig,
}

impl<'a> ErrorReport<'a> {
    pub fn new(error: &'a Error) -> Self {
        Self { error, config: ReportConfig::default() }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn redaction(mut self, redaction: Redaction) -> Self {
        self.config.redaction = redaction;
        self
    }

    pub fn show_extensions(mut self, show: bool) -> Self {
        self.config.show_extensions = show;
        self
    }

    pub fn show_causes(mut self, show: bool) -> Self {
        self.config.show_causes = show;
        self
    }

    pub fn show_traces(mut self, show: bool) -> Self {
        self.config.show_traces = show;
        self
    }

    pub fn causal_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.causal_marker = marker.into();
        self
    }

    pub fn compact(mut self) -> Self {
        self.config = ReportConfig::compact();
        self
    }
}

impl Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.config.render(self.error))
    }
}
