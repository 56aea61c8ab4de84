//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};
use crate::source_map::SourceMap;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: Option<&'s SourceMap>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sources: None,
            colored: false,
        }
    }

    pub fn sources(mut self, sources: &'s SourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(sources) = self.sources else {
            return self.format_plain(w);
        };

        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.raw().iter().enumerate() {
            let report = build_report(diag, sources);
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.raw().iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}

fn build_report<'a>(diag: &'a DiagnosticMessage, sources: &'a SourceMap) -> Vec<Group<'a>> {
    let content = sources.content(diag.span.source);
    let path = sources.kind(diag.span.source).display_name();
    let range = adjust_range(diag.span.range, content.len());

    let mut snippet = Snippet::source(content).line_start(1).path(path).annotation(
        AnnotationKind::Primary
            .span(range)
            .label(&diag.message),
    );

    // Related spans in the same file join the primary snippet; spans in other
    // files get their own snippet under the same title.
    let mut foreign = Vec::new();
    for related in &diag.related {
        if related.span.source == diag.span.source {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(adjust_range(related.span.range, content.len()))
                    .label(&related.message),
            );
        } else {
            foreign.push(related);
        }
    }

    let level = severity_to_level(diag.severity());
    let mut title_group = level.primary_title(&diag.message).element(snippet);

    for related in foreign {
        let content = sources.content(related.span.source);
        let path = sources.kind(related.span.source).display_name();
        title_group = title_group.element(
            Snippet::source(content).line_start(1).path(path).annotation(
                AnnotationKind::Context
                    .span(adjust_range(related.span.range, content.len()))
                    .label(&related.message),
            ),
        );
    }

    let mut report: Vec<Group> = vec![title_group];
    for hint in &diag.hints {
        report.push(Group::with_title(Level::NOTE.secondary_title(hint.as_str())));
    }
    report
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
