//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use indexmap::IndexMap;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};
use crate::Location;

/// Builder for rendering diagnostics with various options.
///
/// Diagnostics whose file has a registered source text are rendered as
/// annotated snippets; the rest fall back to one line each.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: IndexMap<&'s str, &'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sources: IndexMap::new(),
            colored: false,
        }
    }

    /// Register the text of `path` so its diagnostics render with context.
    pub fn source(mut self, path: &'s str, text: &'s str) -> Self {
        self.sources.insert(path, text);
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
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.sources.get(diag.location.path.as_str()) {
                Some(text) => self.format_snippet(&renderer, diag, text, w)?,
                None => write!(w, "{}", diag)?,
            }
        }
        Ok(())
    }

    fn format_snippet(
        &self,
        renderer: &Renderer,
        diag: &DiagnosticMessage,
        source: &str,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let range = location_range(&diag.location, source);

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .path(diag.location.path.as_str())
            .annotation(
                AnnotationKind::Primary
                    .span(range)
                    .label(diag.message.as_str()),
            );

        for related in &diag.related {
            if related.location.path != diag.location.path {
                continue;
            }
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(location_range(&related.location, source))
                    .label(related.message.as_str()),
            );
        }

        let level = severity_to_level(diag.severity());
        let mut report: Vec<Group> = vec![level.primary_title(diag.message.as_str()).element(snippet)];

        for hint in &diag.hints {
            report.push(Group::with_title(Level::HELP.secondary_title(hint.as_str())));
        }

        write!(w, "{}", renderer.render(&report))
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Byte range covering the word that starts at `location`.
///
/// Columns count characters, not bytes. Positions past the end of a line or
/// file are clamped; an empty word still underlines one character.
fn location_range(location: &Location, source: &str) -> std::ops::Range<usize> {
    let line_start = source
        .split_inclusive('\n')
        .take(location.line.saturating_sub(1) as usize)
        .map(str::len)
        .sum::<usize>();
    let line_end = source[line_start..]
        .find('\n')
        .map_or(source.len(), |i| line_start + i);

    let start = source[line_start..line_end]
        .char_indices()
        .nth(location.column.saturating_sub(1) as usize)
        .map_or(line_end, |(i, _)| line_start + i);
    let word_len = source[start..line_end]
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(line_end - start);

    if word_len == 0 {
        let next = source[start..].chars().next().map_or(0, char::len_utf8);
        return start..start + next;
    }
    start..start + word_len
}

impl Diagnostics {
    pub fn printer<'s>(&self) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter::new(self)
    }
}

#[cfg(test)]
mod range_tests {
    use super::*;

    #[test]
    fn range_covers_identifier() {
        let src = "struct A {\n  1: Foo f\n}\n";
        let loc = Location::new("a.thrift", 2, 6);
        assert_eq!(&src[location_range(&loc, src)], "Foo");
    }

    #[test]
    fn range_counts_columns_in_characters() {
        let src = "// éé Foo\nstruct A {}\n";
        let loc = Location::new("a.thrift", 1, 7);
        assert_eq!(&src[location_range(&loc, src)], "Foo");
    }

    #[test]
    fn range_of_empty_word_covers_a_whole_character() {
        let src = "x = é\n";
        let loc = Location::new("a.thrift", 1, 2);
        assert_eq!(&src[location_range(&loc, src)], " ");
        let loc = Location::new("a.thrift", 1, 5);
        assert_eq!(&src[location_range(&loc, src)], "é");
    }

    #[test]
    fn range_clamps_past_end_of_line() {
        let src = "x\ny";
        let loc = Location::new("a.thrift", 1, 40);
        assert_eq!(location_range(&loc, src), 1..2);
    }
}
