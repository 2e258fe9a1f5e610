//! Text flow: turns a `ResumeDocument` into wrapped, measured lines.
//!
//! This is a single-column approximation of the HTML layout, used both to
//! estimate content height for preview pagination and to place text in the
//! PDF export. Columns (the Modern sidebar) are flowed one after the other.
//!
//! All measurements are in PDF points.

use std::collections::HashMap;

use serde::Serialize;

use crate::layout::font_metrics::FontMetricTable;
use crate::render::document::{Entry, Header, ResumeDocument, SectionBody};
use crate::style::font_size::{resolve_px, SectionKey, SizeToken};
use crate::style::paper::px_to_pt;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.35;

const SECTION_GAP_PT: f32 = 10.0;
const ENTRY_GAP_PT: f32 = 5.0;
const BODY_INDENT_PT: f32 = 8.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A paragraph of uniformly styled text before wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub size_pt: f32,
    pub bold: bool,
    /// Drawn in the accent color (section titles).
    pub accent: bool,
    pub space_before_pt: f32,
    pub indent_pt: f32,
}

impl TextRun {
    fn new(text: impl Into<String>, size_px: u16) -> Self {
        Self {
            text: text.into(),
            size_pt: px_to_pt(size_px as f32),
            bold: false,
            accent: false,
            space_before_pt: 0.0,
            indent_pt: 0.0,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn accent(mut self) -> Self {
        self.accent = true;
        self
    }

    fn gap(mut self, pt: f32) -> Self {
        self.space_before_pt = pt;
        self
    }

    fn indent(mut self, pt: f32) -> Self {
        self.indent_pt = pt;
        self
    }
}

/// One printed line after wrapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLine {
    pub text: String,
    pub size_pt: f32,
    pub bold: bool,
    pub accent: bool,
    pub indent_pt: f32,
    /// Vertical space above this line (only the first line of a run has any).
    pub space_before_pt: f32,
    pub height_pt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLayout {
    pub lines: Vec<FlowLine>,
    pub total_height_pt: f32,
}

/// A line positioned on a page; `top_pt` is measured from the top of the
/// content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLine<'a> {
    pub line: &'a FlowLine,
    pub top_pt: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Document → runs
// ────────────────────────────────────────────────────────────────────────────

pub fn document_runs(doc: &ResumeDocument, sizes: &HashMap<String, SizeToken>) -> Vec<TextRun> {
    let mut runs = Vec::new();
    if let Some(header) = &doc.header {
        header_runs(&mut runs, header, sizes);
    }

    let title_px = resolve_px(sizes, SectionKey::SectionTitle);
    for section in &doc.sections {
        let body_px = resolve_px(sizes, section.id.size_key());
        let gap = if runs.is_empty() { 0.0 } else { SECTION_GAP_PT };
        runs.push(TextRun::new(section.title, title_px).bold().accent().gap(gap));

        match &section.body {
            SectionBody::Text { text } => runs.push(TextRun::new(text.as_str(), body_px).gap(2.0)),
            SectionBody::Entries { entries } => {
                for (i, entry) in entries.iter().enumerate() {
                    let gap = if i == 0 { 2.0 } else { ENTRY_GAP_PT };
                    entry_runs(&mut runs, entry, body_px, gap);
                }
            }
            SectionBody::Tags { groups } => {
                for group in groups {
                    let tags = group.tags.join(", ");
                    let text = match group.label {
                        Some(label) => format!("{label}: {tags}"),
                        None => tags,
                    };
                    runs.push(TextRun::new(text, body_px).gap(2.0));
                }
            }
            SectionBody::Languages { items } => {
                let text = items
                    .iter()
                    .map(|(name, level)| format!("{name} ({level})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                runs.push(TextRun::new(text, body_px).gap(2.0));
            }
        }
    }
    runs
}

fn header_runs(runs: &mut Vec<TextRun>, header: &Header, sizes: &HashMap<String, SizeToken>) {
    if !header.name.is_empty() {
        runs.push(TextRun::new(header.name.as_str(), resolve_px(sizes, SectionKey::Name)).bold());
    }
    if !header.profession.is_empty() {
        runs.push(TextRun::new(
            header.profession.as_str(),
            resolve_px(sizes, SectionKey::Profession),
        ));
    }
    let contact_px = resolve_px(sizes, SectionKey::Contact);
    let mut contact: Vec<&str> = header.contacts.iter().map(String::as_str).collect();
    contact.extend(header.links.iter().map(|l| l.display.as_str()));
    if !contact.is_empty() {
        runs.push(TextRun::new(contact.join(" | "), contact_px).gap(2.0));
    }
}

fn entry_runs(runs: &mut Vec<TextRun>, entry: &Entry, body_px: u16, gap: f32) {
    let heading = [entry.heading.as_str(), entry.subheading.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !heading.is_empty() {
        runs.push(TextRun::new(heading, body_px).bold().gap(gap));
    }

    let mut meta: Vec<&str> = [entry.dates.as_str(), entry.location.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if let Some(link) = &entry.link {
        meta.push(link.display.as_str());
    }
    if !meta.is_empty() {
        runs.push(TextRun::new(meta.join(" | "), body_px));
    }

    if !entry.body.is_empty() {
        runs.push(TextRun::new(entry.body.as_str(), body_px).indent(BODY_INDENT_PT));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Runs → lines
// ────────────────────────────────────────────────────────────────────────────

/// Wraps every run to `width_pt` and sums the resulting line boxes.
pub fn lay_out(runs: &[TextRun], metrics: &FontMetricTable, width_pt: f32) -> FlowLayout {
    let mut lines = Vec::new();
    let mut total = 0.0_f32;

    for run in runs {
        let wrapped = metrics.wrap(&run.text, run.size_pt, run.bold, width_pt - run.indent_pt);
        for (i, text) in wrapped.into_iter().enumerate() {
            let line = FlowLine {
                text,
                size_pt: run.size_pt,
                bold: run.bold,
                accent: run.accent,
                indent_pt: run.indent_pt,
                space_before_pt: if i == 0 { run.space_before_pt } else { 0.0 },
                height_pt: run.size_pt * LINE_HEIGHT,
            };
            total += line.space_before_pt + line.height_pt;
            lines.push(line);
        }
    }

    FlowLayout {
        lines,
        total_height_pt: total,
    }
}

/// Splits the flowed lines into pages of `usable_height_pt`.
///
/// Lines are never split; a line that does not fit moves to the next page,
/// where its leading space is dropped. Always returns at least one page.
pub fn paginate(layout: &FlowLayout, usable_height_pt: f32) -> Vec<Vec<PlacedLine<'_>>> {
    let mut pages: Vec<Vec<PlacedLine<'_>>> = vec![Vec::new()];
    let mut cursor = 0.0_f32;

    for line in &layout.lines {
        let needed = line.space_before_pt + line.height_pt;
        let page_has_content = pages.last().is_some_and(|p| !p.is_empty());
        let top = if page_has_content && cursor + needed > usable_height_pt {
            pages.push(Vec::new());
            cursor = line.height_pt;
            0.0
        } else if page_has_content {
            let top = cursor + line.space_before_pt;
            cursor += needed;
            top
        } else {
            cursor = line.height_pt;
            0.0
        };

        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { line, top_pt: top });
        }
    }
    pages
}
