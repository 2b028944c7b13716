use crate::domain::ReportSchema;

/// Maximum title length, in characters.
const MAX_TITLE_CHARS: usize = 80;

const PLACEHOLDER: &str = "N/A";

/// One layout instruction for the composed document. The plan is built
/// separately from rendering so pagination and placeholder logic can be
/// inspected without touching fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Heading(String),
    SubHeading(String),
    Paragraph(String),
    Bullet(String),
    Citation(String),
    /// Index into the pipeline's chart image list.
    Image(usize),
    PageBreak,
}

/// Null/empty/whitespace-only text becomes a fixed placeholder so the
/// document never contains blank required fields.
pub fn safe_text(text: &str) -> String {
    if text.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text.to_string()
    }
}

fn safe_opt(text: Option<&str>, default: &str) -> String {
    match text {
        None => default.to_string(),
        Some(t) => safe_text(t),
    }
}

fn bullets(items: &[String], default: &str) -> Vec<Block> {
    if items.is_empty() {
        vec![Block::Bullet(default.to_string())]
    } else {
        items.iter().map(|i| Block::Bullet(safe_text(i))).collect()
    }
}

/// Fixed page structure: title, five numbered sections, optional
/// visualizations page (only when charts exist) and optional references.
pub fn section_plan(report: &ReportSchema, chart_count: usize) -> Vec<Block> {
    let mut blocks = Vec::new();

    let title: String = safe_opt(report.title.as_deref(), "Report")
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect();
    blocks.push(Block::Title(title));

    blocks.push(Block::Heading("1. Executive Summary".to_string()));
    blocks.push(Block::Paragraph(safe_text(&report.executive_summary)));

    blocks.push(Block::Heading("2. Key Findings".to_string()));
    blocks.extend(bullets(&report.key_findings, "No key findings available."));

    blocks.push(Block::Heading("3. Detailed Analysis".to_string()));
    blocks.push(Block::Paragraph(safe_opt(
        report.detailed_analysis.as_deref(),
        "No detailed analysis available.",
    )));

    if chart_count > 0 {
        blocks.push(Block::PageBreak);
        blocks.push(Block::Heading("4. Data Visualizations".to_string()));
        blocks.extend((0..chart_count).map(Block::Image));
    }

    blocks.push(Block::PageBreak);
    blocks.push(Block::Heading("5. Recommendations".to_string()));
    blocks.extend(bullets(
        &report.recommendations,
        "No recommendations available.",
    ));

    if !report.citations.is_empty() {
        blocks.push(Block::SubHeading("References".to_string()));
        blocks.extend(
            report
                .citations
                .iter()
                .map(|c| Block::Citation(safe_text(c))),
        );
    }

    blocks
}
