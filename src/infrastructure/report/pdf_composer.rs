use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use genpdf::elements::{Break, PageBreak, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Document, SimplePageDecorator};
use uuid::Uuid;

use crate::application::ports::{AssemblerError, ReportAssembler};
use crate::domain::{ChartImage, ReportArtifact, ReportSchema};

use super::section_plan::{Block, section_plan};

/// Candidate font locations discoverable through genpdf's
/// `<family>-<face>.ttf` naming, tried in order.
const FONT_DIRS: &[(&str, &str)] = &[
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/usr/share/fonts/liberation", "LiberationSans"),
    ("/usr/share/fonts/truetype/liberation2", "LiberationSans"),
    ("/System/Library/Fonts", "Helvetica"),
    ("/Library/Fonts", "Arial"),
];

/// DejaVu names its face files `DejaVuSans.ttf` / `DejaVuSans-Bold.ttf`,
/// which the naming scheme above cannot discover, so these directories get
/// each face loaded explicitly.
const DEJAVU_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
];

/// genpdf-backed report assembly. Builds the section plan, lays it out
/// into a paginated document and writes the artifact to the configured
/// directory under a fresh uuid filename.
pub struct PdfComposer {
    artifact_dir: PathBuf,
}

impl PdfComposer {
    pub fn new(artifact_dir: PathBuf) -> Self {
        Self { artifact_dir }
    }

    fn render(
        artifact_dir: &PathBuf,
        report: &ReportSchema,
        charts: &[ChartImage],
    ) -> Result<ReportArtifact, AssemblerError> {
        let font_family = load_font_family()?;
        let mut doc = Document::new(font_family);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        for block in section_plan(report, charts.len()) {
            match block {
                Block::Title(text) => {
                    doc.set_title(text.clone());
                    doc.push(
                        Paragraph::new(StyledString::new(
                            text,
                            Style::new().bold().with_font_size(20),
                        ))
                        .aligned(Alignment::Center),
                    );
                    doc.push(Break::new(2));
                }
                Block::Heading(text) => {
                    doc.push(Paragraph::new(StyledString::new(
                        text,
                        Style::new().bold().with_font_size(14),
                    )));
                    doc.push(Break::new(1));
                }
                Block::SubHeading(text) => {
                    doc.push(Paragraph::new(StyledString::new(
                        text,
                        Style::new().bold().with_font_size(12),
                    )));
                    doc.push(Break::new(1));
                }
                Block::Paragraph(text) => {
                    doc.push(Paragraph::new(StyledString::new(
                        text,
                        Style::new().with_font_size(11),
                    )));
                    doc.push(Break::new(1));
                }
                Block::Bullet(text) => {
                    doc.push(Paragraph::new(StyledString::new(
                        format!("  - {text}"),
                        Style::new().with_font_size(11),
                    )));
                }
                Block::Citation(text) => {
                    doc.push(Paragraph::new(StyledString::new(
                        format!("  - {text}"),
                        Style::new().with_font_size(9),
                    )));
                }
                Block::Image(index) => {
                    // An undecodable chart is skipped, never fatal.
                    match decode_image(&charts[index]) {
                        Ok(image) => {
                            doc.push(image.with_alignment(Alignment::Center));
                            doc.push(Break::new(1));
                        }
                        Err(e) => {
                            tracing::error!(
                                title = %charts[index].title,
                                error = %e,
                                "Skipping chart that failed to decode"
                            );
                        }
                    }
                }
                Block::PageBreak => doc.push(PageBreak::new()),
            }
        }

        std::fs::create_dir_all(artifact_dir)?;
        let filename = format!("{}.pdf", Uuid::new_v4());
        let path = artifact_dir.join(&filename);
        doc.render_to_file(&path)
            .map_err(|e| AssemblerError::RenderFailed(e.to_string()))?;

        Ok(ReportArtifact::new(filename, path))
    }
}

#[async_trait]
impl ReportAssembler for PdfComposer {
    #[tracing::instrument(skip_all, fields(chart_count = charts.len()))]
    async fn compose(
        &self,
        report: &ReportSchema,
        charts: &[ChartImage],
    ) -> Result<ReportArtifact, AssemblerError> {
        let artifact_dir = self.artifact_dir.clone();
        let report = report.clone();
        let charts = charts.to_vec();

        let artifact = tokio::task::spawn_blocking(move || {
            Self::render(&artifact_dir, &report, &charts)
        })
        .await
        .map_err(|e| AssemblerError::RenderFailed(format!("task join error: {e}")))??;

        tracing::info!(path = %artifact.path.display(), "Report artifact written");
        Ok(artifact)
    }
}

fn load_font_family() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, AssemblerError>
{
    let mut last_error = String::new();
    for (dir, family) in FONT_DIRS {
        match genpdf::fonts::from_files(dir, family, None) {
            Ok(fonts) => return Ok(fonts),
            Err(e) => last_error = format!("{dir}/{family}: {e}"),
        }
    }
    for dir in DEJAVU_DIRS {
        match load_dejavu(dir) {
            Ok(fonts) => return Ok(fonts),
            Err(e) => last_error = e,
        }
    }
    Err(AssemblerError::FontUnavailable(last_error))
}

fn load_dejavu(dir: &str) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, String> {
    let face = |file: &str| -> Result<genpdf::fonts::FontData, String> {
        let path = Path::new(dir).join(file);
        let bytes = std::fs::read(&path).map_err(|e| format!("{}: {e}", path.display()))?;
        genpdf::fonts::FontData::new(bytes, None).map_err(|e| format!("{}: {e}", path.display()))
    };

    Ok(genpdf::fonts::FontFamily {
        regular: face("DejaVuSans.ttf")?,
        bold: face("DejaVuSans-Bold.ttf")?,
        italic: face("DejaVuSans-Oblique.ttf")?,
        bold_italic: face("DejaVuSans-BoldOblique.ttf")?,
    })
}

fn decode_image(chart: &ChartImage) -> Result<genpdf::elements::Image, String> {
    let bytes = BASE64
        .decode(chart.image.as_bytes())
        .map_err(|e| format!("base64: {e}"))?;
    genpdf::elements::Image::from_reader(Cursor::new(bytes)).map_err(|e| format!("image: {e}"))
}
