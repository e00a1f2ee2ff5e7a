use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::AppError;
use crate::telemetry::metrics::REPORT_PDF_BYTES;

pub const REPORT_TITLE: &str = "Heart Disease Prediction Report";
pub const REPORT_FILENAME: &str = "Heart_Test_Report.pdf";
pub const REPORT_MIME: &str = "application/pdf";
pub const REPORT_CONTENT_DISPOSITION: &str = "attachment; filename=\"Heart_Test_Report.pdf\"";

// A4 portrait, all positions in millimeters from the bottom-left corner.
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const TITLE_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;
const TITLE_X: f64 = 35.0;
const TITLE_Y: f64 = 280.0;
const BODY_X: f64 = 18.0;
const BODY_TOP: f64 = 270.0;
const LINE_STEP: f64 = 6.0;
const BOTTOM_MARGIN: f64 = 12.0;

/// Body lines that fit on the single page. Lines beyond this are dropped:
/// the document never grows a second page.
pub const MAX_BODY_LINES: usize = ((BODY_TOP - BOTTOM_MARGIN) / LINE_STEP) as usize;

/// One positioned line of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f64,
    pub y_mm: f64,
    pub size: f64,
    pub bold: bool,
}

/// Lays the title and the trimmed report lines out on the fixed grid.
/// Pure function of the report text; the byte rendering below consumes it.
pub fn layout_lines(report: &str) -> Vec<PlacedLine> {
    let mut placed = vec![PlacedLine {
        text: REPORT_TITLE.to_string(),
        x_mm: TITLE_X,
        y_mm: TITLE_Y,
        size: TITLE_SIZE,
        bold: true,
    }];

    let mut y = BODY_TOP;
    for line in report.lines().take(MAX_BODY_LINES) {
        placed.push(PlacedLine {
            text: line.trim().to_string(),
            x_mm: BODY_X,
            y_mm: y,
            size: BODY_SIZE,
            bold: false,
        });
        y -= LINE_STEP;
    }

    placed
}

#[tracing::instrument(
    name = "pipeline_stage pdf",
    skip(report),
    fields(
        pipeline.stage = "pdf",
        pdf.bytes,
    )
)]
pub fn render_pdf(report: &str) -> Result<Vec<u8>, AppError> {
    let (doc, page_index, layer_index) = PdfDocument::new(
        REPORT_TITLE,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page_index).get_layer(layer_index);
    for line in layout_lines(report) {
        let font = if line.bold { &bold } else { &regular };
        layer.use_text(line.text, line.size, Mm(line.x_mm), Mm(line.y_mm), font);
    }

    let mut buf = std::io::BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    REPORT_PDF_BYTES.record(bytes.len() as f64, &[]);
    tracing::Span::current().record("pdf.bytes", bytes.len());

    Ok(bytes)
}
