use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::error::ExportError;
use crate::journal::SessionLog;
use crate::model::PatientProfile;
use crate::stats::LogSummary;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const TOP: Mm = Mm(280.0);
const BOTTOM: Mm = Mm(20.0);
const LEFT: Mm = Mm(20.0);

/// Tracks the cursor and starts a new page when it runs off the bottom.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
    font: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter<'_> {
    fn text(&mut self, text: &str, size: f32, bold: bool) {
        if self.y < BOTTOM {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP;
        }
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(text, size, LEFT, self.y, font);
        self.y -= Mm(size * 0.45 + 1.5);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= Mm(mm);
    }
}

/// Render the patient identity, aggregate statistics and one line per
/// record. `Ok(None)` when the log is empty.
pub fn render_pdf(
    patient: &PatientProfile,
    log: &SessionLog,
) -> Result<Option<Vec<u8>>, ExportError> {
    if log.is_empty() {
        return Ok(None);
    }
    let summary = LogSummary::from_log(log);

    let title = "VisionQuest Session Report";
    let (doc, page1, layer1) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let layer = doc.get_page(page1).get_layer(layer1);

    let mut w = PageWriter {
        doc: &doc,
        layer,
        y: TOP,
        font,
        bold,
    };

    w.text(title, 16.0, true);
    w.text(
        &format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC")),
        9.0,
        false,
    );
    w.gap(4.0);

    w.text("PATIENT", 11.0, true);
    w.text(&format!("Name: {}", patient.name), 10.0, false);
    w.text(&format!("Age: {}", patient.age()), 10.0, false);
    w.text(&format!("Category: {}", patient.category.as_str()), 10.0, false);
    w.gap(4.0);

    w.text("SUMMARY", 11.0, true);
    for line in summary_lines(&summary) {
        w.text(&line, 10.0, false);
    }
    w.gap(4.0);

    w.text("SESSIONS", 11.0, true);
    for (i, record) in log.iter().enumerate() {
        let line = format!(
            "{:>3}. {}  {:<20} score {:>3}  NPC {:.1} -> {:.1} cm  NPA {:.1} -> {:.1} cm",
            i + 1,
            record.recorded_at().format("%Y-%m-%d %H:%M"),
            record.exercise().label(),
            record.composite(),
            record.pre().npc_cm(),
            record.post().npc_cm(),
            record.pre().npa_cm(),
            record.post().npa_cm(),
        );
        w.text(&line, 9.0, false);
    }
    drop(w);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))?;
    Ok(Some(bytes))
}

fn summary_lines(summary: &LogSummary) -> Vec<String> {
    let mut lines = vec![format!("Sessions: {}", summary.count)];
    if let Some(mean) = summary.mean_score {
        lines.push(format!("Average score: {mean:.1}%"));
    }
    if let Some(max) = summary.max_score {
        lines.push(format!("Best score: {max}%"));
    }
    if let Some(kind) = summary.most_frequent_exercise {
        lines.push(format!("Most practiced: {}", kind.label()));
    }
    if let Some(delta) = summary.measurement_delta {
        lines.push(format!(
            "NPC change: {:+.1} cm   NPA change: {:+.1} cm",
            delta.npc_cm, delta.npa_cm
        ));
    }
    lines
}

/// Export the report to `path`. `Ok(None)` when the log is empty.
pub fn export_pdf(
    patient: &PatientProfile,
    log: &SessionLog,
    path: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    let Some(bytes) = render_pdf(patient, log)? else {
        tracing::debug!("pdf export skipped: empty log");
        return Ok(None);
    };
    super::write_file(path, &bytes)?;
    tracing::info!(path = %path.display(), records = log.len(), "pdf exported");
    Ok(Some(path.to_path_buf()))
}
