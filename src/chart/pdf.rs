use super::{ChartSink, FailureMarker};
use crate::errors::{AppError, AppResult};
use crate::models::Series;
use crate::utils::path::tag_file_stem;
use chrono::NaiveDateTime;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Encode `text` for the WinAnsi-encoded base font. Printable ASCII and
/// Latin-1 letters map to their own byte, everything else becomes `?`.
pub fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Writes one landscape PDF page per report into `out_dir`.
#[derive(Debug, Clone)]
pub struct PdfChart {
    out_dir: PathBuf,
    page_w: f32,
    page_h: f32,
    margin_left: f32,
    margin_right: f32,
    margin_top: f32,
    margin_bottom: f32,
    font_size: f32,
    title_font_size: f32,
    marker_size: f32,
}

impl PdfChart {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            page_w: 842.0,
            page_h: 595.0,
            margin_left: 80.0,
            margin_right: 40.0,
            margin_top: 70.0,
            margin_bottom: 60.0,
            font_size: 9.0,
            title_font_size: 14.0,
            marker_size: 4.0,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// File the chart for `tag` is written to.
    pub fn chart_path(&self, tag: &str) -> PathBuf {
        self.out_dir.join(format!("{}.pdf", tag_file_stem(tag)))
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&win_ansi_bytes(text)));
        content.end_text();
    }

    /// Build the PDF document bytes.
    fn build(&self, tag: &str, series: &Series, markers: &[FailureMarker]) -> AppResult<Vec<u8>> {
        let stamps = series.timestamps().ok_or_else(|| {
            AppError::Chart(format!("series '{}' has no timestamp axis", series.name()))
        })?;

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let page_id = Ref::new(4);
        let content_id = Ref::new(5);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        {
            let mut page = pdf.page(page_id);
            page.parent(pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);
            page.resources().fonts().pair(Name(b"F1"), font_id);
        }

        let plot = PlotArea::new(self, stamps, series.values(), markers);
        let mut content = Content::new();

        // Title
        let title = format!(
            "{}: {} buckets, {} failure buckets",
            tag,
            series.len(),
            markers.len()
        );
        self.draw_text(
            &mut content,
            self.margin_left,
            self.page_h - self.margin_top + 30.0,
            self.title_font_size,
            &title,
        );

        // Frame
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(plot.x0, plot.y0, plot.w, plot.h);
        content.stroke();
        content.restore_state();

        // Series line, broken at nulls
        content.save_state();
        content.set_line_width(1.0);
        content.set_stroke_rgb(0.12, 0.47, 0.71);
        let mut pen_down = false;
        for (ts, value) in stamps.iter().zip(series.values()) {
            match value {
                Some(v) => {
                    let (x, y) = (plot.x(*ts), plot.y(*v));
                    if pen_down {
                        content.line_to(x, y);
                    } else {
                        content.move_to(x, y);
                        pen_down = true;
                    }
                }
                None => pen_down = false,
            }
        }
        content.stroke();
        content.restore_state();

        // Failure markers
        if !markers.is_empty() {
            content.save_state();
            content.set_fill_rgb(0.85, 0.1, 0.1);
            let half = self.marker_size / 2.0;
            for m in markers {
                content.rect(
                    plot.x(m.timestamp) - half,
                    plot.y(m.value) - half,
                    self.marker_size,
                    self.marker_size,
                );
            }
            content.fill_nonzero();
            content.restore_state();
        }

        // Axis labels
        let label_x = self.margin_left - 70.0;
        self.draw_text(
            &mut content,
            label_x,
            plot.y0 + plot.h - self.font_size,
            self.font_size,
            &format!("{:.2}", plot.v_max),
        );
        self.draw_text(
            &mut content,
            label_x,
            plot.y0,
            self.font_size,
            &format!("{:.2}", plot.v_min),
        );
        if let (Some(first), Some(last)) = (stamps.first(), stamps.last()) {
            let label_y = plot.y0 - 15.0;
            self.draw_text(
                &mut content,
                plot.x0,
                label_y,
                self.font_size,
                &first.format("%Y-%m-%d %H:%M").to_string(),
            );
            self.draw_text(
                &mut content,
                plot.x0 + plot.w - 75.0,
                label_y,
                self.font_size,
                &last.format("%Y-%m-%d %H:%M").to_string(),
            );
        }

        pdf.stream(content_id, &content.finish());
        Ok(pdf.finish())
    }
}

impl ChartSink for PdfChart {
    fn render(&self, tag: &str, series: &Series, markers: &[FailureMarker]) -> AppResult<PathBuf> {
        let bytes = self.build(tag, series, markers)?;

        fs::create_dir_all(&self.out_dir)?;
        let path = self.chart_path(tag);
        let mut f = File::create(&path)?;
        f.write_all(&bytes)?;

        log::info!("Chart written: {}", path.display());
        Ok(path)
    }
}

/// Maps timestamps and values into page coordinates.
struct PlotArea {
    x0: f32,
    y0: f32,
    w: f32,
    h: f32,
    t_min: NaiveDateTime,
    t_span_ms: f64,
    v_min: f64,
    v_max: f64,
}

impl PlotArea {
    fn new(
        chart: &PdfChart,
        stamps: &[NaiveDateTime],
        values: &[Option<f64>],
        markers: &[FailureMarker],
    ) -> Self {
        let t_min = stamps.iter().min().copied().unwrap_or_default();
        let t_max = stamps.iter().max().copied().unwrap_or(t_min);

        let (mut v_min, mut v_max) = values
            .iter()
            .flatten()
            .copied()
            .chain(markers.iter().map(|m| m.value))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !v_min.is_finite() || !v_max.is_finite() {
            (v_min, v_max) = (0.0, 1.0);
        } else if v_min == v_max {
            (v_min, v_max) = (v_min - 1.0, v_max + 1.0);
        } else {
            let pad = (v_max - v_min) * 0.05;
            (v_min, v_max) = (v_min - pad, v_max + pad);
        }

        Self {
            x0: chart.margin_left,
            y0: chart.margin_bottom,
            w: chart.page_w - chart.margin_left - chart.margin_right,
            h: chart.page_h - chart.margin_top - chart.margin_bottom,
            t_min,
            t_span_ms: (t_max - t_min).num_milliseconds() as f64,
            v_min,
            v_max,
        }
    }

    fn x(&self, ts: NaiveDateTime) -> f32 {
        if self.t_span_ms <= 0.0 {
            return self.x0 + self.w / 2.0;
        }
        let frac = (ts - self.t_min).num_milliseconds() as f64 / self.t_span_ms;
        self.x0 + (frac as f32) * self.w
    }

    fn y(&self, v: f64) -> f32 {
        let frac = (v - self.v_min) / (self.v_max - self.v_min);
        self.y0 + (frac as f32) * self.h
    }
}
