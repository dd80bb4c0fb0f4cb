//! PDF rendering of the daily report.
//!
//! A4 portrait, built from the built-in Helvetica faces so no font files
//! ship with the binary. Layout mirrors the printed report the warung
//! hands to its manager:
//!
//! ```text
//! ───────────────────────────────────────────
//!            LAPORAN SISTEM KASIR
//!                WARUNG MAKAN
//! ───────────────────────────────────────────
//!  INFORMASI LAPORAN      (date, period)
//!  RINGKASAN PENJUALAN    (totals table)
//!  DAFTAR MENU TERLARIS   (best-seller table)
//!  GRAFIK PENDAPATAN MENU (proportional bars)
//!                         signature block
//! ───────────────────────────────────────────
//!  Halaman N · Dicetak pada: <timestamp>
//! ```

use chrono::Local;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Rect, Rgb,
};

use warung_core::report::{BestSeller, DailyReport};
use warung_core::Money;

use super::{format_rupiah, RenderError};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_LEFT: f64 = 10.0;
const MARGIN_RIGHT: f64 = 200.0;
const FOOTER_LIMIT: f64 = 25.0;
const ROW_HEIGHT: f64 = 7.0;

/// Points to millimeters (1 pt = 1/72 inch).
const PT_TO_MM: f64 = 0.352_778;

/// Bars become unreadable past this; the table above still has it all.
const MAX_CHART_BARS: usize = 10;

/// Renders the daily report as a paginated A4 PDF.
pub fn render_pdf(report: &DailyReport) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Laporan Harian {}", report.date),
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: builtin(&doc, BuiltinFont::Helvetica)?,
        bold: builtin(&doc, BuiltinFont::HelveticaBold)?,
        italic: builtin(&doc, BuiltinFont::HelveticaOblique)?,
    };

    {
        let mut page = PageWriter::new(&doc, &fonts);
        page.start_page(first_page, first_layer);

        page.band("INFORMASI LAPORAN");
        page.label_row("Tanggal Laporan", &report.date.to_string());
        page.label_row("Periode", "Harian (Daily Report)");
        page.space(6.0);

        page.band("RINGKASAN PENJUALAN");
        page.label_row("Total Pendapatan", &format_rupiah(report.total_revenue));
        page.label_row(
            "Jumlah Transaksi",
            &format!("{} transaksi", report.total_transactions),
        );
        page.label_row("Total Item Terjual", &format!("{} item", report.total_items));
        page.label_row(
            "Rata-rata per Transaksi",
            &format_rupiah(average_per_transaction(report)),
        );
        page.space(6.0);

        page.band("DAFTAR MENU TERLARIS");
        page.table_header();
        for (i, seller) in report.best_sellers.iter().enumerate() {
            page.table_row(i + 1, seller);
        }

        if !report.best_sellers.is_empty() && report.best_sellers.len() <= MAX_CHART_BARS {
            let max_revenue = report
                .best_sellers
                .iter()
                .map(|s| s.revenue.rupiah())
                .max()
                .unwrap_or(0);
            if max_revenue > 0 {
                page.space(8.0);
                page.band("GRAFIK PENDAPATAN MENU");
                page.space(2.0);
                for seller in &report.best_sellers {
                    page.chart_bar(seller, max_revenue);
                }
            }
        }

        page.signature_block();
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

fn average_per_transaction(report: &DailyReport) -> Money {
    if report.total_transactions == 0 {
        return Money::zero();
    }
    Money::from_rupiah(report.total_revenue.rupiah() / report.total_transactions as i64)
}

/// Rough Helvetica advance (~half an em per glyph); close enough for
/// centering headings without shipping font metrics.
fn text_width_mm(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.5 * PT_TO_MM
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Cursor-based page writer: draws top-down, breaking to a fresh page
/// (with header and footer) when the cursor would run into the footer.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    layer: Option<PdfLayerReference>,
    y: f64,
    page_no: u32,
    printed_at: String,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, fonts: &'a Fonts) -> Self {
        PageWriter {
            doc,
            fonts,
            layer: None,
            y: 0.0,
            page_no: 0,
            printed_at: Local::now().format("%d %B %Y %H:%M:%S").to_string(),
        }
    }

    fn layer(&self) -> &PdfLayerReference {
        self.layer.as_ref().expect("page started")
    }

    fn start_page(&mut self, page: PdfPageIndex, layer: PdfLayerIndex) {
        self.layer = Some(self.doc.get_page(page).get_layer(layer));
        self.page_no += 1;
        self.draw_header();
        self.draw_footer();
        self.y = PAGE_HEIGHT - 42.0;
    }

    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
        self.start_page(page, layer);
    }

    /// Breaks the page if `needed` millimeters would not fit above the
    /// footer.
    fn ensure(&mut self, needed: f64) {
        if self.y - needed < FOOTER_LIMIT {
            self.break_page();
        }
    }

    fn space(&mut self, mm: f64) {
        self.y -= mm;
    }

    // -------------------------------------------------------------------------
    // Drawing primitives
    // -------------------------------------------------------------------------

    fn set_fill(&self, r: f64, g: f64, b: f64) {
        self.layer()
            .set_fill_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
    }

    fn set_outline(&self, r: f64, g: f64, b: f64) {
        self.layer()
            .set_outline_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
    }

    fn text(&self, text: &str, size: f64, x: f64, y: f64, font: &IndirectFontRef) {
        self.layer()
            .use_text(text, size as f32, Mm(x as f32), Mm(y as f32), font);
    }

    fn text_centered(&self, text: &str, size: f64, y: f64, font: &IndirectFontRef) {
        let x = (PAGE_WIDTH - text_width_mm(text, size)) / 2.0;
        self.text(text, size, x, y, font);
    }

    fn hline(&self, y: f64, thickness: f64) {
        self.layer().set_outline_thickness(thickness as f32);
        self.layer().add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT as f32), Mm(y as f32)), false),
                (Point::new(Mm(MARGIN_RIGHT as f32), Mm(y as f32)), false),
            ],
            is_closed: false,
        });
    }

    /// Bordered cell, optionally gray-filled, with left-aligned text.
    /// PDF text shares the fill color, so it is reset to black after
    /// painting the background.
    fn cell(&self, x: f64, width: f64, text: &str, font: &IndirectFontRef, filled: bool) {
        let top = self.y;
        let mode = if filled {
            self.set_fill(0.96, 0.96, 0.96);
            PaintMode::FillStroke
        } else {
            PaintMode::Stroke
        };
        self.set_outline(0.78, 0.78, 0.78);
        self.layer().set_outline_thickness(0.3);
        self.layer().add_rect(
            Rect::new(
                Mm(x as f32),
                Mm((top - ROW_HEIGHT) as f32),
                Mm((x + width) as f32),
                Mm(top as f32),
            )
            .with_mode(mode),
        );
        self.set_fill(0.0, 0.0, 0.0);
        self.text(text, 10.0, x + 2.0, top - ROW_HEIGHT + 2.0, font);
    }

    // -------------------------------------------------------------------------
    // Report sections
    // -------------------------------------------------------------------------

    fn draw_header(&self) {
        self.set_outline(0.0, 0.0, 0.0);
        self.hline(PAGE_HEIGHT - 10.0, 0.5);
        self.set_fill(0.0, 0.0, 0.0);
        self.text_centered(
            "LAPORAN SISTEM KASIR",
            18.0,
            PAGE_HEIGHT - 18.0,
            &self.fonts.bold,
        );
        self.text_centered("WARUNG MAKAN", 16.0, PAGE_HEIGHT - 26.0, &self.fonts.bold);
        self.hline(PAGE_HEIGHT - 30.0, 0.5);
    }

    fn draw_footer(&self) {
        self.set_outline(0.0, 0.0, 0.0);
        self.hline(15.0, 0.3);
        self.set_fill(0.4, 0.4, 0.4);
        self.text_centered(
            &format!("Halaman {}", self.page_no),
            8.0,
            11.0,
            &self.fonts.italic,
        );
        self.text_centered(
            &format!("Dicetak pada: {}", self.printed_at),
            8.0,
            7.0,
            &self.fonts.italic,
        );
        self.set_fill(0.0, 0.0, 0.0);
    }

    /// Steel-blue section band with centered white title.
    fn band(&mut self, title: &str) {
        self.ensure(ROW_HEIGHT + 4.0);
        let top = self.y;
        self.set_fill(0.27, 0.51, 0.71);
        self.set_outline(0.27, 0.51, 0.71);
        self.layer().set_outline_thickness(0.3);
        self.layer().add_rect(
            Rect::new(
                Mm(MARGIN_LEFT as f32),
                Mm((top - (ROW_HEIGHT + 2.0)) as f32),
                Mm(MARGIN_RIGHT as f32),
                Mm(top as f32),
            )
            .with_mode(PaintMode::FillStroke),
        );
        self.set_fill(1.0, 1.0, 1.0);
        self.text_centered(title, 12.0, top - ROW_HEIGHT + 0.5, &self.fonts.bold);
        self.set_fill(0.0, 0.0, 0.0);
        self.y = top - (ROW_HEIGHT + 2.0);
    }

    /// Two-cell row: gray label on the left, value on the right.
    fn label_row(&mut self, label: &str, value: &str) {
        self.ensure(ROW_HEIGHT);
        self.cell(MARGIN_LEFT, 95.0, label, &self.fonts.regular, true);
        self.cell(MARGIN_LEFT + 95.0, 95.0, value, &self.fonts.bold, false);
        self.y -= ROW_HEIGHT;
    }

    fn table_header(&mut self) {
        self.ensure(ROW_HEIGHT);
        self.cell(MARGIN_LEFT, 15.0, "No", &self.fonts.bold, true);
        self.cell(MARGIN_LEFT + 15.0, 90.0, "Nama Menu", &self.fonts.bold, true);
        self.cell(MARGIN_LEFT + 105.0, 30.0, "Jumlah", &self.fonts.bold, true);
        self.cell(
            MARGIN_LEFT + 135.0,
            55.0,
            "Pendapatan",
            &self.fonts.bold,
            true,
        );
        self.y -= ROW_HEIGHT;
    }

    fn table_row(&mut self, no: usize, seller: &BestSeller) {
        self.ensure(ROW_HEIGHT);
        let filled = no % 2 == 0;
        self.cell(MARGIN_LEFT, 15.0, &no.to_string(), &self.fonts.regular, filled);
        self.cell(
            MARGIN_LEFT + 15.0,
            90.0,
            &truncate(&seller.name, 48),
            &self.fonts.regular,
            filled,
        );
        self.cell(
            MARGIN_LEFT + 105.0,
            30.0,
            &seller.count.to_string(),
            &self.fonts.regular,
            filled,
        );
        self.cell(
            MARGIN_LEFT + 135.0,
            55.0,
            &format_rupiah(seller.revenue),
            &self.fonts.regular,
            filled,
        );
        self.y -= ROW_HEIGHT;
    }

    /// One labeled bar, width proportional to revenue (120mm = max).
    fn chart_bar(&mut self, seller: &BestSeller, max_revenue: i64) {
        self.ensure(ROW_HEIGHT);
        let top = self.y;
        let width = (seller.revenue.rupiah() as f64 / max_revenue as f64) * 120.0;

        self.set_fill(0.0, 0.0, 0.0);
        self.text(
            &truncate(&seller.name, 25),
            8.0,
            MARGIN_LEFT,
            top - 4.5,
            &self.fonts.regular,
        );

        let bar_x = MARGIN_LEFT + 52.0;
        self.set_fill(0.27, 0.51, 0.71);
        self.set_outline(0.2, 0.39, 0.59);
        self.layer().set_outline_thickness(0.3);
        self.layer().add_rect(
            Rect::new(
                Mm(bar_x as f32),
                Mm((top - 5.5) as f32),
                Mm((bar_x + width) as f32),
                Mm((top - 0.5) as f32),
            )
            .with_mode(PaintMode::FillStroke),
        );

        self.set_fill(0.0, 0.0, 0.0);
        self.text(
            &format_rupiah(seller.revenue),
            8.0,
            bar_x + width + 2.0,
            top - 4.5,
            &self.fonts.bold,
        );
        self.y -= ROW_HEIGHT;
    }

    fn signature_block(&mut self) {
        self.ensure(45.0);
        self.space(12.0);
        let center_x = 152.0;
        let date = Local::now().format("%d %B %Y").to_string();

        let mut line_y = self.y;
        for (text, font) in [
            (date.as_str(), &self.fonts.regular),
            ("Manajer Warung", &self.fonts.regular),
        ] {
            let x = center_x - text_width_mm(text, 10.0) / 2.0;
            self.text(text, 10.0, x, line_y, font);
            line_y -= 6.0;
        }

        line_y -= 16.0;
        let sig = "(_________________)";
        let x = center_x - text_width_mm(sig, 10.0) / 2.0;
        self.text(sig, 10.0, x, line_y, &self.fonts.bold);
        self.y = line_y - ROW_HEIGHT;
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report(best_sellers: Vec<BestSeller>) -> DailyReport {
        let total_revenue = best_sellers.iter().map(|s| s.revenue).sum();
        DailyReport {
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            total_revenue,
            total_transactions: best_sellers.len() as u64,
            total_items: best_sellers.iter().map(|s| s.count).sum(),
            best_sellers,
        }
    }

    fn seller(id: i64, name: &str, count: i64, revenue: i64) -> BestSeller {
        BestSeller {
            menu_id: id,
            name: name.to_string(),
            count,
            revenue: Money::from_rupiah(revenue),
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let bytes = render_pdf(&report(vec![
            seller(1, "Nasi Goreng", 3, 54_000),
            seller(2, "Es Teh", 3, 15_000),
        ]))
        .unwrap();

        assert_eq!(&bytes[..5], b"%PDF-");
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn test_renders_empty_report() {
        let bytes = render_pdf(&report(vec![])).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    /// Enough rows to force a page break.
    #[test]
    fn test_renders_long_table() {
        let sellers: Vec<BestSeller> = (1..=60)
            .map(|i| seller(i, &format!("Menu {}", i), i, i * 1_000))
            .collect();
        let bytes = render_pdf(&report(sellers)).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long menu name", 10), "a very ...");
    }

    #[test]
    fn test_average_per_transaction() {
        let mut r = report(vec![seller(1, "A", 2, 50_000)]);
        r.total_transactions = 2;
        assert_eq!(average_per_transaction(&r), Money::from_rupiah(25_000));

        r.total_transactions = 0;
        assert_eq!(average_per_transaction(&r), Money::zero());
    }
}
