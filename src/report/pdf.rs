use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use printpdf::path::{PaintMode, WindingOrder};

use crate::esg::classifier::{HIGH_THRESHOLD, MEDIUM_THRESHOLD};
use crate::models::{Rating, ScoredDocument};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const BANNER_H: f32 = 60.0;

type Rgb3 = (f32, f32, f32);

const ACCENT: Rgb3 = (0.09, 0.49, 0.36);
const ACCENT_DIM: Rgb3 = (0.80, 0.93, 0.87);
const ROW_ALT: Rgb3 = (0.95, 0.97, 0.96);
const RULE: Rgb3 = (0.84, 0.88, 0.86);
const TEXT_PRI: Rgb3 = (0.07, 0.09, 0.10);
const TEXT_SEC: Rgb3 = (0.36, 0.42, 0.40);
const WHITE: Rgb3 = (1.0, 1.0, 1.0);

const HIGH_FG: Rgb3 = (0.07, 0.52, 0.22);
const HIGH_BG: Rgb3 = (0.90, 0.98, 0.92);
const MED_FG: Rgb3 = (0.70, 0.40, 0.02);
const MED_BG: Rgb3 = (1.00, 0.95, 0.87);
const LOW_FG: Rgb3 = (0.76, 0.09, 0.13);
const LOW_BG: Rgb3 = (1.00, 0.91, 0.91);

/// Write a PDF report: cover page with rating counts, then one row per document.
pub fn render(docs: &[ScoredDocument], output_path: &Path) -> Result<()> {
    let doc = PdfDocument::empty("ESG Sustainability Report");
    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    add_cover_page(&doc, docs, &font_r, &font_b);
    add_table_pages(&doc, docs, &font_r, &font_b);

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

fn rating_colors(rating: Rating) -> (Rgb3, Rgb3) {
    match rating {
        Rating::High => (HIGH_FG, HIGH_BG),
        Rating::Medium => (MED_FG, MED_BG),
        Rating::Low => (LOW_FG, LOW_BG),
    }
}

fn add_cover_page(
    doc: &PdfDocumentReference,
    docs: &[ScoredDocument],
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Cover");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    fill_rect(&layer, 0.0, PAGE_H - BANNER_H, PAGE_W, BANNER_H, ACCENT);
    set_color(&layer, WHITE);
    layer.use_text("ESG Sustainability", 26.0, Mm(MARGIN), Mm(PAGE_H - 26.0), font_b);
    set_color(&layer, ACCENT_DIM);
    layer.use_text("Keyword Report", 26.0, Mm(MARGIN), Mm(PAGE_H - 40.0), font_b);
    layer.use_text(
        format!("esg-rater v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(PAGE_W - MARGIN - 30.0), Mm(PAGE_H - 10.0), font_r,
    );

    let below = PAGE_H - BANNER_H;
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        format!("Generated  {}", Local::now().format("%Y-%m-%d %H:%M")),
        9.0, Mm(MARGIN), Mm(below - 12.0), font_r,
    );

    let count = |r: Rating| docs.iter().filter(|d| d.assessment.rating == r).count();
    let cards = [
        ("DOCUMENTS", docs.len(), ACCENT),
        ("HIGH", count(Rating::High), HIGH_FG),
        ("MEDIUM", count(Rating::Medium), MED_FG),
        ("LOW", count(Rating::Low), LOW_FG),
    ];
    let gap = 4.0;
    let card_w = (PAGE_W - 2.0 * MARGIN - gap * 3.0) / 4.0;
    let card_h = 24.0;
    let card_y = below - 46.0;
    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let x = MARGIN + (card_w + gap) * i as f32;
        fill_rect(&layer, x, card_y, card_w, card_h, ROW_ALT);
        fill_rect(&layer, x, card_y + card_h - 2.0, card_w, 2.0, *accent);
        set_color(&layer, *accent);
        layer.use_text(value.to_string(), 20.0, Mm(x + 5.0), Mm(card_y + 9.0), font_b);
        set_color(&layer, TEXT_SEC);
        layer.use_text(*label, 6.5, Mm(x + 5.0), Mm(card_y + 3.5), font_r);
    }

    let notes_y = card_y - 14.0;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, notes_y, RULE);
    set_color(&layer, TEXT_SEC);
    layer.use_text("METHOD", 6.5, Mm(MARGIN), Mm(notes_y - 7.0), font_b);
    let notes = [
        format!(
            "Rating: total keyword hits below {} are Low, below {} Medium, otherwise High.",
            MEDIUM_THRESHOLD, HIGH_THRESHOLD
        ),
        "Keywords match as substrings, so longer words containing a keyword also count.".to_string(),
        "Dominance is the largest category's share of all hits, not a probability.".to_string(),
    ];
    set_color(&layer, TEXT_PRI);
    for (i, note) in notes.iter().enumerate() {
        layer.use_text(note.as_str(), 8.5, Mm(MARGIN), Mm(notes_y - 15.0 - i as f32 * 6.0), font_r);
    }

    footer(&layer, font_r);
}

fn add_table_pages(
    doc: &PdfDocumentReference,
    docs: &[ScoredDocument],
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    const ROW_H: f32 = 7.0;
    const HDR_Y: f32 = 268.0;
    const FIRST_Y: f32 = 260.0;
    const BOTTOM: f32 = 26.0;

    //  DOCUMENT  SOURCE  ENV  SOC  GOV  TOTAL  RATING
    let col_x = [
        MARGIN, MARGIN + 62.0, MARGIN + 92.0, MARGIN + 106.0,
        MARGIN + 120.0, MARGIN + 134.0, MARGIN + 152.0,
    ];
    let headers = ["DOCUMENT", "SOURCE", "ENV", "SOC", "GOV", "TOTAL", "RATING"];

    let mut layer: Option<PdfLayerReference> = None;
    let mut cur_y = FIRST_Y;
    let mut page_num = 0u32;

    for (row_idx, item) in docs.iter().enumerate() {
        let page = match layer.take() {
            Some(current) if cur_y - ROW_H >= BOTTOM => current,
            _ => {
                page_num += 1;
                let (pi, li) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Documents");
                let fresh = doc.get_page(pi).get_layer(li);

                fill_rect(&fresh, 0.0, PAGE_H - 3.0, PAGE_W, 3.0, ACCENT);
                set_color(&fresh, TEXT_PRI);
                fresh.use_text("Scored Documents", 14.0, Mm(MARGIN), Mm(282.0), font_b);
                set_color(&fresh, TEXT_SEC);
                fresh.use_text(
                    format!("Page {}", page_num),
                    8.0, Mm(PAGE_W - MARGIN - 14.0), Mm(282.5), font_r,
                );
                for (i, h) in headers.iter().enumerate() {
                    fresh.use_text(*h, 7.0, Mm(col_x[i] + 1.5), Mm(HDR_Y), font_b);
                }
                draw_hline(&fresh, MARGIN, PAGE_W - MARGIN, HDR_Y - 2.5, RULE);
                footer(&fresh, font_r);

                cur_y = FIRST_Y;
                fresh
            }
        };

        let a = &item.assessment;
        if row_idx % 2 == 0 {
            fill_rect(&page, MARGIN, cur_y - ROW_H + 1.5, PAGE_W - 2.0 * MARGIN, ROW_H, ROW_ALT);
        }

        let text_y = cur_y - 4.0;
        set_color(&page, TEXT_PRI);
        page.use_text(truncate(&item.name, 34), 8.0, Mm(col_x[0] + 1.5), Mm(text_y), font_r);
        set_color(&page, TEXT_SEC);
        page.use_text(truncate(&item.source, 16), 8.0, Mm(col_x[1] + 1.5), Mm(text_y), font_r);
        let numbers = [a.scores.environment, a.scores.social, a.scores.governance, a.total];
        for (offset, n) in numbers.iter().enumerate() {
            page.use_text(n.to_string(), 8.0, Mm(col_x[2 + offset] + 1.5), Mm(text_y), font_r);
        }

        let (fg, bg) = rating_colors(a.rating);
        let badge_x = col_x[6] + 1.5;
        let badge_y = cur_y - ROW_H + 2.2;
        fill_rect(&page, badge_x, badge_y, 20.0, 4.8, bg);
        set_color(&page, fg);
        page.use_text(a.rating.to_string().to_uppercase(), 7.0, Mm(badge_x + 3.0), Mm(badge_y + 1.1), font_b);

        cur_y -= ROW_H;
        layer = Some(page);
    }
}

fn footer(layer: &PdfLayerReference, font_r: &IndirectFontRef) {
    draw_hline(layer, MARGIN, PAGE_W - MARGIN, 22.0, RULE);
    set_color(layer, TEXT_SEC);
    layer.use_text(
        format!("Generated by esg-rater v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), font_r,
    );
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn rgb((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb { r, g, b, icc_profile: None })
}

fn set_color(layer: &PdfLayerReference, color: Rgb3) {
    layer.set_fill_color(rgb(color));
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: Rgb3) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, color: Rgb3) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_thickness(1.0);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
