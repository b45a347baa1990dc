//! Painter-based slide rendering.

use eframe::egui;

use crate::deck::{SlideDef, TimelineDef};
use crate::theme::Theme;
use crate::timeline::{self, CardSpan};
use crate::viewport::ViewportUnits;

/// Render one slide into `rect`.
pub fn draw_slide(
    ui: &egui::Ui,
    slide: &SlideDef,
    theme: &Theme,
    rect: egui::Rect,
    units: &ViewportUnits,
) {
    let padding = units.px(8.0);
    let content = rect.shrink(padding);

    let heading_galley = ui.painter().layout(
        slide.heading.clone(),
        egui::FontId::proportional(units.px(theme.heading_size)),
        theme.heading_color,
        content.width(),
    );
    let heading_height = heading_galley.rect.height();
    let heading_pos = content.left_top();
    ui.painter()
        .galley(heading_pos, heading_galley, theme.heading_color);

    let below_heading = egui::Rect::from_min_max(
        egui::pos2(content.left(), heading_pos.y + heading_height + units.px(4.0)),
        content.right_bottom(),
    );

    if !slide.body.is_empty() {
        let body_galley = ui.painter().layout(
            slide.body.clone(),
            egui::FontId::proportional(units.px(theme.body_size)),
            theme.foreground,
            below_heading.width(),
        );
        ui.painter()
            .galley(below_heading.left_top(), body_galley, theme.foreground);
    }

    if let Some(timeline) = &slide.timeline {
        draw_timeline(ui, timeline, theme, below_heading, units);
    }
}

/// Render the honors timeline: a row of cards above an axis line, with
/// note labels between them. Card geometry is measured fresh every pass
/// and the note offsets re-derived from it, so the layout survives any
/// resize without accumulated state.
fn draw_timeline(
    ui: &egui::Ui,
    timeline: &TimelineDef,
    theme: &Theme,
    area: egui::Rect,
    units: &ViewportUnits,
) {
    let count = timeline.cards.len();
    if count == 0 {
        return;
    }

    // Cards with half-width gaps between them.
    let card_width = area.width() / (1.5 * count as f32 - 0.5);
    let gap = card_width * 0.5;
    let card_height = units.px(18.0).min(area.height() * 0.5);
    let card_top = area.top() + units.px(2.0);

    let mut spans = Vec::with_capacity(count);
    for (i, card) in timeline.cards.iter().enumerate() {
        let left = area.left() + i as f32 * (card_width + gap);
        spans.push(CardSpan {
            left: left - area.left(),
            width: card_width,
        });

        let card_rect = egui::Rect::from_min_size(
            egui::pos2(left, card_top),
            egui::vec2(card_width, card_height),
        );
        ui.painter()
            .rect_filled(card_rect, units.px(0.8), theme.card_background);

        let inner = card_rect.shrink(units.px(1.5));
        let year_galley = ui.painter().layout(
            card.year.clone(),
            egui::FontId::proportional(units.px(theme.body_size)),
            theme.accent,
            inner.width(),
        );
        let year_height = year_galley.rect.height();
        ui.painter().galley(inner.left_top(), year_galley, theme.accent);

        let text_galley = ui.painter().layout(
            card.text.clone(),
            egui::FontId::proportional(units.px(theme.note_size)),
            theme.foreground,
            inner.width(),
        );
        ui.painter().galley(
            egui::pos2(inner.left(), inner.top() + year_height + units.px(1.0)),
            text_galley,
            theme.foreground,
        );
    }

    // Axis line under the cards.
    let axis_y = card_top + card_height + units.px(3.0);
    ui.painter().line_segment(
        [
            egui::pos2(area.left(), axis_y),
            egui::pos2(area.left() + spans.last().map_or(0.0, |s| s.left + s.width), axis_y),
        ],
        egui::Stroke::new(units.px(0.2).max(1.0), theme.muted),
    );
    for span in &spans {
        let x = area.left() + span.center();
        ui.painter().circle_filled(
            egui::pos2(x, axis_y),
            units.px(0.6),
            theme.accent,
        );
    }

    // Notes at the midpoints between neighboring cards. Under-populated
    // structures draw no notes at all.
    let Some(offsets) = timeline::align_notes(&spans, timeline.notes.len()) else {
        return;
    };
    let note_y = axis_y + units.px(2.0);
    for (note, offset) in timeline.notes.iter().zip(offsets) {
        let galley = ui.painter().layout_no_wrap(
            note.clone(),
            egui::FontId::proportional(units.px(theme.note_size)),
            theme.muted,
        );
        let pos = egui::pos2(area.left() + offset - galley.rect.width() / 2.0, note_y);
        ui.painter().galley(pos, galley, theme.muted);
    }
}
