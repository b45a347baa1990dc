use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::deck::{DeckFile, DeckState};
use crate::render;
use crate::scroll::{self, ScrollBinding, SnapSettings};
use crate::theme::Theme;
use crate::viewport::ViewportUnits;

/// Fraction of the remaining distance covered per frame while easing the
/// scroll offset toward its target.
const SCROLL_EASE: f32 = 0.15;
const SCROLL_EPSILON: f32 = 0.5;
/// How far ahead (in frames of current velocity) the inertia variant of
/// snapping projects the resting offset.
const INERTIA_PROJECTION: f32 = 6.0;

/// Operating mode, decided once at startup. There is no path back from
/// `Static` to `Animated` within a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckMode {
    /// Scroll binding constructed; wheel input drives the track.
    Animated { binding: ScrollBinding },
    /// No binding: slide 0 stays active and navigation is inert.
    Static,
}

pub struct DeckApp {
    deck: DeckState,
    footer: Option<String>,
    theme: Theme,
    snap: SnapSettings,
    units: ViewportUnits,
    mode: DeckMode,
    scroll_offset: f32,
    scroll_target: f32,
    wheel_velocity: f32,
    last_wheel: Option<Instant>,
    last_viewport: egui::Vec2,
    /// 0-based slide requested via `--slide`, applied after the first
    /// binding refresh.
    pending_start: Option<usize>,
    frame_count: u32,
    fps: f32,
    fps_update: Instant,
}

impl DeckApp {
    fn new(
        deck_file: DeckFile,
        theme: Theme,
        snap: SnapSettings,
        force_static: bool,
        pending_start: Option<usize>,
    ) -> Self {
        let footer = deck_file.footer.clone();
        let deck = DeckState::new(deck_file.slides);

        // Provisional binding; real offsets arrive with the first
        // viewport refresh.
        let binding = if force_static {
            None
        } else {
            ScrollBinding::from_track(1280.0, deck.slide_count())
        };
        let mode = match binding {
            Some(binding) => DeckMode::Animated { binding },
            None => DeckMode::Static,
        };

        let now = Instant::now();
        Self {
            deck,
            footer,
            theme,
            snap,
            units: ViewportUnits::new(720.0),
            mode,
            scroll_offset: 0.0,
            scroll_target: 0.0,
            wheel_velocity: 0.0,
            last_wheel: None,
            last_viewport: egui::Vec2::ZERO,
            pending_start,
            frame_count: 0,
            fps: 0.0,
            fps_update: now,
        }
    }

    fn slide_count(&self) -> usize {
        self.deck.slide_count()
    }

    /// Recompute the viewport unit and rebuild the scroll binding for a
    /// new window size, preserving the current progress fraction so a
    /// resize never jumps to a different slide.
    fn refresh_binding(&mut self, viewport: egui::Vec2) {
        self.units.refresh(viewport.y);

        if let DeckMode::Animated { binding } = self.mode {
            let offset_progress = binding.progress_at(self.scroll_offset);
            let target_progress = binding.progress_at(self.scroll_target);
            if let Some(rebuilt) = ScrollBinding::from_track(viewport.x, self.slide_count()) {
                self.mode = DeckMode::Animated { binding: rebuilt };
                self.scroll_offset = rebuilt.offset_for(offset_progress);
                self.scroll_target = rebuilt.offset_for(target_progress);
            }
        }
    }

    /// Navigate to a slide. Out-of-range indices clamp; in static mode
    /// this is a no-op.
    fn scroll_to_slide(&mut self, index: i64) {
        let DeckMode::Animated { binding } = self.mode else {
            return;
        };
        self.scroll_target = binding.target_offset(index, self.slide_count());
        self.last_wheel = None;
        self.wheel_velocity = 0.0;
    }

    fn handle_wheel(&mut self, ctx: &egui::Context) {
        let DeckMode::Animated { binding } = self.mode else {
            return;
        };
        let delta = ctx.input(|i| i.smooth_scroll_delta.y);
        if delta != 0.0 {
            self.scroll_target =
                (self.scroll_target - delta).clamp(binding.start, binding.end);
            self.wheel_velocity = -delta;
            self.last_wheel = Some(Instant::now());
        }
    }

    /// After the wheel has been idle for the configured delay, move the
    /// target to the nearest slide boundary. Quantizing an already
    /// snapped target returns it unchanged, so re-running is harmless.
    ///
    /// While the delay is still running a frame is scheduled for when it
    /// expires; the easing alone may have nothing left to animate and
    /// would otherwise leave the deck resting between boundaries.
    fn apply_snap(&mut self, ctx: &egui::Context) {
        let DeckMode::Animated { binding } = self.mode else {
            return;
        };
        let Some(last) = self.last_wheel else {
            return;
        };
        let elapsed = last.elapsed().as_secs_f32();
        if elapsed < self.snap.delay {
            let remaining = self.snap.delay - elapsed;
            ctx.request_repaint_after(std::time::Duration::from_secs_f32(remaining));
            return;
        }
        let basis = if self.snap.inertia {
            self.scroll_target + self.wheel_velocity * INERTIA_PROJECTION
        } else {
            self.scroll_target
        };
        let progress = binding.progress_at(basis);
        let snapped = scroll::snap_progress(progress, self.slide_count(), self.snap.threshold);
        self.scroll_target = binding.offset_for(snapped);
        self.last_wheel = None;
        self.wheel_velocity = 0.0;
    }

    /// Ease the rendered offset toward the target. Fire-and-forget: a new
    /// navigation call simply retargets the easing in flight.
    fn animate_scroll(&mut self, ctx: &egui::Context) {
        let diff = self.scroll_target - self.scroll_offset;
        if diff.abs() < SCROLL_EPSILON {
            self.scroll_offset = self.scroll_target;
        } else {
            self.scroll_offset += diff * SCROLL_EASE;
            ctx.request_repaint();
        }
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_update.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_update = Instant::now();
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps();

        let viewport = ctx.screen_rect().size();
        if viewport != self.last_viewport {
            self.refresh_binding(viewport);
            self.last_viewport = viewport;
        }

        if let Some(start) = self.pending_start.take() {
            if let DeckMode::Animated { binding } = self.mode {
                let offset = binding.target_offset(start as i64, self.slide_count());
                self.scroll_offset = offset;
                self.scroll_target = offset;
            }
        }

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut nav: Option<i64> = None;

        let current = self.deck.active_index() as i64;
        let last = self.slide_count().saturating_sub(1) as i64;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }
            if i.key_pressed(egui::Key::D) {
                self.theme = self.theme.toggled();
                return;
            }

            // Navigation keys from the original deck: right/down/page-down
            // advance, left/up/page-up go back, Home/End jump.
            if i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::ArrowDown)
                || i.key_pressed(egui::Key::PageDown)
            {
                nav = Some(current + 1);
            } else if i.key_pressed(egui::Key::ArrowLeft)
                || i.key_pressed(egui::Key::ArrowUp)
                || i.key_pressed(egui::Key::PageUp)
            {
                nav = Some(current - 1);
            } else if i.key_pressed(egui::Key::Home) {
                nav = Some(0);
            } else if i.key_pressed(egui::Key::End) {
                nav = Some(last);
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        if let Some(index) = nav {
            self.scroll_to_slide(index);
        }

        self.handle_wheel(ctx);
        self.apply_snap(ctx);
        self.animate_scroll(ctx);

        let progress = match self.mode {
            DeckMode::Animated { binding } => {
                let p = binding.progress_at(self.scroll_offset);
                self.deck.update_progress(p);
                p
            }
            // Slide 0 stays forced active; progress features are off.
            DeckMode::Static => 0.0,
        };

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                match self.mode {
                    DeckMode::Animated { .. } => self.draw_track(ui, rect, progress),
                    DeckMode::Static => self.draw_static(ui, rect),
                }

                self.draw_chrome(ui, ctx, rect);
            });
    }
}

impl DeckApp {
    /// Draw the horizontal track translated by the current progress.
    fn draw_track(&self, ui: &egui::Ui, rect: egui::Rect, progress: f32) {
        let count = self.slide_count();
        let track_shift = progress * (count.saturating_sub(1)) as f32;
        for (i, slide) in self.deck.slides().iter().enumerate() {
            let x = (i as f32 - track_shift) * rect.width();
            if x <= -rect.width() || x >= rect.width() {
                continue;
            }
            let slide_rect = rect.translate(egui::vec2(x, 0.0));
            render::draw_slide(ui, slide, &self.theme, slide_rect, &self.units);
        }
    }

    /// Static fallback: only the first slide, plus a marker so the
    /// degraded mode is visible.
    fn draw_static(&self, ui: &egui::Ui, rect: egui::Rect) {
        if let Some(slide) = self.deck.slides().first() {
            render::draw_slide(ui, slide, &self.theme, rect, &self.units);
        }

        let marker_color = Theme::with_opacity(self.theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            "scroll animation off".to_string(),
            egui::FontId::proportional(self.units.px(1.8)),
            marker_color,
        );
        let pos = egui::pos2(rect.left() + self.units.px(2.0), rect.top() + self.units.px(1.5));
        ui.painter().galley(pos, galley, marker_color);
    }

    /// Progress fill, indicator dots, counter, footer and FPS overlay.
    fn draw_chrome(&mut self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect) {
        // Progress fill bar: horizontal scale equals the clamped progress.
        let fill_height = self.units.px(0.6).max(2.0);
        let fill_rect = egui::Rect::from_min_size(
            rect.left_top(),
            egui::vec2(rect.width() * self.deck.fill(), fill_height),
        );
        ui.painter().rect_filled(fill_rect, 0.0, self.theme.accent);

        // Indicator dots.
        let count = self.slide_count();
        let radius = self.units.px(0.7).max(3.0);
        let spacing = radius * 4.0;
        let dots_width = spacing * count.saturating_sub(1) as f32;
        let dots_y = rect.bottom() - self.units.px(4.0);
        let dots_left = rect.center().x - dots_width / 2.0;

        let (hover_pos, clicked) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.button_pressed(egui::PointerButton::Primary),
            )
        });

        let mut nav: Option<i64> = None;
        for (i, indicator) in self.deck.indicators().iter().enumerate() {
            let center = egui::pos2(dots_left + i as f32 * spacing, dots_y);
            let hit = egui::Rect::from_center_size(
                center,
                egui::vec2(spacing * 0.9, spacing * 0.9),
            );
            let hovered = hover_pos.is_some_and(|p| hit.contains(p));

            let color = if indicator.active {
                self.theme.accent
            } else if hovered {
                Theme::with_opacity(self.theme.accent, 0.5)
            } else {
                self.theme.muted
            };
            let r = if indicator.active { radius * 1.3 } else { radius };
            ui.painter().circle_filled(center, r, color);
            if indicator.focusable {
                ui.painter().circle_stroke(
                    center,
                    r + radius * 0.8,
                    egui::Stroke::new(1.0, Theme::with_opacity(self.theme.accent, 0.6)),
                );
            }

            if hovered && clicked {
                nav = Some(i as i64);
            }
        }
        if let Some(index) = nav {
            self.scroll_to_slide(index);
        }

        // Slide counter, zero-padded.
        let counter_color = Theme::with_opacity(self.theme.foreground, 0.5);
        let counter_galley = ui.painter().layout_no_wrap(
            self.deck.counter_text().to_string(),
            egui::FontId::monospace(self.units.px(1.8)),
            counter_color,
        );
        let counter_pos = egui::pos2(
            rect.right() - counter_galley.rect.width() - self.units.px(2.0),
            dots_y - counter_galley.rect.height() / 2.0,
        );
        ui.painter()
            .galley(counter_pos, counter_galley, counter_color);

        // Footer hint.
        if let Some(ref footer) = self.footer {
            let footer_color = Theme::with_opacity(self.theme.foreground, 0.4);
            let galley = ui.painter().layout_no_wrap(
                footer.clone(),
                egui::FontId::proportional(self.units.px(1.6)),
                footer_color,
            );
            let pos = egui::pos2(
                rect.left() + self.units.px(2.0),
                dots_y - galley.rect.height() / 2.0,
            );
            ui.painter().galley(pos, galley, footer_color);
        }

        // FPS overlay
        let fps_text = format!("{:.0} fps", self.fps);
        let fps_color = Theme::with_opacity(self.theme.foreground, 0.3);
        let fps_galley = ui.painter().layout_no_wrap(
            fps_text,
            egui::FontId::monospace(self.units.px(1.6)),
            fps_color,
        );
        let fps_pos = egui::pos2(
            rect.right() - fps_galley.rect.width() - self.units.px(1.5),
            rect.top() + self.units.px(1.5),
        );
        ui.painter().galley(fps_pos, fps_galley, fps_color);
    }
}

pub fn run(
    file: Option<PathBuf>,
    windowed: bool,
    start_slide: Option<usize>,
    force_static: bool,
) -> anyhow::Result<()> {
    let deck_file = match file {
        Some(path) => DeckFile::load(&path)?,
        None => DeckFile::builtin(),
    };

    if deck_file.slides.is_empty() {
        anyhow::bail!("Deck has no slides");
    }

    let config = Config::load_or_default();
    let theme_name = deck_file
        .theme
        .clone()
        .or_else(|| config.defaults.as_ref().and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "light".to_string());
    let theme = Theme::from_name(&theme_name);
    let snap = config.snap_settings();

    let title = deck_file
        .title
        .clone()
        .unwrap_or_else(|| "Scrolldeck".to_string());
    let start = start_slide.map(|s| s.saturating_sub(1));

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DeckApp::new(
                deck_file,
                theme,
                snap,
                force_static,
                start,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideDef;

    fn app(count: usize, force_static: bool) -> DeckApp {
        let deck_file = DeckFile {
            title: None,
            theme: None,
            footer: None,
            slides: (0..count)
                .map(|i| SlideDef {
                    heading: format!("Slide {i}"),
                    body: String::new(),
                    timeline: None,
                })
                .collect(),
        };
        DeckApp::new(
            deck_file,
            Theme::dark(),
            SnapSettings::default(),
            force_static,
            None,
        )
    }

    #[test]
    fn animated_mode_when_binding_available() {
        let app = app(5, false);
        assert!(matches!(app.mode, DeckMode::Animated { .. }));
    }

    #[test]
    fn static_mode_when_forced() {
        let app = app(5, true);
        assert_eq!(app.mode, DeckMode::Static);
        assert_eq!(app.deck.active_index(), 0);
    }

    #[test]
    fn static_mode_for_single_slide() {
        let app = app(1, false);
        assert_eq!(app.mode, DeckMode::Static);
    }

    #[test]
    fn scroll_to_slide_is_a_no_op_in_static_mode() {
        let mut app = app(5, true);
        let before = app.scroll_target;
        app.scroll_to_slide(3);
        assert_eq!(app.scroll_target, before);
    }

    #[test]
    fn scroll_to_slide_clamps_and_is_idempotent() {
        let mut app = app(5, false);
        let DeckMode::Animated { binding } = app.mode else {
            panic!("expected animated mode");
        };
        app.scroll_to_slide(-3);
        assert_eq!(app.scroll_target, binding.start);
        app.scroll_to_slide(99);
        assert_eq!(app.scroll_target, binding.end);
        app.scroll_to_slide(2);
        let first = app.scroll_target;
        app.scroll_to_slide(2);
        assert_eq!(app.scroll_target, first);
    }

    #[test]
    fn refresh_preserves_progress_fraction() {
        let mut app = app(5, false);
        app.scroll_to_slide(2);
        app.scroll_offset = app.scroll_target;

        app.refresh_binding(egui::vec2(1920.0, 1080.0));
        let DeckMode::Animated { binding } = app.mode else {
            panic!("expected animated mode");
        };
        assert_eq!(binding.progress_at(app.scroll_offset), 0.5);
        assert_eq!(binding.progress_at(app.scroll_target), 0.5);
    }

    /// A context with no repaint request outstanding, so tests can
    /// observe requests made by the code under test.
    fn quiescent_ctx() -> egui::Context {
        let ctx = egui::Context::default();
        for _ in 0..8 {
            if !ctx.has_requested_repaint() {
                break;
            }
            let _ = ctx.run(egui::RawInput::default(), |_| {});
        }
        ctx
    }

    #[test]
    fn snap_settles_target_on_a_boundary() {
        let mut app = app(5, false);
        let DeckMode::Animated { binding } = app.mode else {
            panic!("expected animated mode");
        };
        // A wheel release short of the midpoint between slides 2 and 3
        // settles back on slide 2.
        app.scroll_target = binding.offset_for(0.6);
        app.last_wheel = Some(Instant::now() - std::time::Duration::from_secs(1));
        app.apply_snap(&egui::Context::default());
        assert_eq!(binding.progress_at(app.scroll_target), 0.5);
        assert!(app.last_wheel.is_none());
    }

    #[test]
    fn pending_snap_schedules_a_frame() {
        let mut app = app(5, false);
        let DeckMode::Animated { binding } = app.mode else {
            panic!("expected animated mode");
        };
        // Wheel just fired and the offset already rests on the target
        // between two boundaries, so the easing has nothing to animate.
        // The pending snap must still schedule a frame for when the
        // delay expires or the deck would rest off-boundary until the
        // next external event.
        app.snap.delay = 0.5;
        app.scroll_target = binding.offset_for(0.6);
        app.scroll_offset = app.scroll_target;
        app.last_wheel = Some(Instant::now());

        let ctx = quiescent_ctx();
        app.apply_snap(&ctx);
        app.animate_scroll(&ctx);

        assert!(app.last_wheel.is_some());
        assert!(ctx.has_requested_repaint());
    }
}
