//! Deck content and active-slide state.
//!
//! A deck is a fixed, ordered set of slides discovered once at startup.
//! Nothing is created or destroyed afterwards; the state mutated during a
//! session is the per-slide active flag, its indicator mirror, the counter
//! text and the progress-fill fraction.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scroll;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    #[serde(default)]
    pub slides: Vec<SlideDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideDef {
    pub heading: String,

    #[serde(default)]
    pub body: String,

    /// Present on at most one slide: the honors timeline graphic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineDef {
    pub cards: Vec<TimelineCardDef>,

    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineCardDef {
    pub year: String,
    pub text: String,
}

impl DeckFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let deck: DeckFile = serde_yaml::from_str(&contents)?;
        Ok(deck)
    }

    /// The demo deck shown when no file is given.
    pub fn builtin() -> Self {
        DeckFile {
            title: Some("Scrolldeck".to_string()),
            theme: Some("dark".to_string()),
            footer: Some("Scroll, click a dot, or use the arrow keys".to_string()),
            slides: vec![
                SlideDef {
                    heading: "A deck that scrolls sideways".to_string(),
                    body: "Wheel and trackpad input drives the track \
                           horizontally. Release and the deck settles on the \
                           nearest slide."
                        .to_string(),
                    timeline: None,
                },
                SlideDef {
                    heading: "Navigation".to_string(),
                    body: "Arrow keys, PageUp/PageDown, Home and End jump \
                           between slides. The dots at the bottom are \
                           clickable and mirror the active slide."
                        .to_string(),
                    timeline: None,
                },
                SlideDef {
                    heading: "Milestones".to_string(),
                    body: String::new(),
                    timeline: Some(TimelineDef {
                        cards: vec![
                            TimelineCardDef {
                                year: "2019".to_string(),
                                text: "First prototype".to_string(),
                            },
                            TimelineCardDef {
                                year: "2021".to_string(),
                                text: "Public release".to_string(),
                            },
                            TimelineCardDef {
                                year: "2023".to_string(),
                                text: "Snap navigation".to_string(),
                            },
                            TimelineCardDef {
                                year: "2025".to_string(),
                                text: "Native rewrite".to_string(),
                            },
                        ],
                        notes: vec![
                            "two quiet years".to_string(),
                            "steady adoption".to_string(),
                            "full redesign".to_string(),
                        ],
                    }),
                },
                SlideDef {
                    heading: "Progress".to_string(),
                    body: "The fill bar at the top scales with scroll \
                           progress, and the counter keeps the zero-padded \
                           position in sync."
                        .to_string(),
                    timeline: None,
                },
                SlideDef {
                    heading: "The end".to_string(),
                    body: "Press Home to scroll back to the start."
                        .to_string(),
                    timeline: None,
                },
            ],
        }
    }
}

/// Per-slide indicator dot. `selected` and `focusable` mirror the active
/// flag the way the original markup mirrored it into accessibility
/// attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Indicator {
    pub active: bool,
    pub selected: bool,
    pub focusable: bool,
}

/// Mutable view state over a fixed slide list. Slide and indicator counts
/// are 1:1 by construction.
#[derive(Debug, Clone)]
pub struct DeckState {
    slides: Vec<SlideDef>,
    indicators: Vec<Indicator>,
    active: usize,
    counter: String,
    fill: f32,
}

impl DeckState {
    pub fn new(slides: Vec<SlideDef>) -> Self {
        let indicators = vec![Indicator::default(); slides.len()];
        let mut state = Self {
            slides,
            indicators,
            active: 0,
            counter: String::new(),
            fill: 0.0,
        };
        state.set_active_slide(0);
        state
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[SlideDef] {
        &self.slides
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Counter text, zero-padded: index 2 of 10 renders as "03 / 10".
    pub fn counter_text(&self) -> &str {
        &self.counter
    }

    /// Progress-fill scale factor in [0, 1].
    pub fn fill(&self) -> f32 {
        self.fill
    }

    /// Mark exactly the slide and indicator at `index` active. Idempotent.
    pub fn set_active_slide(&mut self, index: usize) {
        if self.slides.is_empty() {
            return;
        }
        let index = index.min(self.slides.len() - 1);
        for (i, indicator) in self.indicators.iter_mut().enumerate() {
            let active = i == index;
            indicator.active = active;
            indicator.selected = active;
            indicator.focusable = active;
        }
        self.active = index;
        self.counter = format!("{:02} / {:02}", index + 1, self.slides.len());
    }

    /// Apply a scroll-progress fraction: clamp, update the fill scale, and
    /// activate the nearest slide.
    pub fn update_progress(&mut self, progress: f32) {
        let p = progress.clamp(0.0, 1.0);
        self.fill = p;
        self.set_active_slide(scroll::progress_to_index(p, self.slide_count()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(count: usize) -> DeckState {
        let slides = (0..count)
            .map(|i| SlideDef {
                heading: format!("Slide {i}"),
                body: String::new(),
                timeline: None,
            })
            .collect();
        DeckState::new(slides)
    }

    #[test]
    fn exactly_one_indicator_active() {
        let mut state = deck(5);
        for target in [3, 0, 4, 4] {
            state.set_active_slide(target);
            let active: Vec<usize> = state
                .indicators()
                .iter()
                .enumerate()
                .filter(|(_, d)| d.active)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(active, vec![target]);
            assert_eq!(state.active_index(), target);
        }
    }

    #[test]
    fn indicator_mirrors_selected_and_focusable() {
        let mut state = deck(3);
        state.set_active_slide(1);
        for (i, d) in state.indicators().iter().enumerate() {
            assert_eq!(d.selected, i == 1);
            assert_eq!(d.focusable, i == 1);
        }
    }

    #[test]
    fn set_active_slide_is_idempotent() {
        let mut state = deck(4);
        state.set_active_slide(2);
        let first = state.clone();
        state.set_active_slide(2);
        assert_eq!(state.indicators(), first.indicators());
        assert_eq!(state.counter_text(), first.counter_text());
    }

    #[test]
    fn counter_is_zero_padded() {
        let mut state = deck(10);
        state.set_active_slide(2);
        assert_eq!(state.counter_text(), "03 / 10");
        state.set_active_slide(9);
        assert_eq!(state.counter_text(), "10 / 10");
    }

    #[test]
    fn update_progress_picks_middle_slide() {
        let mut state = deck(5);
        state.update_progress(0.5);
        assert_eq!(state.active_index(), 2);
        assert_eq!(state.fill(), 0.5);
    }

    #[test]
    fn update_progress_clamps() {
        let mut state = deck(5);
        state.update_progress(4.2);
        assert_eq!(state.active_index(), 4);
        assert_eq!(state.fill(), 1.0);
        state.update_progress(-1.0);
        assert_eq!(state.active_index(), 0);
        assert_eq!(state.fill(), 0.0);
    }

    #[test]
    fn out_of_range_index_clamps() {
        let mut state = deck(3);
        state.set_active_slide(99);
        assert_eq!(state.active_index(), 2);
    }

    #[test]
    fn builtin_deck_has_a_timeline_slide() {
        let deck = DeckFile::builtin();
        assert!(deck.slides.len() > 1);
        let timeline = deck
            .slides
            .iter()
            .find_map(|s| s.timeline.as_ref())
            .expect("builtin deck carries a timeline slide");
        assert_eq!(timeline.cards.len(), 4);
        assert_eq!(timeline.notes.len(), 3);
    }

    #[test]
    fn deck_file_round_trips_through_yaml() {
        let deck = DeckFile::builtin();
        let yaml = serde_yaml::to_string(&deck).unwrap();
        let parsed: DeckFile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.slides.len(), deck.slides.len());
        assert_eq!(parsed.title, deck.title);
    }
}
