//! Timeline note alignment.
//!
//! The honors timeline places three note labels between four cards. Each
//! note sits at the horizontal midpoint of the two cards it spans. The
//! alignment is a pure re-projection of measured card geometry, safe to
//! re-run after every layout change.

/// Cards required before notes are positioned at all.
pub const MIN_CARDS: usize = 4;
/// Notes required before notes are positioned at all.
pub const MIN_NOTES: usize = 3;

/// Measured horizontal extent of a card, relative to the timeline origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSpan {
    pub left: f32,
    pub width: f32,
}

impl CardSpan {
    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Horizontal offsets for the three notes: note `i` at the midpoint of the
/// centers of card `i` and card `i+1`.
///
/// Returns `None` when the structure is under-populated; callers leave
/// prior positions untouched in that case.
pub fn align_notes(cards: &[CardSpan], note_count: usize) -> Option<[f32; MIN_NOTES]> {
    if cards.len() < MIN_CARDS || note_count < MIN_NOTES {
        return None;
    }
    let mut offsets = [0.0; MIN_NOTES];
    for (i, offset) in offsets.iter_mut().enumerate() {
        *offset = (cards[i].center() + cards[i + 1].center()) / 2.0;
    }
    Some(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(left: f32, width: f32) -> CardSpan {
        CardSpan { left, width }
    }

    #[test]
    fn notes_sit_at_card_midpoints() {
        let cards = [
            card(0.0, 100.0),
            card(200.0, 100.0),
            card(400.0, 100.0),
            card(600.0, 100.0),
        ];
        let offsets = align_notes(&cards, 3).unwrap();
        // Card centers are 50, 250, 450, 650.
        assert_eq!(offsets, [150.0, 350.0, 550.0]);
    }

    #[test]
    fn middle_note_is_mean_of_neighbor_centers() {
        let cards = [
            card(10.0, 80.0),
            card(130.0, 60.0),
            card(240.0, 120.0),
            card(420.0, 40.0),
        ];
        let offsets = align_notes(&cards, 3).unwrap();
        assert_eq!(offsets[1], (cards[1].center() + cards[2].center()) / 2.0);
    }

    #[test]
    fn under_populated_cards_are_a_no_op() {
        let cards = [card(0.0, 100.0), card(200.0, 100.0), card(400.0, 100.0)];
        assert!(align_notes(&cards, 3).is_none());
    }

    #[test]
    fn under_populated_notes_are_a_no_op() {
        let cards = [
            card(0.0, 100.0),
            card(200.0, 100.0),
            card(400.0, 100.0),
            card(600.0, 100.0),
        ];
        assert!(align_notes(&cards, 2).is_none());
    }

    #[test]
    fn alignment_is_stable_across_reruns() {
        let cards = [
            card(5.0, 90.0),
            card(150.0, 90.0),
            card(295.0, 90.0),
            card(440.0, 90.0),
        ];
        assert_eq!(align_notes(&cards, 3), align_notes(&cards, 3));
    }

    #[test]
    fn extra_cards_and_notes_are_ignored() {
        let cards = [
            card(0.0, 100.0),
            card(200.0, 100.0),
            card(400.0, 100.0),
            card(600.0, 100.0),
            card(800.0, 100.0),
        ];
        let offsets = align_notes(&cards, 5).unwrap();
        assert_eq!(offsets.len(), MIN_NOTES);
        assert_eq!(offsets[2], 550.0);
    }
}
