//! Guided walkthrough of the board.
//!
//! While the walkthrough is open the autonomous driver stands down; the
//! session mirrors [`Walkthrough::is_open`] into the shared turn state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    /// Anchor the overlay points at.
    pub selector: &'static str,
    pub content: &'static str,
    /// Hide the overlay's own navigation; the reader advances by using the
    /// highlighted control.
    pub disable_actions: bool,
    /// Let clicks through to the highlighted control.
    pub step_interaction: bool,
}

pub static TOUR_STEPS: [TourStep; 5] = [
    TourStep {
        selector: "#board-container",
        content: "Welcome to the Pond! Your goal is to help your frogs hop all the way up their lilypad columns, from the murky bottom to the sunny top. Be the first player to reach the final lilypad in three different columns to claim victory and become the Pond Champion!",
        disable_actions: false,
        step_interaction: false,
    },
    TourStep {
        selector: "#turn-start-container",
        content: "Ready to make a splash? Roll the dice to see which lilypads your frogs can hop to! Press the 'Hop' button.",
        disable_actions: true,
        step_interaction: true,
    },
    TourStep {
        selector: "#dice-container",
        content: "You've rolled four dice! Pair them up (two pairs) and add the numbers in each pair. These sums tell you which lilypad columns your frogs might advance on this hop.",
        disable_actions: false,
        step_interaction: false,
    },
    TourStep {
        selector: "#choice-container",
        content: "Based on your dice pairs, these are the lilypad columns you can choose to hop on. You can pick up to three different columns during your turn's hopping spree. Choose which columns your frogs will attempt to advance on!",
        disable_actions: true,
        step_interaction: true,
    },
    TourStep {
        selector: "#turn-start-container",
        content: "Feeling brave, little tadpole? Choose 'Hop' to roll again and try to advance further up your chosen lilypad columns (up to three total for the turn). Or, play it safe and 'Stop' to secure your frogs' current positions on their lilypads. Be warned! If you hop again and can't make *any* of your chosen column numbers with the new dice pairs, your frogs get stuck in the mud - you're CROAKED! - and lose all progress from this turn's hopping spree. Happy Hopping!",
        disable_actions: false,
        step_interaction: false,
    },
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Walkthrough {
    open: bool,
    step: usize,
}

impl Walkthrough {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open at the first step.
    pub fn open(&mut self) -> &'static TourStep {
        self.open = true;
        self.step = 0;
        &TOUR_STEPS[0]
    }

    pub fn current(&self) -> Option<&'static TourStep> {
        if self.open {
            TOUR_STEPS.get(self.step)
        } else {
            None
        }
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    /// Move forward; stepping past the last step closes the walkthrough.
    pub fn next(&mut self) -> Option<&'static TourStep> {
        if !self.open {
            return None;
        }
        if self.step + 1 >= TOUR_STEPS.len() {
            self.close();
            return None;
        }
        self.step += 1;
        self.current()
    }

    pub fn previous(&mut self) -> Option<&'static TourStep> {
        if self.open {
            self.step = self.step.saturating_sub(1);
        }
        self.current()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_steps_are_the_hop_and_choice_prompts() {
        let interactive: Vec<&str> = TOUR_STEPS
            .iter()
            .filter(|step| step.step_interaction)
            .map(|step| step.selector)
            .collect();
        assert_eq!(interactive, vec!["#turn-start-container", "#choice-container"]);
        assert!(TOUR_STEPS
            .iter()
            .all(|step| step.disable_actions == step.step_interaction));
    }

    #[test]
    fn walking_off_the_end_closes() {
        let mut tour = Walkthrough::default();
        assert!(tour.current().is_none());
        assert_eq!(tour.open().selector, "#board-container");

        for _ in 1..TOUR_STEPS.len() {
            assert!(tour.next().is_some());
        }
        assert_eq!(tour.step_index(), TOUR_STEPS.len() - 1);
        assert!(tour.next().is_none());
        assert!(!tour.is_open());
    }

    #[test]
    fn previous_stops_at_the_first_step() {
        let mut tour = Walkthrough::default();
        tour.open();
        tour.next();
        assert_eq!(tour.previous().map(|s| s.selector), Some("#board-container"));
        assert_eq!(tour.previous().map(|s| s.selector), Some("#board-container"));
    }
}
