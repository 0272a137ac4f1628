use crate::foundation::core::Millis;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&*!?";

/// Time between scramble frames.
pub const TICK: Millis = Millis(30);

/// Ticks spent on each revealed character.
const TICKS_PER_CHAR: u32 = 3;

/// Hover effect that scrambles a label and reveals it left to right.
#[derive(Debug)]
pub struct TextScramble {
    source: Vec<char>,
    display: Vec<char>,
    ticks: u32,
    next_tick: Option<Millis>,
    rng: fastrand::Rng,
}

impl TextScramble {
    pub fn new(text: &str) -> Self {
        Self::with_rng(text, fastrand::Rng::new())
    }

    pub fn with_seed(text: &str, seed: u64) -> Self {
        Self::with_rng(text, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(text: &str, rng: fastrand::Rng) -> Self {
        let source: Vec<char> = text.chars().collect();
        Self {
            display: source.clone(),
            source,
            ticks: 0,
            next_tick: None,
            rng,
        }
    }

    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn display(&self) -> String {
        self.display.iter().collect()
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Number of leading characters already showing their true value.
    pub fn revealed_prefix(&self) -> usize {
        ((self.ticks / TICKS_PER_CHAR) as usize).min(self.source.len())
    }

    /// Start (or restart) the effect; the first frame lands one tick after `now`.
    pub fn hover_enter(&mut self, now: Millis) {
        self.ticks = 0;
        self.next_tick = Some(now.saturating_add(TICK));
    }

    /// Stop and show the source text right away.
    pub fn hover_leave(&mut self) {
        self.next_tick = None;
        self.display.clone_from(&self.source);
    }

    /// Run every tick due by `now`. Returns whether the display changed.
    pub fn on_frame(&mut self, now: Millis) -> bool {
        let mut changed = false;
        while let Some(due) = self.next_tick {
            if due > now {
                break;
            }
            self.tick();
            changed = true;
            self.next_tick = if self.revealed_prefix() >= self.source.len() {
                None
            } else {
                Some(due.saturating_add(TICK))
            };
        }
        changed
    }

    fn tick(&mut self) {
        self.ticks += 1;
        let revealed = self.revealed_prefix();
        let alphabet = ALPHABET.as_bytes();
        for (i, (shown, truth)) in self.display.iter_mut().zip(&self.source).enumerate() {
            *shown = if *truth == ' ' || i < revealed {
                *truth
            } else {
                char::from(alphabet[self.rng.usize(..alphabet.len())])
            };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scramble.rs"]
mod tests;
