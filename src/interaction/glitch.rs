use crate::foundation::math::Rng64;

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";
pub const GLITCH_TICK_SECS: f64 = 0.03;
/// Ticks spent on each character before it settles.
const TICKS_PER_CHAR: usize = 3;

/// Text that scrambles and then resolves left to right.
#[derive(Clone, Debug)]
pub struct GlitchText {
    original: Vec<char>,
    display: String,
    ticks: usize,
    since_tick: f64,
    active: bool,
    rng: Rng64,
}

impl GlitchText {
    pub fn new(text: &str, seed: u64) -> Self {
        Self {
            original: text.chars().collect(),
            display: text.to_string(),
            ticks: 0,
            since_tick: 0.0,
            active: false,
            rng: Rng64::new(seed),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start (or restart) the scramble.
    pub fn scramble(&mut self) {
        self.ticks = 0;
        self.since_tick = 0.0;
        self.active = !self.original.is_empty();
    }

    pub fn advance(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.since_tick += dt.max(0.0);
        while self.active && self.since_tick >= GLITCH_TICK_SECS {
            self.since_tick -= GLITCH_TICK_SECS;
            self.step();
        }
    }

    fn step(&mut self) {
        let settled = self.ticks;
        self.display = self
            .original
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if c == ' ' || i * TICKS_PER_CHAR < settled {
                    c
                } else {
                    char::from(GLYPHS[self.rng.next_index(GLYPHS.len())])
                }
            })
            .collect();
        self.ticks += 1;
        if self.ticks >= self.original.len() * TICKS_PER_CHAR {
            self.display = self.original.iter().collect();
            self.active = false;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/glitch.rs"]
mod tests;
