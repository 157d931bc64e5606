use std::time::Duration;

/// Braille spinner frames, advanced once per tick.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between two indicator ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Progress indicator frame state.
///
/// Holds no timer of its own. The controller decides when a tick is due and
/// whether the indicator is visible at all.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Indicator {
    frame: usize,
}

impl Indicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}
