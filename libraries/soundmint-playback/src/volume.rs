//! Volume control
//!
//! Volume range is 0-100%, handed to the renderer as a linear 0.0-1.0 gain
//! (the range an HTML audio element accepts).

/// Volume level with linear gain mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,
}

impl Volume {
    /// Create new volume, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set volume level, clamping to 100
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Renderer gain for the current level (`level / 100`)
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50)
    }
}
