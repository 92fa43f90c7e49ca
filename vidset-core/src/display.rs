use crate::resolution::Resolution;

/// The host's video subsystem.
///
/// Calls are treated as always succeeding; a backend that can fail is
/// expected to log and carry on with whatever mode it ends up in.
pub trait Display {
    /// Supported modes, in a stable order for the lifetime of the process.
    fn enumerate_resolutions(&self) -> Vec<Resolution>;

    fn apply_resolution(&mut self, width: u32, height: u32, fullscreen: bool);

    fn apply_fullscreen(&mut self, fullscreen: bool);

    /// The fullscreen flag the display is actually in right now.
    fn current_fullscreen(&self) -> bool;
}

/// A display that only remembers what it was told.
///
/// Stands in for a real video backend in the terminal front end and in tests.
#[derive(Debug, Clone)]
pub struct SimulatedDisplay {
    modes: Vec<Resolution>,
    current: Option<Resolution>,
    fullscreen: bool,
    writes: usize,
}

impl SimulatedDisplay {
    pub fn new(modes: Vec<Resolution>) -> Self {
        Self {
            modes,
            current: None,
            fullscreen: false,
            writes: 0,
        }
    }

    /// Mode most recently applied, `None` before the first write.
    pub fn current_resolution(&self) -> Option<Resolution> {
        self.current
    }

    /// Number of apply calls received so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Short description for status lines, e.g. `1920x1080 fullscreen`.
    pub fn describe(&self) -> String {
        let mode = if self.fullscreen { "fullscreen" } else { "windowed" };
        match self.current {
            Some(res) => format!("{} {}", res, mode),
            None => format!("(unset) {}", mode),
        }
    }
}

impl Display for SimulatedDisplay {
    fn enumerate_resolutions(&self) -> Vec<Resolution> {
        self.modes.clone()
    }

    fn apply_resolution(&mut self, width: u32, height: u32, fullscreen: bool) {
        let res = Resolution::new(width, height);
        log::debug!("[display] mode set to {} (fullscreen: {})", res, fullscreen);
        self.current = Some(res);
        self.fullscreen = fullscreen;
        self.writes += 1;
    }

    fn apply_fullscreen(&mut self, fullscreen: bool) {
        log::debug!("[display] fullscreen set to {}", fullscreen);
        self.fullscreen = fullscreen;
        self.writes += 1;
    }

    fn current_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_applied_state() {
        let mut display = SimulatedDisplay::new(vec![Resolution::new(800, 600)]);
        assert_eq!(display.current_resolution(), None);
        assert_eq!(display.describe(), "(unset) windowed");

        display.apply_resolution(800, 600, true);
        assert_eq!(display.current_resolution(), Some(Resolution::new(800, 600)));
        assert!(display.current_fullscreen());

        display.apply_fullscreen(false);
        assert!(!display.current_fullscreen());
        assert_eq!(display.write_count(), 2);
        assert_eq!(display.describe(), "800x600 windowed");
    }
}
