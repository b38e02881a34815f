/// What the frame loop does after `get_current_texture` failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; the surface was configured again and the next frame retries.
    Reconfigured,
    /// Timeout or an unspecified error; drop this frame only.
    SkipFrame,
    /// Out of memory; the viewer stops.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn ends_loop(self) -> bool {
        self == Self::Fatal
    }

    /// Only a fatal error is reported above debug.
    pub fn log_level(self) -> log::Level {
        match self {
            Self::Fatal => log::Level::Error,
            Self::Reconfigured | Self::SkipFrame => log::Level::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_ends_the_loop() {
        assert!(SurfaceErrorAction::Fatal.ends_loop());
        assert!(!SurfaceErrorAction::SkipFrame.ends_loop());
        assert!(!SurfaceErrorAction::Reconfigured.ends_loop());
    }

    #[test]
    fn routine_errors_log_at_debug() {
        assert_eq!(SurfaceErrorAction::Reconfigured.log_level(), log::Level::Debug);
        assert_eq!(SurfaceErrorAction::SkipFrame.log_level(), log::Level::Debug);
        assert_eq!(SurfaceErrorAction::Fatal.log_level(), log::Level::Error);
    }
}
