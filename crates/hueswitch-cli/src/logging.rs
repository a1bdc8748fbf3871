// Logging and verbosity control

use tracing::Level;

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Errors only
    Quiet,
    /// Warnings and errors, e.g. theme fallbacks
    Normal,
    /// Switch and dispatch detail
    Verbose,
}

impl VerbosityLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Maximum tracing level shown at this verbosity
    pub fn max_level(&self) -> Level {
        match self {
            VerbosityLevel::Quiet => Level::ERROR,
            VerbosityLevel::Normal => Level::WARN,
            VerbosityLevel::Verbose => Level::DEBUG,
        }
    }
}

/// Initialize logging based on CLI flags
///
/// Logs go to stderr so command output stays pipeable. A subscriber that is
/// already installed is kept.
pub fn init_logging(verbose: bool, quiet: bool) -> VerbosityLevel {
    let level = VerbosityLevel::from_flags(verbose, quiet);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level.max_level())
        .with_target(level == VerbosityLevel::Verbose)
        .with_writer(std::io::stderr)
        .try_init();
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(VerbosityLevel::from_flags(true, true), VerbosityLevel::Quiet);
        assert_eq!(VerbosityLevel::from_flags(true, false), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_flags(false, false), VerbosityLevel::Normal);
    }

    #[test]
    fn test_levels() {
        assert_eq!(VerbosityLevel::Quiet.max_level(), Level::ERROR);
        assert_eq!(VerbosityLevel::Normal.max_level(), Level::WARN);
        assert_eq!(VerbosityLevel::Verbose.max_level(), Level::DEBUG);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false, true);
        assert_eq!(init_logging(true, false), VerbosityLevel::Verbose);
    }
}
