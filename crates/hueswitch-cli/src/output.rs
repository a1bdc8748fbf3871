// Output formatting and styling

use colored::Colorize;
use hueswitch_themes::Rgba;

/// Output styling configuration
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }
}

impl OutputStyle {
    /// Style without any escape sequences
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format header
    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().underline().to_string()
        } else {
            title.to_string()
        }
    }

    /// Marker in front of the active entry of a list
    pub fn marker(&self, active: bool) -> String {
        match (active, self.use_colors) {
            (true, true) => "●".green().bold().to_string(),
            (true, false) => "*".to_string(),
            (false, _) => " ".to_string(),
        }
    }

    /// Two-cell color sample followed by its hex value
    pub fn swatch(&self, color: Rgba) -> String {
        let hex = color.to_hex();
        if self.use_colors {
            let (r, g, b) = color.to_rgb8();
            format!("{} {}", "  ".on_truecolor(r, g, b), hex)
        } else {
            hex
        }
    }
}

/// Print an error message to stderr
pub fn print_error(msg: &str) {
    eprintln!("{}", OutputStyle::default().error(msg));
}
