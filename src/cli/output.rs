//! Colored output helpers for CLI
//!
//! Progress goes to stderr so stdout stays clean for JSON results.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✓".green().bold(), message.green());
        } else {
            eprintln!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "•".blue(), message);
        } else {
            eprintln!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(&self, step_num: u32, total: u32, message: &str) {
        if self.colored {
            eprintln!(
                "  {} {}",
                format!("[{}/{}]", step_num, total).dimmed(),
                message.bright_white()
            );
        } else {
            eprintln!("  [{}/{}] {}", step_num, total, message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            eprintln!("\n  {}", title.bright_white().bold().underline());
        } else {
            eprintln!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            eprintln!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            eprintln!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            eprintln!("    {} {}", "•".blue(), item);
        } else {
            eprintln!("    - {}", item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_default() {
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::new(), Output::no_color()] {
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.step(1, 2, "step message");
            output.header("Test Header");
            output.kv("key", "value");
            output.list_item("item");
        }
    }
}
