//! Console status output.

use crossterm::style::Stylize;

use super::theme::Theme;

/// Handle for printing status lines.
#[derive(Debug, Clone)]
pub struct Output {
    theme: Theme,
    quiet: bool,
}

impl Output {
    /// Create an output handle. With `quiet`, only the final verdict
    /// is printed.
    pub fn new(quiet: bool) -> Self {
        Self {
            theme: Theme::default(),
            quiet,
        }
    }

    /// A pipeline stage transition.
    pub fn step(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!(
            "{} {}",
            self.theme.icons.active.with(self.theme.colors.stage),
            msg.with(self.theme.colors.stage)
        );
    }

    /// Echo an external command before running it.
    pub fn command(&self, program: &str, args: &[String]) {
        if self.quiet {
            return;
        }
        let line = format!("$ {} {}", program, args.join(" "));
        println!("{}", line.with(self.theme.colors.command));
    }

    /// Secondary detail line.
    pub fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!("  {}", msg.with(self.theme.colors.secondary));
    }

    /// Final success line, printed even in quiet mode.
    pub fn success(&self, msg: &str) {
        println!(
            "{} {}",
            self.theme.icons.success.with(self.theme.colors.success),
            msg.with(self.theme.colors.success)
        );
    }

    /// Failure line, printed to stderr even in quiet mode.
    pub fn failed(&self, msg: &str) {
        eprintln!(
            "{} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            msg.with(self.theme.colors.error)
        );
    }
}
