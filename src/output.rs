//! Colored console output for the check run.

use crate::report::{TestReport, Verdict};
use console::{style, Term};

const RULE_WIDTH: usize = 60;

#[derive(Debug)]
pub struct Console {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Suppress everything but failures
    pub quiet: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(console::colors_enabled(), false)
    }
}

impl Console {
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    pub fn blank(&self) {
        if !self.quiet {
            self.line("");
        }
    }

    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        for text in header_lines(title, self.use_color) {
            self.line(&text);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.line(&self.tagged("✅", message, Tone::Green));
        }
    }

    pub fn error(&self, message: &str) {
        // Failures are printed even in quiet mode
        self.line(&self.tagged("❌", message, Tone::Red));
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            self.line(&self.tagged("⚠️ ", message, Tone::Yellow));
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.line(&self.tagged("ℹ️ ", message, Tone::Blue));
        }
    }

    pub fn summary(&self, report: &TestReport) {
        if self.quiet && report.all_passed() {
            return;
        }
        for text in header_lines("📊 Test Summary", self.use_color) {
            self.line(&text);
        }
        for text in summary_lines(report, self.use_color) {
            self.line(&text);
        }
        self.line(&verdict_line(report.verdict(), self.use_color));
    }

    fn tagged(&self, icon: &str, message: &str, tone: Tone) -> String {
        paint(&format!("{} {}", icon, message), tone, self.use_color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Green,
    Red,
    Yellow,
    Blue,
    Cyan,
}

fn paint(text: &str, tone: Tone, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    let styled = style(text);
    let styled = match tone {
        Tone::Green => styled.green(),
        Tone::Red => styled.red(),
        Tone::Yellow => styled.yellow(),
        Tone::Blue => styled.blue(),
        Tone::Cyan => styled.cyan(),
    };
    styled.to_string()
}

pub fn header_lines(title: &str, use_color: bool) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    vec![
        paint(&rule, Tone::Cyan, use_color),
        paint(title, Tone::Cyan, use_color),
        paint(&rule, Tone::Cyan, use_color),
    ]
}

/// Per-check PASS/FAIL rows followed by the overall count.
pub fn summary_lines(report: &TestReport, use_color: bool) -> Vec<String> {
    let mut lines: Vec<String> = report
        .results()
        .iter()
        .map(|result| {
            let status = if result.passed {
                paint("✅ PASS", Tone::Green, use_color)
            } else {
                paint("❌ FAIL", Tone::Red, use_color)
            };
            format!("{}: {}", result.kind.label(), status)
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Overall: {}/{} tests passed",
        report.passed(),
        report.total()
    ));
    lines
}

/// Closing line of the summary. Each message carries its own icon.
pub fn verdict_line(verdict: Verdict, use_color: bool) -> String {
    let (tone, message) = verdict_message(verdict);
    paint(message, tone, use_color)
}

fn verdict_message(verdict: Verdict) -> (Tone, &'static str) {
    match verdict {
        Verdict::AllPassed => (
            Tone::Green,
            "🎉 All tests passed! Your OpenAI API key is working correctly.",
        ),
        Verdict::Partial => (
            Tone::Yellow,
            "⚠️  Some tests passed, but there are issues to address.",
        ),
        Verdict::AllFailed => (
            Tone::Red,
            "💥 All tests failed. Please check your configuration.",
        ),
    }
}
