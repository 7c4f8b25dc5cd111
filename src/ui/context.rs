//! Terminal detection for command output

use std::io::IsTerminal;

/// Environment variables set by common CI runners
const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "BUILDKITE",
    "JENKINS_URL",
    "TF_BUILD",
];

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// cliclack bars and colors
    Styled,
    /// Tagged plain lines, safe to pipe or grep
    Plain,
}

#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    mode: OutputMode,
}

impl UiContext {
    /// Styled output only on a color-capable terminal outside CI.
    ///
    /// stdin is not consulted: `serve` runs fine detached from a TTY.
    pub fn detect() -> Self {
        let styled = std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none()
            && !CI_MARKERS.iter().any(|var| std::env::var_os(var).is_some());

        Self {
            mode: if styled {
                OutputMode::Styled
            } else {
                OutputMode::Plain
            },
        }
    }

    pub fn plain() -> Self {
        Self {
            mode: OutputMode::Plain,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_styled(&self) -> bool {
        self.mode == OutputMode::Styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_context_is_not_styled() {
        let ctx = UiContext::plain();
        assert_eq!(ctx.mode(), OutputMode::Plain);
        assert!(!ctx.is_styled());
    }

    #[test]
    fn detect_is_plain_under_test_harness() {
        // cargo test captures stdout, so it is never a terminal here
        assert!(!UiContext::detect().is_styled());
    }
}
