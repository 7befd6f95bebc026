//! Environment probes: terminal width and color capability.
//!
//! These are the only places the crate looks at the environment. Their
//! answers are captured once in a [`RenderConfig`](crate::RenderConfig) and
//! passed to the renderers as plain values.

/// Gets the current terminal width, or None if not available.
pub fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Returns `true` when styled output should be emitted on stdout.
///
/// Defers to `console`, which honors `NO_COLOR`, `CLICOLOR`,
/// `CLICOLOR_FORCE` and whether stdout is a terminal.
pub fn color_enabled() -> bool {
    console::colors_enabled()
}
