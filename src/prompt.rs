use std::sync::OnceLock;

use dialoguer::theme::SimpleTheme;
use dialoguer::{Confirm, Input};

static THEME: OnceLock<SimpleTheme> = OnceLock::new();

/// Prompt failures (including a process without an interactive terminal)
/// surface as errors so a bootstrap never hangs waiting for input it cannot
/// receive.
pub(crate) fn confirm(prompt: impl Into<String>, default: Option<bool>) -> dialoguer::Result<bool> {
    let theme = THEME.get_or_init(|| SimpleTheme);
    let mut p = Confirm::with_theme(theme).with_prompt(prompt);
    if let Some(default) = default {
        p = p.default(default);
    }
    p.interact()
}

pub(crate) fn input(
    prompt: impl Into<String>,
    default: Option<String>,
) -> dialoguer::Result<String> {
    let theme = THEME.get_or_init(|| SimpleTheme);
    let mut p = Input::with_theme(theme).with_prompt(prompt);
    if let Some(default) = default {
        p = p.default(default);
    }
    p.interact_text()
}
