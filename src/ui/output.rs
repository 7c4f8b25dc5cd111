//! Step and key/value lines shared by the CLI commands

use super::context::UiContext;
use console::{style, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Warn,
    Info,
    Note,
}

impl Level {
    fn tag(self) -> Option<console::StyledObject<&'static str>> {
        match self {
            Level::Ok => Some(style("[OK]").green()),
            Level::Warn => Some(style("[WARN]").yellow()),
            Level::Info => Some(style("[INFO]").cyan()),
            Level::Note => None,
        }
    }
}

fn emit(ctx: &UiContext, level: Level, message: String) {
    if ctx.is_styled() {
        let _ = match level {
            Level::Ok => cliclack::log::success(message),
            Level::Warn => cliclack::log::warning(message),
            Level::Info => cliclack::log::info(message),
            Level::Note => cliclack::log::remark(message),
        };
        return;
    }

    match level.tag() {
        Some(tag) => println!("  {} {}", tag, message),
        None => println!("  {}", style(message).dim()),
    }
}

/// Opening banner for a command
pub fn intro(ctx: &UiContext, title: &str) {
    let title = style(title).cyan().bold();
    if ctx.is_styled() {
        let _ = cliclack::intro(title);
    } else {
        println!("{}\n", title);
    }
}

/// Closing line after a command finished cleanly
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.is_styled() {
        let _ = cliclack::outro(style(message).green().bold());
    } else {
        println!("\n{} {}", style("[OK]").green(), message);
    }
}

pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    let detail = if ctx.is_styled() {
        style(detail).dim().to_string()
    } else {
        detail.to_string()
    };
    emit(ctx, Level::Ok, format!("{} ({})", message, detail));
}

pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    emit(ctx, Level::Warn, format!("{} - {}", message, hint));
}

pub fn step_info(ctx: &UiContext, message: &str) {
    emit(ctx, Level::Info, message.to_string());
}

pub fn remark(ctx: &UiContext, message: &str) {
    emit(ctx, Level::Note, message.to_string());
}

pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = if ctx.is_styled() {
        style(key).dim().to_string()
    } else {
        key.to_string()
    };
    println!("  {}: {}", key, value);
}

/// Key/value line colored by health, e.g. the cache state on startup
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, ok: bool) {
    if ctx.is_styled() {
        let value_style = if ok {
            Style::new().green()
        } else {
            Style::new().yellow()
        };
        println!("  {}: {}", style(key).dim(), value_style.apply_to(value));
    } else {
        let level = if ok { Level::Ok } else { Level::Warn };
        if let Some(tag) = level.tag() {
            println!("  {} {}: {}", tag, key, value);
        }
    }
}
