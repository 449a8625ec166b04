pub mod component;
pub mod config;
pub mod init;
pub mod library;
pub mod menu;
pub mod signal;
pub mod tools;

use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;

rust_i18n::i18n!("locales", fallback = "en-US");

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style(t!("common.press_enter")).dim());
    term.read_line()?;
    Ok(())
}

/// 加上本地化錯誤前綴的錯誤訊息
#[must_use]
pub fn format_error(error: &anyhow::Error) -> String {
    format!(
        "{} {:#}",
        style(t!("common.error_prefix")).red().bold(),
        error
    )
}
