use crate::component::artwork_exporter::ArtworkCategory;
use crate::config::save::{add_recent_destination, save_settings};
use crate::config::types::{Config, Language};
use crate::menu::handlers::run_artwork_exporter;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use log::info;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_export"),
        t!("main_menu.opt_categories"),
        t!("main_menu.opt_sources"),
        t!("main_menu.opt_destination"),
        t!("main_menu.opt_restriction"),
        t!("main_menu.opt_library"),
        t!("main_menu.opt_language"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => run_artwork_exporter(term, shutdown_signal, config)?,
        Some(1) => show_categories_menu(term, config)?,
        Some(2) => show_sources_menu(term, config)?,
        Some(3) => show_destination_menu(term, config)?,
        Some(4) => show_restriction_menu(term, config)?,
        Some(5) => show_library_menu(term, config)?,
        Some(6) => show_language_menu(term, config)?,
        Some(7) | None => return Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }

    Ok(true)
}

pub fn print_goodbye() {
    println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
}

fn save_and_notify(config: &Config) -> Result<()> {
    save_settings(&config.settings)?;
    println!("\n{}", style(t!("settings.saved")).green());
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}

/// 選擇要匯出的圖片分類
fn show_categories_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.categories.title")).cyan().bold());
    println!("{}", style(t!("settings.categories.hint")).dim());

    let items: Vec<&str> = ArtworkCategory::ALL.iter().map(|c| c.dir_name()).collect();
    let defaults: Vec<bool> = ArtworkCategory::ALL
        .iter()
        .map(|c| c.is_enabled(&config.settings.artwork))
        .collect();

    let selection = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.categories.prompt"))
        .items(&items)
        .defaults(&defaults)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    for (index, category) in ArtworkCategory::ALL.into_iter().enumerate() {
        category.set_enabled(&mut config.settings.artwork, selection.contains(&index));
    }
    save_and_notify(config)
}

/// 依媒體來源分資料夾與名稱正規化
fn show_sources_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.sources.title")).cyan().bold());
    println!("{}", style(t!("settings.categories.hint")).dim());

    let items = vec![
        t!("settings.sources.split_media_sources"),
        t!("settings.sources.split_movies_sources"),
        t!("settings.sources.split_tvshows_sources"),
        t!("settings.sources.normalize_names"),
    ];
    let settings = &config.settings;
    let defaults = [
        settings.split.split_media_sources,
        settings.split.split_movies_sources,
        settings.split.split_tvshows_sources,
        settings.normalize_names,
    ];

    let selection = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.sources.prompt"))
        .items(&items)
        .defaults(&defaults)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let settings = &mut config.settings;
    settings.split.split_media_sources = selection.contains(&0);
    settings.split.split_movies_sources = selection.contains(&1);
    settings.split.split_tvshows_sources = selection.contains(&2);
    settings.normalize_names = selection.contains(&3);
    save_and_notify(config)
}

/// 目的地設定，可從最近使用的路徑選擇
fn show_destination_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.destination.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let recent = config.settings.recent_destinations.clone();
    let path = if recent.is_empty() {
        prompt_destination(&config.settings.destination)?
    } else {
        let mut options: Vec<String> = recent
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).exists() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push(t!("settings.destination.new_path").to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.destination.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            None => return Ok(()),
            Some(idx) if idx < recent.len() => recent[idx].clone(),
            Some(_) => prompt_destination(&config.settings.destination)?,
        }
    };

    if path.is_empty() {
        return Ok(());
    }

    config.settings.destination = path.clone();
    add_recent_destination(&mut config.settings, &path);
    info!("目的地設定為 {path}");
    save_and_notify(config)
}

fn prompt_destination(current: &str) -> Result<String> {
    let path: String = Input::new()
        .with_prompt(t!("settings.destination.input"))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(path.trim().to_string())
}

/// 只匯出路徑包含指定字串的項目，留白表示不限制
fn show_restriction_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.restriction.title")).cyan().bold());
    println!("{}", style(t!("settings.restriction.hint")).dim());

    let current = config.settings.restrict_to_path.clone().unwrap_or_default();
    let path: String = Input::new()
        .with_prompt(t!("settings.restriction.prompt"))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    let path = path.trim();
    config.settings.restrict_to_path = (!path.is_empty()).then(|| path.to_string());
    save_and_notify(config)
}

fn show_library_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.library.title")).cyan().bold());
    println!(
        "\n{} {}",
        style(t!("settings.library.current")).dim(),
        config.settings.library_file.display()
    );

    let path: String = Input::new()
        .with_prompt(t!("settings.library.prompt"))
        .with_initial_text(config.settings.library_file.to_string_lossy())
        .interact_text()?;

    let path = path.trim();
    if path.is_empty() {
        return Ok(());
    }
    config.settings.library_file = PathBuf::from(path);
    save_and_notify(config)
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];
    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_and_notify(config)?;
    }

    Ok(())
}
