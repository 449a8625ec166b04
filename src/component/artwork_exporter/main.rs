//! 圖片匯出主模組
//!
//! 載入媒體庫、確認設定後執行匯出並顯示各分類結果

use super::category::ArtworkCategory;
use super::export_engine::{ExportEngine, ExportReport, ExportState};
use crate::config::Config;
use crate::library::JsonLibrary;
use crate::tools::{ConsoleProgress, LocalFileSystem, validate_file_exists};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use log::info;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 圖片匯出元件
pub struct ArtworkExporter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl ArtworkExporter {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("exporter.title")).cyan().bold());

        let settings = &self.config.settings;
        validate_file_exists(&settings.library_file)?;

        let categories = ArtworkCategory::enabled(&settings.artwork);
        if categories.is_empty() {
            println!("{}", style(t!("exporter.no_categories")).yellow());
            return Ok(());
        }

        self.print_plan(&categories);

        if !self.confirm_export()? {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        println!("{}", style(t!("exporter.loading_library")).dim());
        let library = JsonLibrary::load_from_file(&settings.library_file)?;
        let progress = ConsoleProgress::new(Arc::clone(&self.shutdown_signal));
        let mut engine = ExportEngine::new(&library, &LocalFileSystem, &progress);

        let report = engine.run(settings)?;
        self.print_result(&report);

        Ok(())
    }

    fn print_plan(&self, categories: &[ArtworkCategory]) {
        let settings = &self.config.settings;

        println!();
        println!(
            "  {} {}",
            style(t!("exporter.destination")).dim(),
            style(settings.export_root().display()).cyan()
        );
        if let Some(path) = settings.path_restriction() {
            println!("  {} {}", style(t!("exporter.restriction")).dim(), path);
        }
        println!("  {}", style(t!("exporter.categories")).dim());
        for category in categories {
            println!("    {} {}", style("•").dim(), category.dir_name());
        }
        println!();
        println!("{}", style(t!("exporter.clear_warning")).yellow());
    }

    fn confirm_export(&self) -> Result<bool> {
        let confirm = Confirm::new()
            .with_prompt(t!("exporter.confirm"))
            .default(true)
            .interact()?;
        Ok(confirm)
    }

    fn print_result(&self, report: &ExportReport) {
        println!();
        println!("{}", style(t!("exporter.result_title")).cyan().bold());

        for (category, count) in &report.counts {
            println!(
                "  {} {}: {}",
                style("•").dim(),
                category.dir_name(),
                style(count.copied).green()
            );
            if count.failed > 0 {
                println!(
                    "      {} {}",
                    t!("exporter.failed"),
                    style(count.failed).red()
                );
            }
        }

        if report.state == ExportState::Cancelled {
            println!("{}", style(t!("common.interrupted")).yellow());
        }

        info!(
            "圖片匯出結束 - 狀態: {:?}，已複製: {}，失敗: {}",
            report.state,
            report.total_copied(),
            report.total_failed()
        );
    }
}
