use crate::component::ArtworkExporter;
use crate::config::Config;
use crate::{format_error, pause};
use anyhow::Result;
use console::Term;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn run_artwork_exporter(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    // 上一次匯出被中斷時重設旗標
    shutdown_signal.store(false, Ordering::SeqCst);
    let exporter = ArtworkExporter::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = exporter.run() {
        eprintln!("{}", format_error(&e));
    }

    pause(term)?;
    Ok(())
}
