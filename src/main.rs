use anyhow::Result;
use artwork_export::config::types::Config;
use artwork_export::{format_error, init};
use artwork_export::menu::{print_goodbye, show_main_menu};
use artwork_export::signal::setup_shutdown_signal;
use console::Term;
use log::{info, warn};

fn main() -> Result<()> {
    init::init();
    info!("artwork export version {} started", env!("CARGO_PKG_VERSION"));
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal();

    // Load config and set locale
    let mut config = Config::new()?;
    rust_i18n::set_locale(config.settings.language.as_str());

    loop {
        match show_main_menu(&term, &shutdown_signal, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                print_goodbye();
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{}", format_error(&e));
                break;
            }
        }
    }

    Ok(())
}
