//! Sends `tracing` output and panics to the browser console.

use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};
use tracing_web::MakeWebConsoleWriter;

pub fn init_logging(level: Level) {
    console_error_panic_hook::set_once();

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .with(LevelFilter::from_level(level))
        .try_init()
        .is_err()
    {
        tracing::warn!("logging was already initialised");
    }
}
