use clap::Parser;
use sensortag_monitor::app::{self, Options};
use sensortag_monitor::engine::EngineSource;
use std::panic::{self, PanicHookInfo};
use std::time::Duration;

/// Exit codes for the application
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_PANIC: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    // Set up panic hook to ensure clean exit codes for process managers
    // (e.g., systemd, Telegraf execd) that monitor exit status
    panic::set_hook(Box::new(move |info: &PanicHookInfo| {
        eprintln!("Panic! {}", info);
        std::process::exit(EXIT_PANIC);
    }));

    let options = Options::parse();

    log::info!(
        "started with engine base url {} polling every {} seconds",
        options.qpe_addr,
        options.poll_interval
    );

    let mut source = EngineSource::new(
        &options.qpe_addr,
        Duration::from_secs_f64(options.poll_interval),
    );

    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();

    match app::run_with_io(options, &mut source, &mut out, &mut err).await {
        Ok(_) => std::process::exit(EXIT_SUCCESS),
        Err(why) => {
            eprintln!("error: {}", why);
            std::process::exit(EXIT_ERROR);
        }
    }
}
