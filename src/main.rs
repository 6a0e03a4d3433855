//! triplogger main entrypoint.

use triplogger::run;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("TRIPLOGGER_LOG", "warn"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
