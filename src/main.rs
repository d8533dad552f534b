use std::env;
use std::process;

use aco_tsp::Config;
use tracing::Level;

fn main() {
    let config = Config::build(env::args()).unwrap_or_else(|err| err.exit());

    let level = if config.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = aco_tsp::run(&config) {
        eprintln!("Application error: {e}");
        process::exit(1);
    };
}
