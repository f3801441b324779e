#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .init();
}

fn main() {
    init_logger();

    info!("Election test cases started");

    cases::smoke::run();
    cases::bootstrap::run();
    cases::heuristic::run();
    cases::random_weight::run();
    cases::random_strategy::run();
    cases::repeated_rounds::run();
    cases::no_quorum::run();
    cases::barrier_timeout::run();
    cases::session_loss::run();

    info!("Election test cases completed");
}
