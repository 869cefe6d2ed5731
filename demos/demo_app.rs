//! Walks through a short task run with a prefixed, timestamped logger.
//!
//! Run with `cargo run --example demo_app`. Set `DEMO_STEP_MS` to change the
//! pause between steps (default 500).

use rust_log_facade::prelude::*;
use std::io::Write;
use std::thread;
use std::time::Duration;

fn pause() {
    let ms = std::env::var("DEMO_STEP_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(500);
    thread::sleep(Duration::from_millis(ms));
}

fn run_task(ctx: &Context, id: u32) {
    let logger = from_context(ctx).with([Attr::int("task", id as i64)]);
    match id {
        1 => {
            logger.info("Processing task...");
            pause();
            logger.info("Task completed successfully.");
        }
        2 => {
            logger.warn("Processing task with a warning...");
            pause();
            logger.info("Task completed with warnings.");
        }
        _ => {
            logger.error("Processing task encountered an error!");
            pause();
            logger.info("Task failed.");
        }
    }
}

fn main() -> Result<()> {
    let logger = Logger::builder()
        .level(Level::Debug)
        .sink(Sink::stdout())
        .prefix("DemoApp")
        .report_timestamp(true)
        .as_default()
        .build();

    logger.info("Starting the application...");
    pause();
    logger.debug("Initializing resources...");
    pause();

    let ctx = with_context(&Context::background(), logger.clone());
    for id in 1..=3 {
        run_task(&ctx, id);
        pause();
    }

    // Legacy code writing plain lines ends up in the same stream
    let mut legacy = standard_log(StandardLogOptions::new().prefix("legacy"));
    writeln!(legacy, "cache warmed in {}ms", 42)?;

    rust_log_facade::info!("metrics flushed");
    logger.info_ctx(&ctx, "Shutting down the application...");
    logger.flush()
}
