///
/// threadlab CLI - Native thread lifecycle and synchronization demos
///
/// Provides one subcommand per demo:
/// - threadlab spawn: create sleeping workers, then join them
/// - threadlab ticktock: pausable Tick/Tock worker (t = pause/continue, q = quit)
/// - threadlab accumulate: many workers adding into one mutex-guarded total
/// - threadlab result: a worker delivering its sum through a one-shot channel
///

mod config;
mod errors;
mod input;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::debug;

use threadlab::{
    ComputeError, StatusSink, Worker, accumulate, control_channel, drive_commands,
    expected_total, oneshot, run_tick_loop, sum_up_to,
};

use crate::config::LabConfig;
use crate::errors::CliError;
use crate::input::{StdinCommands, StdoutSink};

/// The worker's artificial head start in the `result` demo, so the waiter
/// visibly blocks before the value arrives.
const RESULT_DELAY: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "threadlab")]
#[command(author, version, about = "Native thread lifecycle and synchronization demos", long_about = None)]
struct Cli {
    /// Path to a threadlab.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn sleeping workers, then join them
    Spawn {
        /// How long each worker sleeps, in milliseconds
        #[arg(long)]
        sleep_ms: Option<u64>,
    },

    /// Run the pausable Tick/Tock worker (t = pause/continue, q = quit)
    Ticktock {
        /// Interval between ticks, in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Command input sampling interval, in milliseconds
        #[arg(long)]
        poll_ms: Option<u64>,
    },

    /// Accumulate 1..=limit from many workers under one lock
    Accumulate {
        /// Number of worker threads
        #[arg(long)]
        workers: Option<usize>,

        /// Upper bound of each worker's increments
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Deliver a worker's summation result through a one-shot channel
    Result {
        /// Sum the integers 1..=n
        #[arg(long)]
        n: Option<i64>,

        /// Inject the deliberate worker failure
        #[arg(long)]
        fail: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config = match LabConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    debug!(?config, "config loaded");

    let result = match cli.command {
        Commands::Spawn { sleep_ms } => {
            cmd_spawn(Duration::from_millis(sleep_ms.unwrap_or(config.sleep_ms)))
        }
        Commands::Ticktock { tick_ms, poll_ms } => cmd_ticktock(
            Duration::from_millis(tick_ms.unwrap_or(config.tick_ms)),
            Duration::from_millis(poll_ms.unwrap_or(config.poll_ms)),
        ),
        Commands::Accumulate { workers, limit } => cmd_accumulate(
            workers.unwrap_or(config.workers),
            limit.unwrap_or(config.limit),
        ),
        Commands::Result { n, fail } => cmd_result(n.unwrap_or(config.sum_n), fail),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Demo 1: worker creation and joining, nothing else.
fn cmd_spawn(sleep: Duration) -> Result<(), CliError> {
    let mut sink = StdoutSink;
    sink.line("spawn - sleeping worker threads");
    sink.line(&format!("main tid={:?}", thread::current().id()));

    let mut spawned: Vec<Worker> = Vec::new();
    for name in ["sleeper-1", "sleeper-2"] {
        let result = Worker::spawn(name, move || {
            let mut sink = StdoutSink;
            let tid = thread::current().id();
            sink.line(&format!("[{name}] thread start. tid={tid:?}"));
            thread::sleep(sleep);
            sink.line(&format!("[{name}] thread end.   tid={tid:?}"));
        });

        match result {
            Ok(worker) => {
                sink.line(&format!("[{name}] created. tid={:?}", worker.thread_id()));
                spawned.push(worker);
            }
            Err(err) => {
                // Never orphan the workers already running.
                for worker in spawned {
                    worker.join();
                }
                return Err(err.into());
            }
        }
    }

    for worker in spawned {
        let name = worker.name().to_string();
        worker.join();
        sink.line(&format!("[{name}] joined."));
    }
    Ok(())
}

/// Demo 2: the pausable control loop, driven from stdin.
fn cmd_ticktock(tick: Duration, poll: Duration) -> Result<(), CliError> {
    let mut sink = StdoutSink;
    sink.line("ticktock - Tick/Tock worker (t = pause/continue, q = quit)");
    sink.line(&format!("main tid={:?}", thread::current().id()));

    let (controller, handle) = control_channel();
    let worker = Worker::spawn("ticker", move || {
        let mut sink = StdoutSink;
        run_tick_loop(&handle, &mut sink, tick);
    })?;
    sink.line(&format!("worker tid={:?}", worker.thread_id()));

    let mut source = StdinCommands::spawn()?;
    drive_commands(&worker, &controller, &mut source, &mut sink, poll);
    worker.join();
    Ok(())
}

/// Demo 3: mutual exclusion — the total must match the closed form.
fn cmd_accumulate(workers: usize, limit: i64) -> Result<(), CliError> {
    let mut sink = StdoutSink;
    sink.line("accumulate - shared counter under one lock");
    sink.line(&format!("main tid={:?}", thread::current().id()));

    let total = accumulate(workers, limit)?;
    sink.line(&format!("expected={}", expected_total(workers, limit)));
    sink.line(&format!("total={total}"));
    Ok(())
}

/// Demo 4: one-shot result delivery, success or typed failure.
fn cmd_result(n: i64, fail: bool) -> Result<(), CliError> {
    let mut sink = StdoutSink;
    sink.line("result - worker sum delivered through a one-shot channel");
    sink.line(&format!("main tid={:?}", thread::current().id()));

    let (producer, waiter) = oneshot();
    let worker = Worker::spawn("summer", move || {
        thread::sleep(RESULT_DELAY);
        if fail {
            producer.publish_err(ComputeError::Injected);
            return;
        }
        match sum_up_to(n) {
            Ok(total) => producer.publish(total),
            Err(err) => producer.publish_err(err),
        }
    })?;
    sink.line(&format!("worker tid={:?}", worker.thread_id()));

    sink.line("[Main] waiting for result...");
    match waiter.wait() {
        Ok(value) => sink.line(&format!("[Main] result={value}")),
        Err(err) => sink.line(&format!("[Main] error={err}")),
    }

    worker.join();
    Ok(())
}
