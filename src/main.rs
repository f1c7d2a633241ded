//! CPU-scheduling simulator CLI.
//!
//! Replays a workload description file under a chosen scheduling policy and
//! prints the execution trace followed by a per-process metrics table.
//!
//! # Usage
//!
//! `schedsim <ALGO> <workload-file> [<quantum>]`
//!
//! - `ALGO` is one of `FIFO`, `SJF`, `SRTF`, `CFS`, `RR`.
//! - `quantum` is a positive integer, required for `RR` and rejected
//!   otherwise.
//!
//! # Exit Codes
//!
//! - `0`: simulation ran to completion.
//! - `1`: usage error, unsupported algorithm, malformed quantum, unreadable
//!   or malformed workload, or a stalled simulation.

use std::env;
use std::fs;
use std::num::NonZeroU64;
use std::process::exit;

use schedsim::{policy, Simulation, Workload};

fn print_usage(exe: &str) {
    eprintln!(
        "usage: {exe} <ALGO> <workload-file> [<quantum>]

  ALGO      one of FIFO, SJF, SRTF, CFS, RR
  quantum   positive integer, required for RR only"
    );
}

fn main() {
    let mut argv = env::args();
    let exe = argv.next().unwrap_or_else(|| "schedsim".into());
    let args: Vec<String> = argv.collect();

    if args.len() != 2 && args.len() != 3 {
        print_usage(&exe);
        exit(1);
    }

    let algo = args[0].as_str();
    let path = args[1].as_str();

    let quantum = if algo == "RR" {
        if args.len() != 3 {
            eprintln!("{exe}: RR requires a quantum");
            print_usage(&exe);
            exit(1);
        }
        match args[2].parse::<u64>().ok().and_then(NonZeroU64::new) {
            Some(q) => Some(q),
            None => {
                eprintln!(
                    "{exe}: invalid quantum {:?} (must be a positive integer)",
                    args[2]
                );
                exit(1);
            }
        }
    } else {
        if args.len() == 3 {
            print_usage(&exe);
            exit(1);
        }
        None
    };

    let Some(policy) = policy::from_name(algo, quantum) else {
        eprintln!("{exe}: unsupported scheduling algorithm {algo:?}");
        exit(1);
    };

    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{exe}: failed to read {path}: {err}");
            exit(1);
        }
    };

    let workload = match Workload::parse(&input) {
        Ok(workload) => workload,
        Err(err) => {
            eprintln!("{exe}: {err}");
            exit(1);
        }
    };

    let report = match Simulation::new(&workload).run(&*policy) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{exe}: fatal: {err}");
            exit(1);
        }
    };

    for ev in report.trace.events() {
        println!("{ev}");
    }
    println!();
    print!("{}", report.render_table());
    println!();
    println!("Average turnaround time: {:.2}", report.avg_turnaround());
    println!("Average waiting time:    {:.2}", report.avg_waiting());
}
