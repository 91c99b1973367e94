//! portfolio-smoke – end-to-end checks against a running portfolio-server.
//!
//! Exercises every public endpoint once, prints a line per check and exits
//! with status 1 if any of them failed.

mod checks;

use anyhow::Result;
use clap::Parser;

use crate::checks::Runner;

#[derive(Debug, Parser)]
#[command(version, about = "Smoke-test a deployed portfolio-server")]
struct Args {
    /// Server origin, without the `/api` prefix.
    #[arg(long, default_value = "http://127.0.0.1:8001")]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("==========================================");
    println!("  Portfolio API smoke test");
    println!("  {}", args.base_url);
    println!("==========================================");

    let mut runner = Runner::new(&args.base_url, args.timeout)?;
    runner.run_all().await;

    let summary = runner.summary();
    println!();
    println!("==========================================");
    println!("  Results: {}/{} passed", summary.passed, summary.total);
    if !summary.failures.is_empty() {
        println!();
        println!("  Failed checks:");
        for failure in &summary.failures {
            println!("   - {failure}");
        }
    }
    println!("  Success rate: {:.1}%", summary.success_rate());
    println!("==========================================");

    if summary.failures.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
