//! Bank Products Engine CLI
//!
//! Replays a transaction file against deposit accounts and credit lines
//! opened from seed files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --products products.csv --clients clients.csv transactions.csv > products_out.csv
//! cargo run -- --strategy sync --products products.csv --clients clients.csv transactions.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 \
//!     --products products.csv --clients clients.csv transactions.csv
//! RUST_LOG=bank_products_engine=debug cargo run -- ...
//! ```
//!
//! Final product states are written to stdout as CSV; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use bank_products_engine::cli;
use bank_products_engine::strategy;
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();
    cli::init_tracing(&args.log_level);

    let strategy = {
        let config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.to_replay_inputs(), &mut output) {
        error!(error = %e, "replay failed");
        process::exit(1);
    }
}
