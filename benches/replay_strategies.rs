//! Benchmark suite comparing replay strategies
//!
//! Compares the synchronous and asynchronous replay strategies using the
//! divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Inputs are generated into temporary files: 50 clients, each holding a
//! savings account and a personal credit line, and a transaction file mixing
//! deposits, withdrawals, purchases and credit draws across all of them.

use bank_products_engine::cli::StrategyType;
use bank_products_engine::strategy::{create_strategy, BatchConfig, ReplayInputs};
use std::io::Write;
use tempfile::NamedTempFile;

const CLIENTS: usize = 50;

fn main() {
    divan::main();
}

struct Fixture {
    _files: [NamedTempFile; 3],
    inputs: ReplayInputs,
}

fn generate(transaction_count: usize) -> Fixture {
    let mut clients = NamedTempFile::new().expect("Failed to create clients file");
    let mut products = NamedTempFile::new().expect("Failed to create products file");
    let mut transactions = NamedTempFile::new().expect("Failed to create transactions file");

    writeln!(clients, "id,type,profile").unwrap();
    writeln!(products, "kind,id,client,type,balance,interest_rate").unwrap();
    for i in 0..CLIENTS {
        writeln!(clients, "c{},PERSONAL,STANDARD", i).unwrap();
        writeln!(products, "deposit,a{},c{},SAVINGS,,", i, i).unwrap();
        writeln!(products, "credit,cr{},c{},PERSONAL,1000000,5", i, i).unwrap();
    }

    writeln!(transactions, "type,account,amount,description").unwrap();
    for n in 0..transaction_count {
        let i = n % CLIENTS;
        let row = match n % 4 {
            0 => format!("deposit,a{},100.00,salary", i),
            1 => format!("withdrawal,a{},25.50,atm", i),
            2 => format!("purchase,a{},10.25,groceries", i),
            _ => format!("purchase,cr{},12.00,card", i),
        };
        writeln!(transactions, "{}", row).unwrap();
    }

    for file in [&mut clients, &mut products, &mut transactions] {
        file.flush().unwrap();
    }

    let inputs = ReplayInputs {
        transactions: transactions.path().to_path_buf(),
        products: products.path().to_path_buf(),
        clients: clients.path().to_path_buf(),
    };

    Fixture {
        _files: [clients, products, transactions],
        inputs,
    }
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn sync_strategy(bencher: divan::Bencher, transaction_count: usize) {
    let fixture = generate(transaction_count);
    let strategy = create_strategy(StrategyType::Sync, None);

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(&fixture.inputs, &mut output)
            .expect("Processing failed");
    });
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn async_strategy(bencher: divan::Bencher, transaction_count: usize) {
    let fixture = generate(transaction_count);
    let strategy = create_strategy(StrategyType::Async, Some(BatchConfig::default()));

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(&fixture.inputs, &mut output)
            .expect("Processing failed");
    });
}
