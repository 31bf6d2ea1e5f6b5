//! Builds a random chain, inspects one site and shows that an X gate swaps
//! the amplitudes of basis strings differing at the gate's site.
//!
//! Run with `cargo run --example swap_gate`. Set `RUST_LOG=debug` to see the
//! library's own events.

use std::time::Instant;

use qmps::{Gate, MpsChain, MpsConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> qmps::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = MpsConfig::new(5, 3);
    let start = Instant::now();
    let mut chain = MpsChain::<f64>::from_config(&config)?;
    info!(
        sites = chain.site_count(),
        bond_dimension = chain.bond_dimension(),
        elapsed = ?start.elapsed(),
        "created chain"
    );

    let (m0, m1) = chain.site_tensors(2)?;
    println!("site 2, label 0:\n{m0:.4}");
    println!("site 2, label 1:\n{m1:.4}");
    println!("product:\n{:.4}", m0.dot(m1));

    let a = [0, 1, 1, 0, 1];
    let b = [0, 0, 1, 0, 1];

    let start = Instant::now();
    println!(
        "before X at site 1: c{a:?} = {:.6}, c{b:?} = {:.6}",
        chain.coefficient(&a)?,
        chain.coefficient(&b)?
    );
    info!(elapsed = ?start.elapsed(), "extracted coefficients");

    let start = Instant::now();
    chain.apply(&Gate::x(), 1)?;
    info!(elapsed = ?start.elapsed(), "applied X gate");

    println!(
        "after X at site 1:  c{a:?} = {:.6}, c{b:?} = {:.6}",
        chain.coefficient(&a)?,
        chain.coefficient(&b)?
    );

    Ok(())
}
