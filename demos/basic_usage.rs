// ============================================================================
// Basic Usage Example
// ============================================================================

use bbp_pi::prelude::*;
use std::sync::Arc;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== BBP Pi Example ===\n");

    let params = derive_parameters(512);
    println!(
        "Output: {} bits ({} bytes, ~{} decimal digits)",
        params.output_bits,
        params.output_bytes(),
        params.decimal_digits
    );
    println!(
        "Precision: {} bits, {} terms\n",
        params.precision_bits, params.term_count
    );

    // Run every strategy for the same output size
    let results = match compute_all(params.output_bits, Arc::new(LoggingEventHandler)) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("computation failed: {}", err);
            std::process::exit(1);
        },
    };

    for digits in &results {
        println!("=== {} ===", digits.strategy.name());
        println!("Elapsed: {:?}", digits.elapsed);
        println!(
            "Exponent: {}, mantissa bits: {}",
            digits.exponent, digits.bit_len
        );
        for chunk in digits.as_bytes().chunks(16) {
            println!("  {}", hex(chunk));
        }
        println!();
    }

    let agree = results
        .windows(2)
        .all(|pair| pair[0].as_bytes() == pair[1].as_bytes());
    println!("All strategies agree: {}", agree);

    // A reproducible run with an undersized buffer kept via truncation
    println!("\n=== Truncated Output ===");
    let truncated = PiComputerBuilder::new(20)
        .recompute()
        .reduce_by_index()
        .overflow_policy(OverflowPolicy::TruncateHigh)
        .build(Arc::new(NoOpEventHandler))
        .and_then(|computer| computer.run().map_err(|err| err.to_string()));

    match truncated {
        Ok(digits) => println!(
            "20 bits into {} bytes: {} (integer was {} bits)",
            digits.mantissa.len(),
            hex(digits.as_bytes()),
            digits.bit_len
        ),
        Err(err) => println!("failed: {}", err),
    }
}
