//! Basic usage example for the sigscout library.
//!
//! Scans a Docker Hub repository and prints which tags are signed, collecting
//! the scan steps in memory instead of logging them.
//!
//! Run with: cargo run --example basic_usage -- library/ubuntu

use libsigscout::{Event, Recorder, Scout};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let repository = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "library/ubuntu".to_string());

    let scout = Scout::builder().limit(5).build()?;
    let recorder = Recorder::new();

    let summary = match scout.scan(&repository, &recorder) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("✗ {}", e.detailed());
            return Ok(());
        }
    };

    println!(
        "✓ {}: {} tags, {} signature tags, {} manifests fetched",
        summary.repository, summary.total_tags, summary.signature_tags, summary.processed
    );

    for event in recorder.events() {
        if let Event::Signed {
            tag, signature_tag, ..
        } = event
        {
            println!("  {} is signed ({})", tag, signature_tag);
        }
    }

    for tag in &summary.failed {
        println!("  {} could not be fetched", tag);
    }

    Ok(())
}
