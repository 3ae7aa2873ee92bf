use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Start a spinner on stderr while a network call is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

/// Stop a spinner without printing anything.
pub fn clear_spinner(sp: ProgressBar) {
    sp.finish_and_clear();
}

/// A 20-cell usage bar, colored by how close it is to full.
pub fn usage_bar(percent: u8) -> String {
    const WIDTH: usize = 20;
    let filled = (usize::from(percent) * WIDTH).div_ceil(100).min(WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled));
    match percent {
        91.. => bar.red().to_string(),
        76..=90 => bar.yellow().to_string(),
        _ => bar.green().to_string(),
    }
}
