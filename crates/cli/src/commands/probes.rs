use anyhow::Result;
use colored::Colorize;
use tsuki_probes::probes::default_probes;
use tsuki_probes::Probe;

pub fn execute() -> Result<()> {
    println!("{}", "Registered probes".bright_blue().bold());
    println!("{}", "=".repeat(50).bright_blue());

    for probe in default_probes() {
        println!(
            "{:<20} {}",
            probe.category().to_string().bright_yellow(),
            probe.name()
        );
        println!("{:<20} {}", "", probe.description().dimmed());
    }

    Ok(())
}
