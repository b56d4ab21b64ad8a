use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tsuki_probes::{report::to_markdown, UnifiedReport};

#[derive(Args)]
pub struct RenderArgs {
    /// Stored JSON report to re-render.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Markdown destination; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read report {}", args.input.display()))?;
    let report: UnifiedReport = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse report {}", args.input.display()))?;

    let markdown = to_markdown(&report);
    match args.output {
        Some(path) => {
            std::fs::write(&path, markdown)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("📄 {}", path.display());
        }
        None => print!("{markdown}"),
    }

    Ok(())
}
