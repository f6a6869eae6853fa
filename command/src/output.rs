use adjacent_navigation::HostSink;
use adjacent_navigation::Notice;
use adjacent_navigation::Outcome;
use anyhow::Context;
use anyhow::Result;
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// `*jumppath "<target>"` on stdout, the line message on stderr.
    #[default]
    Text,
    /// One JSON object on stdout.
    Json,
}

struct TextSink;

impl HostSink for TextSink {
    fn jump(&mut self, target: &str) {
        println!("*jumppath \"{target}\"");
    }

    fn line_message(&mut self, notice: &Notice) {
        eprintln!("{}", notice.text);
    }
}

pub(crate) fn render(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    for line in &outcome.diagnostics {
        eprintln!("{line}");
    }
    match format {
        OutputFormat::Text => outcome.deliver(&mut TextSink),
        OutputFormat::Json => {
            let json = serde_json::to_string(outcome).context("serialize outcome")?;
            println!("{json}");
        }
    }
    Ok(())
}
