//! ui-markdown CLI - render Markdown labels and content to HTML

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;

use ui_markdown::Mode;

#[derive(Parser)]
#[command(name = "ui-markdown")]
#[command(version, about = "Render Markdown to injection-safe HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    echo '**Save**' | ui-markdown        Light mode (inline only)
    ui-markdown README.md --full         Full mode (paragraphs, headings, ...)")]
struct Cli {
    /// Input file; reads stdin when omitted or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Render block elements (paragraphs, headings, blockquotes, images)
    #[arg(short, long)]
    full: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "trace")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let input = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mode = if cli.full { Mode::Full } else { Mode::Light };
    let html = ui_markdown::to_html_with_mode(&input, mode);
    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.write_all(b"\n")?;

    Ok(())
}
