use clap::Parser;
use std::io;
use std::path::PathBuf;
use tabscribe::{export_to_string, ExportFormat, ExportOptions, TabDocument, TabError};

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tabscribe=info"))
        .init();

    // args
    let args = CliArgs::parse();

    // load the document from its JSON export
    let data = std::fs::read_to_string(&args.tab_file)?;
    let tab = TabDocument::from_json(&data)?;
    log::info!("loaded \"{}\" ({} notes)", tab.title, tab.note_count());

    let format: ExportFormat = args.format.parse()?;
    let options = ExportOptions {
        format,
        include_techniques: !args.no_techniques,
        include_metadata: !args.no_metadata,
    };
    let content = export_to_string(&tab, &options)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, content)?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a tab document exported as JSON.
    tab_file: PathBuf,
    /// Export format: txt, json or csv.
    #[arg(long, default_value = "txt")]
    format: String,
    /// Optional output file; prints to stdout when absent.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Leave technique symbols out of the text grid.
    #[arg(long, default_value_t = false)]
    no_techniques: bool,
    /// Leave the metadata block out of the text export.
    #[arg(long, default_value_t = false)]
    no_metadata: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("export error: {0}")]
    ExportError(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<TabError> for AppError {
    fn from(error: TabError) -> Self {
        Self::ExportError(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
