use anyhow::Context;
use balman::{
    config::{Cli, Command, RangeArgs},
    filter::parse_date_input,
    service::EXPORT_FILE_NAME,
    CsvFileStore, FileUpload, StatementError, StatementService,
};
use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let store = CsvFileStore::open(&cli.data_file)
        .with_context(|| format!("opening store {}", cli.data_file.display()))?;
    let mut service = StatementService::new(store);

    match cli.command {
        Command::Import { file } => import(&mut service, &file),
        Command::Export { range, output } => export(&service, &range, output.as_deref()),
        Command::Calculate {
            account_number,
            range,
        } => calculate(&service, &account_number, &range),
        Command::List { account, range } => list(&service, account.as_deref(), &range),
    }
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{}'", filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

fn parse_range(range: &RangeArgs) -> balman::Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = range.start_date.as_deref().map(parse_date_input).transpose()?;
    let end = range.end_date.as_deref().map(parse_date_input).transpose()?;
    Ok((start, end))
}

fn import(service: &mut StatementService<CsvFileStore>, file: &Path) -> anyhow::Result<()> {
    info!("Processing statements from: {}", file.display());
    let upload = FileUpload::open(file).map_err(StatementError::FileRead)?;

    service.ensure_csv_file(&upload)?;
    let saved = service.import_csv(&upload)?;

    println!("Imported {} statements", saved);
    Ok(())
}

fn export(
    service: &StatementService<CsvFileStore>,
    range: &RangeArgs,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let (start, end) = parse_range(range)?;
    let export = service.export_csv(start, end)?;

    match output {
        Some(path) => {
            let path = export_path(path);
            fs::write(&path, &export.body)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Exported statements to {}", path.display());
        }
        None => io::stdout().write_all(export.body.as_bytes())?,
    }

    Ok(())
}

fn export_path(output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(EXPORT_FILE_NAME)
    } else {
        output.to_path_buf()
    }
}

fn calculate(
    service: &StatementService<CsvFileStore>,
    account_number: &str,
    range: &RangeArgs,
) -> anyhow::Result<()> {
    let (start, end) = parse_range(range)?;
    let totals = service.multicurrency_amounts(account_number, start, end)?;

    println!("{}", serde_json::to_string_pretty(&totals)?);
    Ok(())
}

fn list(
    service: &StatementService<CsvFileStore>,
    account: Option<&str>,
    range: &RangeArgs,
) -> anyhow::Result<()> {
    let (start, end) = parse_range(range)?;
    let statements = match account {
        Some(_) => service.filtered_account_statements(account, start, end)?,
        None => service.filtered_statements(start, end)?,
    };

    let mut stdout = io::stdout().lock();
    for statement in &statements {
        serde_json::to_writer(&mut stdout, statement)?;
        writeln!(stdout)?;
    }

    Ok(())
}
