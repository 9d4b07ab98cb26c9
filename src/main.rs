mod config;
mod data;
mod report;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use config::ProfileConfig;
use data::loader::{self, LoadError};
use data::profile;

/// Report the distinct values observed under configured CSV columns.
///
/// The input's text encoding does not need to be known in advance: the
/// configured encodings are tried in order and the first clean decode wins.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the CSV file to inspect.
    input: PathBuf,

    /// JSON run configuration (encodings, columns, reference lists).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Target column name; may repeat. Overrides the config file's list.
    #[arg(long = "column", value_name = "NAME")]
    columns: Vec<String>,
}

// Undecodable input gets its own status so callers can tell "wrong
// encodings configured" apart from other failures.
const EXIT_UNDECODABLE: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<LoadError>() {
                Some(LoadError::Undecodable { .. }) => ExitCode::from(EXIT_UNDECODABLE),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ProfileConfig::from_path(path)?,
        None => ProfileConfig::default(),
    };

    let targets = if cli.columns.is_empty() {
        config.columns.clone()
    } else {
        cli.columns.clone()
    };
    ensure!(
        !targets.is_empty(),
        "no target columns: pass --column or list 'columns' in the config file"
    );

    let table = loader::load_table(&cli.input, &config.encodings)?;
    let profiles = profile::profile_targets(&table, &targets);

    let stdout = io::stdout();
    report::render(&mut stdout.lock(), &table, &profiles, &config.references)
        .context("writing report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(input: &NamedTempFile, config: Option<&NamedTempFile>, columns: &[&str]) -> Cli {
        Cli {
            input: input.path().to_path_buf(),
            config: config.map(|f| f.path().to_path_buf()),
            columns: columns.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn missing_targets_do_not_fail_the_run() {
        let mut csv = NamedTempFile::new().expect("temp file");
        write!(csv, "name,status\npump,running\n").unwrap();

        run(&cli(&csv, None, &["status", "absent"])).expect("not-found is reportable");
    }

    #[test]
    fn config_file_supplies_targets_when_no_flags_given() {
        let mut csv = NamedTempFile::new().expect("temp file");
        write!(csv, "name,status\npump,running\n").unwrap();
        let mut config = NamedTempFile::new().expect("temp file");
        write!(config, r#"{{ "columns": ["status"] }}"#).unwrap();

        run(&cli(&csv, Some(&config), &[])).expect("config-driven run");
    }

    #[test]
    fn no_targets_anywhere_is_a_usage_error() {
        let mut csv = NamedTempFile::new().expect("temp file");
        write!(csv, "name\npump\n").unwrap();

        assert!(run(&cli(&csv, None, &[])).is_err());
    }

    #[test]
    fn undecodable_input_surfaces_as_load_error() {
        let mut csv = NamedTempFile::new().expect("temp file");
        csv.write_all(b"a\n\xff\xff\n").unwrap();

        let err = run(&cli(&csv, None, &["a"])).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Undecodable { .. })
        ));
    }
}
