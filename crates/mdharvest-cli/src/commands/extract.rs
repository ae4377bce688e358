use crate::cli::ExtractArgs;
use crate::commands::success_payload;
use crate::config::PartialAppConfig;
use crate::diagnostics::DiagnosticsWriter;
use crate::error::{CliError, Result};
use crate::oracle::build_oracle;
use crate::utils::progress::CliProgressHandler;
use mdharvest::engine::progress::ProgressReporter;
use mdharvest::workflows;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub async fn run(args: ExtractArgs) -> Result<()> {
    info!("Starting extraction workflow...");

    let app_config =
        PartialAppConfig::load(args.config.config.as_deref())?.merge_with_cli(&args.config)?;
    let text = read_input(args.input.as_deref())?;
    let oracle = build_oracle(&app_config.oracle)?;

    let diagnostics = args
        .diagnostics
        .as_deref()
        .map(DiagnosticsWriter::create)
        .transpose()?;

    let progress_handler = CliProgressHandler::new();
    let callback = match &diagnostics {
        Some(writer) => writer.observe(progress_handler.get_callback()),
        None => progress_handler.get_callback(),
    };
    let reporter = ProgressReporter::with_callback(callback);

    let result = tokio::task::block_in_place(|| {
        workflows::extract::run(&text, &app_config.extraction, oracle.as_ref(), &reporter)
    })?;

    if let Some(writer) = &diagnostics {
        writer.flush()?;
    }

    info!(
        mentions = result.mentions.len(),
        records = result.records.len(),
        "Extraction finished."
    );

    let payload = success_payload(&result, app_config.extraction.include_water_model_type);
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }
    .map_err(|e| CliError::Other(e.into()))?;

    write_output(args.output.as_deref(), &rendered)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            info!("Reading input text from {:?}", path);
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            info!("Reading input text from standard input");
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            info!("Results written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use serde_json::{Value, json};

    const PAPER: &str = "The initial coordinates were taken from the protein data bank file 1QLX. \
        The system was solvated with TIP3P water molecules. \
        All simulations were performed with Gromacs 2018.";

    fn extract_args(argv: &[&str]) -> ExtractArgs {
        let mut full = vec!["mdharvest", "extract"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Extract(args) => args,
            _ => panic!("Expected 'extract' subcommand"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn extract_writes_success_envelope_and_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("paper.txt");
        let output = dir.path().join("records.json");
        let diagnostics = dir.path().join("diagnostics.txt");
        std::fs::write(&input, PAPER).unwrap();

        let args = extract_args(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--diagnostics",
            diagnostics.to_str().unwrap(),
            "--include-water-model-type",
        ]);
        run(args).await.unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "status": "success",
                "data": [{
                    "id": "1QLX",
                    "type": "experimental",
                    "software_name": "GROMACS",
                    "software_version": "2018",
                    "water_model": "TIP3P",
                    "water_model_type": "explicit",
                }]
            })
        );

        let report = std::fs::read_to_string(&diagnostics).unwrap();
        assert!(report.contains("PDB ID: 1QLX"));
        assert!(report.contains("GROMACS (version: 2018)"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn extract_on_text_without_identifiers_writes_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        let output = dir.path().join("records.json");
        std::fs::write(&input, "Nothing to see here. Move along.").unwrap();

        let args = extract_args(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--pretty",
        ]);
        run(args).await.unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, json!({ "status": "success", "data": [] }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_input_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.txt");
        let args = extract_args(&["-i", input.to_str().unwrap()]);
        assert!(matches!(run(args).await, Err(CliError::Io(_))));
    }
}
