//! The three-file preparation pipeline.
//!
//! Mirrors the usual exploration sequence over a games data folder: load the
//! raw events CSV, describe it, prepare it with and without the NPC code
//! lookup, then do the same for the workbook's first sheet and for the medal
//! standings sheet. Loader failures are reported and skipped; preparation
//! failures terminate the run.

use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use paradata_ingest::{SheetRef, TableFormat, load_table, read_csv_frame_lossy};
use paradata_report::{print_description, render_frame_table};
use paradata_transform::prepare_frame;

use crate::cli::{DescribeArgs, RunArgs};

/// Outcome of one pipeline step, for the run summary.
struct StepSummary {
    label: &'static str,
    loaded: bool,
    rows: usize,
    columns: usize,
    prepared: bool,
}

pub fn run_pipeline(args: &RunArgs) -> Result<()> {
    if !args.data_dir.is_dir() {
        bail!("data folder not found: {}", args.data_dir.display());
    }
    let events_path = args.data_dir.join(&args.events_csv);
    let workbook_path = args.data_dir.join(&args.workbook);
    let npc_path = args.data_dir.join(&args.npc_codes);

    let mut summaries = Vec::new();

    // Stage 1: events CSV, described and prepared both with and without the
    // NPC code lookup.
    {
        let span = info_span!("events_csv");
        let _guard = span.enter();

        let events = load_table(&events_path, TableFormat::Csv, None);
        print_description(events.as_ref(), "events (csv)");

        let npc_codes = read_csv_frame_lossy(&npc_path, &["Code", "Name"])
            .with_context(|| format!("load NPC codes from {}", npc_path.display()))?;
        info!(rows = npc_codes.height(), "loaded NPC code lookup");

        let prepared = match &events {
            Some(df) => {
                let joined = prepare_frame(df.clone(), Some(&npc_codes))
                    .context("prepare events with NPC codes")?;
                let check = joined
                    .select(["country", "code", "name"])
                    .context("select join check columns")?;
                println!("\nJoin check (country / code / name):");
                println!("{}", render_frame_table(&check));

                Some(prepare_frame(df.clone(), None).context("prepare events")?)
            }
            None => {
                warn!("events table absent; skipping preparation");
                None
            }
        };
        summaries.push(step_summary("events (csv)", events.as_ref(), &prepared));
    }

    // Stage 2: first worksheet of the workbook.
    {
        let span = info_span!("workbook_events");
        let _guard = span.enter();

        let frame = load_table(&workbook_path, TableFormat::Excel, None);
        print_description(frame.as_ref(), "events (workbook, first sheet)");
        let prepared = prepare_loaded(frame.as_ref(), "workbook events")?;
        summaries.push(step_summary("events (workbook)", frame.as_ref(), &prepared));
    }

    // Stage 3: the medal standings worksheet.
    {
        let span = info_span!("medal_standings");
        let _guard = span.enter();

        let sheet = SheetRef::Name(args.standings_sheet.clone());
        let frame = load_table(&workbook_path, TableFormat::Excel, Some(&sheet));
        print_description(frame.as_ref(), "medal standings");
        let prepared = prepare_loaded(frame.as_ref(), "medal standings")?;
        summaries.push(step_summary("medal standings", frame.as_ref(), &prepared));
    }

    print_run_summary(&summaries);
    Ok(())
}

pub fn run_describe(args: &DescribeArgs) -> Result<()> {
    let format = detect_format(&args.file);
    let frame = load_table(&args.file, format, args.sheet.as_ref());
    let title = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    print_description(frame.as_ref(), &title);
    Ok(())
}

/// Prepares a loaded table, or logs and skips when the table is absent.
fn prepare_loaded(frame: Option<&DataFrame>, label: &str) -> Result<Option<DataFrame>> {
    match frame {
        Some(df) => {
            let prepared = prepare_frame(df.clone(), None)
                .with_context(|| format!("prepare {label}"))?;
            info!(
                rows = prepared.height(),
                columns = prepared.width(),
                "prepared {label} table"
            );
            Ok(Some(prepared))
        }
        None => {
            warn!("{label} table absent; skipping preparation");
            Ok(None)
        }
    }
}

fn detect_format(path: &Path) -> TableFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls") => {
            TableFormat::Excel
        }
        _ => TableFormat::Csv,
    }
}

fn step_summary(
    label: &'static str,
    frame: Option<&DataFrame>,
    prepared: &Option<DataFrame>,
) -> StepSummary {
    StepSummary {
        label,
        loaded: frame.is_some(),
        rows: frame.map_or(0, DataFrame::height),
        columns: frame.map_or(0, DataFrame::width),
        prepared: prepared.is_some(),
    }
}

fn print_run_summary(summaries: &[StepSummary]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Table", "Loaded", "Rows", "Columns", "Prepared"]);
    for summary in summaries {
        table.add_row([
            summary.label.to_string(),
            mark(summary.loaded),
            summary.rows.to_string(),
            summary.columns.to_string(),
            mark(summary.prepared),
        ]);
    }
    println!("\nRun summary:");
    println!("{table}");
}

fn mark(flag: bool) -> String {
    if flag { "yes" } else { "-" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn run_args(data_dir: PathBuf) -> RunArgs {
        RunArgs {
            data_dir,
            events_csv: "paralympics_events_raw.csv".to_string(),
            workbook: "paralympics_all_raw.xlsx".to_string(),
            npc_codes: "npc_codes.csv".to_string(),
            standings_sheet: "medal_standings".to_string(),
        }
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("data/book.xlsx")),
            TableFormat::Excel
        );
        assert_eq!(detect_format(Path::new("data/book.XLSX")), TableFormat::Excel);
        assert_eq!(detect_format(Path::new("data/events.csv")), TableFormat::Csv);
        assert_eq!(detect_format(Path::new("data/events")), TableFormat::Csv);
    }

    #[test]
    fn test_run_pipeline_missing_data_dir() {
        let result = run_pipeline(&run_args(PathBuf::from("/nonexistent")));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_pipeline_requires_npc_codes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("paralympics_events_raw.csv"),
            "Country,Participants\nFrance,5\n",
        )
        .unwrap();

        let result = run_pipeline(&run_args(dir.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_pipeline_minimal_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("paralympics_events_raw.csv"),
            "Country,Start,End,Participants\n\
             France,29/08/2024,08/09/2024,5\n\
             Nowhere,01/01/2000,02/01/2000,\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("npc_codes.csv"), "Code,Name\nFRA,France\n").unwrap();

        // The workbook is absent: described as skipped, never prepared.
        let result = run_pipeline(&run_args(dir.path().to_path_buf()));
        assert!(result.is_ok());
    }
}
