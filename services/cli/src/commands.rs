use crate::infra::{parse_date, parse_round, parse_seat_entry};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use counselling::config::{AllocationConfig, AppConfig};
use counselling::error::AppError;
use counselling::workflows::counselling::{
    allocate_in_background, write_csv, AllocationReport, AllocationRequest, AllocationResult,
    Category, CounsellingRound, QuotaPlan, RankedPool,
};
use counselling::workflows::roster::{RosterImport, RosterImporter};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    /// Applicant roster exported from the registration spreadsheet
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Counselling round (1-4)
    #[arg(long, default_value = "1", value_parser = parse_round)]
    pub(crate) round: CounsellingRound,
    /// Seat total split by the configured quota fractions (round 1)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) total_seats: Option<i64>,
    /// Explicit seats per category, e.g. UR=5,OBC=3 (rounds 2-4)
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_seat_entry,
        allow_negative_numbers = true
    )]
    pub(crate) seats: Vec<(Category, i64)>,
    /// Waiting-list entries per category (defaults to COUNSELLING_WAITING_LIST_SIZE or 5)
    #[arg(long)]
    pub(crate) waiting_list: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Date printed on the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    /// Applicant roster exported from the registration spreadsheet
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Print the accepted applicants and findings as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_allocate(args: AllocateArgs, config: &AppConfig) -> Result<(), AppError> {
    let plan = build_plan(args.total_seats, &args.seats, &config.allocation)?;
    let import = RosterImporter::from_path(&args.roster)?;
    let waiting_list_size = args
        .waiting_list
        .unwrap_or(config.allocation.waiting_list_size);

    let request = AllocationRequest::new(args.round, import.applicants, plan)
        .with_waiting_list_size(waiting_list_size);
    let result = allocate_in_background(request).await?;

    for category in &result.summary().unquoted_categories {
        warn!(
            category = %category,
            "applicants in a category without a quota were left out of every list"
        );
    }
    info!(
        round = args.round.number(),
        admitted = result.summary().admitted,
        waitlisted = result.summary().waitlisted,
        "allocation complete"
    );

    let generated_on = args.date.unwrap_or_else(|| Local::now().date_naive());
    match args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            render_allocation(&result, args.round, generated_on, args.format, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render_allocation(&result, args.round, generated_on, args.format, &mut handle)?;
        }
    }

    Ok(())
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), AppError> {
    let import = RosterImporter::from_path(&args.roster)?;

    if args.json {
        let json = serde_json::to_string_pretty(&import)
            .map_err(|err| AppError::Input(format!("failed to encode roster: {err}")))?;
        println!("{json}");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_inspection(&import, &mut handle)?;
    Ok(())
}

/// A seat total selects the configured percentage split; explicit seats pass through as given.
/// Whether the plan suits the round is left to request validation.
pub(crate) fn build_plan(
    total_seats: Option<i64>,
    seats: &[(Category, i64)],
    allocation: &AllocationConfig,
) -> Result<QuotaPlan, AppError> {
    match (total_seats, seats.is_empty()) {
        (Some(total), true) => Ok(allocation.first_round_plan(total)),
        (None, false) => Ok(QuotaPlan::explicit(seats.to_vec())),
        (Some(_), false) => Err(AppError::Input(
            "pass either --total-seats or --seats, not both".to_string(),
        )),
        (None, true) => Err(AppError::Input(
            "round 1 needs --total-seats; later rounds need --seats".to_string(),
        )),
    }
}

pub(crate) fn render_allocation<W: Write>(
    result: &AllocationResult,
    round: CounsellingRound,
    generated_on: NaiveDate,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Csv => write_csv(result, out)?,
        OutputFormat::Text => AllocationReport::new(result, generated_on)
            .with_round(round)
            .render_text(out)?,
        OutputFormat::Json => {
            let report = AllocationReport::new(result, generated_on).with_round(round);
            writeln!(out, "{}", report.to_json_pretty()?)?;
        }
    }
    Ok(())
}

pub(crate) fn render_inspection<W: Write>(import: &RosterImport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} applicant(s) accepted, {} row(s) skipped",
        import.applicants.len(),
        import.skipped.len()
    )?;

    let mut per_category: BTreeMap<&Category, usize> = BTreeMap::new();
    for applicant in &import.applicants {
        *per_category.entry(&applicant.category).or_default() += 1;
    }
    if !per_category.is_empty() {
        writeln!(out, "\nApplicants by category")?;
        for (category, count) in per_category {
            writeln!(out, "- {}: {}", category, count)?;
        }
    }

    let pool = RankedPool::rank(import.applicants.iter().cloned());
    if !pool.is_empty() {
        writeln!(out, "\nRanked pool")?;
        for (position, applicant) in pool.iter().enumerate() {
            writeln!(
                out,
                "  {:>4}  {:>6}  {:<5} {:<14} {}",
                position + 1,
                applicant.merit_score,
                applicant.category.code(),
                applicant.application_id,
                applicant.display_name
            )?;
        }
    }

    if !import.skipped.is_empty() {
        writeln!(out, "\nSkipped rows")?;
        for row in &import.skipped {
            writeln!(out, "- line {}: {}", row.line, row.reason.summary())?;
        }
    }

    if !import.warnings.is_empty() {
        writeln!(out, "\nWarnings")?;
        for warning in &import.warnings {
            writeln!(out, "- {}", warning.summary())?;
        }
    }

    Ok(())
}
