use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tc_app::{
    AppError, AppResult, OutputKind, RunResponse, RunTimingSummary, job_service, query,
    run_service,
};
use tc_comfort::{ComfortInputs, ComfortParameters, find_ppd};

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(about = "ThermoComfort CLI - PMV, PPD and SET thermal comfort calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single scenario
    Point(PointArgs),
    /// Validate a job file
    Validate {
        /// Path to the job file (.yaml, .yml or .json)
        job_path: PathBuf,
    },
    /// Run every scenario in a job file
    Run {
        /// Path to the job file (.yaml, .yml or .json)
        job_path: PathBuf,
        /// Write all inputs and outputs as CSV to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export one output series of a job
    ExportSeries {
        /// Path to the job file
        job_path: PathBuf,
        /// Output name (pmv, ppd, set, ta_adj, cooling_effect, comfortable, discomfort_reason)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the PPD for a PMV value
    Ppd {
        /// Predicted mean vote
        #[arg(allow_negative_numbers = true)]
        pmv: f64,
    },
}

#[derive(Args)]
struct PointArgs {
    /// Air temperature (°C)
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    ta: f64,
    /// Mean radiant temperature (°C), defaults to the air temperature
    #[arg(long, allow_negative_numbers = true)]
    tr: Option<f64>,
    /// Air speed (m/s)
    #[arg(long, default_value_t = 0.0)]
    vel: f64,
    /// Relative humidity (%)
    #[arg(long, default_value_t = 50.0)]
    rh: f64,
    /// Metabolic rate (met)
    #[arg(long, default_value_t = 1.1)]
    met: f64,
    /// Clothing insulation (clo)
    #[arg(long, default_value_t = 0.85)]
    clo: f64,
    /// External work (met)
    #[arg(long, default_value_t = 0.0)]
    wme: f64,
    /// PPD (%) at or above which conditions are uncomfortable
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    ppd_threshold: f64,
    /// Air speed (m/s) above which the cooling-effect adjustment applies
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    still_air_threshold: f64,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Point(args) => cmd_point(&args),
        Commands::Validate { job_path } => cmd_validate(&job_path),
        Commands::Run { job_path, output } => cmd_run(&job_path, output.as_deref()),
        Commands::ExportSeries {
            job_path,
            variable,
            output,
        } => cmd_export_series(&job_path, &variable, output.as_deref()),
        Commands::Ppd { pmv } => {
            println!("PPD = {:.2} %", find_ppd(pmv));
            Ok(())
        }
    }
}

fn cmd_point(args: &PointArgs) -> AppResult<()> {
    let inputs = ComfortInputs::new(
        args.ta,
        args.tr.unwrap_or(args.ta),
        args.vel,
        args.rh,
        args.met,
        args.clo,
    )
    .with_external_work(args.wme);
    let parameters = ComfortParameters {
        ppd_comfort_threshold: args.ppd_threshold,
        still_air_threshold: args.still_air_threshold,
        ..ComfortParameters::default()
    };

    tracing::debug!(?inputs, ?parameters, "evaluating point");
    // thresholds from flags get the same checks as job files
    let point = run_service::evaluate_point(&inputs, &parameters)?;
    let r = &point.result;
    println!("  PMV:                {:>8.3}", r.pmv);
    println!("  PPD:                {:>8.2} %", r.ppd);
    println!("  SET:                {:>8.2} °C", r.set);
    if r.is_adjusted() {
        println!("  Cooling effect:     {:>8.2} °C", r.cooling_effect);
        println!("  Adjusted air temp:  {:>8.2} °C", r.adjusted_air_temperature);
    }
    println!(
        "  Humidity ratio:     {:>8.4} kg/kg",
        point.assessment.humidity_ratio
    );
    if point.assessment.comfortable {
        println!("✓ Comfortable");
    } else {
        println!("✗ Uncomfortable: {}", point.assessment.reason);
    }
    Ok(())
}

fn cmd_validate(job_path: &Path) -> AppResult<()> {
    println!("Validating job: {}", job_path.display());
    let job = job_service::load_job(job_path)?;
    let aligned = tc_app::align(&job.columns)?;
    println!("✓ Job is valid ({} scenarios)", aligned.len());
    Ok(())
}

fn cmd_run(job_path: &Path, output: Option<&Path>) -> AppResult<()> {
    println!("Running job: {}", job_path.display());
    let response = run_service::run_job_file(job_path)?;

    print_timing_summary(&response.timing);
    print_results_table(&response);

    let summary = query::get_run_summary(&response);
    println!(
        "  Scenarios: {} ({} failed), comfortable: {} ({:.1} %)",
        summary.row_count, summary.failed, summary.comfortable, summary.percent_comfortable
    );
    for failure in &response.batch.failures {
        println!("  ✗ row {}: {}", failure.index, failure.error);
    }

    if let Some(path) = output {
        let file = std::fs::File::create(path)?;
        query::write_csv(&response, std::io::BufWriter::new(file))?;
        println!("✓ Wrote {} rows to {}", summary.row_count, path.display());
    }
    Ok(())
}

fn cmd_export_series(job_path: &Path, variable: &str, output: Option<&Path>) -> AppResult<()> {
    let kind = OutputKind::from_name(variable).ok_or_else(|| {
        AppError::Validation(format!("Unknown output variable: {}", variable))
    })?;
    let response = run_service::run_job_file(job_path)?;
    let series = query::extract_series(&response, kind);

    // Build CSV
    let mut csv = String::new();
    if let Some(header) = &series.header {
        csv.push_str(&format!("# {}\n", header.entries().join(" | ")));
    }
    csv.push_str(&format!("index,{}\n", kind.name()));
    for (i, val) in series.values.iter().enumerate() {
        csv.push_str(&format!("{},{}\n", i, val));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} values to {}",
            series.values.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!(
        "  Timing: align {:.3} s, evaluate {:.3} s, total {:.3} s",
        timing.align_time_s, timing.evaluate_time_s, timing.total_time_s
    );
}

fn print_results_table(response: &RunResponse) {
    const MAX_ROWS: usize = 24;

    println!(
        "  {:>5} {:>7} {:>6} {:>5} {:>7} {:>7} {:>7} {:>6}  status",
        "row", "ta", "vel", "rh", "pmv", "ppd", "set", "ce"
    );
    let rows = response.aligned.rows.iter().zip(&response.batch.results);
    let assessments = &response.batch.assessments;
    for (i, (input, result)) in rows.enumerate().take(MAX_ROWS) {
        match (result, &assessments[i]) {
            (Some(r), Some(a)) => println!(
                "  {:>5} {:>7.2} {:>6.2} {:>5.1} {:>7.3} {:>7.2} {:>7.2} {:>6.2}  {}",
                i, input.air_temperature, input.air_speed, input.relative_humidity, r.pmv, r.ppd,
                r.set, r.cooling_effect, a.reason
            ),
            _ => println!(
                "  {:>5} {:>7.2} {:>6.2} {:>5.1}  failed",
                i, input.air_temperature, input.air_speed, input.relative_humidity
            ),
        }
    }
    if response.aligned.len() > MAX_ROWS {
        println!("  ... {} more rows", response.aligned.len() - MAX_ROWS);
    }
}
