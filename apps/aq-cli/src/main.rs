use aq_app::{
    AppError, AppResult, FilterSelection, HistoricalView, InputForm, Metric, apply_filters,
    city_summary, compute_view, run_prediction,
};
use aq_core::Pollutant;
use aq_data::DataStore;
use aq_session::SessionStore;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "aq-cli")]
#[command(about = "Airqual CLI - AQI prediction and historical analysis tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which artifacts a data directory provides
    Inspect {
        /// Path to the data directory
        data_dir: PathBuf,
    },
    /// List the available scenario presets
    Scenarios {
        /// Path to the data directory
        data_dir: PathBuf,
    },
    /// Predict an AQI from pollutant values or a scenario preset
    Predict {
        /// Path to the data directory
        data_dir: PathBuf,
        /// Apply a named scenario instead of manual values
        #[arg(long, conflicts_with_all = ["co", "ozone", "pm10", "pm25", "no2"])]
        scenario: Option<String>,
        /// CO concentration (ppm)
        #[arg(long)]
        co: Option<f64>,
        /// Ozone concentration (ppb)
        #[arg(long)]
        ozone: Option<f64>,
        /// PM10 concentration (µg/m³)
        #[arg(long)]
        pm10: Option<f64>,
        /// PM2.5 concentration (µg/m³)
        #[arg(long)]
        pm25: Option<f64>,
        /// NO2 concentration (ppb)
        #[arg(long)]
        no2: Option<f64>,
    },
    /// Filter the historical series and print aggregates
    History {
        /// Path to the data directory
        data_dir: PathBuf,
        /// Start date (YYYY-MM-DD), defaults to the earliest observed
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End date (YYYY-MM-DD), defaults to the latest observed
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Restrict to a city (repeatable); no restriction when omitted
        #[arg(long = "city")]
        cities: Vec<String>,
        /// Metric to summarize: CO, Ozone, PM10, PM25, NO2 or AQI
        #[arg(long, default_value = "AQI")]
        metric: String,
        /// Export the filtered rows as CSV (optional, defaults to stdout summary only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a per-city pollution summary
    City {
        /// Path to the data directory
        data_dir: PathBuf,
        /// City name as it appears in the series
        name: String,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { data_dir } => cmd_inspect(&data_dir),
        Commands::Scenarios { data_dir } => cmd_scenarios(&data_dir),
        Commands::Predict {
            data_dir,
            scenario,
            co,
            ozone,
            pm10,
            pm25,
            no2,
        } => cmd_predict(&data_dir, scenario.as_deref(), [co, ozone, pm10, pm25, no2]),
        Commands::History {
            data_dir,
            from,
            to,
            cities,
            metric,
            output,
        } => cmd_history(&data_dir, from, to, cities, &metric, output.as_deref()),
        Commands::City { data_dir, name } => cmd_city(&data_dir, &name),
    }
}

fn cmd_inspect(data_dir: &Path) -> AppResult<()> {
    let store = DataStore::load(data_dir);

    println!("Data directory: {}", data_dir.display());
    match store.model() {
        Some(aq_data::RegressionModel::Linear(_)) => println!("  Model: linear"),
        Some(aq_data::RegressionModel::Forest(forest)) => {
            println!("  Model: forest ({} trees)", forest.trees.len())
        }
        None => println!("  Model: absent (prediction disabled)"),
    }
    match store.series() {
        Some(series) => {
            let (min_date, max_date) = series.date_range();
            println!(
                "  Series: {} records, {} - {}",
                series.len(),
                min_date,
                max_date
            );
            println!("  Cities: {}", series.cities().join(", "));
        }
        None => println!("  Series: absent (historical views disabled)"),
    }
    println!("  Scenarios: {}", store.scenarios().len());
    println!(
        "  Statistics: {}",
        if store.stats().is_some() {
            "present"
        } else {
            "absent"
        }
    );
    Ok(())
}

fn cmd_scenarios(data_dir: &Path) -> AppResult<()> {
    let store = DataStore::load(data_dir);

    if store.scenarios().is_empty() {
        println!("No scenario presets available");
        return Ok(());
    }

    println!("Scenario presets:");
    for scenario in store.scenarios() {
        let reading = scenario.resolved();
        println!(
            "  {} - CO {} | Ozone {} | PM10 {} | PM2.5 {} | NO2 {}",
            scenario.name, reading.co, reading.ozone, reading.pm10, reading.pm25, reading.no2
        );
    }
    Ok(())
}

fn cmd_predict(
    data_dir: &Path,
    scenario: Option<&str>,
    values: [Option<f64>; 5],
) -> AppResult<()> {
    let store = DataStore::load(data_dir);
    let mut session = SessionStore::new();
    let mut form = InputForm::new();

    if let Some(name) = scenario {
        let preset = store
            .scenario(name)
            .ok_or_else(|| AppError::UnknownScenario(name.to_string()))?
            .clone();
        InputForm::apply_scenario(&mut session, &preset);
        println!("Applied scenario: {}", name);
    } else {
        for (pollutant, value) in Pollutant::ALL.into_iter().zip(values) {
            if let Some(value) = value {
                let used = form.set_field(pollutant, value)?;
                if used != value {
                    println!(
                        "  {} {} clamped to {}",
                        pollutant.label(),
                        value,
                        used
                    );
                }
            }
        }
    }

    let prediction = run_prediction(&store, &mut session, &form)?;
    let reading = form.resolved(&session);

    println!("✓ Predicted AQI: {} ({})", prediction.aqi, prediction.category);
    println!("  {}", prediction.category.advisory());
    println!(
        "  Inputs: CO {} ppm | Ozone {} ppb | PM10 {} µg/m³ | PM2.5 {} µg/m³ | NO2 {} ppb",
        reading.co, reading.ozone, reading.pm10, reading.pm25, reading.no2
    );
    Ok(())
}

fn cmd_history(
    data_dir: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    cities: Vec<String>,
    metric: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let store = DataStore::load(data_dir);
    let series = store.series().ok_or(AppError::SeriesUnavailable)?;

    let metric = Metric::parse(metric).ok_or_else(|| AppError::UnknownMetric(metric.to_string()))?;
    let (min_date, max_date) = series.date_range();
    let selection = FilterSelection {
        from: from.unwrap_or(min_date),
        to: to.unwrap_or(max_date),
        cities,
        metric,
    };

    let mut session = SessionStore::new();
    apply_filters(series, &mut session, &selection)?;

    match compute_view(series, &session) {
        HistoricalView::NotApplied => unreachable!("filters were just applied"),
        HistoricalView::Empty => {
            println!("No records matched the selected filters");
        }
        HistoricalView::Ready {
            rows,
            per_city,
            overall,
        } => {
            println!("Showing: {} records", rows.len());

            println!("\n{} by city:", metric.label());
            for row in &per_city {
                println!(
                    "  {:<16} mean {:>8.2}  min {:>8.2}  max {:>8.2}",
                    row.city, row.summary.mean, row.summary.min, row.summary.max
                );
            }

            println!("\nOverall {}:", metric.label());
            println!("  Average: {:.2}", overall.mean);
            println!("  Median:  {:.2}", overall.median);
            println!("  Minimum: {:.2}", overall.min);
            println!("  Maximum: {:.2}", overall.max);

            if let Some(path) = output {
                let mut csv = String::from("Date,City,CO,Ozone,PM10,PM25,NO2,AQI\n");
                for row in &rows {
                    csv.push_str(&format!(
                        "{},{},{},{},{},{},{},{}\n",
                        row.date, row.city, row.co, row.ozone, row.pm10, row.pm25, row.no2, row.aqi
                    ));
                }
                std::fs::write(path, csv)
                    .map_err(|e| AppError::InvalidInput(format!("write {}: {e}", path.display())))?;
                println!("\n✓ Exported {} rows to {}", rows.len(), path.display());
            }
        }
    }
    Ok(())
}

fn cmd_city(data_dir: &Path, name: &str) -> AppResult<()> {
    let store = DataStore::load(data_dir);
    let series = store.series().ok_or(AppError::SeriesUnavailable)?;

    let summary =
        city_summary(series, name).ok_or_else(|| AppError::UnknownCity(name.to_string()))?;

    println!("City: {}", summary.city);
    println!("  Records:     {}", summary.record_count);
    println!("  Average AQI: {:.1}", summary.mean_aqi);
    println!("  Best AQI:    {:.1}", summary.best_aqi);
    println!("  Worst AQI:   {:.1}", summary.worst_aqi);

    println!("\nMonthly average AQI:");
    for (month, aqi) in &summary.monthly_aqi {
        println!("  {}  {:.1}", month, aqi);
    }

    println!("\nAverage pollutant levels:");
    for (pollutant, mean) in &summary.pollutant_means {
        println!(
            "  {:<6} {:>8.2} {}",
            pollutant.label(),
            mean,
            pollutant.units()
        );
    }
    Ok(())
}
