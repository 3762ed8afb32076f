use anyhow::Context;
use clap::Parser;
use contract_buyout::adapters::{JsonDraftIntake, PlaceholderIntake, UnavailableIntake};
use contract_buyout::domain::model::Document;
use contract_buyout::domain::ports::{Clock, FixedClock, IntakeAdapter, SystemClock};
use contract_buyout::utils::error::ErrorSeverity;
use contract_buyout::utils::format::{format_currency, format_months};
use contract_buyout::utils::logger;
use contract_buyout::utils::validation::{validate_iso_date, Validate};
use contract_buyout::{
    CliConfig, ContractError, ContractStore, IntakeMode, IntakeService, PortfolioConfig,
    PortfolioSummary,
};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting contract-buyout");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let portfolio = match &config.portfolio {
        Some(path) => {
            tracing::info!("Loading portfolio from: {}", path);
            let portfolio = PortfolioConfig::from_file(path).unwrap_or_else(|e| exit_with(&e));
            if let Err(e) = portfolio.validate() {
                exit_with(&e);
            }
            portfolio
        }
        None => PortfolioConfig::default(),
    };

    // Command line wins over the portfolio setting; both were validated above.
    let as_of = match &config.as_of {
        Some(value) => Some(validate_iso_date("as_of", value)?),
        None => portfolio.as_of()?,
    };
    let clock: Box<dyn Clock> = match as_of {
        Some(date) => Box::new(FixedClock::at_date(date)),
        None => Box::new(SystemClock),
    };

    let intake_delay = Duration::from_millis(portfolio.intake_delay_ms());
    let mut store = portfolio.into_store();

    for _ in 0..config.blank {
        store.create_empty(clock.today());
    }

    let files = &config.intake_files;
    let failures = match config.intake_mode {
        IntakeMode::Placeholder => {
            run_intake(PlaceholderIntake::new(intake_delay), files, &mut store).await?
        }
        IntakeMode::Json => run_intake(JsonDraftIntake, files, &mut store).await?,
        IntakeMode::Unavailable => run_intake(UnavailableIntake, files, &mut store).await?,
    };

    let summary = store.summary(clock.now());
    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if failures > 0 {
        tracing::warn!("{} document(s) could not be added", failures);
        std::process::exit(2);
    }

    Ok(())
}

async fn run_intake<A: IntakeAdapter>(
    adapter: A,
    files: &[String],
    store: &mut ContractStore,
) -> anyhow::Result<usize> {
    let mut service = IntakeService::new(adapter);
    let mut failures = 0;

    for file in files {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read document '{}'", file))?;
        let file_name = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file.as_str())
            .to_string();

        if service.ingest(store, &Document::new(file_name, bytes)).await.is_err() {
            failures += 1;
            if let Some(message) = service.last_error() {
                eprintln!("❌ {}: {}", file, message);
            }
        }
        service.reset();
    }

    Ok(failures)
}

fn print_summary(summary: &PortfolioSummary) {
    if summary.contracts.is_empty() {
        println!("No contracts added yet. Pass --portfolio, --intake or --blank to start.");
        return;
    }

    println!("Evaluated at {}", summary.evaluated_at.format("%Y-%m-%d"));
    println!(
        "{:<28} {:>10} {:>10} {:>10} {:>14} {:>16}",
        "Contract", "Start", "End", "Length", "Monthly", "Buyout"
    );
    for row in &summary.contracts {
        println!(
            "{:<28} {:>10} {:>10} {:>10} {:>14} {:>16}",
            row.name,
            row.start_date,
            row.end_date,
            format_months(row.metrics.total_contract_length_months),
            format_currency(row.metrics.monthly_total),
            format_currency(row.metrics.total_buyout),
        );
        println!("{:>60} remaining", format_months(row.metrics.remaining_months));
    }
    println!();
    println!("Total Buyout Estimate: {}", format_currency(summary.grand_total));
}

fn exit_with(e: &ContractError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
