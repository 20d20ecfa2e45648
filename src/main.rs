use clap::Parser;
use research_insight::utils::error::ErrorSeverity;
use research_insight::utils::{logger, validation::Validate};
use research_insight::{
    AnalyticsEngine, CliConfig, Command, CsvFactSource, InsightError, LocalStorage,
    ReportPipeline,
};
use serde::Serialize;

fn print_records<T: Serialize>(records: &[T]) -> Result<(), InsightError> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

async fn execute(config: CliConfig) -> Result<(), InsightError> {
    let source = CsvFactSource::new(LocalStorage::new(config.data_dir.clone()), config.data_dir.clone());

    if matches!(config.command, Command::Report) {
        let storage = LocalStorage::new(config.output_path.clone());
        let pipeline = ReportPipeline::new(source, storage, config);
        let output_path = pipeline.run().await?;
        println!("✅ Report saved to: {}", output_path);
        return Ok(());
    }

    let mut engine = AnalyticsEngine::new(source).with_top_authors_limit(config.top_authors_limit);
    if let Some(year) = config.current_year {
        engine = engine.with_current_year(year);
    }

    if let Some((field, pattern)) = config.command.search() {
        return print_records(&engine.search(field, pattern).await?);
    }

    match config.command {
        Command::Year => print_records(&engine.year_analytics().await?),
        Command::DomainTrends => print_records(&engine.domain_analytics().await?),
        Command::TopAuthors => print_records(&engine.top_authors().await?),
        Command::ResearchGap => print_records(&engine.research_gap().await?),
        Command::Influence => print_records(&engine.influence().await?),
        Command::Network => print_records(&engine.network().await?),
        Command::PaperQuality => print_records(&engine.paper_quality().await?),
        Command::Domain { .. } | Command::Keyword { .. } | Command::Topic { .. } | Command::Report => {
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = execute(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
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

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
