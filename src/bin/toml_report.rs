use clap::Parser;
use research_insight::core::{ConfigProvider, FactSource};
use research_insight::utils::error::ErrorSeverity;
use research_insight::utils::{logger, validation::Validate};
use research_insight::{CsvFactSource, LocalStorage, ReportPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Build the full research insight report from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the year the recent-publication window ends at
    #[arg(long)]
    current_year: Option<i32>,

    /// Load the facts and show what would be written, without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(year) = args.current_year {
        config.analytics.current_year = Some(year);
        tracing::info!("🔧 Current year overridden to: {}", year);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let source = CsvFactSource::new(
        LocalStorage::new(config.data_dir().to_string()),
        config.data_dir().to_string(),
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        perform_dry_run(&source).await?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let archive_name = config.archive_name().to_string();
    let pipeline = ReportPipeline::new(source, storage, config).with_archive_name(archive_name);

    match pipeline.run().await {
        Ok(output_path) => {
            println!("✅ Report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
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
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Data: {}", config.data_dir());
    println!(
        "  Output: {}/{}",
        config.output_path(),
        config.archive_name()
    );
    println!("  Formats: {}", config.output_formats().join(", "));
    match config.current_year() {
        Some(year) => println!("  Current Year: {}", year),
        None => println!("  Current Year: (local calendar year)"),
    }
    println!("  Top Authors: {}", config.top_authors_limit());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<F: FactSource>(source: &F) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let snapshot = source.snapshot().await?;

    println!("📚 Facts from {}:", source.name());
    println!("  Publications: {}", snapshot.publications.len());
    println!("  Faculty: {}", snapshot.faculty.len());
    println!("  Research Domains: {}", snapshot.domains.len());
    println!("  Authorship Links: {}", snapshot.authorships.len());
    println!("  Quality Rows: {}", snapshot.quality.len());

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
