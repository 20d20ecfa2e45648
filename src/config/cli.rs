use crate::core::search::SearchField;
use crate::core::summary::DEFAULT_TOP_AUTHORS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "research-insight", version)]
#[command(about = "Search and analytics over a faculty publication record set")]
pub struct CliConfig {
    #[arg(long, global = true, default_value = "./data", help = "Directory holding the relation CSV files")]
    pub data_dir: String,

    #[arg(long, global = true, default_value = "./output")]
    pub output_path: String,

    #[arg(long, global = true, help = "Year the recent-publication window ends at (defaults to this year)")]
    pub current_year: Option<i32>,

    #[arg(long, global = true, default_value_t = DEFAULT_TOP_AUTHORS)]
    pub top_authors_limit: usize,

    #[arg(long, global = true, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Publications whose research domain name contains NAME
    Domain { name: String },
    /// Publications whose title contains KEY
    Keyword { key: String },
    /// Publications whose title contains NAME
    Topic { name: String },
    /// Publication count per year
    Year,
    /// Publication count per domain and year
    DomainTrends,
    /// Most published faculty
    TopAuthors,
    /// Stable / Emerging / Research Gap classification per domain
    ResearchGap,
    /// Faculty ranked by recency-weighted influence score
    Influence,
    /// Faculty-domain collaboration edges
    Network,
    /// Quartile per publication
    PaperQuality,
    /// Write every analytic into a ZIP archive under --output-path
    Report,
}

impl Command {
    pub fn search(&self) -> Option<(SearchField, &str)> {
        match self {
            Command::Domain { name } => Some((SearchField::Domain, name.as_str())),
            Command::Keyword { key } => Some((SearchField::Keyword, key.as_str())),
            Command::Topic { name } => Some((SearchField::Topic, name.as_str())),
            _ => None,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn current_year(&self) -> Option<i32> {
        self.current_year
    }

    fn top_authors_limit(&self) -> usize {
        self.top_authors_limit
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("top_authors_limit", self.top_authors_limit, 1)?;
        validation::validate_output_formats("formats", &self.formats)?;
        if let Some(year) = self.current_year {
            validation::validate_range("current_year", year, 1900, 2200)?;
        }
        Ok(())
    }
}
