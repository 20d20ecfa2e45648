use anyhow::Result;
use research_insight::core::ConfigProvider;
use research_insight::utils::validation::Validate;
use research_insight::{CsvFactSource, LocalStorage, ReportPipeline, TomlConfig};
use std::io::Read;
use tempfile::TempDir;

async fn write_facts(dir: &std::path::Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(
        dir.join("publication.csv"),
        "publication_id,title,publication_year,domain_id\n\
         1,Sparse Attention,2022,1\n\
         2,\"Graphs, Again\",2023,1\n\
         3,Secure Enclaves,2024,2\n",
    )
    .await?;
    tokio::fs::write(
        dir.join("faculty.csv"),
        "faculty_id,faculty_name\n1,Dr. Kapoor\n2,Dr. Das\n",
    )
    .await?;
    tokio::fs::write(
        dir.join("research_domain.csv"),
        "domain_id,domain_name\n1,Machine Learning\n2,Systems Security\n",
    )
    .await?;
    tokio::fs::write(
        dir.join("faculty_publication.csv"),
        "faculty_id,publication_id\n1,1\n1,2\n2,3\n",
    )
    .await?;
    Ok(())
}

fn read_entry(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> Result<String> {
    let mut content = String::new();
    archive.by_name(name)?.read_to_string(&mut content)?;
    Ok(content)
}

#[tokio::test]
async fn test_toml_driven_report_archive() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("data");
    let output_dir = temp_dir.path().join("out");
    write_facts(&data_dir).await?;

    let config_content = format!(
        r#"
[report]
name = "integration"

[source]
data_dir = "{}"

[analytics]
current_year = 2024
top_authors_limit = 1

[load]
output_path = "{}"
output_formats = ["csv", "json"]
archive_name = "insight.zip"
"#,
        data_dir.to_str().unwrap().replace('\\', "/"),
        output_dir.to_str().unwrap().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&config_content)?;
    config.validate()?;

    let source = CsvFactSource::new(LocalStorage::new(config.data_dir()), "data");
    let storage = LocalStorage::new(config.output_path());
    let archive_name = config.archive_name().to_string();
    let pipeline = ReportPipeline::new(source, storage, config).with_archive_name(archive_name);

    let output_path = pipeline.run().await?;
    assert!(output_path.ends_with("insight.zip"));

    let zip_data = std::fs::read(output_dir.join("insight.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 14);

    let top_authors = read_entry(&mut archive, "top_authors.csv")?;
    assert_eq!(top_authors.trim(), "faculty_name,total_publications\nDr. Kapoor,2");

    let quality = read_entry(&mut archive, "paper_quality.csv")?;
    assert!(quality.contains("\"Graphs, Again\",Machine Learning,Not Indexed"));

    let influence: serde_json::Value =
        serde_json::from_str(&read_entry(&mut archive, "influence.json")?)?;
    assert_eq!(influence[0]["faculty_name"], "Dr. Kapoor");
    assert_eq!(influence[0]["influence_score"], 6);
    assert_eq!(influence[1]["influence_score"], 3);

    let gaps: serde_json::Value =
        serde_json::from_str(&read_entry(&mut archive, "research_gap.json")?)?;
    assert_eq!(gaps[0]["status"], "Research Gap");
    Ok(())
}

#[tokio::test]
async fn test_missing_facts_fail_without_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("out");

    let source = CsvFactSource::new(
        LocalStorage::new(temp_dir.path().join("nowhere").to_str().unwrap()),
        "nowhere",
    );
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[report]
name = "missing"

[source]
data_dir = "nowhere"

[load]
output_path = "{}"
output_formats = ["json"]
"#,
        output_dir.to_str().unwrap().replace('\\', "/")
    ))?;
    let pipeline = ReportPipeline::new(source, LocalStorage::new(config.output_path()), config);

    assert!(pipeline.run().await.is_err());
    assert!(!output_dir.join("report.zip").exists());
    Ok(())
}
