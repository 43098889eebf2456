use anyhow::Result;
use tempfile::TempDir;
use usda_food_etl::utils::validation::Validate;
use usda_food_etl::AppConfig;

#[test]
fn test_load_from_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("etl.toml");
    std::fs::write(
        &path,
        r#"
[api]
endpoint = "http://localhost:9000/fdc/v1/foods/search"
api_key = "file-key"
timeout_seconds = 10

[search]
query = "yogurt"
page_size = 50
max_pages = 20

[storage]
bucket = "food-staging"
region = "eu-west-1"
key = "raw-data/yogurt.json"
"#,
    )?;

    let mut config = AppConfig::load(Some(path.as_path()))?;
    // USDA_API_KEY may be set in the environment running the tests
    config.api_key = "file-key".to_string();

    assert_eq!(config.endpoint, "http://localhost:9000/fdc/v1/foods/search");
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.search.query, "yogurt");
    assert_eq!(config.search.data_type, "Branded");
    assert_eq!(config.search.page_size, 50);
    assert_eq!(config.search.max_pages, 20);
    assert_eq!(config.bucket, "food-staging");
    assert_eq!(config.region, "eu-west-1");
    assert_eq!(config.object_key, "raw-data/yogurt.json");
    config.validate()?;
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");
    assert!(AppConfig::load(Some(path.as_path())).is_err());
}
