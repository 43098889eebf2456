use clap::Parser;
use usda_food_etl::config::API_KEY_ENV;
use usda_food_etl::domain::ports::ObjectStore;
use usda_food_etl::utils::{logger, validation::Validate};
use usda_food_etl::{
    AppConfig, CliArgs, EtlEngine, EtlError, FoodPipeline, LocalObjectStore, RunReport,
    S3ObjectStore, UploadOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // .env is optional
    let dotenv_path = dotenvy::dotenv().ok();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration error: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Config: {:?}", config);

    if !config.has_api_key() {
        tracing::warn!("{} is not set; the API will reject every request", API_KEY_ENV);
    }

    let report = match &args.local_dir {
        Some(dir) => {
            tracing::info!("Writing to local directory {} instead of S3", dir.display());
            run(LocalObjectStore::new(dir.clone()), &config).await?
        }
        None => run(S3ObjectStore::from_env(&config.region).await, &config).await?,
    };

    print_summary(&report);
    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig, EtlError> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

async fn run<S: ObjectStore>(store: S, config: &AppConfig) -> Result<RunReport, EtlError> {
    let pipeline = FoodPipeline::new(store, config)?;
    Ok(EtlEngine::new(pipeline).run().await)
}

fn print_summary(report: &RunReport) {
    match &report.upload {
        Some(UploadOutcome::Uploaded { key, count }) => {
            println!("✅ Uploaded {} items to {}", count, key);
        }
        Some(UploadOutcome::Failed { reason }) => {
            println!(
                "⚠️  Fetched {} items but the upload failed: {}",
                report.records_fetched, reason
            );
        }
        None => {}
    }
    println!("Data processing and upload complete.");
}
