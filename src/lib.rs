use crate::models::error::{PipelineError, Result};
use crate::models::run_options::{PipelineCommand, RunOptions};
use crate::models::settings::Settings;
use crate::utils::logger::setup_logger;

pub mod client;
pub mod models;
pub mod pipeline;
pub mod scraper;
pub mod utils;

cfg_if::cfg_if! {
    if #[cfg(feature = "tg")] {
        async fn scrape(settings: &Settings) -> Result<()> {
            use crate::client::tg::TgClient;
            use crate::models::settings::Credentials;

            // missing credentials are fatal before any connection is made
            let creds = Credentials::from_env()?;
            let client = TgClient::connect(&creds, &settings.session_path)
                .await
                .map_err(|e| PipelineError::Client(e.to_string()))?;
            crate::scraper::orchestrator::run(&client, settings).await
        }
    } else {
        async fn scrape(_settings: &Settings) -> Result<()> {
            Err(PipelineError::Config(
                "built without the `tg` feature; the scrape command is unavailable".to_string(),
            ))
        }
    }
}

pub async fn start() {
    dotenv::dotenv().ok();
    let options = RunOptions::new();
    setup_logger(&options).unwrap();
    if let Err(e) = dispatch(&options).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn dispatch(options: &RunOptions) -> Result<()> {
    let settings = Settings::from_env()?;
    match &options.command {
        PipelineCommand::Scrape => scrape(&settings).await,
        PipelineCommand::Merge { suffix } => {
            pipeline::merge::merge(
                &settings.scraped_data_dir,
                suffix,
                &settings.combined_csv_path,
            )?;
            Ok(())
        }
        PipelineCommand::Preprocess => {
            pipeline::preprocess::preprocess(
                &settings.combined_csv_path,
                &settings.preprocessed_csv_path,
            )?;
            Ok(())
        }
        PipelineCommand::Sample { n, seed } => pipeline::sample::export_sample(
            &settings.preprocessed_csv_path,
            &settings.labeling_file_path,
            *n,
            *seed,
        ),
    }
}
