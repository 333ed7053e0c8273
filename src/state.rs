use crate::coach::advisor::{self, Advisor};
use crate::config::AppConfig;
use crate::drive::{FileStore, GoogleDrive};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub drive: Arc<dyn FileStore>,
    pub advisor: Arc<dyn Advisor>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let http = reqwest::Client::builder()
            .user_agent(concat!("ketovital/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;

        let drive = Arc::new(GoogleDrive::new(http.clone(), &config.drive.api_base))
            as Arc<dyn FileStore>;
        let advisor = advisor::from_config(&config.llm, http);

        Ok(Self::from_parts(config, drive, advisor))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        drive: Arc<dyn FileStore>,
        advisor: Arc<dyn Advisor>,
    ) -> Self {
        Self {
            config,
            drive,
            advisor,
        }
    }

    #[cfg(test)]
    pub fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: None,
            drive: crate::config::DriveConfig {
                api_base: "http://drive.invalid".into(),
                folder_name: "KetoVital_Data".into(),
                file_name: "keto_vital_backup.json".into(),
            },
            llm: crate::config::LlmConfig {
                api_key: None,
                base_url: "http://llm.invalid".into(),
                coach_model: "gpt-3.5-turbo".into(),
                chat_model: "gpt-4o".into(),
            },
        }
    }

    /// In-memory drive and offline advisor.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(Self::test_config()),
            Arc::new(crate::drive::fake::MemoryDrive::default()),
            Arc::new(advisor::OfflineAdvisor),
        )
    }
}
