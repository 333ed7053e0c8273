use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    pub api_base: String,
    pub folder_name: String,
    pub file_name: String,
}

#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub coach_model: String,
    pub chat_model: String,
}

// Hand-written so the API key never reaches the logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("coach_model", &self.coach_model)
            .field("chat_model", &self.chat_model)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: Option<String>,
    pub drive: DriveConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("APP_PORT must be a port number: {e}"))?,
            Err(_) => 8080,
        };
        let drive = DriveConfig {
            api_base: env_or("DRIVE_API_BASE", "https://www.googleapis.com"),
            folder_name: env_or("DRIVE_FOLDER_NAME", "KetoVital_Data"),
            file_name: env_or("DRIVE_FILE_NAME", "keto_vital_backup.json"),
        };
        let llm = LlmConfig {
            api_key: non_empty_env("OPENAI_API_KEY"),
            base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            coach_model: env_or("COACH_MODEL", "gpt-3.5-turbo"),
            chat_model: env_or("CHAT_MODEL", "gpt-4o"),
        };
        Ok(Self {
            host: env_or("APP_HOST", "0.0.0.0"),
            port,
            frontend_url: non_empty_env("FRONTEND_URL"),
            drive,
            llm,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.into())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
