use crate::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for every generate route (e.g., gemini-1.5-flash)
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory where uploaded files are staged between receipt and the
    /// provider call.
    pub dir: String,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(GatewayConfig {
            port: get_env("PORT", Some("3000"), is_prod)?
                .parse()
                .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid PORT: {}", e)))?,
            google: GoogleConfig {
                api_key: get_env("GEMINI_API_KEY", None, is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-1.5-flash"), is_prod)?,
            },
            uploads: UploadConfig {
                dir: get_env("UPLOADS_DIR", Some("uploads"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
