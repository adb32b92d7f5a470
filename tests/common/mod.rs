use genai_gateway::config::{GatewayConfig, GoogleConfig, ModelConfig, UploadConfig};
use genai_gateway::services::providers::mock::MockTextProvider;
use genai_gateway::services::providers::TextProvider;
use genai_gateway::startup::Application;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub staging_dir: String,
}

impl TestApp {
    /// Spawn the gateway on a random port with a unique staging directory and
    /// the given provider.
    pub async fn spawn(provider: Arc<dyn TextProvider>) -> Self {
        let staging_dir = format!("target/test-uploads-{}", Uuid::new_v4());

        let config = GatewayConfig {
            port: 0, // Random port
            google: GoogleConfig {
                api_key: "test-api-key".to_string(),
            },
            models: ModelConfig {
                text_model: "gemini-1.5-flash".to_string(),
            },
            uploads: UploadConfig {
                dir: staging_dir.clone(),
            },
        };

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            staging_dir,
        }
    }

    /// Spawn with an enabled mock provider.
    #[allow(dead_code)]
    pub async fn spawn_mock() -> Self {
        Self::spawn(Arc::new(MockTextProvider::new(true))).await
    }

    /// List files currently present in the staging directory.
    #[allow(dead_code)]
    pub fn staged_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(&self.staging_dir) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Cleanup test resources (staging directory).
    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.staging_dir).await;
    }
}
