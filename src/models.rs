use std::sync::Arc;

use crate::analysis::SkinAnalyzer;
use crate::config::Config;
use crate::storage::FileStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
    pub analyzer: Arc<dyn SkinAnalyzer>,
}

// Public API contract below. Any change here needs to be coordinated with the
// mobile client.

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadResponse {
    pub image_id: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisRequest {
    pub image_id: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub image_id: String,
    pub skin_type: SkinType,
    pub issues: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkinType::Oily => write!(f, "Oily"),
            SkinType::Dry => write!(f, "Dry"),
            SkinType::Combination => write!(f, "Combination"),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
