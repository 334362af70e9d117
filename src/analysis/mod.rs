//! Skin analysis service.
//!
//! `MockAnalyzer` is the deterministic placeholder used until the real
//! inference engine is integrated. The engine will implement [`SkinAnalyzer`]
//! and slot in behind the same trait without touching the API layer.

use async_trait::async_trait;
use tracing::info;

use crate::models::{AnalysisResult, SkinType};

#[async_trait]
pub trait SkinAnalyzer: Send + Sync {
    /// Total over any id: every input maps to some result, no failure path.
    async fn analyze(&self, image_id: &str) -> AnalysisResult;
}

pub struct MockAnalyzer;

#[async_trait]
impl SkinAnalyzer for MockAnalyzer {
    async fn analyze(&self, image_id: &str) -> AnalysisResult {
        info!(image_id = %image_id, "Performing mock analysis");

        // Simulated logic keyed off id prefixes.
        if image_id.starts_with("mock_oily") {
            return AnalysisResult {
                image_id: image_id.to_string(),
                skin_type: SkinType::Oily,
                issues: vec!["Acne".to_string(), "Enlarged Pores".to_string()],
                confidence: 0.92,
            };
        }

        if image_id.starts_with("mock_dry") {
            return AnalysisResult {
                image_id: image_id.to_string(),
                skin_type: SkinType::Dry,
                issues: vec!["Flakiness".to_string()],
                confidence: 0.85,
            };
        }

        AnalysisResult {
            image_id: image_id.to_string(),
            skin_type: SkinType::Combination,
            issues: vec!["Hyperpigmentation".to_string()],
            confidence: 0.87,
        }
    }
}
