use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::fallback;
use crate::gemini::{GeminiClient, TextGenerator};
use crate::imagery;
use crate::model::{
    BatchPrediction, BatchSummary, ChildRecord, Insight, Prediction, RiskLevel, ServiceStatus,
    StudentPrediction, StudyPlan, SubjectRecord,
};
use crate::parser::{self, Shape};
use crate::prompt;

pub const DEFAULT_TIMEFRAME: &str = "week";

/// Entry point for every AI-assisted operation. Built once at startup and
/// shared by reference; holds no mutable state.
pub struct InsightGateway<G = GeminiClient> {
    config: GatewayConfig,
    generator: G,
}

impl InsightGateway<GeminiClient> {
    pub fn from_config(config: GatewayConfig) -> Self {
        let generator = GeminiClient::new(config.api_base.clone(), config.api_key.clone());
        Self::new(config, generator)
    }
}

impl<G: TextGenerator> InsightGateway<G> {
    pub fn new(config: GatewayConfig, generator: G) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn service_status(&self) -> ServiceStatus {
        ServiceStatus {
            text_generation: self.is_configured(),
            image_generation: self.is_configured(),
            model: self.config.text_model.clone(),
            image_model: self.config.image_model.clone(),
        }
    }

    /// Teacher-facing insights. Only invalid input is an error; remote
    /// problems of any kind yield the rule-based insights.
    pub async fn generate_insights(
        &self,
        student: &SubjectRecord,
    ) -> Result<Vec<Insight>, GatewayError> {
        student.validate()?;
        if !self.is_configured() {
            return Ok(fallback::insights(student));
        }

        let prompt = prompt::insights_prompt(student);
        Ok(self
            .generate_or(
                "insights",
                &prompt,
                prompt::INSIGHTS_MAX_TOKENS,
                Shape::Array,
            )
            .await
            .unwrap_or_else(|| fallback::insights(student)))
    }

    pub async fn parent_guidance(
        &self,
        child: &ChildRecord,
    ) -> Result<Vec<Insight>, GatewayError> {
        child.validate()?;
        if !self.is_configured() {
            return Ok(fallback::parent_guidance(child));
        }

        let prompt = prompt::parent_guidance_prompt(child);
        Ok(self
            .generate_or(
                "parent_guidance",
                &prompt,
                prompt::PARENT_GUIDANCE_MAX_TOKENS,
                Shape::Array,
            )
            .await
            .unwrap_or_else(|| fallback::parent_guidance(child)))
    }

    /// Requires a configured credential. Once configured, remote failures
    /// and unparsable replies yield the rule-based plan.
    pub async fn create_study_plan(
        &self,
        student: &SubjectRecord,
        timeframe: &str,
    ) -> Result<StudyPlan, GatewayError> {
        student.validate()?;
        if !self.is_configured() {
            return Err(GatewayError::NotConfigured);
        }

        let prompt = prompt::study_plan_prompt(student, timeframe);
        Ok(self
            .generate_or(
                "study_plan",
                &prompt,
                prompt::STUDY_PLAN_MAX_TOKENS,
                Shape::Object,
            )
            .await
            .unwrap_or_else(|| fallback::study_plan(student, timeframe)))
    }

    pub async fn predict_outcome(
        &self,
        student: &SubjectRecord,
    ) -> Result<Prediction, GatewayError> {
        student.validate()?;
        if !self.is_configured() {
            return Err(GatewayError::NotConfigured);
        }

        let prompt = prompt::prediction_prompt(student);
        Ok(self
            .generate_or(
                "prediction",
                &prompt,
                prompt::PREDICTION_MAX_TOKENS,
                Shape::Object,
            )
            .await
            .unwrap_or_else(|| fallback::prediction(student)))
    }

    /// Predicts each student in roster order. Every record is validated
    /// before the first remote call.
    pub async fn predict_batch(
        &self,
        students: &[SubjectRecord],
    ) -> Result<BatchPrediction, GatewayError> {
        for student in students {
            student.validate()?;
        }
        if !self.is_configured() {
            return Err(GatewayError::NotConfigured);
        }

        let mut predictions = Vec::with_capacity(students.len());
        for student in students {
            let prediction = self.predict_outcome(student).await?;
            predictions.push(StudentPrediction {
                name: student.name.clone(),
                prediction,
            });
        }

        let summary = summarize(&predictions);
        info!(
            students = predictions.len(),
            high_risk = summary.high_risk,
            "batch prediction finished"
        );

        Ok(BatchPrediction {
            total_students: predictions.len(),
            predictions,
            summary,
        })
    }

    pub fn create_avatar(&self, student: &SubjectRecord) -> &'static str {
        imagery::avatar_for_grade(student.avg_grade)
    }

    pub fn create_badge(&self, achievement: &str) -> &'static str {
        imagery::badge_for_achievement(achievement)
    }

    pub fn create_risk_icon(&self, level: RiskLevel) -> &'static str {
        imagery::risk_indicator(level)
    }

    // One remote call plus tolerant decode. `None` means the caller should
    // substitute its fallback.
    async fn generate_or<T: DeserializeOwned>(
        &self,
        use_case: &'static str,
        prompt: &str,
        max_output_tokens: u32,
        shape: Shape,
    ) -> Option<T> {
        let raw = match self
            .generator
            .generate(prompt, &self.config.text_model, max_output_tokens)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!(use_case, error = %err, "Gemini call failed, using fallback");
                return None;
            }
        };

        match parser::parse_as::<T>(&raw, shape) {
            Ok(parsed) => {
                info!(use_case, "parsed Gemini response");
                Some(parsed)
            }
            Err(miss) => {
                warn!(use_case, error = %miss, "unparsable Gemini response, using fallback");
                None
            }
        }
    }
}

fn summarize(predictions: &[StudentPrediction]) -> BatchSummary {
    let count = |level: RiskLevel| {
        predictions
            .iter()
            .filter(|p| p.prediction.risk_level == level)
            .count()
    };

    let avg_predicted_score = if predictions.is_empty() {
        0.0
    } else {
        predictions
            .iter()
            .map(|p| p.prediction.predicted_score)
            .sum::<f64>()
            / predictions.len() as f64
    };

    BatchSummary {
        low_risk: count(RiskLevel::Low),
        medium_risk: count(RiskLevel::Medium),
        high_risk: count(RiskLevel::High),
        avg_predicted_score,
    }
}
