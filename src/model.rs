use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubjectEntry {
    pub name: String,
    pub grade: f64,
    #[serde(default)]
    pub trend: Trend,
}

/// Student profile sent by the dashboard. Owned by the caller for the
/// duration of one request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    pub name: String,
    pub avg_grade: f64,
    pub attendance: f64,
    #[serde(default)]
    pub subjects: Vec<SubjectEntry>,
}

impl SubjectRecord {
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::invalid_input("student name is required"));
        }
        check_percentage("avgGrade", self.avg_grade)?;
        check_percentage("attendance", self.attendance)?;
        for subject in &self.subjects {
            if subject.name.trim().is_empty() {
                return Err(GatewayError::invalid_input("subject name is required"));
            }
            check_percentage(&format!("grade for {}", subject.name), subject.grade)?;
        }
        Ok(())
    }
}

/// Child profile as seen from the parent portal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    pub name: String,
    pub risk_status: RiskLevel,
    pub overall_score: f64,
}

impl ChildRecord {
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::invalid_input("child name is required"));
        }
        check_percentage("overallScore", self.overall_score)
    }
}

fn check_percentage(field: &str, value: f64) -> Result<(), GatewayError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(GatewayError::invalid_input(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Strength,
    Opportunity,
    Prediction,
    Alert,
    Recommendation,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    #[serde(default)]
    pub actionable: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlanTask {
    pub task: String,
    pub duration: String, // "60 min", "2 hours", ...
    pub completed: bool,
    pub priority: Priority,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlanSubject {
    pub name: String,
    pub priority: Priority,
    pub hours: f64,
    pub completed: f64,
    pub tasks: Vec<PlanTask>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub title: String,
    pub total_hours: f64,
    pub completed_hours: f64,
    pub subjects: Vec<PlanSubject>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub predicted_score: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub timeframe: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StudentPrediction {
    pub name: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub avg_predicted_score: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchPrediction {
    pub total_students: usize,
    pub predictions: Vec<StudentPrediction>,
    pub summary: BatchSummary,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub text_generation: bool,
    pub image_generation: bool,
    pub model: String,
    pub image_model: String,
}
