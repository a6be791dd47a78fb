//! Prompt text for each generation use case.
//!
//! Every prompt ends by asking for a bare JSON array or object. The parser
//! relies on that instruction but does not trust it.

use crate::model::{ChildRecord, SubjectEntry, SubjectRecord};

pub const INSIGHTS_MAX_TOKENS: u32 = 1024;
pub const STUDY_PLAN_MAX_TOKENS: u32 = 2048;
pub const PARENT_GUIDANCE_MAX_TOKENS: u32 = 1024;
pub const PREDICTION_MAX_TOKENS: u32 = 1024;

fn subjects_json(subjects: &[SubjectEntry]) -> String {
    serde_json::to_string(subjects).unwrap_or_else(|_| "[]".to_string())
}

pub fn insights_prompt(student: &SubjectRecord) -> String {
    format!(
        "Analyze the following student data and provide educational insights:\n\
         Name: {name}\n\
         Current Grade: {grade}%\n\
         Attendance: {attendance}%\n\
         Subject Performance: {subjects}\n\
         \n\
         Generate 3-4 actionable insights for teachers focusing on:\n\
         1. Academic strengths to leverage\n\
         2. Areas needing improvement\n\
         3. Predicted academic trajectory\n\
         4. Specific recommendations for support\n\
         \n\
         Return ONLY a JSON array with objects containing: type (\"strength\", \"opportunity\", \
         \"prediction\", \"alert\", or \"recommendation\"), title, description, confidence (0-100), \
         and actionable (boolean). Do not include any other text.",
        name = student.name,
        grade = student.avg_grade,
        attendance = student.attendance,
        subjects = subjects_json(&student.subjects),
    )
}

pub fn study_plan_prompt(student: &SubjectRecord, timeframe: &str) -> String {
    format!(
        "Create a personalized study plan for:\n\
         Student: {name}\n\
         Current Performance: {subjects}\n\
         Timeframe: {timeframe}\n\
         \n\
         Generate a structured study plan with:\n\
         1. Priority subjects based on performance gaps\n\
         2. Specific tasks and time allocations\n\
         3. Balanced approach across all subjects\n\
         4. Realistic time commitments\n\
         \n\
         Return ONLY a JSON object with: title, totalHours, completedHours (0), and subjects array \
         containing name, priority (\"high\", \"medium\" or \"low\"), hours, completed (0), and tasks \
         array with task, duration, completed (false), priority. Do not include any other text.",
        name = student.name,
        subjects = subjects_json(&student.subjects),
    )
}

pub fn parent_guidance_prompt(child: &ChildRecord) -> String {
    format!(
        "Generate parenting insights for supporting a child's education:\n\
         Child: {name}\n\
         Academic Status: {risk} risk\n\
         Recent Performance: {score}%\n\
         \n\
         Provide 3-4 actionable insights for parents focusing on:\n\
         1. How to celebrate achievements\n\
         2. Areas where home support is needed\n\
         3. Communication strategies with child\n\
         4. Upcoming challenges to prepare for\n\
         \n\
         Return ONLY a JSON array with objects containing: type, title, description, confidence, \
         actionable. Do not include any other text.",
        name = child.name,
        risk = child.risk_status.as_str(),
        score = child.overall_score,
    )
}

pub fn prediction_prompt(student: &SubjectRecord) -> String {
    format!(
        "Predict academic outcomes for student based on current data:\n\
         Current Grade: {grade}%\n\
         Attendance: {attendance}%\n\
         Subject Performance: {subjects}\n\
         \n\
         Analyze trends and provide prediction with:\n\
         - Predicted score (0-100)\n\
         - Confidence level (0-100)\n\
         - Risk level (low/medium/high)\n\
         - 3 specific recommendations\n\
         - Timeframe for prediction\n\
         \n\
         Return ONLY a JSON object with: predictedScore, confidence, riskLevel, recommendations \
         (array), timeframe. Do not include any other text.",
        grade = student.avg_grade,
        attendance = student.attendance,
        subjects = subjects_json(&student.subjects),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RiskLevel, Trend};

    fn student() -> SubjectRecord {
        SubjectRecord {
            name: "Alex".to_string(),
            avg_grade: 88.0,
            attendance: 95.0,
            subjects: vec![SubjectEntry {
                name: "Mathematics".to_string(),
                grade: 92.0,
                trend: Trend::Up,
            }],
        }
    }

    #[test]
    fn insights_prompt_embeds_record_and_array_contract() {
        let prompt = insights_prompt(&student());
        assert!(prompt.contains("Name: Alex"));
        assert!(prompt.contains("Current Grade: 88%"));
        assert!(prompt.contains(r#""name":"Mathematics""#));
        assert!(prompt.contains(r#""trend":"up""#));
        assert!(prompt.contains("Return ONLY a JSON array"));
    }

    #[test]
    fn study_plan_prompt_carries_timeframe() {
        let prompt = study_plan_prompt(&student(), "month");
        assert!(prompt.contains("Timeframe: month"));
        assert!(prompt.contains("Return ONLY a JSON object"));
    }

    #[test]
    fn parent_prompt_uses_risk_status() {
        let child = ChildRecord {
            name: "Sam".to_string(),
            risk_status: RiskLevel::Medium,
            overall_score: 74.0,
        };
        let prompt = parent_guidance_prompt(&child);
        assert!(prompt.contains("Academic Status: medium risk"));
        assert!(prompt.contains("Recent Performance: 74%"));
    }

    #[test]
    fn prediction_prompt_requests_object() {
        let prompt = prediction_prompt(&student());
        assert!(prompt.contains("Attendance: 95%"));
        assert!(prompt.contains("predictedScore, confidence, riskLevel"));
    }
}
