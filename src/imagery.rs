//! Image references for avatars, badges and risk icons.
//!
//! Gemini does not serve these yet, so they are fixed lookups into the
//! dashboard's static assets.

use crate::model::RiskLevel;

pub fn avatar_for_grade(avg_grade: f64) -> &'static str {
    if avg_grade >= 90.0 {
        "/3d-happy-student-avatar-excellent.jpg"
    } else if avg_grade >= 80.0 {
        "/3d-confident-student-avatar-good.jpg"
    } else if avg_grade >= 70.0 {
        "/3d-determined-student-avatar-improving.jpg"
    } else {
        "/3d-supportive-student-avatar-needs-help.jpg"
    }
}

pub fn badge_for_achievement(achievement: &str) -> &'static str {
    let achievement = achievement.to_lowercase();
    if achievement.contains("math") {
        "/3d-math-success-badge-golden.jpg"
    } else if achievement.contains("science") {
        "/3d-science-success-badge-blue.jpg"
    } else if achievement.contains("english") {
        "/3d-english-success-badge-green.jpg"
    } else {
        "/3d-general-success-badge-sparkles.jpg"
    }
}

pub fn risk_indicator(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "/3d-green-success-badge-sparkles.jpg",
        RiskLevel::Medium => "/3d-yellow-warning-icon-attention.jpg",
        RiskLevel::High => "/3d-red-danger-alert-icon-glowing.jpg",
    }
}
