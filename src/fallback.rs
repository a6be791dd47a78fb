//! Rule-based substitutes used when Gemini is unavailable or its reply
//! cannot be decoded. Everything here is pure and never fails.

use crate::model::{
    ChildRecord, Insight, InsightKind, PlanSubject, PlanTask, Prediction, Priority, RiskLevel,
    StudyPlan, SubjectEntry, SubjectRecord,
};

const EXCELLENT_GRADE: f64 = 85.0;
const GOOD_GRADE: f64 = 70.0;

const OUTSTANDING_ATTENDANCE: f64 = 90.0;
const GOOD_ATTENDANCE: f64 = 80.0;

const HIGH_PRIORITY_BELOW: f64 = 80.0;
const MEDIUM_PRIORITY_BELOW: f64 = 90.0;
const HIGH_PRIORITY_HOURS: f64 = 5.0;
const STANDARD_HOURS: f64 = 3.0;
const GENERAL_STUDIES_HOURS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradeBand {
    Excellent,
    Good,
    Developing,
}

fn grade_band(avg_grade: f64) -> GradeBand {
    if avg_grade >= EXCELLENT_GRADE {
        GradeBand::Excellent
    } else if avg_grade >= GOOD_GRADE {
        GradeBand::Good
    } else {
        GradeBand::Developing
    }
}

pub fn risk_level(avg_grade: f64) -> RiskLevel {
    match grade_band(avg_grade) {
        GradeBand::Excellent => RiskLevel::Low,
        GradeBand::Good => RiskLevel::Medium,
        GradeBand::Developing => RiskLevel::High,
    }
}

pub fn insights(student: &SubjectRecord) -> Vec<Insight> {
    let band = grade_band(student.avg_grade);

    let performance = match band {
        GradeBand::Excellent => "excellent",
        GradeBand::Good => "good",
        GradeBand::Developing => "developing",
    };

    let attendance = if student.attendance >= OUTSTANDING_ATTENDANCE {
        "Outstanding"
    } else if student.attendance >= GOOD_ATTENDANCE {
        "Good"
    } else {
        "Needs improvement"
    };

    let learning_path = match band {
        GradeBand::Excellent => "Consider advanced coursework and leadership opportunities.",
        GradeBand::Good => "Focus on strengthening core concepts and consistent practice.",
        GradeBand::Developing => "Implement targeted support and additional tutoring sessions.",
    };

    vec![
        Insight {
            kind: InsightKind::Strength,
            title: "Academic Performance Analysis".to_string(),
            description: format!(
                "{} shows {} performance with {}% average grade.",
                student.name, performance, student.avg_grade
            ),
            confidence: 92.0,
            actionable: true,
        },
        Insight {
            kind: InsightKind::Opportunity,
            title: "Attendance Pattern".to_string(),
            description: format!("{} attendance rate of {}%.", attendance, student.attendance),
            confidence: 95.0,
            actionable: student.attendance < OUTSTANDING_ATTENDANCE,
        },
        Insight {
            kind: InsightKind::Recommendation,
            title: "Learning Path Suggestion".to_string(),
            description: learning_path.to_string(),
            confidence: 88.0,
            actionable: true,
        },
    ]
}

pub fn parent_guidance(child: &ChildRecord) -> Vec<Insight> {
    vec![
        Insight {
            kind: InsightKind::Strength,
            title: "Celebrate Academic Progress".to_string(),
            description: format!(
                "Acknowledge {}'s achievements and encourage continued effort.",
                child.name
            ),
            confidence: 90.0,
            actionable: true,
        },
        Insight {
            kind: InsightKind::Opportunity,
            title: "Home Study Environment".to_string(),
            description: "Create a dedicated, distraction-free study space at home.".to_string(),
            confidence: 85.0,
            actionable: true,
        },
    ]
}

fn subject_priority(grade: f64) -> (Priority, f64) {
    if grade < HIGH_PRIORITY_BELOW {
        (Priority::High, HIGH_PRIORITY_HOURS)
    } else if grade < MEDIUM_PRIORITY_BELOW {
        (Priority::Medium, STANDARD_HOURS)
    } else {
        (Priority::Low, STANDARD_HOURS)
    }
}

fn task(task: String, duration: &str, priority: Priority) -> PlanTask {
    PlanTask {
        task,
        duration: duration.to_string(),
        completed: false,
        priority,
    }
}

fn plan_subject(subject: &SubjectEntry) -> PlanSubject {
    let (priority, hours) = subject_priority(subject.grade);
    PlanSubject {
        name: subject.name.clone(),
        priority,
        hours,
        completed: 0.0,
        tasks: vec![
            task(format!("Review {} fundamentals", subject.name), "60 min", Priority::High),
            task(format!("Practice {} exercises", subject.name), "45 min", Priority::Medium),
            task(format!("Complete {} assessment", subject.name), "30 min", Priority::Low),
        ],
    }
}

pub fn study_plan(student: &SubjectRecord, timeframe: &str) -> StudyPlan {
    if student.subjects.is_empty() {
        return general_studies_plan();
    }

    let subjects: Vec<PlanSubject> = student.subjects.iter().map(plan_subject).collect();
    let total_hours = subjects.iter().map(|subject| subject.hours).sum();

    StudyPlan {
        title: format!("AI-Generated Study Plan - {timeframe}"),
        total_hours,
        completed_hours: 0.0,
        subjects,
    }
}

fn general_studies_plan() -> StudyPlan {
    StudyPlan {
        title: "Fallback Study Plan".to_string(),
        total_hours: GENERAL_STUDIES_HOURS,
        completed_hours: 0.0,
        subjects: vec![PlanSubject {
            name: "General Studies".to_string(),
            priority: Priority::Medium,
            hours: GENERAL_STUDIES_HOURS,
            completed: 0.0,
            tasks: vec![
                task("Review course materials".to_string(), "60 min", Priority::High),
                task("Complete practice exercises".to_string(), "45 min", Priority::Medium),
            ],
        }],
    }
}

pub fn prediction(student: &SubjectRecord) -> Prediction {
    let trend = match grade_band(student.avg_grade) {
        GradeBand::Excellent => 5.0,
        GradeBand::Good => 2.0,
        GradeBand::Developing => -3.0,
    };

    Prediction {
        predicted_score: (student.avg_grade + trend).clamp(0.0, 100.0),
        confidence: 85.0,
        risk_level: risk_level(student.avg_grade),
        recommendations: vec![
            "Maintain consistent study schedule".to_string(),
            "Focus on weaker subject areas".to_string(),
            "Seek additional help when needed".to_string(),
        ],
        timeframe: "End of semester".to_string(),
    }
}
