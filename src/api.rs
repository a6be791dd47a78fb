use actix_web::{error, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::GatewayError;
use crate::gateway::{InsightGateway, DEFAULT_TIMEFRAME};
use crate::gemini::TextGenerator;
use crate::model::{ChildRecord, RiskLevel, SubjectRecord};
use crate::roster;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    student_data: Option<Value>,
    timeframe: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRequest {
    child_data: Option<Value>,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    students: Option<Vec<Value>>,
}

#[derive(Deserialize)]
pub struct BadgeRequest {
    achievement: Option<String>,
}

fn student_from(value: Option<Value>) -> Result<SubjectRecord, GatewayError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| GatewayError::invalid_input("Student data is required"))?;
    let student: SubjectRecord = serde_json::from_value(value)
        .map_err(|err| GatewayError::invalid_input(format!("malformed student data: {err}")))?;
    Ok(student)
}

fn child_from(value: Option<Value>) -> Result<ChildRecord, GatewayError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| GatewayError::invalid_input("Child data is required"))?;
    let child: ChildRecord = serde_json::from_value(value)
        .map_err(|err| GatewayError::invalid_input(format!("malformed child data: {err}")))?;
    Ok(child)
}

fn success<T: Serialize>(key: &str, payload: &T) -> Result<HttpResponse, GatewayError> {
    let payload = serde_json::to_value(payload).map_err(|err| GatewayError::Encode {
        reason: err.to_string(),
    })?;
    let mut body = json!({
        "success": true,
        "timestamp": Utc::now().to_rfc3339(),
    });
    body[key] = payload;
    Ok(HttpResponse::Ok().json(body))
}

async fn generate_insights<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<StudentRequest>,
) -> Result<HttpResponse, GatewayError> {
    let student = student_from(req.into_inner().student_data)?;
    info!(student = %student.name, "generating insights");

    let insights = gateway.generate_insights(&student).await?;
    success("insights", &insights)
}

async fn generate_study_plan<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<StudentRequest>,
) -> Result<HttpResponse, GatewayError> {
    let StudentRequest {
        student_data,
        timeframe,
    } = req.into_inner();
    let student = student_from(student_data)?;
    let timeframe = timeframe
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TIMEFRAME.to_string());
    info!(student = %student.name, %timeframe, "generating study plan");

    let plan = gateway.create_study_plan(&student, &timeframe).await?;
    success("studyPlan", &plan)
}

async fn predict_outcome<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<StudentRequest>,
) -> Result<HttpResponse, GatewayError> {
    let student = student_from(req.into_inner().student_data)?;
    info!(student = %student.name, "predicting outcome");

    let prediction = gateway.predict_outcome(&student).await?;
    success("prediction", &prediction)
}

async fn generate_avatar<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<StudentRequest>,
) -> Result<HttpResponse, GatewayError> {
    let student = student_from(req.into_inner().student_data)?;
    student.validate()?;
    if !gateway.is_configured() {
        return Err(GatewayError::NotConfigured);
    }

    let avatar_url = gateway.create_avatar(&student);
    success("avatarUrl", &avatar_url)
}

async fn generate_badge<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<BadgeRequest>,
) -> Result<HttpResponse, GatewayError> {
    let achievement = req
        .into_inner()
        .achievement
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| GatewayError::invalid_input("Achievement is required"))?;

    success("badgeUrl", &gateway.create_badge(&achievement))
}

async fn risk_icon<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    let level: RiskLevel = serde_json::from_value(json!(path.into_inner().to_lowercase()))
        .map_err(|_| GatewayError::invalid_input("risk level must be low, medium or high"))?;

    success("iconUrl", &gateway.create_risk_icon(level))
}

async fn parent_guidance<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<ChildRequest>,
) -> Result<HttpResponse, GatewayError> {
    let child = child_from(req.into_inner().child_data)?;
    info!(child = %child.name, "generating parent guidance");

    let insights = gateway.parent_guidance(&child).await?;
    success("insights", &insights)
}

async fn batch_predict<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    req: web::Json<BatchRequest>,
) -> Result<HttpResponse, GatewayError> {
    let students = req
        .into_inner()
        .students
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GatewayError::invalid_input("Student data is required"))?
        .into_iter()
        .map(|value| student_from(Some(value)))
        .collect::<Result<Vec<_>, _>>()?;

    let batch = gateway.predict_batch(&students).await?;
    success("batch", &batch)
}

async fn batch_predict_csv<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
    body: web::Bytes,
) -> Result<HttpResponse, GatewayError> {
    let students = roster::load_roster(body.as_ref())?;
    let batch = gateway.predict_batch(&students).await?;
    success("batch", &batch)
}

async fn service_status<G: TextGenerator + 'static>(
    gateway: web::Data<InsightGateway<G>>,
) -> HttpResponse {
    HttpResponse::Ok().json(gateway.service_status())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Lumina AI Insight Gateway is running!")
}

/// Malformed JSON bodies get the same `{error, message}` shape as every other
/// client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            actix_web::ResponseError::error_response(&GatewayError::invalid_input(message)),
        )
        .into()
    })
}

pub fn configure<G: TextGenerator + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/ai")
                .route("/status", web::get().to(service_status::<G>))
                .route("/generate-insights", web::post().to(generate_insights::<G>))
                .route("/generate-study-plan", web::post().to(generate_study_plan::<G>))
                .route("/predict-outcome", web::post().to(predict_outcome::<G>))
                .route("/generate-avatar", web::post().to(generate_avatar::<G>))
                .route("/generate-badge", web::post().to(generate_badge::<G>))
                .route("/risk-icon/{level}", web::get().to(risk_icon::<G>))
                .route("/parent-guidance", web::post().to(parent_guidance::<G>))
                .route("/batch-predict", web::post().to(batch_predict::<G>))
                .route("/batch-predict/csv", web::post().to(batch_predict_csv::<G>)),
        );
}
