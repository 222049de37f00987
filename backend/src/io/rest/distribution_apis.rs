//! # REST API for Revenue Distributions
//!
//! Endpoints for building distributions and reading persisted records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tracing::{error, info, warn};

use crate::domain::DistributionError;
use crate::io::rest::mappers::distribution_mapper::DistributionMapper;
use crate::AppState;
use shared::{BuildDistributionRequest, DistributionListRequest, DistributionListResponse};

/// Create a router for distribution related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_distributions))
        .route("/build", post(build_distribution))
        .route("/:name", get(get_distribution))
}

/// Map a service error to a response: validation failures are the caller's
/// fault, everything else is a store failure.
fn error_response(context: &str, e: anyhow::Error) -> Response {
    if let Some(validation) = e.downcast_ref::<DistributionError>() {
        warn!("{}: {}", context, validation);
        return (StatusCode::BAD_REQUEST, validation.to_string()).into_response();
    }
    error!("{}: {:#}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, context.to_string()).into_response()
}

/// Build or rebuild the distribution of a department for a month
pub async fn build_distribution(
    State(state): State<AppState>,
    Json(request): Json<BuildDistributionRequest>,
) -> impl IntoResponse {
    info!("POST /api/distributions/build - request: {:?}", request);

    let command = DistributionMapper::to_command(request);
    match state.distribution_service.build_department_distribution(command).await {
        Ok(result) => (StatusCode::OK, Json(DistributionMapper::to_summary_dto(result))).into_response(),
        Err(e) => error_response("Failed to build distribution", e),
    }
}

/// List distribution summaries, optionally filtered by department and month
pub async fn list_distributions(
    State(state): State<AppState>,
    Query(request): Query<DistributionListRequest>,
) -> impl IntoResponse {
    info!("GET /api/distributions - query: {:?}", request);

    let query = match DistributionMapper::to_list_query(request) {
        Ok(query) => query,
        Err(e) => return error_response("Invalid month filter", DistributionError::from(e).into()),
    };

    match state.distribution_service.list_distributions(query).await {
        Ok(result) => {
            let response = DistributionListResponse {
                distributions: result
                    .distributions
                    .into_iter()
                    .map(DistributionMapper::to_summary_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to list distributions", e),
    }
}

/// Get one distribution record with its line items
pub async fn get_distribution(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/distributions/{}", name);

    match state.distribution_service.get_distribution(&name).await {
        Ok(Some(distribution)) => {
            (StatusCode::OK, Json(DistributionMapper::to_record_dto(distribution))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Distribution not found").into_response(),
        Err(e) => error_response("Failed to get distribution", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AttendanceRecord, AttendanceStatus, CostCenter, DocStatus, Employee, EmployeeStatus,
        SalesInvoice, ShiftAssignment,
    };
    use crate::storage::{
        AttendanceRepository, DbConnection, EmployeeRepository, RevenueRepository, ShiftRepository,
    };
    use crate::{config::DistributionConfig, create_router, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::NaiveDate;
    use shared::{DistributionRecord, DistributionSummary};
    use tower::ServiceExt;

    async fn create_test_app_state() -> (AppState, DbConnection) {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let app_state = AppState::new(&db, DistributionConfig::default());
        (app_state, db)
    }

    /// Cardiology, October 2025: revenue 100,000; EMP-A 20 days + 4 shifts, EMP-B 10 days
    async fn seed_cardiology(db: &DbConnection) {
        let revenue = RevenueRepository::new(db.clone());
        revenue
            .store_cost_center(&CostCenter {
                name: "Cardiology - HC".to_string(),
                department: "Cardiology".to_string(),
            })
            .await
            .unwrap();
        revenue
            .store_sales_invoice(&SalesInvoice {
                name: "SINV-0001".to_string(),
                cost_center: "Cardiology - HC".to_string(),
                posting_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
                grand_total: 100_000.0,
                docstatus: DocStatus::Submitted,
            })
            .await
            .unwrap();

        let employees = EmployeeRepository::new(db.clone());
        let attendance = AttendanceRepository::new(db.clone());
        let shifts = ShiftRepository::new(db.clone());
        for (name, days, shift_count) in [("EMP-A", 20u32, 4u32), ("EMP-B", 10, 0)] {
            employees
                .store_employee(&Employee {
                    name: name.to_string(),
                    employee_name: name.to_string(),
                    department: "Cardiology".to_string(),
                    status: EmployeeStatus::Active,
                })
                .await
                .unwrap();
            for day in 1..=days {
                attendance
                    .store_attendance(&AttendanceRecord {
                        name: format!("ATT-{}-{}", name, day),
                        employee: name.to_string(),
                        attendance_date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
                        status: AttendanceStatus::Present,
                    })
                    .await
                    .unwrap();
            }
            for shift in 1..=shift_count {
                shifts
                    .store_shift_assignment(&ShiftAssignment {
                        name: format!("SA-{}-{}", name, shift),
                        employee: name.to_string(),
                        shift_type: "Night".to_string(),
                        start_date: NaiveDate::from_ymd_opt(2025, 10, shift * 5).unwrap(),
                        end_date: None,
                    })
                    .await
                    .unwrap();
            }
        }
    }

    fn build_request(department: &str, month: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/distributions/build")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&BuildDistributionRequest {
                    department: department.to_string(),
                    month: month.to_string(),
                })
                .unwrap(),
            ))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_build_distribution_endpoint() {
        let (app_state, db) = create_test_app_state().await;
        seed_cardiology(&db).await;
        let app = create_router(app_state);

        let response = app.oneshot(build_request("Cardiology", "2025-10")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let summary: DistributionSummary = body_json(response).await;
        assert_eq!(summary.name, "distribution::Cardiology::2025-10");
        assert_eq!(summary.total_department_revenue, 100_000.0);
        assert_eq!(summary.allocated_pool, 30_000.0);
    }

    #[tokio::test]
    async fn test_build_then_get_record() {
        let (app_state, db) = create_test_app_state().await;
        seed_cardiology(&db).await;
        let app = create_router(app_state);

        let response = app.clone().oneshot(build_request("Cardiology", "2025-10")).await.unwrap();
        let summary: DistributionSummary = body_json(response).await;

        let response = app
            .oneshot(get_request(&format!("/api/distributions/{}", summary.name)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let record: DistributionRecord = body_json(response).await;
        assert_eq!(record.department, "Cardiology");
        assert_eq!(record.fiscal_month, "2025-10");
        assert_eq!(record.items.len(), 2);
        assert_eq!(record.items[0].employee, "EMP-A");
        assert_eq!(record.items[0].present_days, 20);
        assert_eq!(record.items[0].shifts_count, 4);
        assert_eq!(record.items[0].final_share, 20_625.0);
        assert_eq!(record.items[1].employee, "EMP-B");
        assert_eq!(record.items[1].final_share, 9_375.0);
        assert_eq!(record.total_final_share(), 30_000.0);
    }

    #[tokio::test]
    async fn test_build_with_invalid_month_is_bad_request() {
        let (app_state, _db) = create_test_app_state().await;
        let app = create_router(app_state);

        let response = app.oneshot(build_request("Cardiology", "2025-13")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_build_with_empty_department_is_bad_request() {
        let (app_state, _db) = create_test_app_state().await;
        let app = create_router(app_state);

        let response = app.oneshot(build_request("", "2025-10")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_distribution_is_not_found() {
        let (app_state, _db) = create_test_app_state().await;
        let app = create_router(app_state);

        let response = app
            .oneshot(get_request("/api/distributions/distribution::Nowhere::2025-10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_distributions_endpoint() {
        let (app_state, db) = create_test_app_state().await;
        seed_cardiology(&db).await;
        let app = create_router(app_state);

        for month in ["2025-09", "2025-10"] {
            let response = app.clone().oneshot(build_request("Cardiology", month)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(get_request("/api/distributions?department=Cardiology"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: DistributionListResponse = body_json(response).await;
        let names: Vec<&str> = listed.distributions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["distribution::Cardiology::2025-10", "distribution::Cardiology::2025-09"]
        );
        // No September revenue was seeded
        assert_eq!(listed.distributions[1].allocated_pool, 0.0);

        let response = app
            .clone()
            .oneshot(get_request("/api/distributions?month=2025-10"))
            .await
            .unwrap();
        let listed: DistributionListResponse = body_json(response).await;
        assert_eq!(listed.distributions.len(), 1);

        let response = app
            .oneshot(get_request("/api/distributions?month=October"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_filters_are_trimmed_and_blank_ones_ignored() {
        let (app_state, db) = create_test_app_state().await;
        seed_cardiology(&db).await;
        let app = create_router(app_state);

        let response = app.clone().oneshot(build_request(" Cardiology ", "2025-10")).await.unwrap();
        let summary: DistributionSummary = body_json(response).await;
        assert_eq!(summary.name, "distribution::Cardiology::2025-10");

        for uri in [
            "/api/distributions?department=%20Cardiology%20",
            "/api/distributions?department=",
            "/api/distributions?month=",
            "/api/distributions?department=&month=",
            "/api/distributions?department=%20&month=%202025-10%20",
        ] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
            let listed: DistributionListResponse = body_json(response).await;
            assert_eq!(listed.distributions.len(), 1, "uri {}", uri);
            assert_eq!(listed.distributions[0].name, summary.name);
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app_state, _db) = create_test_app_state().await;
        let app = create_router(app_state);

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health: shared::HealthResponse = body_json(response).await;
        assert_eq!(health.status, "ok");
    }
}
