use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::models::plan::{PlanResponse, PlanSubmission};
use crate::routes::page::{self, PageView};
use crate::services::itinerary_planner_service::ItineraryPlanner;

fn is_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

fn html(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/*
    GET /
*/
pub async fn index() -> impl Responder {
    html(
        actix_web::http::StatusCode::OK,
        page::render(&PageView::default()),
    )
}

/*
    POST /generate-plan
*/
pub async fn generate_plan(
    req: HttpRequest,
    body: web::Bytes,
    planner: web::Data<ItineraryPlanner>,
) -> impl Responder {
    let json_client = is_json(&req);

    let submission = if json_client {
        match serde_json::from_slice::<PlanSubmission>(&body) {
            Ok(submission) => submission,
            Err(err) => {
                log::warn!("Rejected plan request body: {}", err);
                return HttpResponse::BadRequest()
                    .json(json!({"error": format!("invalid request body: {}", err)}));
            }
        }
    } else {
        PlanSubmission::from_form(&body)
    };

    let request = match submission.into_request() {
        Ok(request) => request,
        Err(message) => {
            return if json_client {
                HttpResponse::BadRequest().json(json!({ "error": message }))
            } else {
                html(
                    actix_web::http::StatusCode::BAD_REQUEST,
                    page::render(&PageView {
                        error: Some(message.as_str()),
                        ..Default::default()
                    }),
                )
            };
        }
    };

    match planner.plan(&request).await {
        Ok(outcome) => {
            if json_client {
                HttpResponse::Ok().json(PlanResponse {
                    plan: outcome.plan_html,
                    places: outcome.places,
                })
            } else {
                html(
                    actix_web::http::StatusCode::OK,
                    page::render(&PageView {
                        plan_html: Some(outcome.plan_html.as_str()),
                        city: Some(request.city.as_str()),
                        places: &outcome.places,
                        error: None,
                    }),
                )
            }
        }
        Err(err) => {
            log::error!("Plan generation failed for {}: {}", request.city, err);
            if json_client {
                HttpResponse::BadGateway().json(json!({"error": "plan generation failed"}))
            } else {
                html(
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    page::render(&PageView {
                        city: Some(request.city.as_str()),
                        error: Some("Plan generation failed. Please try again."),
                        ..Default::default()
                    }),
                )
            }
        }
    }
}
