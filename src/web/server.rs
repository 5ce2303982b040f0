// ============================================================
// Layer 1 — HTTP Server (actix-web)
// ============================================================
// Routes:
//
//   GET  /             empty form with dropdown suggestions
//   POST /             form → prediction, rendered into the page
//   POST /api/predict  JSON PredictionRequest → {prediction, run_id}
//   GET  /api/model    run id, class labels, feature columns
//
// All handlers share one read-only AppState. A FeatureMismatch is
// the client's fault (400); anything else is logged and is a 500.
// No request can take the process down.

use std::sync::Arc;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    get, http::StatusCode, middleware::Logger, post, web, App, HttpRequest, HttpResponse,
    HttpServer,
};
use serde::Serialize;

use crate::data::dropdown::DropdownOptions;
use crate::domain::error::PredictorError;
use crate::domain::prediction::{PredictionForm, PredictionRequest, PredictionResponse};
use crate::ml::inferencer::LoadedModel;
use crate::web::pages::{PageRenderer, PageView};

#[derive(Clone)]
pub struct AppState {
    pub model:   Arc<LoadedModel>,
    pub options: Arc<DropdownOptions>,
    pub pages:   Arc<PageRenderer>,
}

#[derive(Debug, Serialize)]
struct PredictBody<'a> {
    prediction: &'a str,
    run_id:     &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// ─── HTML ────────────────────────────────────────────────────────────────────

#[get("/")]
async fn index(state: web::Data<AppState>) -> HttpResponse {
    render(&state, StatusCode::OK, &PageView::default())
}

#[post("/")]
async fn submit(state: web::Data<AppState>, form: web::Form<PredictionForm>) -> HttpResponse {
    let form    = form.into_inner();
    let outcome = PredictionRequest::try_from(form.clone()).and_then(|req| state.model.predict(&req));

    match outcome {
        Ok(prediction) => {
            let view = PageView { form: Some(&form), prediction: Some(&prediction), error: None };
            render(&state, StatusCode::OK, &view)
        }
        Err(e) => {
            let (status, message) = classify(&e);
            let view = PageView { form: Some(&form), prediction: None, error: Some(message.as_str()) };
            render(&state, status, &view)
        }
    }
}

fn render(state: &AppState, status: StatusCode, view: &PageView<'_>) -> HttpResponse {
    match state.pages.render_index(&state.options, &state.model.run_id, view) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!("Cannot render page: {e}");
            HttpResponse::InternalServerError().body("internal error")
        }
    }
}

// ─── JSON API ────────────────────────────────────────────────────────────────

#[post("/api/predict")]
async fn api_predict(
    state:   web::Data<AppState>,
    request: web::Json<PredictionRequest>,
) -> HttpResponse {
    match state.model.predict(&request) {
        Ok(PredictionResponse::Label(label)) => HttpResponse::Ok().json(PredictBody {
            prediction: &label,
            run_id:     &state.model.run_id,
        }),
        Ok(PredictionResponse::Pending) => HttpResponse::InternalServerError().json(ErrorBody {
            error: "no prediction produced".into(),
        }),
        Err(e) => {
            let (status, message) = classify(&e);
            HttpResponse::build(status).json(ErrorBody { error: message })
        }
    }
}

#[get("/api/model")]
async fn api_model(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.model.summary())
}

/// Status code and user-facing message for a per-request failure.
fn classify(e: &PredictorError) -> (StatusCode, String) {
    if e.is_client_error() {
        tracing::debug!("Rejected request: {e}");
        (StatusCode::BAD_REQUEST, e.to_string())
    } else {
        tracing::error!("Prediction failed: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error, see server log".to_string())
    }
}

/// JSON bodies that do not fit `PredictionRequest` get the same
/// error shape as a failed prediction.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = match &err {
        JsonPayloadError::Deserialize(e) => e.to_string(),
        other                            => other.to_string(),
    };
    let (status, message) = classify(&PredictorError::FeatureMismatch(detail));
    let response = HttpResponse::build(status).json(ErrorBody { error: message });
    InternalError::from_response(err, response).into()
}

// ─── Wiring ──────────────────────────────────────────────────────────────────

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(index)
        .service(submit)
        .service(api_predict)
        .service(api_model);
}

pub async fn run_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    tracing::info!("Serving run {} on http://{}:{}", state.model.run_id, host, port);
    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    use crate::domain::label_mapping::LabelMapping;
    use crate::ml::features::FeatureRow;
    use crate::ml::pipeline::{Pipeline, TreeParams};

    fn state(labels: &[&str]) -> AppState {
        let rows: Vec<FeatureRow> = [
            ("Inter Miami", "Argentina", 38),
            ("Inter Miami", "Argentina", 39),
            ("Liverpool", "Egypt", 32),
            ("Liverpool", "Egypt", 31),
        ]
        .iter()
        .map(|&(c, n, a)| FeatureRow::from(&PredictionRequest::new(c, n, a)))
        .collect();
        let pipeline = Pipeline::fit(&rows, &[0, 0, 1, 1], 2, &TreeParams::default()).unwrap();

        AppState {
            model: Arc::new(LoadedModel {
                run_id:   "run-abc".into(),
                pipeline,
                labels:   LabelMapping::from_classes(labels.iter().map(|s| s.to_string()).collect()),
            }),
            options: Arc::new(DropdownOptions {
                clubs:          vec!["Inter Miami".into(), "Liverpool".into()],
                national_teams: vec!["Argentina".into(), "Egypt".into()],
            }),
            pages: Arc::new(PageRenderer::new().unwrap()),
        }
    }

    fn app_state() -> AppState {
        state(&["Lionel Messi", "Mohamed Salah"])
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data(web::Data::new($state)).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn test_get_renders_empty_form() {
        let app  = app!(app_state());
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(r#"<option value="Liverpool">"#));
        assert!(!body.contains("probably"));
    }

    #[actix_web::test]
    async fn test_post_form_renders_prediction() {
        let app = app!(app_state());
        let req = test::TestRequest::post()
            .uri("/")
            .set_form([("club", "Liverpool"), ("national_team", "Egypt"), ("age", "32")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("<strong>Mohamed Salah</strong>"));
    }

    #[actix_web::test]
    async fn test_non_numeric_age_is_bad_request() {
        let app = app!(app_state());
        let req = test::TestRequest::post()
            .uri("/")
            .set_form([("club", "Liverpool"), ("national_team", "Egypt"), ("age", "old")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("age must be an integer"));
    }

    #[actix_web::test]
    async fn test_api_predict_returns_label_and_run() {
        let app = app!(app_state());
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(PredictionRequest::new("Liverpool", "Egypt", 32))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["prediction"], "Mohamed Salah");
        assert_eq!(body["run_id"], "run-abc");
    }

    #[actix_web::test]
    async fn test_api_non_numeric_age_is_feature_mismatch() {
        let app = app!(app_state());
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(serde_json::json!({
                "club": "Liverpool",
                "national_team": "Egypt",
                "age": "not-a-number",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("feature mismatch"));
    }

    #[actix_web::test]
    async fn test_undecodable_class_is_server_error() {
        let app = app!(state(&["Lionel Messi"]));
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(PredictionRequest::new("Liverpool", "Egypt", 32))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_api_model_summary() {
        let app = app!(app_state());
        let req = test::TestRequest::get().uri("/api/model").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["run_id"], "run-abc");
        assert_eq!(body["classes"].as_array().unwrap().len(), 2);
        assert_eq!(body["feature_columns"][0], "club");
    }
}
