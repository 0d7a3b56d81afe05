pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analyze::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/job_roles/", get(handlers::handle_job_roles))
        .route("/job_roles", get(handlers::handle_job_roles))
        // Web clients post to `/analyze` without the trailing slash
        .route("/analyze/", post(handlers::handle_analyze))
        .route("/analyze", post(handlers::handle_analyze))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{test_state, RESUME_PDF};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-RESUME-TEST-BOUNDARY";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume.pdf\"\r\n\
                             Content-Type: application/pdf\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_analyze(app: Router, path: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        send(app, request).await
    }

    async fn get_json(app: Router, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        send(app, request).await
    }

    fn app_with_roles(roles: &[(&str, &str)]) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        for (role, text) in roles {
            std::fs::write(dir.path().join(format!("{role}.txt")), text).unwrap();
        }
        let app = build_router(test_state(dir.path()));
        (dir, app)
    }

    #[tokio::test]
    async fn test_root_welcome() {
        let (_dir, app) = app_with_roles(&[]);
        let (status, body) = get_json(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to the Resume Fast API");
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, app) = app_with_roles(&[]);
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_job_roles_lists_txt_files_dynamically() {
        let (dir, app) = app_with_roles(&[("data_scientist", "x"), ("devops", "y")]);
        std::fs::write(dir.path().join("README.md"), "not a role").unwrap();

        let (status, body) = get_json(app.clone(), "/job_roles/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["data_scientist", "devops"]));

        std::fs::write(dir.path().join("frontend.txt"), "z").unwrap();
        let (_, body) = get_json(app, "/job_roles/").await;
        assert_eq!(body, serde_json::json!(["data_scientist", "devops", "frontend"]));
    }

    #[tokio::test]
    async fn test_bogus_method_is_rejected_regardless_of_other_fields() {
        let (_dir, app) = app_with_roles(&[("devops", "docker")]);
        let (status, body) = post_analyze(
            app,
            "/analyze/",
            &[
                Part::Text("method", "bogus"),
                Part::Text("job_role", "devops"),
                Part::Text("job_description", "anything"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_METHOD");
        assert_eq!(
            body["error"],
            "Invalid method. Choose either 'tfidf' or 'semantic'."
        );
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let (_dir, app) = app_with_roles(&[("devops", "docker")]);
        let (status, body) = post_analyze(
            app,
            "/analyze/",
            &[
                Part::File("file", b""),
                Part::Text("method", "tfidf"),
                Part::Text("job_role", "devops"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File is empty or not provided");
    }

    #[tokio::test]
    async fn test_tfidf_without_role_is_structured_error() {
        let (_dir, app) = app_with_roles(&[]);
        let (status, body) = post_analyze(
            app,
            "/analyze/",
            &[Part::File("file", b"%PDF-1.4"), Part::Text("method", "tfidf")],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"], "Job role is required for TF-IDF method");
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn test_semantic_without_description_is_structured_error() {
        let (_dir, app) = app_with_roles(&[]);
        let (status, body) = post_analyze(
            app,
            "/analyze",
            &[
                Part::File("file", b"%PDF-1.4"),
                Part::Text("method", "semantic"),
                Part::Text("job_description", "   "),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Job description is required for semantic analysis"
        );
    }

    #[tokio::test]
    async fn test_unknown_role_is_not_found() {
        let (_dir, app) = app_with_roles(&[("devops", "docker")]);
        let (status, body) = post_analyze(
            app,
            "/analyze/",
            &[
                Part::File("file", b"%PDF-1.4"),
                Part::Text("method", "tfidf"),
                Part::Text("job_role", "astronaut"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ROLE_NOT_FOUND");
        assert!(body["error"].as_str().unwrap().contains("astronaut"));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_unprocessable() {
        let (_dir, app) = app_with_roles(&[("devops", "docker kubernetes")]);
        let (status, body) = post_analyze(
            app,
            "/analyze/",
            &[
                Part::File("file", b"this is not a pdf document"),
                Part::Text("method", "tfidf"),
                Part::Text("job_role", "devops"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_tfidf_analysis_success() {
        let (_dir, app) = app_with_roles(&[(
            "backend",
            "Backend engineer with Python, SQL, Docker and Kubernetes. Builds REST APIs.",
        )]);
        let (status, body) = post_analyze(
            app,
            "/analyze/",
            &[
                Part::File("file", RESUME_PDF),
                Part::Text("method", "tfidf"),
                Part::Text("job_role", "backend"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["method"], "tfidf");
        let result = &body["result"];
        let score = result["score"].as_f64().unwrap();
        assert!(score > 0.0 && score <= 100.0, "score {score}");

        let matched = result["matched"].as_array().unwrap();
        for word in ["python", "sql", "docker", "rest", "apis"] {
            assert!(matched.contains(&Value::from(word)), "{word} not matched: {matched:?}");
        }
        let missing = result["missing"].as_array().unwrap();
        assert!(missing.contains(&Value::from("kubernetes")));
        assert!(result["remark"].as_str().unwrap().contains("Missing Keywords:"));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_semantic_analysis_success() {
        let (_dir, app) = app_with_roles(&[]);
        let (status, body) = post_analyze(
            app,
            "/analyze",
            &[
                Part::File("file", RESUME_PDF),
                Part::Text("method", "semantic"),
                Part::Text("job_description", "Python engineer with TensorFlow and AWS."),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["method"], "semantic");
        assert_eq!(body["result"]["matched"], serde_json::json!(["AWS", "Python"]));
        assert_eq!(body["result"]["missing"], serde_json::json!(["TensorFlow"]));
        assert!(body["result"]["score"].is_number());
        assert!(body["result"]["remark"]
            .as_str()
            .unwrap()
            .contains("Missing skills: TensorFlow"));
    }
}
