use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn enrollment_is_idempotent() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let course = test_support::insert_course(&ctx.state, "Curso Base", 70).await;
    let module = test_support::insert_module(&ctx.state, &course.id, "Módulo 1").await;
    test_support::insert_video(&ctx.state, &module.id, "Aula 1").await;
    test_support::insert_exercise(&ctx.state, &module.id, "Avaliação", 30).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments",
            Some(&token),
            Some(json!({"course_id": course.id})),
        ))
        .await
        .expect("enroll");
    let status = response.status();
    let first = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {first}");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments",
            Some(&token),
            Some(json!({"course_id": course.id})),
        ))
        .await
        .expect("enroll again");
    let second = test_support::read_json(response).await;
    assert_eq!(first["id"], second["id"]);

    let snapshot = ctx.state.engine().snapshot().await;
    assert_eq!(snapshot.enrollments.len(), 1);
    // one row per video and exercise, not duplicated by the second enroll
    assert_eq!(snapshot.progress.len(), 2);
}

#[tokio::test]
async fn enrolling_in_unknown_course_is_404() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments",
            Some(&token),
            Some(json!({"course_id": "missing"})),
        ))
        .await
        .expect("enroll");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn marking_content_complete_moves_progress() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let course = test_support::insert_course(&ctx.state, "Curso Progresso", 70).await;
    let module = test_support::insert_module(&ctx.state, &course.id, "Módulo 1").await;
    let video = test_support::insert_video(&ctx.state, &module.id, "Aula 1").await;
    test_support::insert_exercise(&ctx.state, &module.id, "Avaliação", 30).await;

    ctx.state
        .engine()
        .enroll_student(test_support::STUDENT_ID, &course.id)
        .await
        .expect("enroll");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/courses/{}/progress", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("summary before");
    let summary = test_support::read_json(response).await;
    assert_eq!(summary["progress_percent"], 0);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments/complete",
            Some(&token),
            Some(json!({"content_id": video.id})),
        ))
        .await
        .expect("complete video");
    let status = response.status();
    let progress = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {progress}");
    assert_eq!(progress["completed"], true);
    assert!(progress["completed_at"].is_string());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/courses/{}/progress", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("summary after");
    let summary = test_support::read_json(response).await;
    assert_eq!(summary["progress_percent"], 50);
}

#[tokio::test]
async fn completing_untracked_content_is_404() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments/complete",
            Some(&token),
            Some(json!({"content_id": "not-tracked"})),
        ))
        .await
        .expect("complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
