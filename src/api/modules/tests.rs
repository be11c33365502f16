use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn module_delete_prunes_progress_and_grades() {
    let ctx = test_support::setup_test_context().await;
    let admin_token = test_support::admin_token(ctx.state.settings());
    let student_token = test_support::student_token(ctx.state.settings());

    let course = test_support::insert_course(&ctx.state, "Curso Modular", 70).await;
    let graded = test_support::insert_module(&ctx.state, &course.id, "Módulo Avaliado").await;
    let watched = test_support::insert_module(&ctx.state, &course.id, "Módulo de Vídeos").await;
    let exercise = test_support::insert_exercise(&ctx.state, &graded.id, "Quiz", 30).await;
    test_support::insert_video(&ctx.state, &watched.id, "Aula 1").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments",
            Some(&student_token),
            Some(json!({"course_id": course.id})),
        ))
        .await
        .expect("enroll");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grades",
            Some(&student_token),
            Some(json!({"exercise_id": exercise.id, "score": 21, "total_points": 30})),
        ))
        .await
        .expect("submit grade");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/modules/{}", graded.id),
            Some(&admin_token),
            None,
        ))
        .await
        .expect("delete module");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    {
        let snapshot = ctx.state.engine().snapshot().await;
        assert!(snapshot.exercises.is_empty());
        assert!(snapshot.grades.is_empty());
        assert_eq!(snapshot.progress.len(), 1);
        assert_eq!(snapshot.progress[0].module_id, watched.id);
    }

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/courses/{}/progress", course.id),
            Some(&student_token),
            None,
        ))
        .await
        .expect("progress summary");
    let summary = test_support::read_json(response).await;
    assert_eq!(summary["average_grade"], 0);
    assert_eq!(summary["progress_percent"], 0);
}

#[tokio::test]
async fn deleting_unknown_module_is_404() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::admin_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::DELETE,
            "/api/v1/modules/missing",
            Some(&token),
            None,
        ))
        .await
        .expect("delete missing");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
