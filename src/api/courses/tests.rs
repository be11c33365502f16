use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn anonymous_requests_are_rejected() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/v1/courses", None, None))
        .await
        .expect("list courses");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_cannot_create_course() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/courses",
            Some(&token),
            Some(json!({
                "title": "Curso Proibido",
                "duration_hours": 10,
                "min_grade": 70
            })),
        ))
        .await
        .expect("create course as student");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_creates_and_updates_course() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::admin_token(ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/courses",
            Some(&token),
            Some(json!({
                "title": "Ecologia de Manguezais",
                "description": "Curso introdutório",
                "duration_hours": 20,
                "min_grade": 70
            })),
        ))
        .await
        .expect("create course");

    let status = response.status();
    let created = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {created}");
    assert_eq!(created["min_grade"], 70);
    assert_eq!(created["is_active"], true);
    let course_id = created["id"].as_str().expect("course id").to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PATCH,
            &format!("/api/v1/courses/{course_id}"),
            Some(&token),
            Some(json!({"title": "Ecologia de Manguezais II", "min_grade": 80})),
        ))
        .await
        .expect("update course");

    let status = response.status();
    let updated = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {updated}");
    assert_eq!(updated["title"], "Ecologia de Manguezais II");
    assert_eq!(updated["min_grade"], 80);
    assert!(updated["updated_at"].is_string());
}

#[tokio::test]
async fn empty_course_title_is_rejected() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::admin_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/courses",
            Some(&token),
            Some(json!({"title": "   ", "duration_hours": 5, "min_grade": 60})),
        ))
        .await
        .expect("create course");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn students_see_only_active_courses() {
    let ctx = test_support::setup_test_context().await;
    let admin_token = test_support::admin_token(ctx.state.settings());
    let student_token = test_support::student_token(ctx.state.settings());

    let visible = test_support::insert_course(&ctx.state, "Curso Ativo", 70).await;
    let hidden = test_support::insert_course(&ctx.state, "Curso Suspenso", 70).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PATCH,
            &format!("/api/v1/courses/{}", hidden.id),
            Some(&admin_token),
            Some(json!({"is_active": false})),
        ))
        .await
        .expect("deactivate course");
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/courses",
            Some(&student_token),
            None,
        ))
        .await
        .expect("list as student");
    let listed = test_support::read_json(response).await;
    let ids: Vec<&str> =
        listed.as_array().unwrap().iter().map(|row| row["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&visible.id.as_str()));
    assert!(!ids.contains(&hidden.id.as_str()));

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/courses",
            Some(&admin_token),
            None,
        ))
        .await
        .expect("list as admin");
    let listed = test_support::read_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn course_delete_cascades_to_dependents() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::admin_token(ctx.state.settings());

    let course = test_support::insert_course(&ctx.state, "Curso Descartado", 70).await;
    let module = test_support::insert_module(&ctx.state, &course.id, "Módulo Único").await;
    let video = test_support::insert_video(&ctx.state, &module.id, "Aula 1").await;
    test_support::insert_exercise(&ctx.state, &module.id, "Avaliação", 30).await;

    ctx.state
        .engine()
        .enroll_student(test_support::STUDENT_ID, &course.id)
        .await
        .expect("enroll");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/courses/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("delete course");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let snapshot = ctx.state.engine().snapshot().await;
    assert!(snapshot.courses.is_empty());
    assert!(snapshot.modules.is_empty());
    assert!(snapshot.videos.iter().all(|row| row.id != video.id));
    assert!(snapshot.exercises.is_empty());
    assert!(snapshot.enrollments.is_empty());
    assert!(snapshot.progress.is_empty());
}

#[tokio::test]
async fn module_listing_orders_by_position() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let course = test_support::insert_course(&ctx.state, "Curso Ordenado", 70).await;
    for (title, order) in [("Terceiro", 3), ("Primeiro", 1), ("Segundo", 2)] {
        ctx.state
            .engine()
            .add_module(crate::schemas::course::ModuleCreate {
                course_id: course.id.clone(),
                title: title.to_string(),
                description: None,
                order,
            })
            .await
            .expect("add module");
    }

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/courses/{}/modules", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("list modules");

    let listed = test_support::read_json(response).await;
    let titles: Vec<&str> =
        listed.as_array().unwrap().iter().map(|row| row["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Primeiro", "Segundo", "Terceiro"]);
}
