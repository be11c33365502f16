use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::store::seed::SEED_COURSE_ID;
use crate::test_support;

#[tokio::test]
async fn seeding_twice_does_not_duplicate_rows() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::admin_token(ctx.state.settings());

    for _ in 0..2 {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/v1/admin/seed",
                Some(&token),
                None,
            ))
            .await
            .expect("seed");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let snapshot = ctx.state.engine().snapshot().await;
    assert_eq!(snapshot.courses.len(), 1);
    assert_eq!(snapshot.courses[0].id, SEED_COURSE_ID);
    assert_eq!(snapshot.modules.len(), 3);
    assert_eq!(snapshot.videos.len(), 3);
    assert_eq!(snapshot.pdfs.len(), 2);
    assert_eq!(snapshot.exercises.len(), 1);
    assert!(!snapshot.settings.professor_name.is_empty());
}

#[tokio::test]
async fn seeding_requires_admin() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/admin/seed",
            Some(&token),
            None,
        ))
        .await
        .expect("seed as student");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
