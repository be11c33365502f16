use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn update_merges_only_supplied_fields() {
    let ctx = test_support::setup_test_context().await;
    let admin_token = test_support::admin_token(ctx.state.settings());
    let student_token = test_support::student_token(ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/settings",
            Some(&admin_token),
            Some(json!({
                "professor_name": "Profa. Yara Souza",
                "institution_name": "Instituto Costeiro"
            })),
        ))
        .await
        .expect("first update");
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/settings",
            Some(&admin_token),
            Some(json!({"certificate_header": "Certificado de Conclusão"})),
        ))
        .await
        .expect("second update");
    let updated = test_support::read_json(response).await;
    assert_eq!(updated["professor_name"], "Profa. Yara Souza");
    assert_eq!(updated["institution_name"], "Instituto Costeiro");
    assert_eq!(updated["certificate_header"], "Certificado de Conclusão");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/settings",
            Some(&student_token),
            None,
        ))
        .await
        .expect("read as student");
    let seen = test_support::read_json(response).await;
    assert_eq!(seen["professor_name"], "Profa. Yara Souza");
}

#[tokio::test]
async fn non_admin_cannot_update_settings() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/settings",
            Some(&token),
            Some(json!({"professor_name": "Invasor"})),
        ))
        .await
        .expect("update as student");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
