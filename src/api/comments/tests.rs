use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

async fn setup_video(ctx: &test_support::TestContext) -> String {
    let course = test_support::insert_course(&ctx.state, "Curso Comentado", 70).await;
    let module = test_support::insert_module(&ctx.state, &course.id, "Módulo 1").await;
    test_support::insert_video(&ctx.state, &module.id, "Aula 1").await.id
}

#[tokio::test]
async fn listing_puts_pinned_first_then_newest() {
    let ctx = test_support::setup_test_context().await;
    let student_token = test_support::student_token(ctx.state.settings());
    let admin_token = test_support::admin_token(ctx.state.settings());
    let video_id = setup_video(&ctx).await;

    let mut ids = Vec::new();
    for text in ["primeiro", "segundo", "terceiro"] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/v1/comments",
                Some(&student_token),
                Some(json!({
                    "content_id": video_id,
                    "content_type": "video",
                    "text": text
                })),
            ))
            .await
            .expect("create comment");
        let created = test_support::read_json(response).await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/v1/comments/{}/pin", ids[0]),
            Some(&admin_token),
            Some(json!({"is_pinned": true})),
        ))
        .await
        .expect("pin oldest");
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/comments?content_id={video_id}&content_type=video"),
            Some(&student_token),
            None,
        ))
        .await
        .expect("list comments");
    let listed = test_support::read_json(response).await;
    let texts: Vec<&str> =
        listed.as_array().unwrap().iter().map(|row| row["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["primeiro", "terceiro", "segundo"]);
}

#[tokio::test]
async fn reply_notifies_the_original_author() {
    let ctx = test_support::setup_test_context().await;
    let student_token = test_support::student_token(ctx.state.settings());
    let admin_token = test_support::admin_token(ctx.state.settings());
    let video_id = setup_video(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&student_token),
            Some(json!({
                "content_id": video_id,
                "content_type": "video",
                "text": "Tenho uma dúvida sobre a aula"
            })),
        ))
        .await
        .expect("create comment");
    let comment = test_support::read_json(response).await;
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&admin_token),
            Some(json!({
                "content_id": video_id,
                "content_type": "video",
                "text": "Boa pergunta, segue a resposta",
                "parent_id": comment_id
            })),
        ))
        .await
        .expect("reply");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/comments/{comment_id}/replies"),
            Some(&student_token),
            None,
        ))
        .await
        .expect("replies");
    let replies = test_support::read_json(response).await;
    assert_eq!(replies.as_array().unwrap().len(), 1);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/notifications",
            Some(&student_token),
            None,
        ))
        .await
        .expect("notifications");
    let unread = test_support::read_json(response).await;
    let rows = unread.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "reply");
}

#[tokio::test]
async fn replies_to_replies_are_rejected() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());
    let video_id = setup_video(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&token),
            Some(json!({"content_id": video_id, "content_type": "video", "text": "raiz"})),
        ))
        .await
        .expect("create root");
    let root = test_support::read_json(response).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&token),
            Some(json!({
                "content_id": video_id,
                "content_type": "video",
                "text": "resposta",
                "parent_id": root["id"]
            })),
        ))
        .await
        .expect("reply");
    let reply = test_support::read_json(response).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&token),
            Some(json!({
                "content_id": video_id,
                "content_type": "video",
                "text": "resposta da resposta",
                "parent_id": reply["id"]
            })),
        ))
        .await
        .expect("nested reply");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_author_or_admin_may_edit() {
    let ctx = test_support::setup_test_context().await;
    let author_token = test_support::student_token(ctx.state.settings());
    let other_token = test_support::bearer_token(
        "student-2",
        "Outro Aluno",
        crate::domain::types::UserRole::Student,
        ctx.state.settings(),
    );
    let admin_token = test_support::admin_token(ctx.state.settings());
    let video_id = setup_video(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&author_token),
            Some(json!({"content_id": video_id, "content_type": "video", "text": "original"})),
        ))
        .await
        .expect("create comment");
    let comment = test_support::read_json(response).await;
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PATCH,
            &format!("/api/v1/comments/{comment_id}"),
            Some(&other_token),
            Some(json!({"text": "alterado por terceiro"})),
        ))
        .await
        .expect("edit as other");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PATCH,
            &format!("/api/v1/comments/{comment_id}"),
            Some(&author_token),
            Some(json!({"text": "editado pelo autor"})),
        ))
        .await
        .expect("edit as author");
    let status = response.status();
    let edited = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {edited}");
    assert_eq!(edited["text"], "editado pelo autor");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/comments/{comment_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .expect("delete as admin");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn deleting_a_comment_takes_its_replies() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::student_token(ctx.state.settings());
    let video_id = setup_video(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&token),
            Some(json!({"content_id": video_id, "content_type": "video", "text": "raiz"})),
        ))
        .await
        .expect("create root");
    let root = test_support::read_json(response).await;
    let root_id = root["id"].as_str().unwrap().to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/comments",
            Some(&token),
            Some(json!({
                "content_id": video_id,
                "content_type": "video",
                "text": "resposta",
                "parent_id": root_id
            })),
        ))
        .await
        .expect("reply");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/comments/{root_id}"),
            Some(&token),
            None,
        ))
        .await
        .expect("delete root");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let snapshot = ctx.state.engine().snapshot().await;
    assert!(snapshot.comments.is_empty());
}
