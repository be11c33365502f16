use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::api;
use crate::core::{config::Settings, security, state::AppState};
use crate::domain::models::{Course, Exercise, Module, Video};
use crate::domain::types::{QuestionKind, UserRole};
use crate::engine::Engine;
use crate::schemas::content::{ExerciseCreate, QuestionCreate, VideoCreate};
use crate::schemas::course::{CourseCreate, ModuleCreate};
use crate::storage;

const TEST_SECRET_KEY: &str = "test-secret";

pub(crate) const ADMIN_ID: &str = "admin-1";
pub(crate) const STUDENT_ID: &str = "student-1";

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    _scratch: ScratchDir,
    _guard: OwnedMutexGuard<()>,
}

impl TestContext {
    pub(crate) fn data_dir(&self) -> &std::path::Path {
        &self._scratch.path
    }
}

/// Removes its directory when dropped. Cleanup lives here rather than on
/// `TestContext` itself so tests can move the router out of the context.
pub(crate) struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.path).ok();
    }
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

/// Fresh directory under the system temp dir; callers remove it when done.
pub(crate) fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("manguezal-test-{}", Uuid::new_v4()))
}

pub(crate) fn set_test_env() {
    dotenvy::dotenv().ok();

    std::env::set_var("MANGUEZAL_ENV", "test");
    std::env::set_var("MANGUEZAL_STRICT_CONFIG", "0");
    std::env::set_var("SECRET_KEY", TEST_SECRET_KEY);
    std::env::set_var("PERSISTENCE_BACKEND", "local");
    std::env::set_var("MANGUEZAL_DATA_DIR", scratch_dir());
    std::env::set_var("SEED_ON_EMPTY", "0");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
}

pub(crate) async fn setup_test_context() -> TestContext {
    let guard = env_lock().await;
    set_test_env();

    let settings = Settings::load().expect("settings");
    let (app, state, data_dir) = build_app(settings).await;

    TestContext { state, app, _scratch: ScratchDir::new(data_dir), _guard: guard }
}

/// Builds the service over an empty local store rooted at the configured
/// data directory.
pub(crate) async fn build_app(settings: Settings) -> (Router, AppState, PathBuf) {
    let data_dir = settings.persistence().data_dir.clone();
    let store = storage::from_settings(&settings).await.expect("storage backend");
    let engine = Arc::new(Engine::bootstrap(store).await.expect("engine bootstrap"));

    let state = AppState::new(settings, engine);
    let app = api::router::router(state.clone());
    (app, state, data_dir)
}

pub(crate) fn admin_token(settings: &Settings) -> String {
    bearer_token(ADMIN_ID, "Professora Yara", UserRole::Admin, settings)
}

pub(crate) fn student_token(settings: &Settings) -> String {
    bearer_token(STUDENT_ID, "Aluno Teste", UserRole::Student, settings)
}

pub(crate) fn bearer_token(
    user_id: &str,
    name: &str,
    role: UserRole,
    settings: &Settings,
) -> String {
    let email = format!("{user_id}@example.com");
    security::create_access_token(user_id, name, &email, role, settings, None).expect("token")
}

pub(crate) async fn insert_course(state: &AppState, title: &str, min_grade: u32) -> Course {
    state
        .engine()
        .add_course(
            ADMIN_ID,
            CourseCreate {
                title: title.to_string(),
                description: None,
                thumbnail: None,
                duration_hours: 10,
                min_grade,
                professor_name: None,
            },
        )
        .await
        .expect("insert course")
}

pub(crate) async fn insert_module(state: &AppState, course_id: &str, title: &str) -> Module {
    state
        .engine()
        .add_module(ModuleCreate {
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: None,
            order: 1,
        })
        .await
        .expect("insert module")
}

pub(crate) async fn insert_video(state: &AppState, module_id: &str, title: &str) -> Video {
    state
        .engine()
        .add_video(VideoCreate {
            module_id: module_id.to_string(),
            title: title.to_string(),
            description: None,
            url: "https://videos.example.com/aula".to_string(),
            duration_minutes: 12,
            order: 1,
        })
        .await
        .expect("insert video")
}

pub(crate) async fn insert_exercise(
    state: &AppState,
    module_id: &str,
    title: &str,
    points: u32,
) -> Exercise {
    state
        .engine()
        .add_exercise(ExerciseCreate {
            module_id: module_id.to_string(),
            title: title.to_string(),
            description: None,
            questions: vec![QuestionCreate {
                id: None,
                kind: QuestionKind::Truefalse,
                text: "O manguezal é um ecossistema costeiro?".to_string(),
                options: Vec::new(),
                correct_answer: serde_json::json!(true),
                points,
            }],
            order: 2,
        })
        .await
        .expect("insert exercise")
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::setup_test_context;

    #[tokio::test]
    async fn router_can_be_consumed_and_scratch_dir_is_removed() {
        let data_dir;
        {
            let ctx = setup_test_context().await;
            data_dir = ctx.data_dir().to_path_buf();

            // The final request in most tests takes the router by value.
            let app = ctx.app;
            let response = app
                .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert!(!data_dir.exists());
    }
}
