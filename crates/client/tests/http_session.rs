use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use backstage_auth::{AuthConfig, Credentials, Identity};
use backstage_client::{ClientError, ClientSessionContext, HttpSessionApi, SessionApi, SessionView};
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn cookie_of(headers: &HeaderMap) -> String {
    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// App validate endpoint and auth sign-out on one server, recording cookies seen.
async fn spawn_backend(sign_out_status: StatusCode) -> (TestServer, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let on_validate = seen.clone();
    let on_sign_out = seen.clone();

    let app = Router::new()
        .route(
            "/api/auth/validate",
            get(move |headers: HeaderMap| {
                let seen = on_validate.clone();
                async move {
                    let cookie = cookie_of(&headers);
                    seen.lock().unwrap().push(format!("validate:{cookie}"));
                    if cookie == "session=good" {
                        Json(json!({
                            "authenticated": true,
                            "user": { "id": "u1", "email": "a@b.com", "name": "Ada" },
                        }))
                    } else {
                        Json(json!({ "authenticated": false }))
                    }
                }
            }),
        )
        .route(
            "/api/auth/sign-out",
            post(move |headers: HeaderMap| {
                let seen = on_sign_out.clone();
                async move {
                    seen.lock().unwrap().push(format!("sign-out:{}", cookie_of(&headers)));
                    sign_out_status
                }
            }),
        );

    (TestServer::spawn(app).await, seen)
}

fn api_for(srv: &TestServer, cookie: &str) -> HttpSessionApi {
    let auth = AuthConfig::new(srv.base_url.clone()).unwrap();
    HttpSessionApi::new(&srv.base_url, &auth, Credentials::new(cookie)).unwrap()
}

#[tokio::test]
async fn mount_and_logout_over_http() {
    let (srv, seen) = spawn_backend(StatusCode::OK).await;
    let api = Arc::new(api_for(&srv, "session=good"));

    let visited = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = visited.clone();
    let ctx = ClientSessionContext::new(
        api,
        Arc::new(move |path: &str| sink.lock().unwrap().push(path.to_string())),
    );

    ctx.mount().await;
    assert_eq!(
        ctx.view(),
        SessionView::Authenticated(Identity::new("u1", "a@b.com", "Ada"))
    );

    ctx.logout().await.unwrap();
    assert_eq!(ctx.view(), SessionView::Anonymous);
    assert_eq!(*visited.lock().unwrap(), vec!["/".to_string()]);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "validate:session=good".to_string(),
            "sign-out:session=good".to_string(),
        ]
    );
}

#[tokio::test]
async fn anonymous_session_over_http() {
    let (srv, _) = spawn_backend(StatusCode::OK).await;
    let status = api_for(&srv, "").fetch_session().await.unwrap();

    assert!(!status.authenticated);
    assert_eq!(status.user, None);
}

#[tokio::test]
async fn sign_out_failure_is_reported() {
    let (srv, _) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR).await;

    let err = api_for(&srv, "session=good").sign_out().await.unwrap_err();
    assert_eq!(err, ClientError::Api(500));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let auth = AuthConfig::new("http://127.0.0.1:1").unwrap();
    let api = HttpSessionApi::new("http://127.0.0.1:1", &auth, Credentials::new("session=good")).unwrap();

    let err = api.fetch_session().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
