use super::*;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri};
use serde_json::{Value, json};

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> axum::Json<Value> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    axum::Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": header("authorization"),
        "host": header("host"),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn static_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("campus-dev-{name}-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    std::fs::write(dir.join("index.html"), "<html>campus</html>").unwrap();
    std::fs::write(dir.join("assets/app.js"), "console.log(1)").unwrap();
    dir
}

async fn dev_server(name: &str, backend: SocketAddr, strip_prefix: bool) -> SocketAddr {
    let config = DevServerConfig {
        backend_url: format!("http://{backend}"),
        strip_prefix,
        static_dir: static_dir(name),
        ..DevServerConfig::default()
    };
    let proxy = Arc::new(Proxy::new(&config).unwrap());
    serve(app(&config, proxy)).await
}

#[tokio::test]
async fn api_requests_are_forwarded_with_method_query_headers_and_body() {
    let backend = serve(Router::new().fallback(echo)).await;
    let dev = dev_server("forward", backend, false).await;

    let response = reqwest::Client::new()
        .post(format!("http://{dev}/api/courses/7/enroll?page=2"))
        .header("authorization", "Bearer abc")
        .body("{\"seat\":1}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let echoed: Value = response.json().await.unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["path"], "/api/courses/7/enroll");
    assert_eq!(echoed["query"], "page=2");
    assert_eq!(echoed["authorization"], "Bearer abc");
    assert_eq!(echoed["host"], backend.to_string());
    assert_eq!(echoed["body"], "{\"seat\":1}");
}

#[tokio::test]
async fn prefix_is_stripped_when_configured() {
    let backend = serve(Router::new().fallback(echo)).await;
    let dev = dev_server("strip", backend, true).await;

    let echoed: Value = reqwest::get(format!("http://{dev}/api/auth/me")).await.unwrap().json().await.unwrap();
    assert_eq!(echoed["path"], "/auth/me");
}

#[tokio::test]
async fn backend_status_passes_through() {
    let backend = serve(Router::new().fallback(|| async { (StatusCode::UNAUTHORIZED, "expired") })).await;
    let dev = dev_server("status", backend, false).await;

    let response = reqwest::get(format!("http://{dev}/api/courses")).await.unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "expired");
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);
    let dev = dev_server("down", closed, false).await;

    let response = reqwest::get(format!("http://{dev}/api/courses")).await.unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn healthz_and_static_assets() {
    let backend = serve(Router::new().fallback(echo)).await;
    let dev = dev_server("static", backend, false).await;

    let health = reqwest::get(format!("http://{dev}/healthz")).await.unwrap();
    assert_eq!(health.status(), 200);

    let asset = reqwest::get(format!("http://{dev}/assets/app.js")).await.unwrap();
    assert_eq!(asset.text().await.unwrap(), "console.log(1)");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let backend = serve(Router::new().fallback(echo)).await;
    let dev = dev_server("history", backend, false).await;

    let page = reqwest::get(format!("http://{dev}/courses/42")).await.unwrap();
    assert_eq!(page.status(), 200);
    assert_eq!(page.text().await.unwrap(), "<html>campus</html>");
}
