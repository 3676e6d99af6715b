use std::net::SocketAddr;

use configs::{AppConfig, ServerConfig, StorageConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    todos_path: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use an isolated data file per test run
    let todos_path = format!("target/test-data/{}/todos.json", Uuid::new_v4());
    let cfg = AppConfig {
        server: ServerConfig { host: "127.0.0.1".into(), port: 4000, worker_threads: Some(1) },
        storage: StorageConfig { todos_path: todos_path.clone() },
    };
    let app = server::startup::build_app(&cfg).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, todos_path })
}

#[tokio::test]
async fn e2e_unlisted_route_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn e2e_todo_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/todos", app.base_url))
        .json(&json!({"title": "Buy milk", "description": "2%"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["todo"]["_id"].as_str().unwrap_or_default().to_string();

    let res = c.put(format!("{}/todos/{}", app.base_url, id))
        .json(&json!({"completed": true}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // written through to the configured file
    let raw = tokio::fs::read_to_string(&app.todos_path).await?;
    let on_disk: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(on_disk[0]["_id"], id.as_str());
    assert_eq!(on_disk[0]["completed"], true);

    let res = c.delete(format!("{}/todos/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/todos/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    if let Some(dir) = std::path::Path::new(&app.todos_path).parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}
