//! Site listing endpoints against real directories.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{client, spawn_server, Fixture};

const SHOP: &str = r#"
server {
    listen 80;
    listen [::]:80;
    server_name shop.example.com www.shop.example.com;

    location / {
        proxy_pass http://127.0.0.1:4000;
    }
}

server {
    listen 127.0.0.1:9000 default_server;
    server_name admin.shop.example.com shop.example.com;

    location / {
        proxy_pass http://127.0.0.1:4001/admin/;
    }
}
"#;

async fn get_json(url: String) -> (StatusCode, Value) {
    let res = client().get(url).send().await.expect("dashboard unreachable");
    let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_sites_reports_every_file() {
    let fixture = Fixture::new();
    fixture.add_site("shop", SHOP);
    fixture.add_site("default", "# placeholder, no directives\n");
    fixture.add_site("broken", [0xffu8, 0xfe, 0xfd]);
    std::fs::create_dir(fixture.available().join("snippets")).unwrap();
    fixture.enable("shop");

    let server = spawn_server(fixture.config()).await;
    let (status, body) = get_json(server.url("/api/sites")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "sites": [
                {
                    "name": "broken",
                    "active": false,
                    "hostnames": [],
                    "ports": ["Error parsing file"],
                    "backends": [],
                },
                {
                    "name": "default",
                    "active": false,
                    "hostnames": [],
                    "ports": [],
                    "backends": [],
                },
                {
                    "name": "shop",
                    "active": true,
                    "hostnames": ["admin.shop.example.com", "shop.example.com", "www.shop.example.com"],
                    "ports": ["80", "9000"],
                    "backends": ["http://127.0.0.1:4000", "http://127.0.0.1:4001/admin/"],
                },
            ]
        })
    );
}

#[tokio::test]
async fn test_active_follows_enabled_directory_without_restart() {
    let fixture = Fixture::new();
    fixture.add_site("blog", "server { server_name blog.example.com; }");
    let server = spawn_server(fixture.config()).await;

    let (_, body) = get_json(server.url("/api/sites")).await;
    assert_eq!(body["sites"][0]["active"], json!(false));

    fixture.enable("blog");
    let (_, body) = get_json(server.url("/api/sites")).await;
    assert_eq!(body["sites"][0]["active"], json!(true));

    fixture.disable("blog");
    let (_, body) = get_json(server.url("/api/sites")).await;
    assert_eq!(body["sites"][0]["active"], json!(false));
}

#[tokio::test]
async fn test_content_changes_are_picked_up() {
    let fixture = Fixture::new();
    fixture.add_site("api", "listen 8080;");
    let server = spawn_server(fixture.config()).await;

    let (_, body) = get_json(server.url("/api/sites")).await;
    assert_eq!(body["sites"][0]["ports"], json!(["8080"]));

    fixture.add_site("api", "listen 8081;");
    let (_, body) = get_json(server.url("/api/sites")).await;
    assert_eq!(body["sites"][0]["ports"], json!(["8081"]));
}

#[tokio::test]
async fn test_unprefixed_route_matches_api_route() {
    let fixture = Fixture::new();
    fixture.add_site("shop", SHOP);
    let server = spawn_server(fixture.config()).await;

    let (_, prefixed) = get_json(server.url("/api/sites")).await;
    let (status, plain) = get_json(server.url("/sites")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prefixed, plain);
}

#[tokio::test]
async fn test_summary_view() {
    let fixture = Fixture::new();
    fixture.add_site("shop", SHOP);
    fixture.add_site("upstream", "server { listen 80; proxy_pass http://app_servers; }");
    fixture.add_site("static", "server { listen 80; root /srv/www; }");
    fixture.add_site("broken", [0xffu8]);
    let server = spawn_server(fixture.config()).await;

    let (status, body) = get_json(server.url("/api/sites/summary")).await;
    assert_eq!(status, StatusCode::OK);

    let sites = body["sites"].as_array().unwrap();
    let port_of = |name: &str| {
        sites
            .iter()
            .find(|s| s["name"] == name)
            .map(|s| s["internal_port"].clone())
            .unwrap()
    };
    assert_eq!(port_of("shop"), json!("4000"));
    assert_eq!(port_of("upstream"), json!("80"));
    assert_eq!(port_of("static"), Value::Null);
    assert_eq!(port_of("broken"), Value::Null);
    assert!(sites.iter().all(|s| s.get("backends").is_none()));
}

#[tokio::test]
async fn test_missing_sites_directory_is_not_found() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.paths.sites_available = fixture.root.path().join("does-not-exist");
    let server = spawn_server(config).await;

    let (status, body) = get_json(server.url("/api/sites")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Sites directory not found"}));
}

#[tokio::test]
async fn test_status_and_dashboard_page() {
    let fixture = Fixture::new();
    let server = spawn_server(fixture.config()).await;

    let (status, body) = get_json(server.url("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");

    let res = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(res.text().await.unwrap().contains("Nginx Dashboard"));
}

#[tokio::test]
async fn test_request_id_header() {
    let fixture = Fixture::new();
    let server = spawn_server(fixture.config()).await;

    let res = client().get(server.url("/api/status")).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let res = client()
        .get(server.url("/api/status"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
}
