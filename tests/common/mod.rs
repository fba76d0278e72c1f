use std::net::IpAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use boutique::clock::FixedClock;
use boutique::config::Config;
use boutique::db::memory::{MemoryProductStore, MemoryUserStore};

pub const BOUNDARY: &str = "---------------boutique-test";

// Enough of a PNG for magic-byte sniffing.
pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// The application wired over in-memory stores, a pinned clock and a
/// tempdir upload directory; requests are driven in-process.
pub struct TestApp {
    pub router: Router,
    pub products: Arc<MemoryProductStore>,
    pub users: Arc<MemoryUserStore>,
    pub clock: Arc<FixedClock>,
    pub uploads: tempfile::TempDir,
}

pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn spawn_app() -> TestApp {
    let uploads = tempfile::tempdir().expect("tempdir");
    let products = Arc::new(MemoryProductStore::new());
    let users = Arc::new(MemoryUserStore::new());
    let clock = Arc::new(FixedClock::new(test_time()));

    let config = Config {
        database_url: String::new(),
        jwt_secret: "test-secret".to_string(),
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://localhost".to_string(),
        uploads_dir: uploads.path().to_path_buf(),
        max_body_size: 8 * 1024 * 1024,
        log_level: "info".to_string(),
    };

    let router = boutique::build_app_with_clock(
        products.clone(),
        users.clone(),
        config,
        clock.clone(),
    );

    TestApp {
        router,
        products,
        users,
        clock,
        uploads,
    }
}

impl TestApp {
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(req.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        body: Vec<u8>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut req = Request::builder().method("POST").uri(path).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(req.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    /// Register + login the bootstrap admin, return the session cookie.
    pub async fn bootstrap_admin(&self) -> String {
        let resp = self
            .post_form(
                "/register",
                "email=admin%40test.com&password=password123",
                None,
            )
            .await;
        assert!(
            resp.status().is_redirection(),
            "bootstrap register failed: {}",
            resp.status()
        );
        self.login("admin%40test.com", "password123").await
    }

    /// Login with urlencoded credentials, return the session cookie.
    pub async fn login(&self, email_encoded: &str, password: &str) -> String {
        let resp = self
            .post_form(
                "/auth/login",
                &format!("email={email_encoded}&password={password}"),
                None,
            )
            .await;
        session_cookie(&resp).expect("login did not set a session cookie")
    }
}

/// Build a multipart body from text fields plus an optional file part
/// (`photo` field: filename, content type, bytes).
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"photo\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// The `access_token=...` pair from a login response.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("access_token=") && !v.starts_with("access_token=;"))
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

/// Decode the flash cookie a response sets into (level, message) pairs.
pub fn flashes(resp: &Response<Body>) -> Vec<(String, String)> {
    let Some(value) = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("flash="))
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim_start_matches("flash=").to_string())
    else {
        return Vec::new();
    };

    let bytes = match hex::decode(value) {
        Ok(bytes) => bytes,
        Err(_) => return Vec::new(),
    };
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_default();
    parsed
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|e| {
                    (
                        e["level"].as_str().unwrap_or_default().to_string(),
                        e["message"].as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
