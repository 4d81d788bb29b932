#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Serialize;

/// Shared HS256 secret the spawned server is configured with
pub const TEST_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Cargo builds the binary before integration tests run and exports its path
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_campus-api"));
        cmd.env("CAMPUS_API_PORT", port.to_string())
            .env("AUTH_SECRET", TEST_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Reap the spawned server rather than orphaning it
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    // One server per test binary; init errors become a panic with context
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: i64,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<Vec<String>>,
}

/// Mint a token the spawned server will accept (no kid: the server's
/// local key provider matches kid-less tokens)
pub fn mint_token(permissions: Option<&[&str]>, expires_in_secs: i64) -> String {
    mint_token_inner(permissions, expires_in_secs, None)
}

/// Mint a token whose header names a specific signing key
pub fn mint_token_with_kid(kid: &str, permissions: Option<&[&str]>, expires_in_secs: i64) -> String {
    mint_token_inner(permissions, expires_in_secs, Some(kid.to_string()))
}

fn mint_token_inner(
    permissions: Option<&[&str]>,
    expires_in_secs: i64,
    kid: Option<String>,
) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = TestClaims {
        sub: "test-user".to_string(),
        exp: now + expires_in_secs,
        iat: now,
        permissions: permissions.map(|ps| ps.iter().map(|p| p.to_string()).collect()),
    };

    let mut header = Header::default();
    header.kid = kid;

    encode(&header, &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("failed to encode test token")
}
