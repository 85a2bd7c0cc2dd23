use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Notice {
    message: String,
    severity: String,
}

#[derive(Debug, Deserialize)]
struct WaterRecord {
    daily: u32,
    goal: u32,
}

#[derive(Debug, Deserialize)]
struct StepsRecord {
    daily: u32,
    goal: u32,
}

#[derive(Debug, Deserialize)]
struct BmiRecord {
    value: f64,
    category: String,
}

#[derive(Debug, Deserialize)]
struct MoodRecord {
    current: u8,
    weekly: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyStats {
    health_score: u8,
}

#[derive(Debug, Deserialize)]
struct HealthState {
    water: WaterRecord,
    steps: StepsRecord,
    bmi: BmiRecord,
    mood: MoodRecord,
    stats: DailyStats,
}

#[derive(Debug, Deserialize)]
struct Dashboard {
    date: String,
    state: HealthState,
    recommendations: Vec<serde_json::Value>,
    achievements: Vec<serde_json::Value>,
    mood_chart: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    notices: Vec<Notice>,
    dashboard: Dashboard,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    id: u64,
    message: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("health_dashboard_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_health_dashboard"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", data_dir)
        .env("DAY_LENGTH_SECS", "86400")
        .env("REMINDER_INTERVAL_SECS", "3600")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn dashboard(client: &Client, server: &TestServer) -> Dashboard {
    client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_action(client: &Client, server: &TestServer, path: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{}{path}", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_dashboard_serves_snapshot() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let data = dashboard(&client, &server).await;
    assert!(!data.date.is_empty());
    assert_eq!(data.state.water.goal, 8);
    assert_eq!(data.state.steps.goal, 10_000);
    assert_eq!(data.achievements.len(), 4);
    assert_eq!(data.mood_chart.len(), data.state.mood.weekly.len());
    assert!(!data.recommendations.is_empty());
    assert!(data.state.stats.health_score <= 100);

    let page = client.get(&server.base_url).send().await.unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().contains("Health Awareness Dashboard"));
}

#[tokio::test]
async fn http_water_add_and_remove() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = dashboard(&client, &server).await;

    let response = post_action(&client, &server, "/api/water", serde_json::json!({ "action": "add" })).await;
    assert!(response.status().is_success());
    let added: ActionResponse = response.json().await.unwrap();
    let expected = (before.state.water.daily + 1).min(before.state.water.goal + 2);
    assert_eq!(added.dashboard.state.water.daily, expected);

    let response = post_action(&client, &server, "/api/water", serde_json::json!({ "action": "remove" })).await;
    let removed: ActionResponse = response.json().await.unwrap();
    assert_eq!(removed.dashboard.state.water.daily, expected - 1);

    let response = post_action(&client, &server, "/api/water", serde_json::json!({ "action": "spill" })).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn http_steps_validate_and_clamp() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_action(&client, &server, "/api/steps", serde_json::json!({ "count": 60_000 })).await;
    assert_eq!(response.status().as_u16(), 400);
    assert!(response.text().await.unwrap().contains("1-50,000"));

    let response = post_action(&client, &server, "/api/steps", serde_json::json!({ "count": 12_000 })).await;
    assert!(response.status().is_success());
    let body: ActionResponse = response.json().await.unwrap();
    let steps = &body.dashboard.state.steps;
    assert_eq!(steps.daily, steps.goal);
    assert!(body.notices.iter().any(|notice| notice.message == "Step goal achieved!"));
}

#[tokio::test]
async fn http_bmi_and_mood() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_action(
        &client,
        &server,
        "/api/bmi",
        serde_json::json!({ "height_cm": 170.0, "weight_kg": 70.0 }),
    )
    .await;
    let body: ActionResponse = response.json().await.unwrap();
    assert_eq!(body.dashboard.state.bmi.value, 24.2);
    assert_eq!(body.dashboard.state.bmi.category, "Normal");
    assert_eq!(body.notices[0].severity, "success");

    let response = post_action(
        &client,
        &server,
        "/api/bmi",
        serde_json::json!({ "height_cm": 20.0, "weight_kg": 70.0 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = post_action(&client, &server, "/api/mood", serde_json::json!({ "level": 5 })).await;
    let body: ActionResponse = response.json().await.unwrap();
    assert_eq!(body.dashboard.state.mood.current, 5);
    assert_eq!(body.dashboard.state.mood.weekly.last(), Some(&5));
}

#[tokio::test]
async fn http_welcome_notice_is_in_feed() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let entries: Vec<FeedEntry> = client
        .get(format!("{}/api/notifications?after=0", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let welcome = entries
        .iter()
        .find(|entry| entry.message.ends_with("Ready to achieve your health goals today?"))
        .expect("missing welcome notice");
    assert!(welcome.id >= 1);

    let response = client
        .post(format!("{}/api/achievements/marathoner/unlock", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
