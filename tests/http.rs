use chrono::{Duration, Local};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DayView {
    date: String,
    label: String,
    drank_ml: u64,
    count: u64,
    goal: Option<GoalView>,
}

#[derive(Debug, Deserialize)]
struct GoalView {
    target_ml: f64,
    display_value: f64,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct StatisticsSummary {
    weekly_average_ml: Option<f64>,
    monthly_average_ml: Option<f64>,
    completion_rate_percent: Option<f64>,
    drink_frequency_per_day: Option<f64>,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "water_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + StdDuration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(StdDuration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_water_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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

async fn fetch_today(client: &Client, base_url: &str) -> DayView {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_log_drink_updates_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_today(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/drink", server.base_url))
        .json(&serde_json::json!({ "amount_ml": 250 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let today = fetch_today(&client, &server.base_url).await;
    assert_eq!(today.drank_ml, before.drank_ml + 250);
    assert_eq!(today.count, before.count + 1);
    assert_eq!(today.label, "Today");
    assert!(!today.date.is_empty());
}

#[tokio::test]
async fn http_rejects_invalid_amounts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_today(&client, &server.base_url).await;

    for amount in [
        serde_json::json!(0),
        serde_json::json!(-50),
        serde_json::json!(2.5),
        serde_json::json!("abc"),
        serde_json::json!(null),
    ] {
        let response = client
            .post(format!("{}/api/drink", server.base_url))
            .json(&serde_json::json!({ "amount_ml": amount }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    // Absent amount goes through the same validation path.
    let response = client
        .post(format!("{}/api/drink", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let after = fetch_today(&client, &server.base_url).await;
    assert_eq!(after.drank_ml, before.drank_ml);
    assert_eq!(after.count, before.count);
}

#[tokio::test]
async fn http_goal_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/goal", server.base_url))
        .json(&serde_json::json!({ "value": 2000, "unit": "oz" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let goal: Option<GoalView> = client
        .get(format!("{}/api/goal", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let goal = goal.expect("goal should be set");
    assert_eq!(goal.target_ml, 2000.0);
    assert_eq!(goal.unit, "oz");
    assert_eq!(goal.display_value, 67.63);

    let today = fetch_today(&client, &server.base_url).await;
    assert!(today.goal.is_some());
}

#[tokio::test]
async fn http_cursor_jump_to_tomorrow_clamps_to_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let tomorrow = Local::now().date_naive() + Duration::days(1);
    let view: DayView = client
        .post(format!("{}/api/cursor/jump", server.base_url))
        .json(&serde_json::json!({ "date": tomorrow.to_string() }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.label, "Today");
    assert_eq!(view.date, Local::now().date_naive().to_string());
}

#[tokio::test]
async fn http_cursor_next_from_today_is_a_no_op() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // Start from a known position.
    let _: DayView = client
        .post(format!("{}/api/cursor/reset", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let view: DayView = client
        .post(format!("{}/api/cursor/next", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view.label, "Today");

    let back: DayView = client
        .post(format!("{}/api/cursor/previous", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(back.label, "Yesterday");
}

#[tokio::test]
async fn http_stats_reports_all_time_fields_once_data_exists() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .post(format!("{}/api/drink", server.base_url))
        .json(&serde_json::json!({ "amount_ml": 500 }))
        .send()
        .await
        .unwrap();

    let stats: StatisticsSummary = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // A single day of history: all-time fields present, windows insufficient.
    assert!(stats.completion_rate_percent.is_some());
    assert!(stats.drink_frequency_per_day.is_some());
    assert_eq!(stats.weekly_average_ml, None);
    assert_eq!(stats.monthly_average_ml, None);
}
