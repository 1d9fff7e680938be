//! Planner RPC Server — JSON-RPC over stdin/stdout for a graphical shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"item.save", "params":{"urls":"a.com\nb.com","tag":"x"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use planner::app::App;
use planner::platform;
use planner::rpc_handler::handle_method;
use planner::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn send(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

/// `PLANNER_DATA_DIR` wins over the settings file, which wins over the platform default.
fn database_path(settings_path: Option<&str>) -> PathBuf {
    if let Ok(dir) = std::env::var("PLANNER_DATA_DIR") {
        return PathBuf::from(dir).join(platform::DATABASE_FILE);
    }
    let mut engine = SettingsEngine::new(settings_path.map(str::to_string));
    engine
        .load()
        .ok()
        .and_then(|s| s.storage.database_path)
        .map(PathBuf::from)
        .unwrap_or_else(platform::default_database_path)
}

fn main() {
    let config_path = std::env::var("PLANNER_CONFIG").ok();
    planner::logging::init(&planner::logging::level_from_settings(config_path.as_deref()));

    let db_path = database_path(config_path.as_deref());
    let app = match App::with_settings(
        &db_path.to_string_lossy(),
        SettingsEngine::new(config_path.clone()),
    ) {
        Ok(app) => Mutex::new(app),
        Err(err) => {
            tracing::error!(%err, path = %db_path.display(), "failed to open record store");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Signal ready
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if send(&mut out, &ready).is_err() {
        return;
    }

    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(%e, "unparseable request");
                let err = json!({"id": null, "error": format!("parse error: {}", e)});
                if send(&mut out, &err).is_err() {
                    break;
                }
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let response = json!({"id": id, "error": "rate limit exceeded"});
            if send(&mut out, &response).is_err() {
                break;
            }
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));
        tracing::debug!(method, "rpc request");

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        if send(&mut out, &response).is_err() {
            break;
        }
    }
}
