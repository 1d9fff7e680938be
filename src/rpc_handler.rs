//! RPC method handler for the Planner JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the `App` held behind a mutex,
//! which also serializes concurrent mutations.

use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::navigation::{nav_entries, NavigationTrait};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::services::rendering::{drop_target, ItemBox};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::view::ListKind;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn id_param(params: &Value, name: &str) -> Result<i64, String> {
    params
        .get(name)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("missing {}", name))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// A mutation outcome together with the view reloaded after it.
fn with_view(app: &App, outcome: Value) -> Result<Value, String> {
    Ok(json!({
        "outcome": outcome,
        "view": to_value(app.rendered())?,
    }))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Navigation ───
        "nav.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "entries": to_value(&nav_entries())?,
                "active": a.navigation.active().id(),
            }))
        }
        "nav.select" => {
            let id = str_param(params, "section")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let layout = a.select(id).map_err(|e| e.to_string())?;
            Ok(json!({
                "layout": to_value(&layout)?,
                "view": to_value(a.rendered())?,
            }))
        }
        "view.get" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.reload().map_err(|e| e.to_string())?;
            Ok(json!({
                "layout": to_value(&a.navigation.layout())?,
                "view": to_value(a.rendered())?,
            }))
        }

        // ─── Form ───
        "form.update" => {
            let urls = params.get("urls").and_then(|v| v.as_str());
            let tag = params.get("tag").and_then(|v| v.as_str());
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.navigation.update_form(urls, tag);
            to_value(a.navigation.form())
        }
        "form.submit" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.submit_form().map_err(|e| e.to_string())?;
            with_view(&a, to_value(&outcome)?)
        }

        // ─── Items ───
        "item.save" => {
            let urls = str_param(params, "urls")?;
            let tag = params.get("tag").and_then(|v| v.as_str()).unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.save(urls, tag).map_err(|e| e.to_string())?;
            with_view(&a, to_value(&outcome)?)
        }
        "item.toggle" => {
            let id = id_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.toggle(id).map_err(|e| e.to_string())?;
            with_view(&a, to_value(&outcome)?)
        }
        "item.delete" => {
            let id = id_param(params, "id")?;
            let confirmed = params
                .get("confirmed")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a
                .delete(id, &|_: &str| confirmed)
                .map_err(|e| e.to_string())?;
            with_view(&a, to_value(&outcome)?)
        }
        "item.search" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            to_value(a.search(query))
        }
        "item.reorder" => {
            let list: ListKind = params
                .get("list")
                .cloned()
                .map(serde_json::from_value::<ListKind>)
                .transpose()
                .map_err(|e| format!("invalid list: {}", e))?
                .ok_or("missing list")?;
            let id = id_param(params, "id")?;
            // A pointer position plus item boxes wins over an explicit `before`.
            let before = match params.get("y").and_then(|v| v.as_f64()) {
                Some(y) => {
                    let boxes: Vec<ItemBox> = params
                        .get("boxes")
                        .cloned()
                        .map(serde_json::from_value::<Vec<ItemBox>>)
                        .transpose()
                        .map_err(|e| format!("invalid boxes: {}", e))?
                        .unwrap_or_default();
                    let others: Vec<ItemBox> = boxes.into_iter().filter(|b| b.id != id).collect();
                    drop_target(&others, y)
                }
                None => params.get("before").and_then(|v| v.as_i64()),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if !a.reorder(list, id, before) {
                return Err(format!("item {} cannot be moved there", id));
            }
            to_value(a.rendered())
        }

        // ─── Charts & export ───
        "charts.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let data = a.chart_data().map_err(|e| e.to_string())?;
            to_value(&data)
        }
        "export" => {
            let dir = params.get("dir").and_then(|v| v.as_str()).map(PathBuf::from);
            let a = app.lock().map_err(|e| e.to_string())?;
            let path = a.export(dir.as_deref()).map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }

        // ─── Shortcuts ───
        "shortcut.press" => {
            let keys = str_param(params, "keys")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match a.press(keys) {
                Some((action, result)) => {
                    let outcome = result.map_err(|e| e.to_string())?;
                    let mut res = with_view(&a, to_value(&outcome)?)?;
                    res["action"] = json!(action);
                    Ok(res)
                }
                None => Ok(json!({"action": null})),
            }
        }
        "shortcut.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_value(a.shortcuts.list_shortcuts())
        }
        "shortcut.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.reset_shortcuts().map_err(|e| e.to_string())?;
            to_value(a.shortcuts.list_shortcuts())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_value(a.settings_engine.get_settings())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            if key.starts_with("shortcuts.") {
                let rebound = ShortcutManager::with_overrides(&a.settings_engine.get_settings().shortcuts);
                a.shortcuts = rebound;
            }
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
