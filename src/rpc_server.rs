//! managed-favs RPC server: JSON-RPC over stdin/stdout for UI integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"export.plist", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use managed_favs::app::App;
use managed_favs::rpc_handler::handle_method;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

fn send(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    managed_favs::logging::init()?;

    let app = Mutex::new(App::new(None));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Signal ready
    send(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}))?;
    info!("RPC server ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() { continue; }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Malformed request");
                send(&mut out, &json!({"id":null,"error":format!("parse error: {}",e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        debug!(method, "Handling request");
        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                warn!(method, error = %err, "Request failed");
                json!({"id": id, "error": err})
            }
        };
        send(&mut out, &response)?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
