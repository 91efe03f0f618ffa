//! User-facing output for the interactive session

pub mod help;

use console::style;
use serde_json::Value;
use std::io::{self, Write};

use crate::client::CallError;
use crate::domain::PlannedCall;

pub use help::{help_text, topic_for, wants_help, HelpTopic};

pub fn render_banner(out: &mut dyn Write, endpoint: &str) -> io::Result<()> {
    writeln!(out, "{}", style("Raster tool assistant").bold())?;
    writeln!(out, "Tool server: {endpoint}")?;
    writeln!(out, "Several tools can be chained in one request. Type 'help' for examples.")?;
    writeln!(out)
}

pub fn render_help(out: &mut dyn Write, topic: HelpTopic) -> io::Result<()> {
    writeln!(out, "{}", help_text(topic))
}

pub fn render_not_understood(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", style("❓ Request not understood.").yellow())?;
    render_help(out, HelpTopic::General)
}

pub fn render_file_not_found(out: &mut dyn Write, path: &str) -> io::Result<()> {
    writeln!(out, "{}", style(format!("❌ File not found: {path}")).red())?;
    writeln!(out, "Check the file path and try again.")
}

pub fn render_call_start(out: &mut dyn Write, call: &PlannedCall) -> io::Result<()> {
    writeln!(out, "🔧 Calling tool: {}", style(call.tool_name()).cyan())?;
    writeln!(out, "📋 Parameters: {}", Value::Object(call.arguments.clone()))
}

pub fn render_success(out: &mut dyn Write, result: &Value) -> io::Result<()> {
    writeln!(out, "{}", style("✅ Result:").green())?;
    writeln!(out, "{}", pretty(result))
}

pub fn render_failure(out: &mut dyn Write, err: &CallError) -> io::Result<()> {
    match err {
        CallError::Connection(detail) => {
            writeln!(out, "{}", style(format!("❌ Connection error: {detail}")).red())?;
        }
        CallError::Backend(payload) => {
            writeln!(out, "{}", style("❌ Tool server returned an error:").red())?;
            writeln!(out, "{}", pretty(payload))?;
        }
        CallError::Unparsable { raw } => {
            writeln!(out, "{}", style("❌ Could not parse tool server response:").red())?;
            writeln!(out, "{raw}")?;
        }
    }
    writeln!(out, "Tool call failed, remaining steps skipped.")
}

pub fn render_farewell(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "👋 Exiting!")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn backend_error_is_shown_verbatim() {
        let text = rendered(|out| {
            render_failure(out, &CallError::Backend(json!({"error_detail": "Warp failed"})))
        });
        assert!(text.contains("\"error_detail\": \"Warp failed\""));
        assert!(text.contains("remaining steps skipped"));
    }

    #[test]
    fn unparsable_reply_shows_raw_body() {
        let text = rendered(|out| {
            render_failure(out, &CallError::Unparsable { raw: "<html>oops</html>".to_string() })
        });
        assert!(text.contains("<html>oops</html>"));
    }

    #[test]
    fn success_is_pretty_printed() {
        let text = rendered(|out| render_success(out, &json!({"image_url": "out.png"})));
        assert!(text.contains("\"image_url\": \"out.png\""));
    }
}
