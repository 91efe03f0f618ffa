//! Interactive request loop.

use anyhow::{anyhow, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;

use crate::client::{HttpTransport, RemoteClient, Transport};
use crate::domain::PlannedCall;
use crate::extract::extract;
use crate::plan::plan;
use crate::render;

const PROMPT: &str = "➤ Your request: ";
const EXIT_KEYWORDS: &[&str] = &["quit", "exit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// One user's dispatch session. Owns the client for the life of the loop.
pub struct Session<T: Transport = HttpTransport> {
    client: RemoteClient<T>,
    last_result: Option<Value>,
}

impl<T: Transport> Session<T> {
    pub fn new(client: RemoteClient<T>) -> Self {
        Self { client, last_result: None }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Result of the most recent successful call, if any.
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    /// Handle one input line and say whether the loop should keep going.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Control> {
        let input = line.trim();
        if EXIT_KEYWORDS.iter().any(|k| input.eq_ignore_ascii_case(k)) {
            return Ok(Control::Exit);
        }
        if input.is_empty() {
            return Ok(Control::Continue);
        }
        if render::wants_help(input) {
            render::render_help(out, render::topic_for(input))?;
            return Ok(Control::Continue);
        }

        let calls = plan(extract(input));
        tracing::debug!(?calls, "planned calls");
        if calls.is_empty() {
            render::render_not_understood(out)?;
            return Ok(Control::Continue);
        }

        self.dispatch(&calls, out)?;
        Ok(Control::Continue)
    }

    /// Run calls in order, stopping at the first missing file or failed call.
    /// Returns how many calls succeeded.
    fn dispatch(&mut self, calls: &[PlannedCall], out: &mut dyn Write) -> io::Result<usize> {
        let mut completed = 0;
        for call in calls {
            if let Some(path) = call.filepath() {
                if !Path::new(path).exists() {
                    tracing::warn!(path, "input raster missing, plan aborted");
                    render::render_file_not_found(out, path)?;
                    break;
                }
            }

            render::render_call_start(out, call)?;
            match self.client.invoke(call) {
                Ok(result) => {
                    render::render_success(out, &result)?;
                    self.last_result = Some(result);
                    completed += 1;
                }
                Err(err) => {
                    render::render_failure(out, &err)?;
                    break;
                }
            }
        }
        tracing::debug!(completed, planned = calls.len(), "plan finished");
        Ok(completed)
    }

    /// Close the session. Drops the client and its connection pool.
    pub fn shutdown(self, out: &mut dyn Write) -> io::Result<()> {
        tracing::info!(endpoint = self.client.endpoint(), "session closed");
        render::render_farewell(out)
    }
}

/// Read requests from the terminal until exit, interrupt or end of input.
pub fn run_interactive<T: Transport>(mut session: Session<T>) -> Result<()> {
    let mut out = io::stdout();
    render::render_banner(&mut out, session.endpoint())?;

    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;
    let outcome = loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.trim());
                }
                match session.handle_line(&line, &mut out) {
                    Ok(Control::Continue) => {}
                    Ok(Control::Exit) => break Ok(()),
                    Err(err) => break Err(anyhow!(err).context("Failed writing output")),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                let _ = writeln!(out);
                break Ok(());
            }
            Err(err) => break Err(anyhow!("readline error: {err}")),
        }
    };

    session.shutdown(&mut out)?;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::scripted::ScriptedTransport;
    use serde_json::json;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    type Sent = Rc<RefCell<Vec<Value>>>;

    fn session(replies: Vec<anyhow::Result<String>>) -> (Session<ScriptedTransport>, Sent) {
        let transport = ScriptedTransport::new(replies);
        let sent = transport.sent();
        (Session::new(RemoteClient::new(transport, 1)), sent)
    }

    fn run_line(session: &mut Session<ScriptedTransport>, line: &str) -> (Control, String) {
        let mut buf = Vec::new();
        let control = session.handle_line(line, &mut buf).expect("handle line");
        (control, String::from_utf8(buf).expect("utf8"))
    }

    fn raster(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"II*\0").expect("write raster");
        path.to_str().expect("utf8 path").to_string()
    }

    fn tool_names(sent: &Sent) -> Vec<String> {
        sent.borrow()
            .iter()
            .filter_map(|env| env["params"]["name"].as_str().map(str::to_string))
            .collect()
    }

    #[test]
    fn exit_keywords_end_the_loop() {
        let (mut s, _) = session(vec![]);
        assert_eq!(run_line(&mut s, "  QUIT ").0, Control::Exit);
        assert_eq!(run_line(&mut s, "exit").0, Control::Exit);
    }

    #[test]
    fn blank_line_is_ignored() {
        let (mut s, sent) = session(vec![]);
        let (control, output) = run_line(&mut s, "   ");
        assert_eq!(control, Control::Continue);
        assert!(output.is_empty());
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn help_is_keyed_by_topic() {
        let (mut s, sent) = session(vec![]);
        let (_, output) = run_line(&mut s, "how do I crop image.tif?");
        assert!(output.contains("minx:100"));
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn unrecognized_request_shows_general_help() {
        let (mut s, _) = session(vec![]);
        let (control, output) = run_line(&mut s, "make me a sandwich");
        assert_eq!(control, Control::Continue);
        assert!(output.contains("not understood"));
        assert!(output.contains("analyze_tiff"));
    }

    #[test]
    fn missing_file_makes_no_remote_calls() {
        let (mut s, sent) = session(vec![]);
        let (_, output) =
            run_line(&mut s, "Crop image.tiff minx:100 miny:200 maxx:800 maxy:600");
        assert!(output.contains("File not found: image.tiff"));
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn missing_file_stops_a_multi_call_plan() {
        let (mut s, sent) = session(vec![
            Ok(r#"{"result": {}}"#.to_string()),
            Ok(r#"{"result": {}}"#.to_string()),
        ]);
        let (control, output) = run_line(&mut s, "analyze missing.tif then ndvi at x:1 y:2");

        assert_eq!(control, Control::Continue);
        assert!(sent.borrow().is_empty());
        assert_eq!(output.matches("File not found").count(), 1);
        assert!(!output.contains("Calling tool"));
    }

    #[test]
    fn show_request_is_dispatched_not_treated_as_help() {
        let dir = TempDir::new().expect("tmp");
        let path = raster(&dir, "field.tif");
        let (mut s, sent) =
            session(vec![Ok(r#"{"result": {"ndvi_mean": 0.2, "ndvi_point": 0.3}}"#.to_string())]);

        let (_, output) = run_line(&mut s, &format!("show the ndvi of {path} at x:1 y:2"));

        assert_eq!(tool_names(&sent), vec!["get_ndvi"]);
        assert!(output.contains("ndvi_point"));
    }

    #[test]
    fn analyze_then_ndvi_in_order() {
        let dir = TempDir::new().expect("tmp");
        let path = raster(&dir, "satellite.tiff");
        let (mut s, sent) = session(vec![
            Ok(r#"{"result": {"message": "TIFF analyzed successfully."}}"#.to_string()),
            Ok("data: {\"result\": {\"ndvi_mean\": 0.42, \"ndvi_point\": 0.5}}\n\n".to_string()),
        ]);

        let (_, output) = run_line(&mut s, &format!("Analyze {path} and get NDVI at x:10 y:20"));

        assert_eq!(tool_names(&sent), vec!["analyze_tiff", "get_ndvi"]);
        assert_eq!(
            sent.borrow()[1]["params"]["arguments"],
            json!({"filepath": path, "x": 10.0, "y": 20.0})
        );
        assert!(output.contains("ndvi_mean"));
        assert_eq!(s.last_result(), Some(&json!({"ndvi_mean": 0.42, "ndvi_point": 0.5})));
    }

    #[test]
    fn crop_mentioned_first_still_runs_after_analyze() {
        let dir = TempDir::new().expect("tmp");
        let path = raster(&dir, "scene.tif");
        let (mut s, sent) = session(vec![
            Ok(r#"{"result": {"minx": 1.0}}"#.to_string()),
            Ok(r#"{"result": {"image_url": "static/outputs/scene_cropped.png"}}"#.to_string()),
        ]);

        run_line(&mut s, &format!("crop {path} from 1,2 to 3,4 after you analyze it"));

        assert_eq!(tool_names(&sent), vec!["analyze_tiff", "crop_image"]);
    }

    #[test]
    fn backend_error_stops_the_plan() {
        let dir = TempDir::new().expect("tmp");
        let path = raster(&dir, "scene.tif");
        let (mut s, sent) =
            session(vec![Ok(r#"{"error": {"message": "Warp failed"}}"#.to_string())]);

        let (control, output) =
            run_line(&mut s, &format!("analyze {path} then ndvi at x:1 y:2"));

        assert_eq!(control, Control::Continue);
        assert_eq!(tool_names(&sent), vec!["analyze_tiff"]);
        assert!(output.contains("Warp failed"));
        assert!(s.last_result().is_none());
    }

    #[test]
    fn connection_failure_stops_the_plan_but_not_the_loop() {
        let dir = TempDir::new().expect("tmp");
        let path = raster(&dir, "scene.tif");
        let (mut s, sent) = session(vec![Err(anyhow::anyhow!("connection refused"))]);

        let (control, output) =
            run_line(&mut s, &format!("open {path} and crop minx:1 miny:2 maxx:3 maxy:4"));

        assert_eq!(control, Control::Continue);
        assert_eq!(sent.borrow().len(), 1);
        assert!(output.contains("Connection error"));
    }

    #[test]
    fn unparsable_reply_stops_the_plan() {
        let dir = TempDir::new().expect("tmp");
        let path = raster(&dir, "scene.tif");
        let (mut s, sent) = session(vec![Ok("Bad Gateway".to_string())]);

        let (_, output) = run_line(&mut s, &format!("check {path}, then plant index x:1 y:1"));

        assert_eq!(sent.borrow().len(), 1);
        assert!(output.contains("Bad Gateway"));
    }
}
