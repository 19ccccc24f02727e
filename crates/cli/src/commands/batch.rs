//! NDJSON request loop over stdin.
//!
//! One request per line, one compact response per line. The surface lives
//! for the whole loop, so toast and pulse timers keep running between
//! requests.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::commands::registry::{command_name, lookup_command, run_command};
use crate::error::Result;
use crate::output::{CommandError, ErrorCode};
use crate::surface::WishSurface;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest {
	#[serde(default)]
	request_id: Option<serde_json::Value>,
	op: String,
	#[serde(default)]
	input: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchResponse {
	#[serde(skip_serializing_if = "Option::is_none")]
	request_id: Option<serde_json::Value>,
	ok: bool,
	op: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	notification: Option<String>,
	duration_ms: u64,
}

impl BatchResponse {
	fn failure(request_id: Option<serde_json::Value>, op: impl Into<String>, code: ErrorCode, message: impl Into<String>, start: Instant) -> Self {
		Self {
			request_id,
			ok: false,
			op: op.into(),
			data: None,
			error: Some(CommandError { code, message: message.into() }),
			notification: None,
			duration_ms: start.elapsed().as_millis() as u64,
		}
	}
}

enum Step {
	Respond(BatchResponse),
	Quit,
}

/// Serves requests until stdin closes or a `quit` request arrives.
pub async fn run_batch(surface: &mut WishSurface) -> Result<()> {
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut stdout = tokio::io::stdout();

	while let Some(line) = lines.next_line().await? {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		let response = match handle_line(surface, line).await {
			Step::Respond(response) => response,
			Step::Quit => break,
		};

		let mut encoded = serde_json::to_string(&response)?;
		encoded.push('\n');
		stdout.write_all(encoded.as_bytes()).await?;
		stdout.flush().await?;
	}

	debug!(target = "wish.cli", "batch finished");
	Ok(())
}

async fn handle_line(surface: &mut WishSurface, line: &str) -> Step {
	let start = Instant::now();
	let request: BatchRequest = match serde_json::from_str(line) {
		Ok(request) => request,
		Err(err) => {
			warn!(target = "wish.cli", error = %err, "malformed batch request");
			return Step::Respond(BatchResponse::failure(None, "", ErrorCode::InvalidInput, format!("malformed request: {err}"), start));
		}
	};

	if matches!(request.op.as_str(), "quit" | "exit") {
		return Step::Quit;
	}

	let Some(id) = lookup_command(&request.op) else {
		return Step::Respond(BatchResponse::failure(
			request.request_id,
			request.op.clone(),
			ErrorCode::UnknownCommand,
			format!("unknown op: {}", request.op),
			start,
		));
	};

	let op = command_name(id);
	debug!(target = "wish.cli", op, "batch request");
	match run_command(surface, id, request.input).await {
		Ok(data) => Step::Respond(BatchResponse {
			request_id: request.request_id,
			ok: true,
			op: op.to_string(),
			data: Some(data),
			error: None,
			notification: surface.notification(),
			duration_ms: start.elapsed().as_millis() as u64,
		}),
		Err(err) => Step::Respond(BatchResponse::failure(request.request_id, op, err.code(), err.to_string(), start)),
	}
}
