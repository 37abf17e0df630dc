//! The interactive read-send-render-print loop.
//!
//! Each line typed by the user is forwarded to the server verbatim,
//! except the disconnect sentinel, which ends the session locally.

use crate::render;
use crate::session::Session;
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Typing this line (case-insensitively) ends the session instead of
/// being forwarded to the server.
pub const DISCONNECT_COMMAND: &str = ".exit";

/// Whether an input line is the disconnect sentinel.
pub fn is_disconnect(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(DISCONNECT_COMMAND)
}

/// Read commands from stdin until EOF or the disconnect sentinel,
/// forwarding each to the server and printing the rendered response.
pub async fn run(session: &mut Session, color: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if is_disconnect(&line) {
            debug!("disconnect command received");
            break;
        }

        let response = session.run(&line).await?;
        let rendered = if color {
            render::render(&response)
        } else {
            render::strip(&response)
        };

        writeln!(stdout, "{}", rendered)?;
        stdout.flush()?;
    }

    Ok(())
}
