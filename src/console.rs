// File: src/console.rs
// Line-based front end: one input line in, one reply out.
use crate::controller::Session;
use crate::ui;
use std::io::{self, BufRead, Write};

const DIVIDER: &str = "____________________________________________________________";

fn reply<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", DIVIDER)?;
    for line in message.lines() {
        writeln!(out, " {}", line)?;
    }
    writeln!(out, "{}", DIVIDER)?;
    out.flush()
}

/// Runs the session until `bye` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    notices: &[String],
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    for notice in notices {
        reply(out, notice)?;
    }
    reply(out, &ui::list(session.tasks()))?;
    reply(out, &ui::greeting())?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD rather than ending the session.
        let line = String::from_utf8_lossy(&buf);
        let message = session.handle(line.trim_end_matches(['\n', '\r']));
        reply(out, &message)?;
        if !session.is_running() {
            return Ok(());
        }
    }

    // End of input without `bye`: everything is already saved.
    log::info!("Input closed, ending session");
    reply(out, &ui::goodbye())
}
