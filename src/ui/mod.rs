//! User-facing output for the deploy pipeline
//!
//! All human-readable lines go through a [`Reporter`] that owns its output
//! stream, so commands construct one for stdout and tests construct one over
//! a buffer. Styling and the rocket glyph are plain fields of the value;
//! there is no process-wide output state.

use std::io::Write;

use console::Style;

#[cfg(test)]
use std::sync::{Arc, Mutex};

/// Rocket glyph shown in the deployment summary
const ROCKET: &str = "\u{1F680}";

/// Reporter for progress and summary lines
pub struct Reporter {
    out: Box<dyn Write>,
    heading: Style,
    rocket: &'static str,
}

impl Reporter {
    /// Create a reporter writing to stdout
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Create a reporter over an arbitrary stream
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out,
            heading: Style::new().bold(),
            rocket: ROCKET,
        }
    }

    /// Print one informational line
    pub fn info(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", line.as_ref());
    }

    /// Print an empty line
    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// Print the post-deploy summary: URL and follow-up commands
    pub fn summary(&mut self, app: &str, domain: &str) {
        let r = self.rocket;
        let _ = writeln!(
            self.out,
            "{} {}{}{}",
            self.heading.apply_to("app has been deployed"),
            r,
            r,
            r
        );
        let _ = writeln!(self.out, "  URL: http://{}/", domain);
        let _ = writeln!(self.out, "  Port forward: vela listen {} <port>", app);
        let _ = writeln!(self.out, "  SSH: vela exec {}", app);
        let _ = writeln!(self.out, "  Logging: vela logs {}", app);
    }
}

/// Shared in-memory sink so tests can assert on reporter output
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuf {
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Reporter over a [`SharedBuf`], for asserting on output in tests
#[cfg(test)]
pub(crate) fn captured() -> (Reporter, SharedBuf) {
    let buf = SharedBuf::default();
    (Reporter::new(Box::new(buf.clone())), buf)
}
