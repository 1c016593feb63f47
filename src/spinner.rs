//! Terminal progress indicator shown while a request is in flight.
//!
//! Requests have no timeout, so the spinner also shows how long the current
//! one has been running.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INTERVAL: Duration = Duration::from_millis(80);

/// Draws on stderr from a background task until stopped.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl Spinner {
    /// Start spinning with a label such as `"uploading a.pdf"`.
    pub fn start(label: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let label = label.to_string();
        let started = Instant::now();

        let handle = tokio::spawn(async move {
            let mut i = 0;
            loop {
                let line = render(i, &label, started.elapsed());
                eprint!("\x1b[2K\r{line}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

/// One spinner line. Elapsed time appears once a request passes a second.
fn render(tick: usize, label: &str, elapsed: Duration) -> String {
    let frame = FRAMES[tick % FRAMES.len()];
    let secs = elapsed.as_secs();
    if secs == 0 {
        format!("{frame} {label}")
    } else {
        format!("{frame} {label} ({secs}s)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_single_chars() {
        for frame in FRAMES {
            assert_eq!(frame.chars().count(), 1);
        }
    }

    #[test]
    fn render_hides_subsecond_elapsed() {
        assert_eq!(render(0, "uploading", Duration::from_millis(400)), "⠋ uploading");
    }

    #[test]
    fn render_shows_elapsed_seconds() {
        assert_eq!(render(1, "asking", Duration::from_secs(12)), "⠙ asking (12s)");
    }

    #[test]
    fn render_wraps_frames() {
        assert_eq!(
            render(FRAMES.len(), "x", Duration::ZERO),
            render(0, "x", Duration::ZERO)
        );
    }

    #[tokio::test]
    async fn starts_and_stops() {
        let spinner = Spinner::start("testing");
        tokio::time::sleep(Duration::from_millis(100)).await;
        spinner.stop().await;
    }
}
