//! Terminal spinners for the slow, silent parts of a run.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Start a ticking spinner with `msg`. Hidden when `quiet` is set.
pub(crate) fn start(msg: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(TICK);
    pb
}

/// Sleep for `total`, showing a countdown when the wait is long enough to
/// notice.
pub(crate) fn wait(total: Duration, quiet: bool) {
    if total < Duration::from_secs(1) {
        std::thread::sleep(total);
        return;
    }

    let pb = start(countdown(total), quiet);
    let deadline = Instant::now() + total;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            break;
        }
        pb.set_message(countdown(left));
        std::thread::sleep(left.min(Duration::from_millis(250)));
    }
    pb.finish_and_clear();
}

fn countdown(left: Duration) -> String {
    format!("Waiting {}s before the next title...", left.as_secs_f64().ceil() as u64)
}
