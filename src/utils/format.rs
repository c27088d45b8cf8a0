//! Time label formatting

/// Format remaining seconds as "Xm Ys", or "Ys" under a minute
pub fn format_remaining(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
