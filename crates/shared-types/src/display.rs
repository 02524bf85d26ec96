//! Boxed banner lines for operator-facing log output.
//!
//! ```text
//! +-------------------+
//! + Created a part.   +
//! +-------------------+
//! ```

use tracing::debug;

/// Frame `msg` (possibly multi-line) in a `+---+` box, centering each line.
pub fn banner(msg: &str) -> Vec<String> {
    let lines: Vec<&str> = msg.split('\n').collect();
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let rule = format!("+{}+", "-".repeat(width + 2));

    let mut framed = Vec::with_capacity(lines.len() + 2);
    framed.push(rule.clone());
    for line in lines {
        let pad = width - line.chars().count();
        let left = pad / 2;
        framed.push(format!(
            "+ {}{}{} +",
            " ".repeat(left),
            line,
            " ".repeat(pad - left)
        ));
    }
    framed.push(rule);
    framed
}

/// Emit [`banner`] at debug level.
pub fn log_banner(msg: &str) {
    for line in banner(msg) {
        debug!("{}", line);
    }
}
