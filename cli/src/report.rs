use yansi::{Condition, Paint};

/// Colors output on stderr only if it is a terminal and the environment
/// does not disable colors
fn stderr_colors() -> Condition {
    Condition::from(|| {
        Condition::stderr_is_tty() && Condition::clicolor() && Condition::no_color()
    })
}

/// Formats an error and its chain of causes for the user
pub fn report(err: &anyhow::Error) -> String {
    let colors = stderr_colors();
    let mut result = format!("{} {}", "error:".red().bold().whenever(colors), err);
    for cause in err.chain().skip(1) {
        result.push_str(&format!(
            "\n  {} {}",
            "caused by:".yellow().whenever(colors),
            cause
        ));
    }
    result
}
