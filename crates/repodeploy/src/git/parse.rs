//! Command output helpers.

use std::process::Output;

/// Renders an argument vector the way a shell user would type it.
pub fn format_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Error text for a failed command: trimmed stderr, or a description of the
/// exit status when stderr is empty.
pub fn format_command_error(command_line: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }

    match output.status.code() {
        Some(code) => format!(
            "Command '{}' returned non-zero exit status {}.",
            command_line, code
        ),
        None => format!("Command '{}' was terminated by a signal.", command_line),
    }
}

/// Trimmed stdout of a successful command.
pub fn command_stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
