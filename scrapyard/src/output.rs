use std::{
    error::Error,
    io::{self, Write},
    path::Path,
    time::SystemTime,
};

use chrono::{DateTime, Local};

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}

pub fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten a path for display by replacing the home dir with ~.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }

    path.display().to_string()
}

pub fn confirm(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn fail(message: &str) {
    eprintln!("scrapyard: {}", message);
}

pub fn fail_with_cause(error: &dyn Error) {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    fail(&message);
}

#[cfg(test)]
mod test {
    use super::format_size;

    #[test]
    fn format_size_picks_the_largest_fitting_unit() {
        assert_eq!("512 B", format_size(512));
        assert_eq!("1.00 KB", format_size(1_024));
        assert_eq!("1.50 KB", format_size(1_536));
        assert_eq!("2.00 MB", format_size(2_097_152));
        assert_eq!("1.00 GB", format_size(1_073_741_824));
    }

    #[test]
    fn format_size_keeps_bytes_unscaled() {
        assert_eq!("0 B", format_size(0));
        assert_eq!("1023 B", format_size(1_023));
    }
}
