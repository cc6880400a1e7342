use std::fmt::Write;

use url::Url;

use crate::http_probe::prelude::*;

pub const RULE: &str = "============================================================";

const NAME_WIDTH: usize = 20;

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

pub fn print_banner(base_url: &Url) {
    println!("{RULE}");
    println!("Inference API Test Suite");
    println!("Target: {base_url}");
    println!("{RULE}");
}

fn status_label(result: &ProbeResult) -> &'static str {
    if result.passed() {
        "✓ PASS"
    } else if result.skipped() {
        "✗ SKIP"
    } else {
        "✗ FAIL"
    }
}

/// The summary table plus the closing verdict line.
pub fn render_summary(results: &[ProbeResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "Test Summary:");
    let _ = writeln!(out, "{RULE}");

    for result in results {
        let _ = writeln!(
            out,
            "{}: {} {:>9.2}ms",
            status_label(result),
            to_fixed_width(result.name, NAME_WIDTH),
            result.elapsed.as_secs_f64() * 1000.0
        );
    }

    if exit_status(results) == 0 {
        let _ = writeln!(out, "\nAll tests passed!");
    } else {
        let _ = writeln!(out, "\nSome tests failed!");
    }
    out
}

pub fn print_summary(results: &[ProbeResult]) {
    print!("{}", render_summary(results));
}

/// 0 when every probe passed, 1 otherwise.
pub fn exit_status(results: &[ProbeResult]) -> u8 {
    if results.iter().all(ProbeResult::passed) {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn passed(name: &'static str) -> ProbeResult {
        ProbeResult {
            name,
            outcome: Ok(ProbeSuccess {
                status: 200,
                body: json!({"status": "ok"}),
                detections: None,
            }),
            elapsed: Duration::from_millis(42),
        }
    }

    fn failed(name: &'static str, error: ProbeError) -> ProbeResult {
        ProbeResult {
            name,
            outcome: Err(error),
            elapsed: Duration::from_millis(7),
        }
    }

    #[test]
    fn test_to_fixed_width() {
        assert_eq!(to_fixed_width("Health", 8), "Health  ");
        assert_eq!(to_fixed_width("Predict Endpoint", 7), "Predict");
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&[passed("a"), passed("b")]), 0);
        assert_eq!(
            exit_status(&[passed("a"), failed("b", ProbeError::NoImage)]),
            1
        );
        assert_eq!(exit_status(&[]), 0);
    }

    #[test]
    fn test_render_summary_labels() {
        let results = vec![
            passed("Health Check"),
            failed(
                "Root Endpoint",
                ProbeError::UnexpectedStatus {
                    status: 502,
                    body: "bad gateway".to_string(),
                },
            ),
            failed("Predict Endpoint", ProbeError::NoImage),
        ];

        let summary = render_summary(&results);
        assert!(summary.contains("Test Summary:"));
        assert!(summary.contains("✓ PASS: Health Check"));
        assert!(summary.contains("✗ FAIL: Root Endpoint"));
        assert!(summary.contains("✗ SKIP: Predict Endpoint"));
        assert!(summary.contains("42.00ms"));
        assert!(summary.trim_end().ends_with("Some tests failed!"));
    }

    #[test]
    fn test_render_summary_all_passed() {
        let summary = render_summary(&[passed("Health Check")]);
        assert!(summary.trim_end().ends_with("All tests passed!"));
    }
}
