use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if let Ok(read_dir) = fs::read_dir(&dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                    files.push(path);
                }
            }
        }
    }
    files
}

fn file_contains_any(path: &Path, needles: &[&str]) -> bool {
    fs::read_to_string(path)
        .map(|c| needles.iter().any(|n| c.contains(n)))
        .unwrap_or(false)
}

/// Denormalized counters may only be written from the repository layer,
/// inside the transaction that mutates the paired relation row. A
/// counter UPDATE anywhere else is a consistency hazard.
#[test]
fn counter_columns_written_only_from_repository() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");

    let counter_writes = [
        "SET likes_count",
        "SET comments_count",
        "SET reply_count",
        "SET reported_count",
    ];

    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root) {
        let path_str = file.to_string_lossy().to_string();
        if path_str.contains("/repository/") {
            continue;
        }
        if file_contains_any(&file, &counter_writes) {
            offenders.push(path_str);
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Counter columns must only be written from src/repository/. Offenders: {:?}",
            offenders
        );
    }
}

/// reported_count is monotonic: no code path deletes report rows.
#[test]
fn no_report_retraction_path_exists() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");

    let retractions = ["DELETE FROM feed_reports", "DELETE FROM comment_reports"];

    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root) {
        if file_contains_any(&file, &retractions) {
            offenders.push(file.to_string_lossy().to_string());
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Reports are create-only; found retraction paths in: {:?}",
            offenders
        );
    }
}
