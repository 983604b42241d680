//! Clean command integration tests
//!
//! Drives the full command over a directory of mixed files: concurrent
//! workers, routing, per-file failure isolation, and end-of-run audit flush.

use scour::cli::commands::clean::CleanArgs;
use scour::config::{AuditConfig, ScourConfig};
use tempfile::tempdir;

fn test_config(audit_dir: &std::path::Path) -> ScourConfig {
    ScourConfig {
        audit: AuditConfig {
            enabled: true,
            dir: audit_dir.to_path_buf(),
        },
        ..ScourConfig::default()
    }
}

#[tokio::test]
async fn test_clean_directory_of_text_files() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    let audit_dir = dir.path().join("audit");
    std::fs::create_dir_all(&input_dir).unwrap();

    std::fs::write(
        input_dir.join("contacts.txt"),
        "Dr. Jane Smith <jane@example.com>",
    )
    .unwrap();
    std::fs::write(input_dir.join("server.log"), "peer 192.168.1.1 connected").unwrap();
    std::fs::write(input_dir.join("empty.txt"), "").unwrap();

    let args = CleanArgs {
        input: input_dir,
        output: output_dir.clone(),
        action: None,
        use_ner: false,
        remove_images: false,
    };
    let code = args.execute(&test_config(&audit_dir)).await.unwrap();
    assert_eq!(code, 0);

    let contacts = std::fs::read_to_string(output_dir.join("contacts.txt")).unwrap();
    assert_eq!(contacts, "[REDACTED] <[REDACTED]>");
    let log = std::fs::read_to_string(output_dir.join("server.log")).unwrap();
    assert_eq!(log, "peer [REDACTED] connected");
    // Empty file commits unchanged.
    assert_eq!(
        std::fs::read_to_string(output_dir.join("empty.txt")).unwrap(),
        ""
    );

    // End-of-run flush produced all three artifacts.
    assert!(audit_dir.join("audit_log.csv").exists());
    assert!(audit_dir.join("audit_log.txt").exists());
    assert!(audit_dir.join("audit_log.xlsx").exists());

    let trail = std::fs::read_to_string(audit_dir.join("audit_log.csv")).unwrap();
    assert!(trail.contains("TITLED_NAME"));
    assert!(trail.contains("EMAIL"));
    assert!(trail.contains("IP_ADDRESS"));
}

#[tokio::test]
async fn test_unsupported_files_fail_without_stopping_the_run() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    let audit_dir = dir.path().join("audit");
    std::fs::create_dir_all(&input_dir).unwrap();

    std::fs::write(input_dir.join("fine.txt"), "mail jane@example.com").unwrap();
    std::fs::write(input_dir.join("cad.dwg"), [0u8, 1, 2]).unwrap();

    let args = CleanArgs {
        input: input_dir,
        output: output_dir.clone(),
        action: None,
        use_ner: false,
        remove_images: false,
    };
    let code = args.execute(&test_config(&audit_dir)).await.unwrap();

    // Run reports failure overall but the supported file was cleansed.
    assert_eq!(code, 1);
    assert!(output_dir.join("fine.txt").exists());
    assert!(!output_dir.join("cad.dwg").exists());
}

#[tokio::test]
async fn test_action_override_remove() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("one.txt");
    let output_dir = dir.path().join("out");
    let audit_dir = dir.path().join("audit");
    std::fs::write(&input, "192.168.1.1 called 9876543210").unwrap();

    let args = CleanArgs {
        input,
        output: output_dir.clone(),
        action: Some("remove".to_string()),
        use_ner: false,
        remove_images: false,
    };
    let code = args.execute(&test_config(&audit_dir)).await.unwrap();
    assert_eq!(code, 0);

    assert_eq!(
        std::fs::read_to_string(output_dir.join("one.txt")).unwrap(),
        " called "
    );
}
