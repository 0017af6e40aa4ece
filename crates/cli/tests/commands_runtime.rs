use std::path::Path;

use serde_json::Value;

use lyra_cli::commands::{self, CommandResult};
use lyra_core::config::{ConfigOverrides, LoadOptions};

fn options(dir: &Path) -> LoadOptions {
    LoadOptions {
        overrides: ConfigOverrides {
            catalog_path: Some(dir.join("catalog.json")),
            orders_path: Some(dir.join("orders.json")),
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    }
}

fn envelope(result: &CommandResult) -> Value {
    serde_json::from_str(&result.output).expect("command output is a JSON envelope")
}

fn message(result: &CommandResult) -> String {
    envelope(result)["message"].as_str().expect("message field").to_string()
}

#[test]
fn seed_search_order_and_last_order_cover_the_shopping_path() {
    let dir = tempfile::tempdir().expect("tempdir");

    let seeded = commands::seed::run(options(dir.path()));
    assert_eq!(seeded.exit_code, 0, "seed failed: {}", seeded.output);
    assert!(dir.path().join("catalog.json").exists());
    assert!(dir.path().join("orders.json").exists());

    let searched = commands::search::run(options(dir.path()), Some("mug"));
    assert_eq!(searched.exit_code, 0);
    let listing = message(&searched);
    assert!(listing.contains("Aurora Mug"));
    assert!(listing.contains("Crimson Mug"));

    let empty = commands::last_order::run(options(dir.path()));
    assert_eq!(message(&empty), "You haven't placed any orders yet.");

    let placed =
        commands::order::run(options(dir.path()), r#"[{"product_id": "p1", "quantity": 2}]"#);
    assert_eq!(placed.exit_code, 0, "order failed: {}", placed.output);
    assert_eq!(message(&placed), "Order placed! ID: ord-1. Total: 998 INR.");

    let last = commands::last_order::run(options(dir.path()));
    assert_eq!(message(&last), "Your last order (ord-1) totals 998 INR with: 2x Aurora Mug.");
}

#[test]
fn ambiguous_order_fails_without_recording_anything() {
    let dir = tempfile::tempdir().expect("tempdir");
    commands::seed::run(options(dir.path()));

    let rejected = commands::order::run(options(dir.path()), r#"[{"name": "mug"}]"#);
    assert_eq!(rejected.exit_code, 1);
    let envelope = envelope(&rejected);
    assert_eq!(envelope["error_class"], "order_rejected");
    let reason = envelope["message"].as_str().expect("message");
    assert!(reason.contains("Aurora Mug"));
    assert!(reason.contains("Crimson Mug"));

    let last = commands::last_order::run(options(dir.path()));
    assert_eq!(message(&last), "You haven't placed any orders yet.");
}

#[test]
fn malformed_items_are_rejected_before_any_store_access() {
    let dir = tempfile::tempdir().expect("tempdir");
    commands::seed::run(options(dir.path()));

    let not_json = commands::order::run(options(dir.path()), "two mugs please");
    assert_eq!(not_json.exit_code, 2);
    assert_eq!(envelope(&not_json)["error_class"], "invalid_items");

    let no_identifier = commands::order::run(options(dir.path()), r#"[{"quantity": 2}]"#);
    assert_eq!(no_identifier.exit_code, 2);
    assert!(message(&no_identifier).contains("Must contain product_id, id, or name"));
}

#[test]
fn doctor_reports_pass_after_seed_and_fail_without_a_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    commands::seed::run(options(dir.path()));

    let report: Value = serde_json::from_str(&commands::doctor::run(options(dir.path()), true))
        .expect("doctor json");
    assert_eq!(report["overall_status"], "pass");

    let bare = tempfile::tempdir().expect("tempdir");
    let report: Value = serde_json::from_str(&commands::doctor::run(options(bare.path()), true))
        .expect("doctor json");
    assert_eq!(report["overall_status"], "fail");
}
