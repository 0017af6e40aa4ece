use serde::Serialize;

use lyra_core::config::{AppConfig, LoadOptions};
use lyra_store::{CatalogStore, JsonCatalogStore, JsonOrderLedger, OrderLedger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(options: LoadOptions, json_output: bool) -> String {
    let report = build_report(options);

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report(options: LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog(&config));
            checks.push(check_ledger(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_readability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "ledger_readability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> DoctorCheck {
    let result = with_runtime(|runtime| {
        let store = JsonCatalogStore::new(&config.store.catalog_path);
        runtime.block_on(store.load())
    });

    match result {
        Ok(Ok(catalog)) => DoctorCheck {
            name: "catalog_readability",
            status: CheckStatus::Pass,
            details: format!("catalog readable with {} products", catalog.len()),
        },
        Ok(Err(error)) => DoctorCheck {
            name: "catalog_readability",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
        Err(details) => {
            DoctorCheck { name: "catalog_readability", status: CheckStatus::Fail, details }
        }
    }
}

fn check_ledger(config: &AppConfig) -> DoctorCheck {
    let result = with_runtime(|runtime| {
        let ledger = JsonOrderLedger::new(&config.store.orders_path);
        runtime.block_on(ledger.last())
    });

    match result {
        Ok(Ok(Some(order))) => DoctorCheck {
            name: "ledger_readability",
            status: CheckStatus::Pass,
            details: format!("ledger readable, most recent order {}", order.id.0),
        },
        Ok(Ok(None)) => DoctorCheck {
            name: "ledger_readability",
            status: CheckStatus::Pass,
            details: "ledger readable, no orders yet".to_string(),
        },
        Ok(Err(error)) => DoctorCheck {
            name: "ledger_readability",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
        Err(details) => {
            DoctorCheck { name: "ledger_readability", status: CheckStatus::Fail, details }
        }
    }
}

fn with_runtime<T>(
    run: impl FnOnce(&tokio::runtime::Runtime) -> T,
) -> Result<T, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map(|runtime| run(&runtime))
        .map_err(|error| format!("failed to initialize async runtime: {error}"))
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "SKIP",
        };
        lines.push(format!("  [{status}] {}: {}", check.name, check.details));
    }
    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
