#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TODAY: &str = "2025-03-10";

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("millcal").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.extend(["--json", "--today", TODAY]);
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn init_empty(&self) {
        self.run_ok(&["init", "--empty"]);
    }

    fn init_seeded(&self, seed: &str) -> Value {
        self.run_ok(&["init", "--seed", seed])
    }

    fn add(&self, title: &str, date: &str, time: &str) -> String {
        let v = self.run_ok(&["add", title, "--date", date, "--time", time]);
        v["data"]["item"]["id"].as_str().unwrap().to_string()
    }

    fn list(&self, tab: &str) -> Vec<Value> {
        let v = self.run_ok(&["list", "--tab", tab]);
        v["data"]["items"].as_array().unwrap().clone()
    }

    fn ids(items: &[Value]) -> Vec<String> {
        items
            .iter()
            .map(|i| i["id"].as_str().unwrap().to_string())
            .collect()
    }

    fn version(&self) -> i64 {
        self.run_ok(&["status"])["data"]["version"].as_i64().unwrap()
    }
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init_seeds_board() {
    let env = TestEnv::new();
    let v = env.init_seeded("42");
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with(".millcal/millcal.db"));
    assert!(PathBuf::from(path).exists());
    assert_eq!(v["data"]["window_days"], 7);
    assert_eq!(v["data"]["move_policy"], "preserve");

    let generated = v["data"]["generated"].as_u64().unwrap();
    assert!((14..=35).contains(&generated), "{generated}");
}

#[test]
fn test_init_idempotent_keeps_board() {
    let env = TestEnv::new();
    env.init_seeded("42");
    let before = env.list("active");

    let v = env.run_ok(&["init", "--seed", "7"]);
    assert_eq!(v["data"]["generated"], 0);
    assert_eq!(TestEnv::ids(&env.list("active")), TestEnv::ids(&before));
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["status"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
    assert_eq!(v["error"]["retryable"], false);
}

#[test]
fn test_init_empty() {
    let env = TestEnv::new();
    env.init_empty();
    let v = env.run_ok(&["status"]);
    assert_eq!(v["data"]["summary"]["total_active"], 0);
    assert_eq!(v["data"]["version"], 0);
}

#[test]
fn test_commands_find_project_from_subdirectory() {
    let env = TestEnv::new();
    env.init_empty();
    let sub = env.dir.path().join("orders").join("march");
    fs::create_dir_all(&sub).unwrap();

    let output = env
        .cmd()
        .current_dir(&sub)
        .args(["status", "--json"])
        .output()
        .expect("run");
    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["success"], true);
}

// ─── 2. generate ───────────────────────────────────────────────────

#[test]
fn test_generate_window_starts_today() {
    let env = TestEnv::new();
    env.init_empty();
    let v = env.run_ok(&["generate", "--seed", "3", "--days", "5"]);
    assert_eq!(v["data"]["start"], TODAY);
    assert_eq!(v["data"]["window_days"], 5);

    let all: Vec<Value> = ["active", "completed"]
        .iter()
        .flat_map(|t| env.list(t))
        .collect();
    assert_eq!(all.len() as u64, v["data"]["generated"].as_u64().unwrap());
    for item in &all {
        let cat = item["category"].as_str().unwrap();
        assert!(["task", "delivery", "event"].contains(&cat), "{cat}");
    }
}

#[test]
fn test_generate_replaces_board() {
    let env = TestEnv::new();
    env.init_seeded("1");
    let custom = env.add("Greige fabric intake", "2025-03-11", "10:00 AM");

    env.run_ok(&["generate", "--seed", "2"]);
    let v = env.run_err(&["show", &custom]);
    assert_eq!(v["error"]["code"], "ITEM_NOT_FOUND");
}

#[test]
fn test_generate_same_seed_same_board() {
    let a = TestEnv::new();
    let b = TestEnv::new();
    a.init_seeded("99");
    b.init_seeded("99");
    assert_eq!(TestEnv::ids(&a.list("active")), TestEnv::ids(&b.list("active")));
    assert_eq!(TestEnv::ids(&a.list("completed")), TestEnv::ids(&b.list("completed")));
}

#[test]
fn test_generate_days_sets_board_width() {
    let env = TestEnv::new();
    env.init_seeded("1");
    env.run_ok(&["generate", "--seed", "1", "--days", "14"]);

    let board = env.run_ok(&["board"]);
    let columns = board["data"]["days"].as_array().unwrap();
    assert_eq!(columns.len(), 14);
    let shown: u64 = columns.iter().map(|c| c["count"].as_u64().unwrap()).sum();
    assert_eq!(shown, board["data"]["summary"]["total_active"].as_u64().unwrap());

    let status = env.run_ok(&["status"]);
    assert_eq!(status["data"]["window_days"], 14);
    for day in status["data"]["days"].as_array().unwrap() {
        assert!(columns.iter().any(|c| &c["date"] == day), "{day} not on board");
    }
}

#[test]
fn test_generate_rejects_window_past_last_date() {
    let env = TestEnv::new();
    env.init_empty();
    let output = env
        .cmd()
        .args(["generate", "--seed", "1", "--json", "--today", "+262142-12-30"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(env.version(), 0);
}

#[test]
fn test_window_days_is_capped() {
    let env = TestEnv::new();
    let v = env.run_err(&["init", "--days", "400"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    env.init_empty();
    let v = env.run_err(&["generate", "--days", "100000"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["generate", "--days", "0"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(env.version(), 0);
}

// ─── 3. add ────────────────────────────────────────────────────────

#[test]
fn test_add_defaults() {
    let env = TestEnv::new();
    env.init_empty();
    let v = env.run_ok(&["add", "Dye lot 14", "--date", "2025-03-12"]);
    let item = &v["data"]["item"];
    assert_eq!(item["status"], "pending");
    assert_eq!(item["category"], "task");
    assert_eq!(item["priority"], "medium");
    assert_eq!(item["time"], "09:00 AM");
    assert_eq!(item["assigned_by"], "Current User");
    assert!(item["id"].as_str().unwrap().starts_with("custom-"));
    assert_eq!(v["data"]["date"], "2025-03-12");
    assert_eq!(v["data"]["feedback"]["message"], "Event added successfully");
    assert_eq!(v["data"]["notifications"].as_array().unwrap().len(), 0);
}

#[test]
fn test_add_normalizes_time() {
    let env = TestEnv::new();
    env.init_empty();
    let v = env.run_ok(&[
        "add", "Container loading", "--date", "2025-03-12", "--time", "14:30", "--type", "delivery",
        "--priority", "high",
    ]);
    assert_eq!(v["data"]["item"]["time"], "02:30 PM");
    assert_eq!(v["data"]["item"]["category"], "delivery");

    let s = env.run_ok(&["status"]);
    assert_eq!(s["data"]["summary"]["deliveries"], 1);
    assert_eq!(s["data"]["summary"]["high_priority"], 1);
}

#[test]
fn test_add_with_assignee_emits_notification() {
    let env = TestEnv::new();
    env.init_empty();
    let v = env.run_ok(&[
        "add", "Inspect silk shipment", "--date", "2025-03-12", "--department", "Quality Control",
        "--assign", "3",
    ]);
    assert_eq!(
        v["data"]["feedback"]["message"],
        "Task assigned to Mike Wilson successfully"
    );
    let notes = v["data"]["notifications"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["assignee_id"], "3");
    assert_eq!(notes[0]["assignee_name"], "Mike Wilson");
    assert_eq!(notes[0]["item_title"], "Inspect silk shipment");
}

#[test]
fn test_add_validation_leaves_board_unchanged() {
    let env = TestEnv::new();
    env.init_seeded("5");
    let version = env.version();
    let active = env.list("active");

    let v = env.run_err(&["add", "", "--date", "2025-01-01"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(v["error"]["message"], "Please fill in required fields");
    assert_eq!(v["feedback"]["kind"], "error");

    let v = env.run_err(&["add", "X"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["add", "X", "--date", ""]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["add", "X", "--date", "next tuesday"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["add", "X", "--date", "2025-03-12", "--type", "invoice"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    assert_eq!(env.version(), version);
    assert_eq!(env.list("active"), active);
}

// ─── 4. status transitions ─────────────────────────────────────────

#[test]
fn test_show_lists_actions_by_status() {
    let env = TestEnv::new();
    env.init_empty();
    let id = env.add("Pattern grading", "2025-03-11", "10:00 AM");

    let v = env.run_ok(&["show", &id]);
    assert_eq!(v["data"]["date"], "2025-03-11");
    assert_eq!(v["data"]["actions"], serde_json::json!(["confirm", "complete", "cancel"]));

    env.run_ok(&["confirm", &id]);
    let v = env.run_ok(&["show", &id]);
    assert_eq!(v["data"]["item"]["status"], "confirmed");
    assert_eq!(v["data"]["actions"], serde_json::json!(["complete", "cancel"]));
}

#[test]
fn test_complete_and_cancel_feedback() {
    let env = TestEnv::new();
    env.init_empty();
    let a = env.add("Wash test", "2025-03-11", "10:00 AM");
    let b = env.add("Shade matching", "2025-03-11", "11:00 AM");

    let v = env.run_ok(&["complete", &a]);
    assert_eq!(v["data"]["item"]["status"], "completed");
    assert_eq!(v["data"]["feedback"]["message"], "Task completed successfully");

    let v = env.run_ok(&["cancel", &b]);
    assert_eq!(v["data"]["item"]["status"], "cancelled");
    assert_eq!(v["data"]["feedback"]["message"], "Task cancelled successfully");
}

#[test]
fn test_terminal_status_is_one_way() {
    let env = TestEnv::new();
    env.init_empty();
    let id = env.add("Final inspection", "2025-03-11", "10:00 AM");
    env.run_ok(&["complete", &id]);

    for cmd in ["cancel", "confirm", "complete"] {
        let v = env.run_err(&[cmd, &id]);
        assert_eq!(v["error"]["code"], "INVALID_STATUS_TRANSITION");
    }
    let v = env.run_ok(&["show", &id]);
    assert_eq!(v["data"]["item"]["status"], "completed");
    assert_eq!(v["data"]["actions"], serde_json::json!([]));
}

#[test]
fn test_unknown_and_ambiguous_references() {
    let env = TestEnv::new();
    env.init_empty();
    env.add("A", "2025-03-11", "10:00 AM");
    env.add("B", "2025-03-11", "11:00 AM");

    let v = env.run_err(&["complete", "nope"]);
    assert_eq!(v["error"]["code"], "ITEM_NOT_FOUND");
    let v = env.run_err(&["complete", "custom-"]);
    assert_eq!(v["error"]["code"], "AMBIGUOUS_REF");
}

// ─── 5. move ───────────────────────────────────────────────────────

#[test]
fn test_move_preserves_id_by_default() {
    let env = TestEnv::new();
    env.init_empty();
    let id = env.add("Export shipment", "2025-03-11", "10:00 AM");
    let other = env.add("Client visit", "2025-03-13", "08:00 AM");

    let v = env.run_ok(&["move", &id, "--to", "2025-03-13"]);
    assert_eq!(v["data"]["item"]["id"], id.as_str());
    assert_eq!(v["data"]["previous_id"], id.as_str());
    assert_eq!(v["data"]["date"], "2025-03-13");
    assert_eq!(v["data"]["feedback"]["message"], "Event moved to 3/13/2025");

    let items = env.list("active");
    let on_13: Vec<&Value> = items.iter().filter(|i| i["date"] == "2025-03-13").collect();
    assert_eq!(on_13.len(), 2);
    assert_eq!(on_13[0]["id"], other.as_str());
    assert!(items.iter().all(|i| i["date"] != "2025-03-11"));
}

#[test]
fn test_move_remint_policy() {
    let env = TestEnv::new();
    env.run_ok(&["init", "--empty", "--move-policy", "remint"]);
    let id = env.add("Trim delivery", "2025-03-11", "10:00 AM");

    let v = env.run_ok(&["move", &id, "--to", "2025-03-12"]);
    let new_id = v["data"]["item"]["id"].as_str().unwrap().to_string();
    assert_ne!(new_id, id);
    assert!(new_id.starts_with(&format!("{id}-moved-")));
    assert_eq!(v["data"]["item"]["title"], "Trim delivery");
    assert_eq!(v["data"]["item"]["time"], "10:00 AM");

    let v = env.run_err(&["show", &id]);
    assert_eq!(v["error"]["code"], "ITEM_NOT_FOUND");
    let items = env.list("active");
    assert_eq!(TestEnv::ids(&items), vec![new_id]);
}

#[test]
fn test_move_same_day_is_noop() {
    let env = TestEnv::new();
    env.run_ok(&["init", "--empty", "--move-policy", "remint"]);
    let id = env.add("Supplier audit", "2025-03-11", "10:00 AM");

    let v = env.run_ok(&["move", &id, "--to", "2025-03-11"]);
    assert_eq!(v["data"]["item"]["id"], id.as_str());
    assert_eq!(v["data"]["feedback"]["message"], "");
    assert_eq!(TestEnv::ids(&env.list("active")), vec![id]);
}

#[test]
fn test_move_from_wrong_day() {
    let env = TestEnv::new();
    env.init_empty();
    let id = env.add("Supplier audit", "2025-03-11", "10:00 AM");
    let v = env.run_err(&["move", &id, "--from", "2025-03-15", "--to", "2025-03-12"]);
    assert_eq!(v["error"]["code"], "ITEM_NOT_FOUND");
}

// ─── 6. projections ────────────────────────────────────────────────

#[test]
fn test_same_time_keeps_insertion_order() {
    let env = TestEnv::new();
    env.init_empty();
    let nine = env.add("Nine", "2025-03-11", "09:00 AM");
    let first = env.add("First", "2025-03-11", "08:30 AM");
    let second = env.add("Second", "2025-03-11", "08:30 AM");

    assert_eq!(TestEnv::ids(&env.list("active")), vec![first, second, nine]);
}

#[test]
fn test_noon_before_afternoon() {
    let env = TestEnv::new();
    env.init_empty();
    let one = env.add("One", "2025-03-11", "01:00 PM");
    let noon = env.add("Noon", "2025-03-11", "12:00 PM");
    assert_eq!(TestEnv::ids(&env.list("active")), vec![noon, one]);
}

#[test]
fn test_days_without_active_items_are_omitted() {
    let env = TestEnv::new();
    env.init_empty();
    let a = env.add("A", "2025-03-11", "10:00 AM");
    env.add("B", "2025-03-12", "10:00 AM");
    env.run_ok(&["complete", &a]);

    let v = env.run_ok(&["status"]);
    assert_eq!(v["data"]["days"], serde_json::json!(["2025-03-12"]));
    assert_eq!(v["data"]["summary"]["completed"], 1);
    assert!(env.list("active").iter().all(|i| i["date"] != "2025-03-11"));
}

#[test]
fn test_partitions_cover_board() {
    let env = TestEnv::new();
    env.init_seeded("8");
    let active = env.list("active");
    let id = active[0]["id"].as_str().unwrap().to_string();
    env.run_ok(&["cancel", &id]);

    let active = TestEnv::ids(&env.list("active"));
    let completed = TestEnv::ids(&env.list("completed"));
    let cancelled = TestEnv::ids(&env.list("cancelled"));
    assert_eq!(cancelled, vec![id.clone()]);

    let mut all: Vec<String> = active.iter().chain(&completed).chain(&cancelled).cloned().collect();
    let total = all.len();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), total, "an item appears in two partitions");

    let s = env.run_ok(&["status"]);
    assert_eq!(s["data"]["summary"]["total_active"].as_u64().unwrap() as usize, active.len());
    assert_eq!(s["data"]["summary"]["completed"].as_u64().unwrap() as usize, completed.len());
}

#[test]
fn test_board_layout() {
    let env = TestEnv::new();
    env.init_empty();
    env.add("Cutting run", "2025-03-12", "10:00 AM");

    let v = env.run_ok(&["board", "--expand", "2025-03-12"]);
    let days = v["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], TODAY);
    assert_eq!(days[0]["is_today"], true);
    assert_eq!(days[0]["count"], 0);
    assert_eq!(days[2]["date"], "2025-03-12");
    assert_eq!(days[2]["expanded"], true);
    assert_eq!(days[2]["items"][0]["title"], "Cutting run");
    assert_eq!(days[1]["expanded"], false);
}

#[test]
fn test_end_to_end_complete_generated_item() {
    let env = TestEnv::new();
    env.init_seeded("42");

    let pending = env
        .list("active")
        .into_iter()
        .find(|i| i["status"] == "pending")
        .expect("seeded board has a pending item");
    let id = pending["id"].as_str().unwrap().to_string();

    env.run_ok(&["complete", &id]);
    assert!(TestEnv::ids(&env.list("completed")).contains(&id));
    assert!(!TestEnv::ids(&env.list("active")).contains(&id));
    let board = env.run_ok(&["board"]);
    for day in board["data"]["days"].as_array().unwrap() {
        for item in day["items"].as_array().unwrap() {
            assert_ne!(item["id"], id.as_str());
        }
    }
}

#[test]
fn test_list_rejects_unknown_tab() {
    let env = TestEnv::new();
    env.init_empty();
    let v = env.run_err(&["list", "--tab", "archived"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 7. staff & config ─────────────────────────────────────────────

#[test]
fn test_staff_by_department() {
    let env = TestEnv::new();
    let v = env.run_ok(&["staff", "--department", "design"]);
    let staff = v["data"]["staff"].as_array().unwrap();
    assert_eq!(staff.len(), 2);
    assert_eq!(staff[0]["name"], "David Brown");

    let v = env.run_err(&["staff", "--department", "Accounts"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_config_controls_defaults() {
    let env = TestEnv::new();
    env.init_empty();
    let config = env.dir.path().join(".millcal").join("config.json");
    fs::write(
        &config,
        r#"{"default_time": "07:30 AM", "current_user": "Floor Manager", "window_days": 3}"#,
    )
    .unwrap();

    let v = env.run_ok(&["add", "Shift handover", "--date", "2025-03-10"]);
    assert_eq!(v["data"]["item"]["time"], "07:30 AM");
    assert_eq!(v["data"]["item"]["assigned_by"], "Floor Manager");

    let v = env.run_ok(&["board"]);
    assert_eq!(v["data"]["days"].as_array().unwrap().len(), 3);
}

#[test]
fn test_malformed_config() {
    let env = TestEnv::new();
    env.init_empty();
    fs::write(env.dir.path().join(".millcal").join("config.json"), "{ nope").unwrap();
    let v = env.run_err(&["add", "X", "--date", "2025-03-10"]);
    assert_eq!(v["error"]["code"], "CONFIG_ERROR");
}

// ─── 8. text output ────────────────────────────────────────────────

#[test]
fn test_text_output() {
    let env = TestEnv::new();
    env.cmd()
        .args(["init", "--empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized millcal at"));

    env.cmd()
        .args(["add", "Export shipment", "--date", "2025-03-11", "--assign", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task assigned to James Martinez successfully"));

    env.cmd()
        .args(["board", "--today", TODAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Today - Mon 2025-03-10"))
        .stdout(predicate::str::contains("No events"))
        .stdout(predicate::str::contains("Export shipment"));

    env.cmd()
        .args(["list", "--tab", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No items found"));
}

#[test]
fn test_text_errors_go_to_stderr() {
    let env = TestEnv::new();
    env.cmd()
        .args(["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));

    env.cmd().args(["init", "--empty"]).assert().success();
    env.cmd()
        .args(["add", "", "--date", "2025-03-11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in required fields"));
}
