//! Saving and loading the profile store through the JSON file storage

use chrono::{NaiveDate, NaiveTime};
use moddy::core::catalog::Catalogs;
use moddy::core::commands::{AddModules, Command, NewProfile, ShowTarget, TaskSpec};
use moddy::core::error::ModelError;
use moddy::core::models::{Deadline, Grade, ModuleCode, Profile};
use moddy::core::profile_store::ProfileStore;
use moddy::core::session::Session;
use moddy::core::storage::{JsonFileStorage, ProfileStorage};
use moddy::logger::Logger;
use std::fs;
use tempfile::TempDir;

fn code(raw: &str) -> ModuleCode {
    ModuleCode::parse(raw).expect("valid module code")
}

fn populated_store(catalogs: &Catalogs) -> ProfileStore {
    let mut store = ProfileStore::new();
    store
        .add_profile(Profile::new(
            "Mei Ling".into(),
            "Computer Science".into(),
            2,
            Some("Computer Security".into()),
        ))
        .expect("profile");
    store
        .add_modules_to_semester(1, &[code("CS1101S"), code("MA1521")], &catalogs.modules)
        .expect("semester 1");
    store
        .add_modules_to_semester(2, &[code("CS2040"), code("CS2107")], &catalogs.modules)
        .expect("semester 2");
    store.set_grade(&code("CS1101S"), Grade::A).expect("grade");
    store.set_grade(&code("MA1521"), Grade::BMinus).expect("grade");
    store
        .add_deadlines(
            &code("CS2040"),
            vec![
                Deadline::undated(code("CS2040"), "Read lecture notes"),
                Deadline::new(
                    code("CS2040"),
                    "Problem set 1",
                    NaiveDate::from_ymd_opt(2024, 9, 14).expect("date"),
                    NaiveTime::from_hms_opt(18, 0, 0).expect("time"),
                ),
            ],
        )
        .expect("tasks");
    store
        .add_deadlines(
            &code("CS2107"),
            vec![Deadline::new(
                code("CS2107"),
                "CTF writeup",
                NaiveDate::from_ymd_opt(2024, 9, 2).expect("date"),
                NaiveTime::from_hms_opt(9, 0, 0).expect("time"),
            )],
        )
        .expect("tasks");
    store
}

#[test]
fn test_save_then_load_is_observationally_equal() {
    let dir = TempDir::new().expect("temp dir");
    let storage = JsonFileStorage::new(dir.path().join("moddy.json"));
    let catalogs = Catalogs::bundled().expect("bundled catalogs");

    let store = populated_store(&catalogs);
    storage.save(&store).expect("save");
    let loaded = storage.load().expect("load");

    assert_eq!(loaded.profiles(), store.profiles());
    assert_eq!(loaded.deadlines(), store.deadlines());
    assert_eq!(loaded.cap().expect("profile"), store.cap().expect("profile"));

    let order: Vec<_> = loaded
        .deadlines()
        .iter()
        .map(|d| d.description.as_str())
        .collect();
    assert_eq!(order, vec!["CTF writeup", "Problem set 1", "Read lecture notes"]);

    let profile = loaded.active_profile().expect("profile");
    assert_eq!(profile.semester_of(&code("CS2107")), Some(2));
    assert_eq!(profile.focus_area.as_deref(), Some("Computer Security"));
}

#[test]
fn test_loaded_store_still_enforces_invariants() {
    let dir = TempDir::new().expect("temp dir");
    let storage = JsonFileStorage::new(dir.path().join("moddy.json"));
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    storage.save(&populated_store(&catalogs)).expect("save");

    let mut loaded = storage.load().expect("load");
    let err = loaded
        .add_modules_to_semester(3, &[code("CS2040")], &catalogs.modules)
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateEntity { .. }));

    let err = loaded
        .add_profile(Profile::new("MEI LING".into(), "Computer Science".into(), 1, None))
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateEntity { .. }));
}

fn reloaded(store: &ProfileStore) -> ProfileStore {
    let dir = TempDir::new().expect("temp dir");
    let storage = JsonFileStorage::new(dir.path().join("moddy.json"));
    storage.save(store).expect("save");
    storage.load().expect("load")
}

fn labels(store: &ProfileStore) -> Vec<String> {
    store
        .deadlines()
        .iter()
        .map(|d| format!("{}:{}", d.module_code, d.description))
        .collect()
}

#[test]
fn test_equal_due_times_order_survives_reload() {
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    let mut store = ProfileStore::new();
    store
        .add_profile(Profile::new("Wei".into(), "Computer Science".into(), 1, None))
        .expect("profile");
    store
        .add_modules_to_semester(1, &[code("CS1101S"), code("MA1521")], &catalogs.modules)
        .expect("enroll");
    let date = NaiveDate::from_ymd_opt(2024, 9, 1).expect("date");
    let time = NaiveTime::from_hms_opt(10, 0, 0).expect("time");
    store
        .add_deadlines(&code("MA1521"), vec![Deadline::new(code("MA1521"), "Quiz", date, time)])
        .expect("tasks");
    store
        .add_deadlines(
            &code("CS1101S"),
            vec![Deadline::new(code("CS1101S"), "Mission", date, time)],
        )
        .expect("tasks");

    assert_eq!(labels(&store), vec!["CS1101S:Mission", "MA1521:Quiz"]);
    let loaded = reloaded(&store);
    assert_eq!(labels(&loaded), labels(&store));
    assert_eq!(loaded.deadlines(), store.deadlines());
}

#[test]
fn test_edited_undated_task_order_survives_reload() {
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    let mut store = ProfileStore::new();
    store
        .add_profile(Profile::new("Wei".into(), "Computer Science".into(), 1, None))
        .expect("profile");
    store
        .add_modules_to_semester(1, &[code("CS1101S")], &catalogs.modules)
        .expect("enroll");
    store
        .add_deadlines(
            &code("CS1101S"),
            vec![
                Deadline::undated(code("CS1101S"), "Beta"),
                Deadline::undated(code("CS1101S"), "Alpha"),
                Deadline::undated(code("CS1101S"), "Delta"),
            ],
        )
        .expect("tasks");
    store
        .edit_deadline(&code("CS1101S"), "alpha", Some("Aardvark"), None)
        .expect("rename");

    assert_eq!(
        labels(&store),
        vec!["CS1101S:Aardvark", "CS1101S:Beta", "CS1101S:Delta"]
    );
    assert_eq!(labels(&reloaded(&store)), labels(&store));
}

/// Saved JSON of a one-profile store, for tampering
fn saved_json(catalogs: &Catalogs) -> serde_json::Value {
    let store = populated_store(catalogs);
    serde_json::json!({ "profiles": store.profiles() })
}

fn load_json(json: &serde_json::Value) -> Result<ProfileStore, ModelError> {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("moddy.json");
    fs::write(&path, json.to_string()).expect("write");
    JsonFileStorage::new(&path).load()
}

#[test]
fn test_load_rejects_module_in_two_semesters() {
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    let mut json = saved_json(&catalogs);
    let semesters = &mut json["profiles"][0]["semesters"];
    let copy = semesters["1"][0].clone();
    semesters["2"]
        .as_array_mut()
        .expect("semester 2 modules")
        .push(copy);

    let err = load_json(&json).unwrap_err();
    assert_eq!(err.to_string(), "duplicate enrolled module: CS1101S");
}

#[test]
fn test_load_rejects_semesters_out_of_range() {
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    let mut json = saved_json(&catalogs);
    json["profiles"][0]["current_semester"] = serde_json::json!(0);
    assert!(matches!(
        load_json(&json),
        Err(ModelError::InvalidArgument(_))
    ));

    let mut json = saved_json(&catalogs);
    let semesters = json["profiles"][0]["semesters"]
        .as_object_mut()
        .expect("semester map");
    let moved = semesters.remove("1").expect("semester 1");
    semesters.insert("11".to_string(), moved);
    assert!(matches!(
        load_json(&json),
        Err(ModelError::InvalidArgument(_))
    ));
}

#[test]
fn test_load_rejects_task_filed_under_other_module() {
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    let mut json = saved_json(&catalogs);
    let cs2040 = json["profiles"][0]["semesters"]["2"]
        .as_array_mut()
        .expect("semester 2 modules")
        .iter_mut()
        .find(|m| m["info"]["code"] == "CS2040")
        .expect("CS2040 enrolled");
    cs2040["deadlines"][0]["module_code"] = serde_json::json!("CS2107");

    assert!(matches!(
        load_json(&json),
        Err(ModelError::InvalidArgument(_))
    ));
}

#[test]
fn test_repeated_profile_names_are_rejected_on_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("moddy.json");
    let single = serde_json::to_value(Profile::new(
        "Sam".into(),
        "Computer Science".into(),
        1,
        None,
    ))
    .expect("serialize");
    let mut other = single.clone();
    other["name"] = serde_json::Value::String("sam".into());
    let json = serde_json::json!({ "profiles": [single, other] });
    fs::write(&path, json.to_string()).expect("write");

    let err = JsonFileStorage::new(&path).load().unwrap_err();
    assert!(matches!(err, ModelError::DuplicateEntity { .. }));
}

#[test]
fn test_session_persists_mutations_only() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("data").join("moddy.json");
    let catalogs = Catalogs::bundled().expect("bundled catalogs");

    let mut session = Session::open(JsonFileStorage::new(&path), catalogs, Logger::quiet())
        .expect("open");
    assert!(session.store().profiles().is_empty());

    session
        .execute(Command::Show(ShowTarget::Module(code("CS1101S"))))
        .expect("show");
    assert!(!path.exists());

    session
        .execute(Command::NewProfile(NewProfile {
            name: "Ravi".into(),
            course: "Information Security".into(),
            current_semester: 1,
            focus_area: None,
        }))
        .expect("new profile");
    session
        .execute(Command::Add(AddModules {
            codes: vec![code("CS1101S")],
            semester: Some(1),
            grade: None,
            tasks: vec![TaskSpec {
                description: "Mission 1".into(),
                due: None,
            }],
        }))
        .expect("add");
    assert!(path.exists());

    let reopened = Session::open(
        JsonFileStorage::new(&path),
        Catalogs::bundled().expect("bundled catalogs"),
        Logger::quiet(),
    )
    .expect("reopen");
    let profile = reopened.store().active_profile().expect("profile");
    assert_eq!(profile.name, "Ravi");
    assert_eq!(profile.course, "Information Security");
    assert!(profile.is_enrolled(&code("CS1101S")));
    assert_eq!(reopened.store().deadlines().len(), 1);
    assert!(reopened.store().selection().get().is_none());
}

#[test]
fn test_clear_is_persisted() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("moddy.json");
    let catalogs = Catalogs::bundled().expect("bundled catalogs");
    JsonFileStorage::new(&path)
        .save(&populated_store(&catalogs))
        .expect("save");

    let mut session =
        Session::open(JsonFileStorage::new(&path), catalogs, Logger::quiet()).expect("open");
    assert_eq!(session.store().profiles().len(), 1);
    session.execute(Command::Clear).expect("clear");

    let loaded = JsonFileStorage::new(&path).load().expect("load");
    assert!(loaded.profiles().is_empty());
    assert!(loaded.deadlines().is_empty());
}
