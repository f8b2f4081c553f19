//! Integration tests for the profile store, deadline index and CAP

use chrono::{NaiveDate, NaiveTime};
use moddy::core::cap::{compute_cap, profile_cap};
use moddy::core::catalog::ModuleCatalog;
use moddy::core::deadline_index::{compare_deadlines, DeadlineIndex};
use moddy::core::error::{Entity, ModelError};
use moddy::core::models::{Deadline, Grade, ModuleCode, Profile};
use moddy::core::profile_store::{ProfileEdit, ProfileStore};
use std::cmp::Ordering;

fn code(raw: &str) -> ModuleCode {
    ModuleCode::parse(raw).expect("valid module code")
}

fn catalog() -> ModuleCatalog {
    ModuleCatalog::bundled().expect("bundled catalog")
}

fn dated(module: &str, desc: &str, day: u32, hour: u32) -> Deadline {
    Deadline::new(
        code(module),
        desc,
        NaiveDate::from_ymd_opt(2024, 11, day).expect("valid date"),
        NaiveTime::from_hms_opt(hour, 30, 0).expect("valid time"),
    )
}

fn is_sorted(index: &DeadlineIndex) -> bool {
    index
        .as_slice()
        .windows(2)
        .all(|pair| compare_deadlines(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Store with John in semester 1 taking MA1521 and CS1231
fn john() -> ProfileStore {
    let mut store = ProfileStore::new();
    store
        .add_profile(Profile::new(
            "John".into(),
            "Computer Science".into(),
            1,
            None,
        ))
        .expect("first profile");
    store
        .add_modules_to_semester(1, &[code("MA1521"), code("CS1231")], &catalog())
        .expect("enroll");
    store
}

#[test]
fn test_add_then_lookup_returns_profile() {
    let store = john();
    let found = store.profile_by_name("jOhN").expect("case-insensitive lookup");
    assert_eq!(found.name, "John");
    assert_eq!(found.course, "Computer Science");
}

#[test]
fn test_duplicate_name_any_case_is_rejected() {
    let mut store = john();
    let err = store
        .add_profile(Profile::new("JOHN".into(), "Computer Science".into(), 2, None))
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::DuplicateEntity {
            entity: Entity::Profile,
            ..
        }
    ));
    assert_eq!(store.profiles().len(), 1);
}

#[test]
fn test_missing_profile_is_not_found() {
    let store = john();
    assert!(matches!(
        store.profile_by_name("Mark"),
        Err(ModelError::NotFound {
            entity: Entity::Profile,
            ..
        })
    ));
}

#[test]
fn test_batch_add_reports_invalid_and_duplicates() {
    let mut store = john();
    let outcome = store
        .add_modules_to_semester(
            1,
            &[code("CS1101S"), code("CS1111"), code("MA1521")],
            &catalog(),
        )
        .expect("CS1101S can be added");

    assert_eq!(outcome.added, vec![code("CS1101S")]);
    assert_eq!(outcome.invalid, vec![code("CS1111")]);
    assert_eq!(outcome.duplicates, vec![code("MA1521")]);

    let profile = store.active_profile().expect("profile");
    assert_eq!(profile.semester_of(&code("CS1101S")), Some(1));
    assert!(!profile.is_enrolled(&code("CS1111")));
    assert_eq!(profile.module_count(), 3);
}

#[test]
fn test_duplicates_span_semesters() {
    let mut store = john();
    let err = store
        .add_modules_to_semester(2, &[code("MA1521")], &catalog())
        .unwrap_err();
    assert_eq!(err.to_string(), "duplicate enrolled module: MA1521");
    let profile = store.active_profile().expect("profile");
    assert_eq!(profile.semester_of(&code("MA1521")), Some(1));
}

#[test]
fn test_removing_module_cascades_to_deadlines() {
    let mut store = john();
    store
        .add_deadlines(
            &code("CS1231"),
            vec![
                dated("CS1231", "Quiz", 3, 10),
                Deadline::undated(code("CS1231"), "Read notes"),
            ],
        )
        .expect("tasks");
    store
        .add_deadlines(&code("MA1521"), vec![dated("MA1521", "Homework", 2, 9)])
        .expect("tasks");
    assert_eq!(store.deadlines().count_for(&code("CS1231")), 2);

    let outcome = store
        .remove_modules(&[code("CS1231"), code("IS1103")], &catalog())
        .expect("CS1231 is enrolled");
    assert_eq!(outcome.removed, vec![code("CS1231")]);
    assert_eq!(outcome.not_enrolled, vec![code("IS1103")]);
    assert_eq!(outcome.deadlines_removed, 2);

    assert_eq!(store.deadlines().count_for(&code("CS1231")), 0);
    assert_eq!(store.deadlines().len(), 1);
}

#[test]
fn test_removing_nothing_fails_without_change() {
    let mut store = john();
    let err = store
        .remove_modules(&[code("CS1111"), code("IS1103")], &catalog())
        .unwrap_err();
    assert_eq!(err.to_string(), "module not found: CS1111");
    assert_eq!(store.active_profile().expect("profile").module_count(), 2);
}

#[test]
fn test_reload_sorts_regardless_of_insertion_order() {
    let mut store = john();
    store
        .add_deadlines(
            &code("MA1521"),
            vec![
                Deadline::undated(code("MA1521"), "Revise"),
                dated("MA1521", "Homework 2", 20, 23),
                dated("MA1521", "Homework 1", 6, 23),
            ],
        )
        .expect("tasks");
    store
        .add_deadlines(
            &code("CS1231"),
            vec![
                dated("CS1231", "Quiz", 6, 8),
                Deadline::undated(code("CS1231"), "Notes"),
            ],
        )
        .expect("tasks");
    assert!(is_sorted(store.deadlines()));

    let profile = store.active_profile().expect("profile");
    let rebuilt = DeadlineIndex::from_profile(profile);
    assert!(is_sorted(&rebuilt));
    assert_eq!(&rebuilt, store.deadlines());

    let order: Vec<_> = rebuilt.iter().map(|d| d.description.as_str()).collect();
    assert_eq!(order, vec!["Quiz", "Homework 1", "Homework 2", "Notes", "Revise"]);
}

#[test]
fn test_adding_dated_deadline_keeps_sorted() {
    let mut index = DeadlineIndex::new();
    for (day, hour) in [(9, 9), (1, 12), (5, 7), (5, 6), (28, 0)] {
        index.add(dated("CS2103T", &format!("T{day}-{hour}"), day, hour));
        assert!(is_sorted(&index));
    }
    index.add(Deadline::undated(code("AA1000"), "Anything"));
    index.add(dated("CS2103T", "Late", 30, 23));
    assert!(is_sorted(&index));
    assert_eq!(index.as_slice().last().map(|d| d.description.as_str()), Some("Anything"));
}

#[test]
fn test_replace_without_match_leaves_index_unchanged() {
    let mut store = john();
    store
        .add_deadlines(&code("CS1231"), vec![dated("CS1231", "Quiz", 3, 10)])
        .expect("tasks");
    let before = store.deadlines().clone();

    let mut index = store.deadlines().clone();
    let replaced = index.replace(
        &Deadline::undated(code("CS1231"), "Midterm"),
        dated("CS1231", "Final", 28, 9),
    );
    assert!(!replaced);
    assert_eq!(index, before);

    let err = store
        .edit_deadline(&code("CS1231"), "Midterm", Some("Final"), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::NotFound {
            entity: Entity::Deadline,
            ..
        }
    ));
    assert_eq!(store.deadlines(), &before);
}

#[test]
fn test_cap_excludes_satisfactory_grades() {
    let mut store = ProfileStore::new();
    store
        .add_profile(Profile::new("Ann".into(), "Computer Science".into(), 2, None))
        .expect("profile");
    // CS1101S is 4 MCs in the catalog; GER1000 is graded S.
    store
        .add_modules_to_semester(1, &[code("CS1101S"), code("CS1231"), code("GER1000")], &catalog())
        .expect("enroll");
    store.set_grade(&code("CS1101S"), Grade::APlus).expect("grade");
    store.set_grade(&code("CS1231"), Grade::B).expect("grade");
    store.set_grade(&code("GER1000"), Grade::S).expect("grade");

    let profile = store.active_profile().expect("profile");
    let cap = profile_cap(profile).expect("graded modules");
    assert!((cap - (5.0 * 4.0 + 3.5 * 4.0) / 8.0).abs() < 1e-9);
    assert_eq!(compute_cap(profile.semesters()), Some(cap));
    assert_eq!(store.cap().expect("profile"), Some(cap));
}

#[test]
fn test_grade_requires_enrollment() {
    let mut store = john();
    let err = store.set_grade(&code("CS2040"), Grade::A).unwrap_err();
    assert!(matches!(err, ModelError::PreconditionFailed(_)));
    assert!(store.clear_grade(&code("CS2040")).is_err());
}

#[test]
fn test_edit_profile_rechecks_name_and_semester() {
    let mut store = john();
    let edited = store
        .edit_profile(
            "john",
            &ProfileEdit {
                name: Some("Johnny".into()),
                current_semester: Some(3),
                ..ProfileEdit::default()
            },
        )
        .expect("edit");
    assert_eq!(edited.name, "Johnny");
    assert_eq!(edited.current_semester, 3);

    let err = store
        .edit_profile(
            "Johnny",
            &ProfileEdit {
                current_semester: Some(42),
                ..ProfileEdit::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidArgument(_)));
    assert!(store.edit_profile("Nobody", &ProfileEdit::default()).is_err());
}

#[test]
fn test_delete_profile_clears_everything() {
    let mut store = john();
    store
        .add_deadlines(&code("CS1231"), vec![dated("CS1231", "Quiz", 3, 10)])
        .expect("tasks");
    let removed = store.delete_profile("JOHN").expect("delete");
    assert_eq!(removed.name, "John");
    assert!(store.profiles().is_empty());
    assert!(store.deadlines().is_empty());
    assert!(store.selection().get().is_none());
    assert!(store.delete_profile("John").is_err());
}

#[test]
fn test_remove_deadlines_itemises_missing() {
    let mut store = john();
    store
        .add_deadlines(&code("CS1231"), vec![Deadline::undated(code("CS1231"), "Quiz")])
        .expect("tasks");
    let outcome = store
        .remove_deadlines(&code("CS1231"), &["QUIZ".to_string(), "Exam".to_string()])
        .expect("quiz exists");
    assert_eq!(outcome.applied, vec!["QUIZ".to_string()]);
    assert_eq!(outcome.rejected, vec!["Exam".to_string()]);
    assert!(store.deadlines().is_empty());

    let err = store
        .remove_deadlines(&code("CS1231"), &["Exam".to_string()])
        .unwrap_err();
    assert_eq!(err.to_string(), "task not found: Exam");
}
