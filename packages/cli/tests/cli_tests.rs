use std::io::Write;

use serde_json::{json, Value};

use bkt_cli::config::Config;
use bkt_cli::{read_input, run, Command};

fn recommend_body() -> Value {
    json!({
        "isCorrect": false,
        "readOrWrite": "write",
        "exerciseID": "l2",
        "transfer": 0.05,
        "itemParams": [
            {"eid": "l1", "slip": 0.1, "guess": 0.2, "concept": "loops"},
            {"eid": "l2", "slip": 0.3, "guess": 0.1, "concept": "loops"},
            {"eid": "l3", "slip": 0.05, "guess": 0.4, "concept": "loops"},
            {"eid": "v1", "slip": 0.1, "guess": 0.5, "concept": "vars"},
            {"eid": "r1", "slip": 0.4, "guess": 0.05, "concept": "recursion"},
            {"eid": "s1", "slip": 0.2, "guess": 0.3, "concept": "strings"}
        ],
        "targetConcept": "loops",
        "conceptMap": {
            "concepts": ["vars", "loops", "recursion", "strings"],
            "adjMat": [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
        },
        "priorPknown": 0.4,
        "exerciseIDs": ["l1", "l2", "l3", "v1", "r1", "s1"]
    })
}

#[test]
fn recommend_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", recommend_body()).unwrap();

    let body = read_input(Some(file.path())).unwrap();
    let output = run(Command::Recommend, &body, &Config::default()).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    let pk = value["pkNew"].as_f64().unwrap();
    assert!(pk > 0.0 && pk < 0.4, "incorrect answer should lower mastery, got {pk}");

    let suggested = value["suggestedExercises"].as_array().unwrap();
    let info = value["exerciseInfo"].as_array().unwrap();
    assert_eq!(suggested.len(), info.len());
    assert!(suggested.len() <= 4);
    for entry in info {
        assert!(entry["score"].is_number());
        assert!(entry["concept"].is_string());
    }
}

#[test]
fn recommend_unknown_exercise() {
    let mut body = recommend_body();
    body["exerciseID"] = json!("ghost");
    let err = run(Command::Recommend, &body.to_string(), &Config::default()).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn recommend_unknown_target_concept() {
    let mut body = recommend_body();
    body["targetConcept"] = json!("generics");
    let err = run(Command::Recommend, &body.to_string(), &Config::default()).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn recommend_degenerate_item() {
    let mut body = recommend_body();
    body["itemParams"][1] = json!({"eid": "l2", "slip": 0.0, "guess": 1.0, "concept": "loops"});
    let err = run(Command::Recommend, &body.to_string(), &Config::default()).unwrap_err();
    assert_eq!(err.code(), "ARITHMETIC_ERROR");
}

#[test]
fn malformed_json_is_bad_request() {
    let err = run(Command::Recommend, "{not json", &Config::default()).unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = read_input(Some(missing.as_path())).unwrap_err();
    assert_eq!(err.code(), "IO_ERROR");
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn replay_command() {
    let body = json!({
        "userId": "u1",
        "responses": [
            {"user_id": "u1", "exercise_id": "w1", "step": 1, "correct": true},
            {"user_id": "u1", "exercise_id": "w1", "step": 2, "correct": true}
        ],
        "conceptParams": [{"id": "loops", "modality": "write", "init": 0.2, "transfer": 0.1}],
        "itemParams": [
            {"eid": "w1", "concept": "loops", "slip": 0.1, "guess": 0.2, "modality": "write"}
        ]
    });
    let output = run(Command::Replay, &body.to_string(), &Config::default()).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    let p_known = value["trajectories"][0]["pKnown"].as_array().unwrap();
    assert_eq!(p_known.len(), 3);
    let first = p_known[1].as_f64().unwrap();
    let second = p_known[2].as_f64().unwrap();
    assert!(second > first);
}
