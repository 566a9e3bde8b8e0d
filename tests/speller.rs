use std::fs;
use std::process::Command;

use speller::lexer::Lexer;
use speller::pipeline::Pipeline;
use speller::{Config, LoadError, SharedDictionary, WordDictionary};
use tempfile::TempDir;

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("words"),
        "a\nam\ncat\ncaterpillar\ni\nsay\nthe\nwas\nyou\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("text.txt"),
        "I say, the CAT was a caterpilar 4 you!\nDid you see it\n",
    )
    .unwrap();
    dir
}

#[test]
fn checks_a_text_file_end_to_end() {
    let dir = fixture();
    let config = Config {
        dictionary: dir.path().join("words"),
        bucket_count: 13,
        ..Config::default()
    };

    let mut dictionary = WordDictionary::with_config(&config);
    dictionary.load(&config.dictionary).unwrap();
    assert_eq!(dictionary.size(), 9);

    let text = fs::read(dir.path().join("text.txt")).unwrap();
    let report = Pipeline::new(&dictionary).run(Lexer::new(text, config.max_word_length));
    let misspelled: Vec<&str> = report
        .misspelled
        .iter()
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(misspelled, vec!["caterpilar", "Did", "see", "it"]);
    assert_eq!(report.words, 12);

    dictionary.unload();
    assert_eq!(dictionary.size(), 0);
    assert!(!dictionary.check("cat"));
}

#[test]
fn config_file_drives_table_shape() {
    let dir = fixture();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{ "dictionary": "words", "bucket_count": 2, "max_word_length": 5 }"#,
    )
    .unwrap();

    let config = Config::resolve(Some(&config_path)).unwrap();
    let dictionary = SharedDictionary::with_config(&config);
    assert_eq!(config.dictionary, dir.path().join("words"));
    // "caterpillar" exceeds five bytes
    let err = dictionary.load(&config.dictionary).unwrap_err();
    assert!(matches!(err, LoadError::WordTooLong { max: 5, .. }));
    assert_eq!(dictionary.size(), 3);
    assert!(dictionary.check("Cat"));
    assert_eq!(dictionary.read().bucket_count(), 2);
    dictionary.unload();
    assert_eq!(dictionary.size(), 0);
}

#[test]
fn binary_prints_misspellings_and_summary() {
    let dir = fixture();
    let output = Command::new(env!("CARGO_BIN_EXE_speller"))
        .arg(dir.path().join("words"))
        .arg(dir.path().join("text.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("\nMISSPELLED WORDS\n\ncaterpilar\nDid\nsee\nit\n\n"));
    assert!(stdout.contains("WORDS MISSPELLED:     4\n"));
    assert!(stdout.contains("WORDS IN DICTIONARY:  9\n"));
    assert!(stdout.contains("WORDS IN TEXT:        12\n"));
    assert!(stdout.contains("TIME IN TOTAL:"));
}

#[test]
fn binary_accepts_latin1_dictionary() {
    let dir = fixture();
    let latin1 = dir.path().join("latin1");
    fs::write(&latin1, b"na\xefve\ncat\x0bdog\n").unwrap();
    fs::write(dir.path().join("pets.txt"), "Cat and dog\n").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_speller"))
        .arg(&latin1)
        .arg(dir.path().join("pets.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("\nMISSPELLED WORDS\n\nand\n\n"));
    assert!(stdout.contains("WORDS IN DICTIONARY:  3\n"));
}

#[test]
fn binary_reports_missing_dictionary() {
    let dir = fixture();
    let missing = dir.path().join("nope");
    let output = Command::new(env!("CARGO_BIN_EXE_speller"))
        .arg(&missing)
        .arg(dir.path().join("text.txt"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, format!("Could not load {}.\n", missing.display()));
}

#[test]
fn binary_reports_missing_text() {
    let dir = fixture();
    let missing = dir.path().join("absent.txt");
    let output = Command::new(env!("CARGO_BIN_EXE_speller"))
        .arg(dir.path().join("words"))
        .arg(&missing)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, format!("Could not open {}.\n", missing.display()));
}

#[test]
fn binary_rejects_extra_arguments() {
    let output = Command::new(env!("CARGO_BIN_EXE_speller"))
        .args(["a", "b", "c"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
