use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn addrbook() -> Command {
    Command::cargo_bin("addrbook").unwrap()
}

#[test]
fn test_add_then_search() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args([
            "-d",
            dir_arg,
            "-a",
            "donutlover@test.com",
            "Jim Bagodonuts",
            "loves donuts",
        ])
        .assert()
        .success();

    let stored = std::fs::read_to_string(dir.path().join(".address_list")).unwrap();
    assert_eq!(stored, "donutlover@test.com\tJim Bagodonuts\tloves donuts\n");

    addrbook()
        .args(["-d", dir_arg, "donut"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jim Bagodonuts"));
}

#[test]
fn test_search_without_match_prints_nothing() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "-a", "a@b.com", "Al"])
        .assert()
        .success();

    addrbook()
        .args(["-d", dir_arg, "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_expression_prints_collection() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "-a", "a@b.com", "Al", "first"])
        .assert()
        .success();
    addrbook()
        .args(["-d", dir_arg, "-a", "b@c.com", "Bea", "second"])
        .assert()
        .success();

    addrbook()
        .args(["-d", dir_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("a@b.com").and(predicate::str::contains("b@c.com")));
}

#[test]
fn test_mutt_add_extracts_sender() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "--mutt-add"])
        .write_stdin(
            "From: Janet Bucketochips <crunchy@test.com>\r\n\
             Subject: chips\r\n\
             \r\n\
             hello\r\n",
        )
        .assert()
        .success();

    addrbook()
        .args(["-d", dir_arg, "crunchy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Janet Bucketochips"));
}

#[test]
fn test_mutt_add_falls_back_to_local_part() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "--mutt-add"])
        .write_stdin("From: <crunchy@test.com>\r\n\r\nhello\r\n")
        .assert()
        .success();

    let stored = std::fs::read_to_string(dir.path().join(".address_list")).unwrap();
    assert_eq!(stored, "crunchy@test.com\tcrunchy\t\n");
}

#[test]
fn test_interactive_add_reads_prompt_answers() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // email, name, other info, extra info, then a blank line ending the
    // misc entries.
    addrbook()
        .args(["-d", dir_arg, "-I"])
        .write_stdin("a@b.com\nAl\nnotes\n\n\n")
        .assert()
        .success();

    let stored = std::fs::read_to_string(dir.path().join(".address_list")).unwrap();
    assert_eq!(stored, "a@b.com\tAl\tnotes\n");
}

#[test]
fn test_malformed_add_fails_with_message() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "-a", "only-one-field"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed record line"));

    assert!(!dir.path().join(".address_list").exists());
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "-a", "a@b.com", "Al", "notes"])
        .assert()
        .success();

    addrbook()
        .args(["-d", dir_arg, "--json", "Al"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"email\":\"a@b.com\""));
}

#[test]
fn test_import_contacts_csv() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();
    let csv_path = dir.path().join("contacts.csv");

    // Name up front, the two email columns at fixed offsets from the
    // row end, as in the Gmail export layout.
    std::fs::write(
        &csv_path,
        "Name,A,B,Email1,C,Email2,D,E,F,G,H,I\n\
         Jim Bagodonuts,x,x,donutlover@test.com,x,jim@other.com,x,x,x,x,x,x\n\
         ,x,x,crunchy@test.com,x,,x,x,x,x,x,x\n",
    )
    .unwrap();

    Command::cargo_bin("import-contacts")
        .unwrap()
        .args([csv_path.to_str().unwrap(), "-d", dir_arg])
        .assert()
        .success();

    let stored = std::fs::read_to_string(dir.path().join(".address_list")).unwrap();
    assert_eq!(
        stored,
        "donutlover@test.com\tJim Bagodonuts\t\tjim@other.com\n\
         crunchy@test.com\tcrunchy\t\n"
    );
}

#[test]
fn test_custom_file_name() {
    let dir = tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    addrbook()
        .args(["-d", dir_arg, "-f", "contacts.txt", "-a", "a@b.com", "Al"])
        .assert()
        .success();

    assert!(dir.path().join("contacts.txt").exists());
    assert!(!dir.path().join(".address_list").exists());
}
