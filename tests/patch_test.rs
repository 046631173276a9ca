use std::fs;

use samplegen::error::Error;
use samplegen::patch::{
    apply_all, insert_code, replace_in_file, replace_regex_in_file, uncomment_code,
    write_new_file, Patch,
};
use tempfile::TempDir;

#[test]
fn test_replace_every_occurrence() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("role.yaml");
    fs::write(&file, "verbs: [get]\n---\nverbs: [get]\n").unwrap();

    replace_in_file(&file, "verbs: [get]", "verbs: [get, list]").unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "verbs: [get, list]\n---\nverbs: [get, list]\n"
    );
}

#[test]
fn test_empty_anchor_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("PROJECT");
    fs::write(&file, "domain: example.com\n").unwrap();

    let err = replace_in_file(&file, "", "layout:\n").unwrap_err();

    assert!(matches!(err, Error::PatchNotFound { ref anchor, .. } if anchor.is_empty()));
    assert_eq!(fs::read_to_string(&file).unwrap(), "domain: example.com\n");
}

#[test]
fn test_missing_anchor_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("Dockerfile");
    let original = "FROM golang:1.19 as builder\nCOPY api/ api/\n";
    fs::write(&file, original).unwrap();

    let err = replace_in_file(&file, "COPY controllers/ controllers/", "").unwrap_err();
    match err {
        Error::PatchNotFound { path, anchor } => {
            assert!(path.ends_with("Dockerfile"));
            assert_eq!(anchor, "COPY controllers/ controllers/");
        }
        other => panic!("Expected PatchNotFound, got {other:?}"),
    }
    assert!(insert_code(&file, "COPY internal/", "\nX").is_err());
    assert!(uncomment_code(&file, "#- ../prometheus", "#").is_err());
    assert!(replace_regex_in_file(&file, "ansible-operator:.*", "dev").is_err());

    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn test_insert_after_first_marker_only() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("main.go");
    let original = "import (\n)\nimport (\n)\n";
    fs::write(&file, original).unwrap();

    let payload = "\n\t\"fmt\"";
    insert_code(&file, "import (", payload).unwrap();

    let patched = fs::read_to_string(&file).unwrap();
    assert_eq!(patched, "import (\n\t\"fmt\"\n)\nimport (\n)\n");
    assert_eq!(patched.len(), original.len() + payload.len());
}

#[test]
fn test_uncomment_kustomize_entry() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("kustomization.yaml");
    fs::write(&file, "resources:\n- ../manager\n#- ../prometheus\n#- ../webhook\n").unwrap();

    uncomment_code(&file, "#- ../prometheus\n", "#").unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "resources:\n- ../manager\n- ../prometheus\n#- ../webhook\n"
    );
}

#[test]
fn test_regex_replacement_with_capture_group() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("Dockerfile");
    fs::write(&file, "FROM quay.io/operator-framework/ansible-operator:v1.28.0\n").unwrap();

    replace_regex_in_file(&file, r"(ansible-operator):v[0-9.]+", "${1}:dev").unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "FROM quay.io/operator-framework/ansible-operator:dev\n"
    );
}

#[test]
fn test_invalid_regex() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("Makefile");
    fs::write(&file, "all: build\n").unwrap();

    assert!(matches!(
        replace_regex_in_file(&file, "(unclosed", "x"),
        Err(Error::RegexError(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_write_back_preserves_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("run.sh");
    fs::write(&file, "#!/bin/sh\necho old\n").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();

    replace_in_file(&file, "old", "new").unwrap();

    let mode = fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn test_apply_all_stops_at_first_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "alpha\n").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "beta\n").unwrap();

    let patches = vec![
        Patch::replace("a.txt", "alpha", "ALPHA"),
        Patch::replace("b.txt", "gamma", "GAMMA"),
        Patch::replace("b.txt", "beta", "BETA"),
    ];
    let err = apply_all(temp_dir.path(), &patches).unwrap_err();

    assert!(matches!(err, Error::PatchNotFound { .. }));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(),
        "ALPHA\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("b.txt")).unwrap(),
        "beta\n"
    );
}

#[test]
fn test_write_new_file_creates_parents() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("test/e2e/e2e_suite_test.go");

    write_new_file(&file, "package e2e\n").unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "package e2e\n");
}

#[test]
fn test_insert_role_task_after_marker() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("roles/memcached/tasks/main.yml");
    write_new_file(&file, "---\n# tasks file for Memcached\n").unwrap();

    insert_code(
        &file,
        "# tasks file for Memcached\n",
        "- name: start memcached\n",
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "---\n# tasks file for Memcached\n- name: start memcached\n"
    );
}

#[cfg(unix)]
#[test]
fn test_uncomment_first_block_keeps_mode_and_later_copy() {
    use std::os::unix::fs::PermissionsExt;

    let block = "#- name: CERTIFICATE_NAMESPACE\n#  objref:\n#    kind: Certificate\n";
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("kustomization.yaml");
    fs::write(&file, format!("vars:\n{block}#- ../webhook\n{block}")).unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).unwrap();

    uncomment_code(&file, block, "#").unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        format!(
            "vars:\n- name: CERTIFICATE_NAMESPACE\n  objref:\n    kind: Certificate\n\
             #- ../webhook\n{block}"
        )
    );
    let mode = fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}
