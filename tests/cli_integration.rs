//! CLI integration tests for amalgam.
//!
//! These tests run the binary against header trees written to temporary
//! directories and check the produced single header.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the amalgam binary command, isolated from the user's global config.
fn amalgam(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("amalgam").unwrap();
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

/// Write `includes/<path>` with a prelude comment and the marker line.
fn header(root: &Path, path: &str, body: &str) {
    let full = root.join("includes").join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, format!("// {}\n#pragma once\n{}", path, body)).unwrap();
}

/// A small project shaped like a header-only library.
fn sample_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("LICENSE"), "MIT License\n\nCopyright (c) 2025\n").unwrap();
    header(
        tmp.path(),
        "stronger.hpp",
        "#include \"strong_type.hpp\"\n#include \"tag.hpp\"\n",
    );
    header(
        tmp.path(),
        "strong_type.hpp",
        "#include \"concepts/ops.hpp\"\n#include \"traits/traits.hpp\"\n#include <utility>\n\nnamespace stronger {\nstruct strong_type {};\n}\n",
    );
    header(
        tmp.path(),
        "concepts/ops.hpp",
        "#include <concepts>\n#include \"traits/traits.hpp\"\n\n\n\nnamespace stronger { concept ops = true; }\n",
    );
    header(
        tmp.path(),
        "traits/traits.hpp",
        "#include <type_traits>\n#include <ostream>\nnamespace stronger { struct traits {}; }\n",
    );
    header(
        tmp.path(),
        "tag.hpp",
        "#include <source_location>\n#include <concepts>\nnamespace stronger { struct tag {}; }\n",
    );
    tmp
}

// ============================================================================
// amalgam build
// ============================================================================

#[test]
fn test_build_writes_single_header() {
    let tmp = sample_project();

    amalgam(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"))
        .stderr(predicate::str::contains("stronger.hpp"));

    let output = fs::read_to_string(tmp.path().join("public/stronger.hpp")).unwrap();

    assert!(output.starts_with("#pragma once\n// MIT License\n//\n// Copyright (c) 2025\n\n"));
    assert_eq!(output.matches("#pragma once").count(), 1);
    assert_eq!(output.matches("struct traits {};").count(), 1);
    assert_eq!(output.matches("#include <concepts>").count(), 1);
    assert!(!output.contains("#include \""));
    assert!(!output.contains("\n\n\n"));
    assert!(!output.contains("// strong_type.hpp"));

    // Hoisted includes come before any inlined content
    let last_include = output.rfind("#include <").unwrap();
    assert!(last_include < output.find("namespace stronger").unwrap());

    // First reference wins: traits is inlined inside ops, before strong_type
    assert!(output.find("struct traits").unwrap() < output.find("concept ops").unwrap());
    assert!(output.find("concept ops").unwrap() < output.find("struct strong_type").unwrap());
}

#[test]
fn test_build_is_the_default_command() {
    let tmp = sample_project();

    amalgam(tmp.path()).assert().success();

    assert!(tmp.path().join("public/stronger.hpp").exists());
}

#[test]
fn test_build_uses_project_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Amalgam.toml"),
        r#"
[amalgamate]
source_dir = "include"
output_dir = "dist/single"
license = "COPYING"
extension = "h"
entry = "mylib.h"
"#,
    )
    .unwrap();
    fs::write(tmp.path().join("COPYING"), "Zlib License\n").unwrap();
    fs::create_dir_all(tmp.path().join("include")).unwrap();
    fs::write(
        tmp.path().join("include/mylib.h"),
        "#pragma once\n#include \"detail.h\"\nint mylib(void);\n",
    )
    .unwrap();
    fs::write(tmp.path().join("include/detail.h"), "#pragma once\nint detail(void);\n").unwrap();
    fs::write(tmp.path().join("include/unused.h"), "#pragma once\nint unused(void);\n").unwrap();

    amalgam(tmp.path()).arg("build").assert().success();

    let output = fs::read_to_string(tmp.path().join("dist/single/mylib.h")).unwrap();
    assert_eq!(
        output,
        "#pragma once\n// Zlib License\n\nint detail(void);\n\nint mylib(void);\n"
    );
}

#[test]
fn test_build_crlf_tree() {
    let tmp = sample_project();
    for path in ["stronger.hpp", "tag.hpp", "strong_type.hpp", "concepts/ops.hpp", "traits/traits.hpp"] {
        let full = tmp.path().join("includes").join(path);
        let content = fs::read_to_string(&full).unwrap().replace('\n', "\r\n");
        fs::write(full, content).unwrap();
    }
    fs::write(tmp.path().join("LICENSE"), "MIT License\r\n\r\nCopyright (c) 2025\r\n").unwrap();

    amalgam(tmp.path()).arg("build").assert().success();

    let output = fs::read_to_string(tmp.path().join("public/stronger.hpp")).unwrap();
    assert!(!output.contains('\r'));
    assert!(!output.contains("\n\n\n"));
    assert!(output.starts_with("#pragma once\n// MIT License\n//\n// Copyright (c) 2025\n\n"));
    assert_eq!(output.matches("struct traits {};").count(), 1);
}

#[test]
fn test_build_dry_run_writes_nothing() {
    let tmp = sample_project();

    amalgam(tmp.path())
        .args(["build", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dry run"));

    assert!(!tmp.path().join("public").exists());
}

#[test]
fn test_build_output_override() {
    let tmp = sample_project();

    amalgam(tmp.path())
        .args(["build", "--output", "out"])
        .assert()
        .success();

    assert!(tmp.path().join("out/stronger.hpp").exists());
}

// ============================================================================
// failures
// ============================================================================

#[test]
fn test_missing_marker_fails() {
    let tmp = sample_project();
    fs::write(tmp.path().join("includes/tag.hpp"), "struct tag {};\n").unwrap();

    amalgam(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing the structural marker"))
        .stderr(predicate::str::contains("tag.hpp"));

    assert!(!tmp.path().join("public/stronger.hpp").exists());
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let tmp = sample_project();
    amalgam(tmp.path()).arg("build").assert().success();
    let before = fs::read_to_string(tmp.path().join("public/stronger.hpp")).unwrap();

    header(tmp.path(), "tag.hpp", "#include \"missing.hpp\"\n");
    amalgam(tmp.path()).arg("build").assert().failure();

    let after = fs::read_to_string(tmp.path().join("public/stronger.hpp")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_cyclic_include_fails() {
    let tmp = sample_project();
    header(tmp.path(), "tag.hpp", "#include \"cycle.hpp\"\n");
    header(tmp.path(), "cycle.hpp", "#include \"tag.hpp\"\n");

    amalgam(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic include detected"))
        .stderr(predicate::str::contains("tag.hpp -> cycle.hpp -> tag.hpp"));
}

#[test]
fn test_unresolved_include_fails() {
    let tmp = sample_project();
    header(tmp.path(), "tag.hpp", "#include \"version.hpp\"\n");

    amalgam(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("version.hpp"))
        .stderr(predicate::str::contains("does not name a header"));
}

#[test]
fn test_unresolved_include_allowed() {
    let tmp = sample_project();
    header(tmp.path(), "tag.hpp", "#include \"version.hpp\"\nstruct tag {};\n");

    amalgam(tmp.path())
        .args(["build", "--allow-unresolved", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "warning: `version.hpp` does not name a header in the source tree",
        ))
        .stderr(predicate::str::contains("(1 unresolved)"));

    let output = fs::read_to_string(tmp.path().join("public/stronger.hpp")).unwrap();
    assert_eq!(output.matches("#include \"version.hpp\"").count(), 1);
    assert!(output.find("#include \"version.hpp\"").unwrap() < output.find("struct tag").unwrap());
}

#[test]
fn test_missing_license_fails() {
    let tmp = sample_project();
    fs::remove_file(tmp.path().join("LICENSE")).unwrap();

    amalgam(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LICENSE"));
}

// ============================================================================
// amalgam tree
// ============================================================================

#[test]
fn test_tree_output() {
    let tmp = sample_project();

    amalgam(tmp.path())
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("stronger.hpp\n"))
        .stdout(predicate::str::contains("├── strong_type.hpp"))
        .stdout(predicate::str::contains("│   ├── traits/traits.hpp (*)"));
}

#[test]
fn test_tree_depth_limit() {
    let tmp = sample_project();

    amalgam(tmp.path())
        .args(["tree", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("concepts/ops.hpp").not());
}

// ============================================================================
// amalgam completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    amalgam(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("amalgam"));
}
