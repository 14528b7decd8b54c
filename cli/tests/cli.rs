use assert_cmd::prelude::*;
use nodesetc_test::shared_resource_path;
use predicates::prelude::*;
use std::{fs, process::Command};
use tempfile::{tempdir, NamedTempFile};

#[test]
fn check_when_not_a_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("check").arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    Ok(())
}

#[test]
fn check_when_trace_log_and_not_a_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("check")
        .arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    Ok(())
}

#[test]
fn check_when_too_verbose_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("-vvvvv")
        .arg("check")
        .arg(shared_resource_path("base_object_type.xml"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Verbosity"));

    Ok(())
}

#[test]
fn check_when_valid_file_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("check").arg(shared_resource_path("base_object_type.xml"));
    cmd.assert().success().stdout(predicate::str::contains("OK"));

    Ok(())
}

#[test]
fn check_when_unsupported_rank_then_warning_and_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("check").arg(shared_resource_path("file_type_methods.xml"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK"))
        .stderr(predicate::str::contains("W0001"));

    Ok(())
}

#[test]
fn check_when_not_xml_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("check").arg(shared_resource_path("not_xml.xml"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0001"));

    Ok(())
}

#[test]
fn compile_when_valid_file_then_writes_module() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempdir()?;
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("compile")
        .arg(shared_resource_path("base_object_type.xml"))
        .arg("--out")
        .arg(out.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("base_object_type.rs"));

    let contents = fs::read_to_string(out.path().join("base_object_type.rs"))?;
    assert!(contents.starts_with("// This file was autogenerated from base_object_type.xml by nodesetc\n"));
    assert!(contents.contains("let node = ObjectType::new(&node_id, name, name, true);"));

    Ok(())
}

#[test]
fn compile_when_max_nodes_then_partitions_and_index() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempdir()?;
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("compile")
        .arg(shared_resource_path("five_objects.xml"))
        .arg("--module")
        .arg("base")
        .arg("--max-nodes")
        .arg("2")
        .arg("--index")
        .arg("--out")
        .arg(out.path());
    cmd.assert().success();

    for name in ["base_1.rs", "base_2.rs", "base_3.rs", "mod.rs"] {
        assert!(out.path().join(name).exists(), "missing {}", name);
    }
    assert!(!out.path().join("base.rs").exists());
    let index = fs::read_to_string(out.path().join("mod.rs"))?;
    assert!(index.contains("mod base_1;\nmod base_2;\nmod base_3;\n"));

    Ok(())
}

#[test]
fn compile_when_config_file_then_applied() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempdir()?;
    let config = out.path().join("config.json");
    fs::write(
        &config,
        r#"{ "namespaceOverride": 5, "generatorLabel": "from config" }"#,
    )?;
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("compile")
        .arg(shared_resource_path("five_objects.xml"))
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(out.path());
    cmd.assert().success();

    let contents = fs::read_to_string(out.path().join("five_objects.rs"))?;
    assert!(contents.contains("by from config\n"));
    assert!(contents.contains("let node_id = NodeId::new(5, 1);"));

    Ok(())
}

#[test]
fn compile_when_invalid_config_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = NamedTempFile::new()?;
    std::io::Write::write_all(&mut config, br#"{ "maxEntriesPerPartition": -1 }"#)?;
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("compile")
        .arg(shared_resource_path("base_object_type.xml"))
        .arg("--config")
        .arg(config.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0006"));

    Ok(())
}

#[test]
fn compile_when_malformed_identifier_then_err_and_no_output() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempdir()?;
    let mut cmd = Command::cargo_bin("nodesetc")?;

    cmd.arg("compile")
        .arg(shared_resource_path("malformed_node_id.xml"))
        .arg("--out")
        .arg(out.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0004"));

    assert_eq!(fs::read_dir(out.path())?.count(), 0);

    Ok(())
}
