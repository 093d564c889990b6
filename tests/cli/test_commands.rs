use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BIN: &str = "cwl2nxf";

const SORT: &str = r#"
class: CommandLineTool
baseCommand: [samtools, sort]
hints:
  DockerRequirement:
    dockerPull: biocontainers/samtools:1.9
inputs:
  input_bam:
    type: File
    inputBinding: {position: 2}
  memory:
    type: string
    default: 768M
    inputBinding: {prefix: -m, position: 1}
outputs:
  sorted:
    type: File
    outputBinding: {glob: sorted.bam}
"#;

fn workspace(descriptor: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("samtools-sort.cwl"), descriptor).expect("write descriptor");
    dir
}

#[test]
fn converts_descriptor_to_stdout() {
    let dir = workspace(SORT);
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .current_dir(dir.path())
        .args(["--file", "samtools-sort.cwl"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "params.samtools_sort_memory = '768M'\nprocess samtools_sort {\n",
        ))
        .stdout(predicate::str::contains(
            "        file input_bam from inp_samtools_sort_input_bam\n",
        ))
        .stdout(predicate::str::contains(
            "        file \"sorted.bam\" into out_samtools_sort_sorted\n",
        ))
        .stdout(predicate::str::ends_with(
            "        \"samtools sort \" + \"-m ${params.samtools_sort_memory} \" + \"${input_bam} \"\n}\n",
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_container_fails_without_output() {
    let dir = workspace(&SORT.replace("dockerPull", "dockerLoad"));
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .current_dir(dir.path())
        .args(["--file", "samtools-sort.cwl"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("UNRESOLVED_CONTAINER"));
}

#[test]
fn missing_file_argument_is_a_usage_error() {
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file <FILE>"));
}

#[test]
fn unreadable_descriptor_reports_io_error() {
    let dir = TempDir::new().expect("temp dir");
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .current_dir(dir.path())
        .args(["--file", "nope.cwl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.cwl"));
}

#[test]
fn config_file_changes_indentation() {
    let dir = workspace(SORT);
    fs::write(dir.path().join("cwl2nxf.toml"), "[render]\nindent_width = 2\n").unwrap();
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .current_dir(dir.path())
        .args(["--file", "samtools-sort.cwl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  container \"biocontainers/samtools:1.9\"\n"));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = workspace(SORT);
    fs::write(dir.path().join("cwl2nxf.toml"), "[render]\nindent_width = 0\n").unwrap();
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .current_dir(dir.path())
        .args(["--file", "samtools-sort.cwl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("indent_width"));
}

#[test]
fn help_lists_the_file_flag() {
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file <FILE>"))
        .stdout(predicate::str::contains("CWL CommandLineTool descriptor"));
}
