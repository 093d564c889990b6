use cwl2nxf::core::{self, Document, Named, Process, RenderConfig};
use insta::assert_snapshot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ALIGN: &str = r#"
cwlVersion: v1.0
class: CommandLineTool
id: align
baseCommand: ["bwa", "mem"]
requirements:
  - class: DockerRequirement
    dockerPull: biocontainers/bwa:1
inputs:
  reads:
    type: File
    inputBinding:
      position: 1
  threads:
    type: int?
    inputBinding:
      position: 0
      prefix: -t
outputs:
  bam:
    type: File
    outputBinding:
      glob: "*.bam"
"#;

const VARIANTS: &str = r#"
class: CommandLineTool
baseCommand: gatk
hints:
  DockerRequirement:
    dockerPull: broadinstitute/gatk:4.2
inputs:
  reference:
    type: File
    secondaryFiles: [.fai, ^.dict]
    inputBinding: {prefix: -R, position: 2}
  bam:
    type: File
    secondaryFiles: .bai
    inputBinding: {prefix: -I, position: 1}
  sample_name:
    type: string?
    default: NA12878
    inputBinding: {prefix: --sample-name, position: 4}
  min_quality:
    type: float
    default: 20.5
    inputBinding: {prefix: --min-base-quality-score, position: 5}
  intervals:
    type: File?
    inputBinding: {prefix: -L, position: 3}
  keep_duplicates:
    type: boolean?
    inputBinding: {prefix: --disable-read-filter, position: 6}
outputs:
  vcf:
    type: File
    outputBinding: {glob: "$(inputs.sample_name).vcf.gz"}
  log:
    type: stdout
"#;

fn render(text: &str, source: Option<&str>) -> String {
    core::convert_str(text, source.map(Path::new), &RenderConfig::default())
        .expect("conversion succeeds")
}

#[test]
fn align_example_renders_expected_process() {
    assert_snapshot!(render(ALIGN, None), @r###"
    if (!params.align_threads) {
        log.error "Missing parameter: align_threads"
        exit 1
    }
    process align {
        container "biocontainers/bwa:1"
        input:
            file reads from inp_align_reads
        output:
            file "*.bam" into out_align_bam
        script:
            "bwa mem " + (params.align_threads ? "-t ${params.align_threads} " : "") + "${reads} "
    }
    "###);
}

#[test]
fn secondary_files_defaults_and_hints_render() {
    assert_snapshot!(render(VARIANTS, Some("gatk-haplotype.cwl")), @r###"
    params.gatk_haplotype_sample_name = 'NA12878'
    params.gatk_haplotype_min_quality = 20.5
    if (!params.gatk_haplotype_keep_duplicates) {
        log.error "Missing parameter: gatk_haplotype_keep_duplicates"
        exit 1
    }
    process gatk_haplotype {
        container "broadinstitute/gatk:4.2"
        input:
            set file(reference), file(reference_fai), file(reference_dict) from inp_gatk_haplotype_reference
            set file(bam), file(bam_bai) from inp_gatk_haplotype_bam
            file intervals from inp_gatk_haplotype_intervals
        output:
            file "\$(inputs.sample_name).vcf.gz" into out_gatk_haplotype_vcf
        script:
            "gatk " + "-I ${bam} " + "-R ${reference} " + (intervals ? "-L ${intervals} " : "") + "--sample-name ${params.gatk_haplotype_sample_name} " + "--min-base-quality-score ${params.gatk_haplotype_min_quality} " + (params.gatk_haplotype_keep_duplicates ? "--disable-read-filter " : "")
    }
    "###);
}

#[test]
fn section_line_counts_match_input_kinds() {
    let rendered = render(VARIANTS, Some("gatk-haplotype.cwl"));
    let lines: Vec<&str> = rendered.lines().collect();
    let start = lines.iter().position(|l| l.trim() == "input:").unwrap();
    let end = lines.iter().position(|l| l.trim() == "output:").unwrap();
    assert_eq!(end - start - 1, 3, "one binding line per File input");

    let preamble: Vec<&str> = lines
        .iter()
        .take_while(|l| !l.starts_with("process "))
        .copied()
        .filter(|l| l.starts_with("params.") || l.starts_with("if ("))
        .collect();
    assert_eq!(preamble.len(), 3, "one entry per non-File input");
}

#[test]
fn argument_order_depends_only_on_position() {
    let reordered = r#"
class: CommandLineTool
id: align
baseCommand: ["bwa", "mem"]
requirements:
  - class: DockerRequirement
    dockerPull: biocontainers/bwa:1
inputs:
  threads:
    type: int?
    inputBinding:
      position: 0
      prefix: -t
  reads:
    type: File
    inputBinding:
      position: 1
outputs:
  bam:
    type: File
    outputBinding:
      glob: "*.bam"
"#;
    let script_line = |text: &str| {
        render(text, None)
            .lines()
            .find(|l| l.trim_start().starts_with("\"bwa mem"))
            .map(str::to_string)
            .unwrap()
    };
    assert_eq!(script_line(ALIGN), script_line(reordered));

    let swapped = ALIGN
        .replace("position: 1", "position: 9")
        .replace("position: 0", "position: 1");
    assert!(script_line(&swapped).ends_with(
        r#""bwa mem " + (params.align_threads ? "-t ${params.align_threads} " : "") + "${reads} ""#
    ));
    let moved = ALIGN.replace("position: 1", "position: -1");
    assert!(script_line(&moved).contains(r#""bwa mem " + "${reads} " + (params.align_threads"#));
}

#[test]
fn derived_names_follow_process_id() {
    let document = Document::parse(ALIGN, None).unwrap();
    let process = Process::from_document(&document).unwrap();
    let reads = &process.inputs()[0];
    let threads = &process.inputs()[1];
    assert_eq!(reads.channel_name().unwrap(), "inp_align_reads");
    assert_eq!(threads.param_name().unwrap(), "params.align_threads");
    assert_eq!(process.outputs()[0].full_name().unwrap(), "out_align_bam");
}

#[test]
fn convert_file_uses_file_stem_for_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bwa-align.cwl");
    fs::write(&path, ALIGN.replace("id: align\n", "")).unwrap();
    let rendered = core::convert_file(&path, &RenderConfig::default()).unwrap();
    assert!(rendered.contains("process bwa_align {"));
    assert!(rendered.contains("file reads from inp_bwa_align_reads"));
}

#[test]
fn json_descriptors_are_accepted() {
    let json = r##"{
  "class": "CommandLineTool",
  "id": "count",
  "baseCommand": ["wc", "-l"],
  "requirements": [{"class": "DockerRequirement", "dockerPull": "alpine:3"}],
  "inputs": [{"id": "#count/text", "type": "File", "inputBinding": {"position": 1}}],
  "outputs": [{"id": "#count/lines", "type": "stdout"}]
}"##;
    let rendered = render(json, None);
    assert!(rendered.contains("file text from inp_count_text"));
    assert!(rendered.contains(r#""wc -l " + "${text} ""#));
    assert!(!rendered.contains("out_count_lines"));
}
