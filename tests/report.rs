extern crate scalereport;
extern crate tempfile;

use scalereport::output::{SAMPLE_ARTIFACTS, SCALABILITY_ARTIFACTS};
use scalereport::{run, Setting};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const SCALABILITY: &str = "Workers,Processes,Throughput_pps,Latency_ms,MPI_Overhead_ms,Wall_Time_sec
1,2,100.00,0.0243,1.20,10.41
2,3,190.00,0.0251,2.48,5.50
4,5,370.00,0.0262,4.91,2.81
8,9,700.00,0.0290,9.87,1.49
";

fn setting(dir: &Path) -> Setting {
    Setting {
        output_dir: dir.join("graphs"),
        metrics_path: dir.join("performance_metrics.csv"),
        dpi: 30,
        ..Setting::default()
    }
}

fn pngs(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect()
}

#[test]
fn no_argument_draws_only_sample_charts() {
    let tmp = tempfile::tempdir().unwrap();
    let setting = setting(tmp.path());
    if setting.locate_font().is_none() {
        return;
    }
    let mut console = Vec::new();
    let summary = run(None, &setting, &mut console).unwrap();

    assert!(summary.success(), "{:?}", summary.failed);
    for artifact in SCALABILITY_ARTIFACTS.iter() {
        assert!(!setting.output_dir.join(artifact.file_name()).exists());
    }
    for artifact in SAMPLE_ARTIFACTS.iter() {
        assert!(setting.output_dir.join(artifact.file_name()).is_file());
    }
}

#[test]
fn missing_file_still_draws_sample_charts() {
    let tmp = tempfile::tempdir().unwrap();
    let setting = setting(tmp.path());
    if setting.locate_font().is_none() {
        return;
    }
    let missing = tmp.path().join("scalability_summary.csv");
    let mut console = Vec::new();
    let summary = run(Some(&missing), &setting, &mut console).unwrap();

    assert!(summary.success());
    assert!(summary.scalability_skipped);
    let text = String::from_utf8(console).unwrap();
    assert!(text.contains("[ERROR] File not found"));
    assert_eq!(summary.saved.len(), SAMPLE_ARTIFACTS.len());
}

#[test]
fn full_run_produces_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let setting = setting(tmp.path());
    if setting.locate_font().is_none() {
        return;
    }
    let input = tmp.path().join("scalability_summary.csv");
    fs::write(&input, SCALABILITY).unwrap();
    let mut console = Vec::new();
    let summary = run(Some(&input), &setting, &mut console).unwrap();

    assert!(summary.success());
    assert!(summary.failed.is_empty(), "{:?}", summary.failed);
    assert_eq!(summary.saved.len(), 10);

    let md = fs::read_to_string(setting.output_dir.join("scalability_table.md")).unwrap();
    assert!(md.starts_with("# Scalability Analysis Results\n\n"));
    assert!(md.contains("Wall_Time_sec"));
    assert!(md.contains("|         8 |           9 |"));
    let tex = fs::read_to_string(setting.output_dir.join("scalability_table.tex")).unwrap();
    assert!(tex.contains("\\begin{tabular}{rrrrrrrr}"));
    assert!(tex.contains("0.88 \\\\"));

    let text = String::from_utf8(console).unwrap();
    assert!(text.contains("  - scalability_table.tex (LaTeX)\n"));
    assert!(text.contains("  - scalability_table.md (Markdown)\n"));
    assert!(text.contains("  - confusion_matrix.png\n"));
}

#[test]
fn rerun_leaves_no_stale_images() {
    let tmp = tempfile::tempdir().unwrap();
    let setting = setting(tmp.path());
    if setting.locate_font().is_none() {
        return;
    }
    let input = tmp.path().join("scalability_summary.csv");
    fs::write(&input, SCALABILITY).unwrap();

    run(Some(&input), &setting, &mut Vec::new()).unwrap();
    assert_eq!(pngs(&setting.output_dir).len(), 8);
    fs::write(setting.output_dir.join("from_older_version.png"), b"").unwrap();

    run(None, &setting, &mut Vec::new()).unwrap();
    let first = pngs(&setting.output_dir);
    run(None, &setting, &mut Vec::new()).unwrap();
    let second = pngs(&setting.output_dir);

    assert_eq!(first, second);
    let expected = SAMPLE_ARTIFACTS
        .iter()
        .map(|a| a.file_name().to_string())
        .collect::<BTreeSet<String>>();
    assert_eq!(second, expected);
}

#[test]
fn detection_counts_come_from_metrics_file() {
    let tmp = tempfile::tempdir().unwrap();
    let setting = setting(tmp.path());
    fs::write(
        &setting.metrics_path,
        "True Positives,False Positives,True Negatives,False Negatives\n900,12,88,3\n",
    ).unwrap();
    let counts = scalereport::DetectionCounts::load(&setting.metrics_path);
    assert_eq!(counts.matrix(), [[88, 12], [3, 900]]);
}

#[test]
fn detection_counts_fall_back_without_metrics_file() {
    let tmp = tempfile::tempdir().unwrap();
    let setting = setting(tmp.path());
    let counts = scalereport::DetectionCounts::load(&setting.metrics_path);
    assert_eq!(counts.matrix(), [[325, 1377], [0, 48298]]);
}
