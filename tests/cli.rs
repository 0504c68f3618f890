use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    image::RgbImage::new(width, height)
        .save(dir.join(name))
        .expect("failed to write test image");
}

const DATASET: &str = r#"[
    {"id": "1", "image": "a.png", "conversations": [{"value": "hi there"}]},
    {"id": "2", "conversations": [{"value": "no image here"}]},
    {"id": "3", "image": "b.png", "conversations": [{"value": "one two three"}]}
]"#;

/// Runs `data_info` from `dir` against `dir/sample.json` and `dir/images`.
fn run_data_info(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_data_info"))
        .current_dir(dir)
        .env("RUST_LOG", "info")
        .arg("--json_path")
        .arg(dir.join("sample.json"))
        .arg("--images_folder")
        .arg(dir.join("images"))
        .output()
        .expect("failed to run data_info")
}

fn setup(images: &[(&str, u32, u32)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let folder = dir.path().join("images");
    fs::create_dir_all(&folder).expect("images dir");
    for &(name, w, h) in images {
        write_png(&folder, name, w, h);
    }
    fs::write(dir.path().join("sample.json"), DATASET).expect("dataset");
    dir
}

#[test]
fn prints_counts_and_writes_both_charts() {
    let dir = setup(&[("a.png", 640, 480), ("b.png", 300, 900)]);
    let out = run_data_info(dir.path());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "stdout:\n{stdout}\nstderr:\n{stderr}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"Total data items: 3, Filtered data items: 2"), "{stdout}");
    assert!(lines.contains(&"Max width: 640, Max height: 900"), "{stdout}");
    assert!(!stdout.contains("Error opening"), "{stdout}");
    assert!(!stdout.contains("Failed to read"), "{stdout}");

    assert!(dir.path().join("dist_sample_2d_w_h.png").exists());
    assert!(dir.path().join("dist_sample_tokenized_length.png").exists());
}

#[test]
fn missing_image_is_reported_once_with_its_path() {
    let dir = setup(&[("a.png", 128, 64)]);
    let out = run_data_info(dir.path());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "{stdout}");

    let missing = dir.path().join("images").join("b.png");
    let expected = format!("Error opening {}: ", missing.display());
    let reports: Vec<&str> = stdout.lines().filter(|l| l.contains("Error opening")).collect();
    assert_eq!(reports.len(), 1, "{stdout}");
    assert!(reports[0].contains(&expected), "{stdout}");

    assert!(stdout.lines().any(|l| l == "Max width: 128, Max height: 64"), "{stdout}");
    assert!(stdout.lines().any(|l| l == "Failed to read 1 images"), "{stdout}");
}

#[test]
fn nonexistent_dataset_exits_non_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_data_info(dir.path());
    assert!(!out.status.success());
    assert!(!dir.path().join("dist_sample_2d_w_h.png").exists());
}

#[test]
fn both_paths_are_required() {
    let out = Command::new(env!("CARGO_BIN_EXE_data_info"))
        .arg("--json_path")
        .arg("x.json")
        .output()
        .expect("failed to run data_info");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--images_folder"));
}
