use std::fs;

use tempfile::TempDir;
use zwotag::run::{run, FileStatus, OutputTarget, RunOptions};
use zwotag::tree::WalkerConfig;
use zwotag::writer::OutputMode;

use crate::integration::support::{
    in_place_options, mirror_options, read_file, workout, write_file,
};

#[test]
fn flat_directory_gets_single_segment_tag() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "A/file.xml", &workout("Ramp Test", "Max effort."));

    let report = run(temp.path(), &in_place_options()).unwrap();
    assert_eq!(report.count(FileStatus::Tagged), 1);
    assert_eq!(
        read_file(temp.path(), "A/file.xml"),
        workout("Ramp Test [1]", "A\nMax effort.")
    );
}

#[test]
fn nested_directories_get_chained_tags_and_paths() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "A/B/file.xml", &workout("One", "First."));
    write_file(temp.path(), "A/C/file.xml", &workout("Two", "Second."));

    run(temp.path(), &in_place_options()).unwrap();
    assert_eq!(
        read_file(temp.path(), "A/B/file.xml"),
        workout("One [1-1]", "A/B\nFirst.")
    );
    assert_eq!(
        read_file(temp.path(), "A/C/file.xml"),
        workout("Two [1-2]", "A/C\nSecond.")
    );
}

#[test]
fn root_file_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let original = workout("Loose", "At the root.");
    write_file(temp.path(), "file.xml", &original);

    let report = run(temp.path(), &in_place_options()).unwrap();
    assert_eq!(report.count(FileStatus::Unchanged), 1);
    assert_eq!(report.files[0].tag, None);
    assert_eq!(read_file(temp.path(), "file.xml"), original);
}

#[test]
fn rerun_over_tagged_output_is_a_fixed_point() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("workouts");
    write_file(&input, "A/B/x.zwo", &workout("X", "x."));
    write_file(&input, "A/y.zwo", &workout("Y [9]", ""));
    write_file(&input, "C/z.zwo", &workout("Z", "Line one\nLine two"));
    write_file(&input, "top.zwo", &workout("T", "t."));

    let first_out = temp.path().join("first");
    run(&input, &mirror_options(&first_out)).unwrap();
    let second_out = temp.path().join("second");
    let report = run(&first_out, &mirror_options(&second_out)).unwrap();

    for rel in ["A/B/x.zwo", "A/y.zwo", "C/z.zwo", "top.zwo"] {
        assert_eq!(
            read_file(&first_out, rel),
            read_file(&second_out, rel),
            "{rel} changed on the second run"
        );
    }
    assert_eq!(report.count(FileStatus::Tagged), 0);
    assert_eq!(read_file(&first_out, "A/y.zwo"), workout("Y [1]", "A"));
}

#[test]
fn mirror_mode_leaves_input_untouched() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("plans");
    let original = workout("Sweet Spot", "Hold it.");
    write_file(&input, "A/w.zwo", &original);
    write_file(&input, "A/readme.txt", "not a workout");

    let options = RunOptions {
        walker: WalkerConfig::default(),
        target: OutputTarget::SiblingMirror {
            suffix: "_tagged".to_string(),
        },
        dry_run: false,
    };
    let report = run(&input, &options).unwrap();

    let mirror = temp.path().join("plans_tagged");
    assert!(matches!(report.output, OutputMode::Mirror(_)));
    assert_eq!(read_file(&input, "A/w.zwo"), original);
    assert_eq!(
        read_file(&mirror, "A/w.zwo"),
        workout("Sweet Spot [1]", "A\nHold it.")
    );
    assert!(!mirror.join("A/readme.txt").exists());
}

#[test]
fn missing_description_is_reported_and_run_continues() {
    let temp = TempDir::new().unwrap();
    let broken = "<workout_file>\n    <name>Broken</name>\n</workout_file>\n";
    write_file(temp.path(), "A/1-broken.zwo", broken);
    write_file(temp.path(), "A/2-good.zwo", &workout("Good", "Fine."));

    let report = run(temp.path(), &in_place_options()).unwrap();

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, std::path::PathBuf::from("A/1-broken.zwo"));
    let failure = failures[0].failure.as_ref().unwrap();
    assert_eq!(failure.kind, "missing_field");
    assert!(failure.reason.contains("description"));

    assert_eq!(read_file(temp.path(), "A/1-broken.zwo"), broken);
    assert_eq!(
        read_file(temp.path(), "A/2-good.zwo"),
        workout("Good [1]", "A\nFine.")
    );
}

#[test]
fn moved_file_gets_new_tag_and_path() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "A/w.zwo", &workout("W", "Body."));
    fs::create_dir_all(temp.path().join("B")).unwrap();
    run(temp.path(), &in_place_options()).unwrap();

    fs::rename(temp.path().join("A/w.zwo"), temp.path().join("B/w.zwo")).unwrap();
    run(temp.path(), &in_place_options()).unwrap();

    assert_eq!(
        read_file(temp.path(), "B/w.zwo"),
        workout("W [2]", "B\nBody.")
    );
}

#[test]
fn write_failure_is_reported_per_file() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    write_file(&input, "A/w.zwo", &workout("W", "D"));
    write_file(&input, "B/w.zwo", &workout("W", "D"));

    let out = temp.path().join("out");
    // A plain file where the mirror needs directory "A"
    write_file(&out, "A", "blocker");

    let report = run(&input, &mirror_options(&out)).unwrap();
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.path, std::path::PathBuf::from("A/w.zwo"));
    assert_eq!(failure.failure.as_ref().unwrap().kind, "write");
    assert_eq!(read_file(&out, "B/w.zwo"), workout("W [2]", "B\nD"));
}

#[test]
fn special_characters_in_directory_names_are_escaped() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "Tempo & SST/w.zwo", &workout("W", "D"));

    run(temp.path(), &in_place_options()).unwrap();
    let first = read_file(temp.path(), "Tempo & SST/w.zwo");
    assert_eq!(first, workout("W [1]", "Tempo &amp; SST\nD"));

    run(temp.path(), &in_place_options()).unwrap();
    assert_eq!(read_file(temp.path(), "Tempo & SST/w.zwo"), first);
}

#[test]
fn description_starting_with_a_folder_name_is_kept() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "Intervals/r.zwo", &workout("Rest", "Intervals"));
    write_file(temp.path(), "Tempo/w.zwo", &workout("Threshold", "Intervals\nDo 5x5."));

    run(temp.path(), &in_place_options()).unwrap();
    assert_eq!(
        read_file(temp.path(), "Tempo/w.zwo"),
        workout("Threshold [2]", "Tempo\nIntervals\nDo 5x5.")
    );
    assert_eq!(
        read_file(temp.path(), "Intervals/r.zwo"),
        workout("Rest [1]", "Intervals\nIntervals")
    );

    let report = run(temp.path(), &in_place_options()).unwrap();
    assert_eq!(report.count(FileStatus::Tagged), 0);
    assert_eq!(
        read_file(temp.path(), "Tempo/w.zwo"),
        workout("Threshold [2]", "Tempo\nIntervals\nDo 5x5.")
    );
}

#[cfg(unix)]
#[test]
fn unreadable_entry_is_reported_and_siblings_are_tagged() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "A/w.zwo", &workout("W", "D"));
    write_file(temp.path(), "C/w.zwo", &workout("W", "D"));
    std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("B")).unwrap();

    let mut options = in_place_options();
    options.walker.follow_symlinks = true;
    let report = run(temp.path(), &options).unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.skipped_paths.len(), 1);
    assert_eq!(report.skipped_paths[0].path, report.root.join("B"));
    assert_eq!(report.skipped_paths[0].failure.kind, "access");
    assert_eq!(report.count(FileStatus::Tagged), 2);
    assert_eq!(read_file(temp.path(), "A/w.zwo"), workout("W [1]", "A\nD"));
    assert_eq!(read_file(temp.path(), "C/w.zwo"), workout("W [2]", "C\nD"));
}
