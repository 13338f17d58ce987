use std::fs;
use std::path::Path;

use tempfile::TempDir;
use zwotag::tree::{GroupIndex, WalkerConfig};

use crate::integration::support::{workout, write_file};

#[test]
fn chains_follow_sorted_directory_listing() {
    let temp = TempDir::new().unwrap();
    let doc = workout("W", "D");
    for rel in [
        "Base/Week 1/a.zwo",
        "Base/Week 2/a.zwo",
        "Build/Threshold/Long/a.zwo",
        "Build/Threshold/Short/a.zwo",
        "Build/VO2/a.zwo",
        "loose.zwo",
    ] {
        write_file(temp.path(), rel, &doc);
    }
    fs::create_dir_all(temp.path().join("Archive")).unwrap();

    let index = GroupIndex::build(temp.path(), &WalkerConfig::default()).unwrap();
    let tag = |rel: &str| index.chain_for(Path::new(rel)).tag();

    // Archive (empty) takes slot 1
    assert_eq!(tag("Base/Week 1/a.zwo").as_deref(), Some("[2-1]"));
    assert_eq!(tag("Base/Week 2/a.zwo").as_deref(), Some("[2-2]"));
    assert_eq!(tag("Build/Threshold/Long/a.zwo").as_deref(), Some("[3-1-1]"));
    assert_eq!(tag("Build/Threshold/Short/a.zwo").as_deref(), Some("[3-1-2]"));
    assert_eq!(tag("Build/VO2/a.zwo").as_deref(), Some("[3-2]"));
    assert_eq!(tag("loose.zwo"), None);

    assert_eq!(index.files().len(), 6);
    assert_eq!(index.group_bearing().count(), 5);
}

#[test]
fn chains_ignore_file_names() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "A/zzz.zwo", &workout("W", "D"));
    write_file(temp.path(), "A/aaa.zwo", &workout("W", "D"));

    let index = GroupIndex::build(temp.path(), &WalkerConfig::default()).unwrap();
    assert_eq!(
        index.chain_for(Path::new("A/zzz.zwo")),
        index.chain_for(Path::new("A/aaa.zwo"))
    );
}

#[test]
fn added_sibling_shifts_later_indices() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "B/w.zwo", &workout("W", "D"));

    let before = GroupIndex::build(temp.path(), &WalkerConfig::default()).unwrap();
    assert_eq!(before.chain_for(Path::new("B/w.zwo")).segments(), &[1]);

    fs::create_dir_all(temp.path().join("A")).unwrap();
    let after = GroupIndex::build(temp.path(), &WalkerConfig::default()).unwrap();
    assert_eq!(after.chain_for(Path::new("B/w.zwo")).segments(), &[2]);
}
