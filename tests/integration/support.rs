use std::fs;
use std::path::{Path, PathBuf};

use zwotag::run::{OutputTarget, RunOptions};
use zwotag::tree::WalkerConfig;

/// A Zwift-style workout with the given name and description
pub fn workout(name: &str, description: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<workout_file>
    <author>Coach</author>
    <name>{}</name>
    <description>{}</description>
    <sportType>bike</sportType>
    <tags>
        <tag name="FTP"/>
    </tags>
    <workout>
        <Warmup Duration="600" PowerLow="0.25" PowerHigh="0.75"/>
        <SteadyState Duration="1200" Power="0.88"/>
    </workout>
</workout_file>
"#,
        name, description
    )
}

pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

pub fn read_file(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

pub fn in_place_options() -> RunOptions {
    RunOptions {
        walker: WalkerConfig::default(),
        target: OutputTarget::InPlace,
        dry_run: false,
    }
}

pub fn mirror_options(dir: &Path) -> RunOptions {
    RunOptions {
        walker: WalkerConfig::default(),
        target: OutputTarget::Directory(dir.to_path_buf()),
        dry_run: false,
    }
}
