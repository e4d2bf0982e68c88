//! Purpose: Input gathering and output filename rewriting for the CLI.
//! Exports: `collect_inputs`, `csv_output_name`, `csb_output_name`, `absolute`.
//! Role: Keep path validation and name policy out of command dispatch.
//! Invariants: Directory scans are flat; nothing recurses.
//! Invariants: Path problems surface as `ErrorKind::Path` so the process
//! exits with -1, distinct from decode-error exit codes.

use std::path::{Path, PathBuf};

use csbkit::core::error::{Error, ErrorKind};

/// Validate explicit files, scan directories one level deep, and apply the
/// extension filter when `ignore` is set. Selection order is files first,
/// then directory entries in listing order.
pub(crate) fn collect_inputs(
    files: &[PathBuf],
    dirs: &[PathBuf],
    ignore: bool,
    extension: &str,
) -> Result<Vec<PathBuf>, Error> {
    let mut selected = Vec::new();

    for file in files {
        if !file.exists() {
            return Err(Error::new(ErrorKind::Path).with_message(format!(
                "input file '{}' does not exist",
                absolute(file).display()
            )));
        }
        if file.is_dir() {
            return Err(Error::new(ErrorKind::Path)
                .with_message(format!(
                    "input file '{}' is a directory",
                    absolute(file).display()
                ))
                .with_hint("Pass directories with --dirs instead."));
        }
        selected.push(file.clone());
    }

    for dir in dirs {
        if !dir.exists() {
            return Err(Error::new(ErrorKind::Path).with_message(format!(
                "input directory '{}' does not exist",
                absolute(dir).display()
            )));
        }
        if !dir.is_dir() {
            return Err(Error::new(ErrorKind::Path).with_message(format!(
                "input directory '{}' is not a directory",
                absolute(dir).display()
            )));
        }
        let entries = std::fs::read_dir(dir)
            .map_err(|err| Error::new(ErrorKind::Io).with_path(dir).with_source(err))?;
        for entry in entries {
            let entry =
                entry.map_err(|err| Error::new(ErrorKind::Io).with_path(dir).with_source(err))?;
            selected.push(entry.path());
        }
    }

    if ignore {
        selected.retain(|path| has_extension(path, extension));
    }

    tracing::debug!(count = selected.len(), extension, "selected input files");

    Ok(selected)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Output name for a decoded file: `.csv` names pass through, `.csv.csb`
/// and `.csb` lose their container suffix, anything else gains `.csv`.
pub(crate) fn csv_output_name(name: &str) -> String {
    if name.ends_with(".csv") {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix(".csv.csb") {
        return format!("{stem}.csv");
    }
    if let Some(stem) = name.strip_suffix(".csb") {
        return format!("{stem}.csv");
    }
    format!("{name}.csv")
}

/// Output name for an encoded file: `.csb` names pass through, anything
/// else gains `.csb`.
pub(crate) fn csb_output_name(name: &str) -> String {
    if name.ends_with(".csb") {
        return name.to_string();
    }
    format!("{name}.csb")
}

pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{collect_inputs, csb_output_name, csv_output_name};
    use csbkit::core::error::ErrorKind;
    use std::fs;

    #[test]
    fn csv_names_follow_the_rewrite_rules() {
        assert_eq!(csv_output_name("table.csv"), "table.csv");
        assert_eq!(csv_output_name("table.csv.csb"), "table.csv");
        assert_eq!(csv_output_name("table.csb"), "table.csv");
        assert_eq!(csv_output_name("table"), "table.csv");
    }

    #[test]
    fn csb_names_follow_the_rewrite_rules() {
        assert_eq!(csb_output_name("table.csb"), "table.csb");
        assert_eq!(csb_output_name("table.csv"), "table.csv.csb");
        assert_eq!(csb_output_name("table"), "table.csb");
    }

    #[test]
    fn missing_file_is_a_path_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.csb");
        let err = collect_inputs(&[missing], &[], false, "csb").expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Path);
    }

    #[test]
    fn directory_given_as_file_is_a_path_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = collect_inputs(&[dir.path().to_path_buf()], &[], false, "csb")
            .expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Path);
    }

    #[test]
    fn ignore_filters_on_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let keep = dir.path().join("keep.csb");
        let skip = dir.path().join("skip.txt");
        fs::write(&keep, b"").expect("write");
        fs::write(&skip, b"").expect("write");

        let selected =
            collect_inputs(&[], &[dir.path().to_path_buf()], true, "csb").expect("collect");
        assert_eq!(selected, vec![keep.clone()]);

        let unfiltered =
            collect_inputs(&[], &[dir.path().to_path_buf()], false, "csb").expect("collect");
        assert_eq!(unfiltered.len(), 2);
    }
}
