use anyhow::Context;
use glob::glob;
use std::path::{Path, PathBuf};

const LHCO_EXTENSION: &str = "lhco";

/// Input files of a run, plus the directory they were found in when one was given.
#[derive(Debug, Clone)]
pub struct InputSet {
    pub files: Vec<PathBuf>,
    pub directory: Option<PathBuf>,
}

fn is_lhco(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(LHCO_EXTENSION)
}

/// A single directory expands to its `*.lhco` files (sorted); otherwise only
/// arguments with the `.lhco` extension are kept.
pub fn resolve_inputs(inputs: &[PathBuf]) -> anyhow::Result<InputSet> {
    let set = match inputs {
        [dir] if dir.is_dir() => {
            let pattern = format!("{}/*.{}", dir.display(), LHCO_EXTENSION);
            let mut files = Vec::new();
            for entry in glob(&pattern)
                .with_context(|| format!("invalid input pattern {}", pattern))?
            {
                let path =
                    entry.with_context(|| format!("listing input directory {}", dir.display()))?;
                if path.is_file() {
                    files.push(path);
                }
            }
            files.sort();
            InputSet {
                files,
                directory: Some(dir.clone()),
            }
        }
        _ => InputSet {
            files: inputs.iter().filter(|path| is_lhco(path)).cloned().collect(),
            directory: None,
        },
    };

    if set.files.is_empty() {
        anyhow::bail!("no .{} input files found", LHCO_EXTENSION);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directory_expands_to_sorted_lhco_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.lhco", "a.lhco", "notes.txt", "c.lhco.gz"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let set = resolve_inputs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = set
            .files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.lhco", "b.lhco"]);
        assert!(set.directory.is_some());
    }

    #[test]
    fn directory_skips_nested_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("run.lhco")).unwrap();
        fs::write(dir.path().join("run_01.lhco"), "").unwrap();
        let set = resolve_inputs(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(set.files, vec![dir.path().join("run_01.lhco")]);
    }

    #[test]
    fn directory_without_lhco_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        assert!(resolve_inputs(&[dir.path().to_path_buf()]).is_err());
    }

    #[test]
    fn explicit_list_keeps_only_lhco() {
        let inputs = vec![PathBuf::from("x.lhco"), PathBuf::from("y.root")];
        let set = resolve_inputs(&inputs).unwrap();
        assert_eq!(set.files, vec![PathBuf::from("x.lhco")]);
        assert!(set.directory.is_none());
    }

    #[test]
    fn empty_selection_is_an_error() {
        assert!(resolve_inputs(&[]).is_err());
        assert!(resolve_inputs(&[PathBuf::from("events.txt")]).is_err());
    }
}
