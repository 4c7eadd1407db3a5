use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Walk an author-per-directory root and collect every visible `.txt` file,
/// sorted for deterministic batch order. Hidden files and loose files at the
/// root are skipped, matching the expected corpus layout.
pub fn text_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(root).with_context(|| format!("read {:?}", root))? {
        let author_dir = entry?.path();
        if !author_dir.is_dir() {
            continue;
        }
        for entry in
            fs::read_dir(&author_dir).with_context(|| format!("read {:?}", author_dir))?
        {
            let path = entry?.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => n,
                None => continue,
            };
            if name.starts_with('.') || !name.ends_with(".txt") {
                continue;
            }
            paths.push(path);
        }
    }

    paths.sort();
    debug!("Discovered documents - root={}, count={}", root.display(), paths.len());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_only_visible_txt_files_in_author_dirs() {
        let root = std::env::temp_dir().join("lexflow-discover-test");
        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(root.join("Keats")).unwrap();
        fs::create_dir_all(root.join("Shelley")).unwrap();
        fs::write(root.join("Keats/ode.txt"), "autumn").unwrap();
        fs::write(root.join("Keats/.hidden.txt"), "x").unwrap();
        fs::write(root.join("Keats/notes.md"), "x").unwrap();
        fs::write(root.join("Shelley/west-wind.txt"), "wild").unwrap();
        fs::write(root.join("loose.txt"), "x").unwrap();

        let paths = text_paths(&root).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ode.txt", "west-wind.txt"]);

        fs::remove_dir_all(root).ok();
    }
}
