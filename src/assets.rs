use std::path::{Path, PathBuf};

const ASSETS_ENV: &str = "NUSA_ASSETS";
/// How many directories above each starting point are tried.
const SEARCH_DEPTH: usize = 5;

/// Directory holding `assets/`. An explicit `--assets` wins, then
/// `NUSA_ASSETS`; otherwise the first directory at or above the working
/// dir, the executable or this package that contains the content tables.
pub fn resolve_assets_root(cli: Option<String>) -> PathBuf {
    let explicit = cli
        .map(|p| (PathBuf::from(p), "--assets"))
        .into_iter()
        .chain(std::env::var(ASSETS_ENV).ok().map(|p| (PathBuf::from(p), ASSETS_ENV)));
    for (dir, source) in explicit {
        if dir.is_dir() {
            return dir;
        }
        log::warn!("{} points at {:?}, which is not a directory", source, dir);
    }

    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let package = Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    let found = [cwd.clone(), exe_dir, package]
        .into_iter()
        .flatten()
        .find_map(|start| {
            start
                .ancestors()
                .take(SEARCH_DEPTH + 1)
                .find(|dir| content_path(dir).is_file())
                .map(Path::to_path_buf)
        });
    match found {
        Some(root) => root,
        None => {
            log::warn!("no assets/content.toml found; using the working directory");
            cwd.unwrap_or_else(|| PathBuf::from("."))
        }
    }
}

pub fn content_path(root: &Path) -> PathBuf {
    media_dir(root).join("content.toml")
}

/// Province outlines. The bundled file is a coarse one-polygon-per-province
/// set; pass `--geojson` for full-resolution boundaries in the same feature
/// order.
pub fn geojson_path(root: &Path) -> PathBuf {
    media_dir(root).join("indonesia-provinces.geojson")
}

/// Model and music paths in the content tables are relative to this.
pub fn media_dir(root: &Path) -> PathBuf {
    root.join("assets")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_is_used_as_is() {
        let here = env!("CARGO_MANIFEST_DIR").to_string();
        assert_eq!(resolve_assets_root(Some(here.clone())), PathBuf::from(here));
    }

    #[test]
    fn missing_dir_falls_back_to_a_search() {
        let root = resolve_assets_root(Some("/definitely/not/assets".into()));
        assert!(content_path(&root).is_file());
        assert!(geojson_path(&root).is_file());
    }
}
