use std::path::{Component, Path, PathBuf};

use crate::error::{JinjadirError, Result};

/// Join a rendered relative path onto the target directory.
///
/// The rendered path must stay inside `target_dir`: it may not be empty,
/// absolute, or contain `..`.
pub fn resolve_target(target_dir: &Path, template: &str, rendered: &str) -> Result<PathBuf> {
    let unsafe_path = || JinjadirError::UnsafeTargetPath {
        template: template.to_string(),
        rendered: rendered.to_string(),
    };

    let mut relative = PathBuf::new();
    for component in Path::new(rendered).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path());
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(unsafe_path());
    }

    Ok(target_dir.join(relative))
}

/// Create `path` and all of its missing ancestors. Existing directories are fine.
pub fn make_dirs(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| JinjadirError::Io {
        context: format!("creating directory {}", path.display()),
        source: e,
    })
}

/// Write `content` to `path`, creating parent directories and replacing any existing file.
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        make_dirs(parent)?;
    }
    std::fs::write(path, content).map_err(|e| JinjadirError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })
}
