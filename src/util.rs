// PixelQuad
// copyright 2026 pixelquad developers

//! Path helpers for locating assets (shader files, textures, logs) relative
//! to the crate root, so the demo works no matter which subdirectory it is
//! launched from.

use std::{
    env,
    fs::read_dir,
    io::{self, ErrorKind},
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

/// Walks up from the current directory until a directory containing
/// `flag_file` is found.
pub fn get_project_root(flag_file: &str) -> io::Result<PathBuf> {
    let path = env::current_dir()?;
    let path_ancestors = path.as_path().ancestors();

    for p in path_ancestors {
        let has_flag = read_dir(p)?.any(|e| match e {
            Ok(e) => e.file_name() == *flag_file,
            Err(_) => false,
        });
        if has_flag {
            return Ok(PathBuf::from(p));
        }
    }
    Err(io::Error::new(
        ErrorKind::NotFound,
        "Ran out of places to find flag_file",
    ))
}

/// Gets the absolute path of the crate root. It looks for where Cargo.toml
/// locates; when nothing is found the current directory is used, so deployed
/// binaries can simply ship an assets folder next to a Cargo.toml marker.
pub fn get_root_path() -> String {
    match get_project_root("Cargo.toml") {
        Ok(p) => p.to_string_lossy().into_owned(),
        Err(_e) => ".".to_string(),
    }
}

pub fn get_abs_path(fpath: &str) -> String {
    if Path::new(fpath).is_relative() {
        format!("{}{}{}", get_root_path(), MAIN_SEPARATOR, fpath)
    } else {
        fpath.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_path_passthrough() {
        let p = if cfg!(windows) { "C:\\tmp\\a.log" } else { "/tmp/a.log" };
        assert_eq!(get_abs_path(p), p);
    }

    #[test]
    fn relative_path_is_anchored() {
        let p = get_abs_path("assets/shaders/basic.shader");
        assert!(Path::new(&p).is_absolute() || p.starts_with('.'));
        assert!(p.ends_with("basic.shader"));
    }
}
