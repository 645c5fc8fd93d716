use crate::{error::ExportError, tonemap::ColorBuffer};
use image::{Rgba, RgbaImage};
use log::info;
use std::fs;
use std::path::Path;

/// Write `buffer` to `path`, picking the format from the extension.
///
/// An existing file is never overwritten; missing parent directories are
/// created.
pub fn save(buffer: &ColorBuffer, path: &Path) -> Result<(), ExportError> {
    if path.exists() {
        return Err(ExportError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let img = RgbaImage::from_fn(buffer.width, buffer.height, |x, y| Rgba(buffer.get(x, y)));
    img.save(path)?;
    info!("Saved → {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColorBuffer {
        ColorBuffer {
            width: 3,
            height: 2,
            pixels: vec![
                [255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255],
                [0, 0, 0, 255], [128, 128, 128, 255], [255, 255, 255, 255],
            ],
        }
    }

    #[test]
    fn test_save_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        save(&sample(), &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [128, 128, 128, 255]);
        assert_eq!(loaded.get_pixel(2, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"keep me").unwrap();

        let result = save(&sample(), &path);
        assert!(matches!(result, Err(ExportError::AlreadyExists(_))));
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }
}
