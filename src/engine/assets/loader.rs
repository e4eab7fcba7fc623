// Asset file lookup and image decoding

use super::AssetError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Image extensions picked up as animation frames
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.base_path.join(relative)
    }

    /// Decode an image to RGBA
    pub fn load_image<P: AsRef<Path>>(&self, relative: P) -> Result<RgbaImage, AssetError> {
        let path = self.resolve(relative);
        Self::decode(&path)
    }

    /// Image files in `relative`, sorted by file name
    pub fn list_frames<P: AsRef<Path>>(&self, relative: P) -> Result<Vec<PathBuf>, AssetError> {
        let dir = self.resolve(relative);

        if !dir.is_dir() {
            return Err(AssetError::NotFound(dir.to_string_lossy().to_string()));
        }

        let mut frames = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_image = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
            if is_image {
                frames.push(path);
            }
        }

        // read_dir order is filesystem-dependent
        frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(frames)
    }

    /// Decode every frame in a directory, in file-name order
    pub fn load_frames<P: AsRef<Path>>(&self, relative: P) -> Result<Vec<RgbaImage>, AssetError> {
        self.list_frames(relative)?
            .iter()
            .map(|path| Self::decode(path))
            .collect()
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn decode(path: &Path) -> Result<RgbaImage, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let image = image::open(path).map_err(|e| {
            AssetError::LoadError(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        Ok(image.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(path: &Path, shade: u8) {
        let image = RgbaImage::from_pixel(2, 2, Rgba([shade, 0, 0, 255]));
        image.save(path).unwrap();
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/data");
        let path = loader.resolve("player/down");
        assert_eq!(path, PathBuf::from("/game/data/player/down"));
        assert_eq!(loader.base_path(), Path::new("/game/data"));
    }

    #[test]
    fn test_list_frames_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let pose_dir = dir.path().join("down");
        std::fs::create_dir(&pose_dir).unwrap();

        write_png(&pose_dir.join("frame_2.png"), 2);
        write_png(&pose_dir.join("frame_0.png"), 0);
        write_png(&pose_dir.join("frame_1.png"), 1);
        std::fs::write(pose_dir.join("notes.txt"), "not a frame").unwrap();
        std::fs::create_dir(pose_dir.join("nested.png")).unwrap();

        let loader = AssetLoader::new(dir.path());
        let frames = loader.list_frames("down").unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["frame_0.png", "frame_1.png", "frame_2.png"]);
    }

    #[test]
    fn test_load_frames_decodes_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let pose_dir = dir.path().join("up");
        std::fs::create_dir(&pose_dir).unwrap();
        write_png(&pose_dir.join("b.png"), 20);
        write_png(&pose_dir.join("a.png"), 10);

        let frames = AssetLoader::new(dir.path()).load_frames("up").unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].get_pixel(0, 0)[0], 10);
        assert_eq!(frames[1].get_pixel(0, 0)[0], 20);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AssetLoader::new(dir.path()).list_frames("horizontal");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AssetLoader::new(dir.path()).load_image("sheet.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sheet.png"), b"definitely not a png").unwrap();
        let result = AssetLoader::new(dir.path()).load_image("sheet.png");
        assert!(matches!(result, Err(AssetError::LoadError(_))));
    }
}
