// Sprite sheets: per-pose frame sequences

use super::{AssetError, AssetLoader};
use crate::game::animation::{ATTACK_LAST_FRAME, LOCOMOTION_FRAME_COUNT};
use crate::game::pose::{Direction, Pose};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;

/// Frame images grouped by pose. Built once when an entity is created.
#[derive(Debug, Clone)]
pub struct SpriteSheet<T> {
    name: String,
    frames: HashMap<Pose, Vec<T>>,
}

impl<T> SpriteSheet<T> {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: HashMap::new(),
        }
    }

    /// Set the frame sequence for a pose
    pub fn insert(&mut self, pose: Pose, frames: Vec<T>) {
        self.frames.insert(pose, frames);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frame `index` of `pose`
    pub fn frame(&self, pose: Pose, index: usize) -> Option<&T> {
        self.frames.get(&pose).and_then(|frames| frames.get(index))
    }

    /// Number of frames for `pose` (0 if the pose is absent)
    pub fn frame_count(&self, pose: Pose) -> usize {
        self.frames.get(&pose).map_or(0, Vec::len)
    }

    /// Total frames across all poses
    pub fn total_frames(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    /// Check that every pose in `poses` has enough frames for its animation regime
    pub fn validate(&self, poses: &[Pose]) -> Result<(), AssetError> {
        for &pose in poses {
            let required = if pose.is_attack() {
                ATTACK_LAST_FRAME + 1
            } else {
                LOCOMOTION_FRAME_COUNT
            };
            let available = self.frame_count(pose);
            if available < required {
                return Err(AssetError::IncompleteSheet {
                    name: self.name.clone(),
                    reason: format!(
                        "pose {} has {} frames, needs {}",
                        pose.label(),
                        available,
                        required
                    ),
                });
            }
        }
        Ok(())
    }

    /// Convert every frame, e.g. from decoded images to GPU texture handles
    pub fn map_frames<U, E>(
        self,
        mut convert: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<SpriteSheet<U>, E> {
        let mut mapped = SpriteSheet::new(self.name);
        for (pose, frames) in self.frames {
            let frames = frames.iter().map(&mut convert).collect::<Result<Vec<_>, E>>()?;
            mapped.frames.insert(pose, frames);
        }
        Ok(mapped)
    }
}

impl SpriteSheet<RgbaImage> {
    /// Slice a single image into a grid of `cell_width` x `cell_height` cells.
    ///
    /// Column is the frame index and row the pose code, so the image needs at least
    /// one row per [`Direction`]. Extra rows are ignored.
    pub fn from_grid(
        name: impl Into<String>,
        image: &RgbaImage,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        if cell_width == 0 || cell_height == 0 {
            return Err(AssetError::IncompleteSheet {
                name,
                reason: "cell size must be non-zero".to_string(),
            });
        }

        let columns = image.width() / cell_width;
        let rows = image.height() / cell_height;
        if (rows as usize) < Direction::ALL.len() || columns == 0 {
            return Err(AssetError::IncompleteSheet {
                name,
                reason: format!(
                    "{}x{} grid of {}x{} cells, needs at least {} rows",
                    columns,
                    rows,
                    cell_width,
                    cell_height,
                    Direction::ALL.len()
                ),
            });
        }

        let mut sheet = Self::new(name);
        for direction in Direction::ALL {
            let y = direction.code() * cell_height;
            let frames = (0..columns)
                .map(|column| {
                    image::imageops::crop_imm(image, column * cell_width, y, cell_width, cell_height)
                        .to_image()
                })
                .collect();
            sheet.insert(Pose::Locomotion(direction), frames);
        }

        Ok(sheet)
    }

    /// Load a grid sheet from an image file
    pub fn load_grid<P: AsRef<Path>>(
        loader: &AssetLoader,
        path: P,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = loader.load_image(path)?;
        Self::from_grid(path.to_string_lossy(), &image, cell_width, cell_height)
    }

    /// Load one directory per pose under `base`, e.g. `player/down_attack/*.png`.
    /// Every pose directory must exist and hold at least one image.
    pub fn load_directories<P: AsRef<Path>>(
        loader: &AssetLoader,
        base: P,
    ) -> Result<Self, AssetError> {
        let base = base.as_ref();
        let mut sheet = Self::new(base.to_string_lossy());

        for pose in Pose::ALL {
            let dir = base.join(pose.label());
            let frames = loader.load_frames(&dir)?;
            if frames.is_empty() {
                return Err(AssetError::EmptyPose(
                    loader.resolve(&dir).to_string_lossy().to_string(),
                ));
            }
            sheet.insert(pose, frames);
        }

        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Grid where each cell's top-left pixel encodes (column, row)
    fn grid_image(columns: u32, rows: u32, cell: u32) -> RgbaImage {
        RgbaImage::from_fn(columns * cell, rows * cell, |x, y| {
            Rgba([(x / cell) as u8, (y / cell) as u8, 0, 255])
        })
    }

    fn write_pose_dirs(base: &Path, frames_per_pose: usize) {
        for pose in Pose::ALL {
            let dir = base.join(pose.label());
            std::fs::create_dir_all(&dir).unwrap();
            for i in 0..frames_per_pose {
                RgbaImage::from_pixel(4, 4, Rgba([i as u8, 0, 0, 255]))
                    .save(dir.join(format!("{:02}.png", i)))
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_grid_rows_are_poses() {
        let sheet = SpriteSheet::from_grid("rus", &grid_image(6, 5, 32), 32, 32).unwrap();

        for direction in Direction::ALL {
            let pose = Pose::Locomotion(direction);
            assert_eq!(sheet.frame_count(pose), 6);
            let cell = sheet.frame(pose, 3).unwrap();
            assert_eq!(cell.dimensions(), (32, 32));
            assert_eq!(cell.get_pixel(0, 0)[0], 3);
            assert_eq!(cell.get_pixel(0, 0)[1], direction.code() as u8);
        }
        assert_eq!(sheet.frame_count(Pose::Attack(Direction::Down)), 0);
        assert_eq!(sheet.total_frames(), 30);
    }

    #[test]
    fn test_grid_ignores_partial_cells_and_extra_rows() {
        let mut image = grid_image(7, 6, 32);
        image = image::imageops::crop_imm(&image, 0, 0, 7 * 32 - 5, 6 * 32).to_image();
        let sheet = SpriteSheet::from_grid("rus", &image, 32, 32).unwrap();
        assert_eq!(sheet.frame_count(Pose::Locomotion(Direction::Up)), 6);
    }

    #[test]
    fn test_grid_too_few_rows() {
        let result = SpriteSheet::from_grid("rus", &grid_image(6, 4, 32), 32, 32);
        assert!(matches!(result, Err(AssetError::IncompleteSheet { .. })));
    }

    #[test]
    fn test_validate_frame_counts() {
        let mut sheet = SpriteSheet::new("test");
        sheet.insert(Pose::Locomotion(Direction::Down), vec![0; 6]);
        sheet.insert(Pose::Attack(Direction::Down), vec![0; 3]);
        assert!(sheet
            .validate(&[Pose::Locomotion(Direction::Down), Pose::Attack(Direction::Down)])
            .is_ok());

        sheet.insert(Pose::Attack(Direction::Down), vec![0; 2]);
        assert!(sheet.validate(&[Pose::Attack(Direction::Down)]).is_err());
        assert!(sheet.validate(&[Pose::Locomotion(Direction::Up)]).is_err());
    }

    #[test]
    fn test_map_frames() {
        let mut sheet = SpriteSheet::new("test");
        sheet.insert(Pose::Locomotion(Direction::Up), vec![1, 2, 3]);

        let mapped: SpriteSheet<String> =
            sheet.map_frames(|n| Ok::<_, AssetError>(format!("tex{}", n))).unwrap();
        assert_eq!(mapped.name(), "test");
        assert_eq!(
            mapped.frame(Pose::Locomotion(Direction::Up), 2).map(String::as_str),
            Some("tex3")
        );

        let failed = mapped.map_frames(|_| Err::<u8, _>("gpu lost"));
        assert_eq!(failed.err(), Some("gpu lost"));
    }

    #[test]
    fn test_load_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_pose_dirs(&dir.path().join("player"), 6);

        let loader = AssetLoader::new(dir.path());
        let sheet = SpriteSheet::load_directories(&loader, "player").unwrap();
        assert_eq!(sheet.total_frames(), 60);
        assert!(sheet.validate(&Pose::ALL).is_ok());

        let second = sheet.frame(Pose::Attack(Direction::UpHorizontal), 1).unwrap();
        assert_eq!(second.get_pixel(0, 0)[0], 1);
    }

    #[test]
    fn test_load_directories_missing_pose() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("enemy");
        write_pose_dirs(&base, 3);
        std::fs::remove_dir_all(base.join("up_horizontal_attack")).unwrap();

        let loader = AssetLoader::new(dir.path());
        let result = SpriteSheet::load_directories(&loader, "enemy");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_load_directories_empty_pose() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("enemy");
        write_pose_dirs(&base, 1);
        std::fs::remove_file(base.join("down").join("00.png")).unwrap();

        let loader = AssetLoader::new(dir.path());
        let result = SpriteSheet::load_directories(&loader, "enemy");
        assert!(matches!(result, Err(AssetError::EmptyPose(_))));
    }
}
