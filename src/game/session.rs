// Session: a world plus the frame images its entities draw with

use image::RgbaImage;
use log::info;

use super::attack::AttackState;
use super::chase::ChaseBehavior;
use super::config::{CharacterSpec, GameConfig, PropSpec, SheetSource};
use super::entity::{Entity, EntityKind, ImageId, SheetId};
use super::pose::{Direction, Pose};
use super::world::{Controls, World};
use crate::core::Rect;
use crate::engine::assets::{AssetError, AssetLoader, SpriteSheet};

/// One thing to draw, in registry order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem<'a, T> {
    /// An image stretched over `rect`, mirrored left-right when `flip_x` is set
    Sprite {
        rect: Rect,
        image: &'a T,
        flip_x: bool,
    },
    /// A hitbox outline
    Outline { rect: Rect },
}

/// A running game: the world and the uploaded frames, keyed by `SheetId`/`ImageId`.
///
/// `T` is whatever the renderer draws with. Tests use plain integers.
pub struct Session<T> {
    world: World,
    sheets: Vec<SpriteSheet<T>>,
    images: Vec<T>,
    show_hitboxes: bool,
}

impl<T> Session<T> {
    /// Empty session with no assets
    pub fn new(show_hitboxes: bool) -> Self {
        Self {
            world: World::new(),
            sheets: Vec::new(),
            images: Vec::new(),
            show_hitboxes,
        }
    }

    /// Load every image the config names, upload it and spawn the entities.
    ///
    /// Props spawn first so they draw beneath the characters. The player spawns
    /// before the enemy so that chasers react to its position on the same tick.
    pub fn build<E>(
        config: &GameConfig,
        loader: &AssetLoader,
        mut upload: impl FnMut(&RgbaImage) -> Result<T, E>,
    ) -> anyhow::Result<Self>
    where
        E: Into<anyhow::Error>,
    {
        let mut session = Self::new(config.show_hitboxes);
        session.world.set_release_attack_pose(config.release_attack_pose);

        let required = required_poses(config.attack_enabled());
        let screen = config.screen_size();

        for prop in &config.props {
            session.add_prop(loader, prop, &mut upload)?;
        }

        let sheet = load_sheet(loader, &config.player)?;
        let sheet = session.add_sheet(sheet, &required, &mut upload)?;
        let mut player =
            Entity::character(config.player.bounds, sheet, config.player.speed).clamped_to(screen);
        if let Some(cooldown_ms) = config.attack_cooldown_ms {
            player = player.with_attack(AttackState::new(cooldown_ms));
        }
        session.world.spawn_player(player);

        if let Some(enemy) = &config.enemy {
            let sheet = load_sheet(loader, &enemy.character)?;
            let sheet = session.add_sheet(sheet, &required, &mut upload)?;
            let entity = Entity::character(enemy.character.bounds, sheet, enemy.character.speed)
                .with_chase(ChaseBehavior::new(enemy.detection_radius));
            session.world.spawn(entity);
        }

        info!(
            "Session ready: {} entities, {} sheets, {} images from {}",
            session.world.len(),
            session.sheets.len(),
            session.images.len(),
            loader.base_path().display()
        );

        Ok(session)
    }

    /// Validate a decoded sheet and upload its frames
    pub fn add_sheet<E>(
        &mut self,
        sheet: SpriteSheet<RgbaImage>,
        required: &[Pose],
        upload: impl FnMut(&RgbaImage) -> Result<T, E>,
    ) -> anyhow::Result<SheetId>
    where
        E: Into<anyhow::Error>,
    {
        sheet.validate(required)?;
        info!(
            "Loaded sheet {} ({} frames)",
            sheet.name(),
            sheet.total_frames()
        );
        let sheet = sheet
            .map_frames(upload)
            .map_err(Into::<anyhow::Error>::into)?;
        Ok(self.push_sheet(sheet))
    }

    /// Load and upload a prop image, then spawn it
    fn add_prop<E>(
        &mut self,
        loader: &AssetLoader,
        spec: &PropSpec,
        mut upload: impl FnMut(&RgbaImage) -> Result<T, E>,
    ) -> anyhow::Result<()>
    where
        E: Into<anyhow::Error>,
    {
        let image = loader.load_image(&spec.image)?;
        let image = upload(&image).map_err(Into::<anyhow::Error>::into)?;
        let image = self.push_image(image);
        self.world.spawn(Entity::prop(spec.bounds, image));
        info!("Loaded prop {}", spec.image.display());
        Ok(())
    }

    /// Register an already uploaded sheet without validation
    pub fn push_sheet(&mut self, sheet: SpriteSheet<T>) -> SheetId {
        let id = SheetId(self.sheets.len());
        self.sheets.push(sheet);
        id
    }

    /// Register a standalone image for static props
    pub fn push_image(&mut self, image: T) -> ImageId {
        let id = ImageId(self.images.len());
        self.images.push(image);
        id
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advance the world one tick
    pub fn tick(&mut self, controls: &Controls, now_ms: u64) {
        self.world.tick(controls, now_ms);
    }

    /// Everything to draw this frame. Each entity's sprite is followed by its hitbox
    /// outline when hitboxes are shown.
    pub fn draw_list(&self) -> Result<Vec<DrawItem<'_, T>>, AssetError> {
        let mut items = Vec::with_capacity(self.world.len() * 2);

        for entity in self.world.entities() {
            let (image, flip_x) = match &entity.kind {
                EntityKind::StaticProp { image } => {
                    let image = self.images.get(image.0).ok_or_else(|| {
                        AssetError::NotFound(format!("image #{}", image.0))
                    })?;
                    (image, false)
                }
                EntityKind::AnimatedCharacter { sheet, animation } => {
                    let sheet = self.sheets.get(sheet.0).ok_or_else(|| {
                        AssetError::NotFound(format!("sheet #{}", sheet.0))
                    })?;
                    let image = sheet.frame(animation.pose, animation.frame).ok_or_else(|| {
                        AssetError::MissingFrame {
                            pose: animation.pose.label(),
                            frame: animation.frame,
                        }
                    })?;
                    (image, animation.flip_horizontal)
                }
            };

            items.push(DrawItem::Sprite {
                rect: entity.bounds,
                image,
                flip_x,
            });
            if self.show_hitboxes {
                items.push(DrawItem::Outline {
                    rect: entity.bounds,
                });
            }
        }

        Ok(items)
    }
}

/// Poses a character sheet must provide
pub fn required_poses(attack_enabled: bool) -> Vec<Pose> {
    if attack_enabled {
        Pose::ALL.to_vec()
    } else {
        Direction::ALL.into_iter().map(Pose::Locomotion).collect()
    }
}

fn load_sheet(
    loader: &AssetLoader,
    spec: &CharacterSpec,
) -> Result<SpriteSheet<RgbaImage>, AssetError> {
    match &spec.sheet {
        SheetSource::Grid {
            path,
            cell_width,
            cell_height,
        } => SpriteSheet::load_grid(loader, path, *cell_width, *cell_height),
        SheetSource::Directories { path } => SpriteSheet::load_directories(loader, path),
    }
}
