// Entity record: a drawable with optional animation and behaviours

use glam::{IVec2, Vec2};

use super::animation::AnimationState;
use super::attack::AttackState;
use super::chase::ChaseBehavior;
use crate::core::Rect;

/// Index of an entity in the world registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub(crate) usize);

/// Index of a loaded sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(pub usize);

/// Index of a loaded standalone image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// What an entity draws
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// A single image scaled to the entity's bounds
    StaticProp { image: ImageId },
    /// A sprite-sheet character animated from its velocity
    AnimatedCharacter {
        sheet: SheetId,
        animation: AnimationState,
    },
}

/// A live object in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub bounds: Rect,
    /// Per-tick displacement, each component in {-1, 0, 1}
    pub velocity: IVec2,
    /// Pixels moved per unit of velocity
    pub speed: f32,
    pub kind: EntityKind,
    pub attack: Option<AttackState>,
    pub chase: Option<ChaseBehavior>,
    /// Screen size to keep the entity inside after moving
    pub clamp_to: Option<Vec2>,
}

impl Entity {
    /// A static image; it still integrates its raw velocity
    pub fn prop(bounds: Rect, image: ImageId) -> Self {
        Self {
            bounds,
            velocity: IVec2::ZERO,
            speed: 1.0,
            kind: EntityKind::StaticProp { image },
            attack: None,
            chase: None,
            clamp_to: None,
        }
    }

    /// An animated character moving `speed` pixels per tick
    pub fn character(bounds: Rect, sheet: SheetId, speed: f32) -> Self {
        Self {
            bounds,
            velocity: IVec2::ZERO,
            speed,
            kind: EntityKind::AnimatedCharacter {
                sheet,
                animation: AnimationState::new(),
            },
            attack: None,
            chase: None,
            clamp_to: None,
        }
    }

    pub fn with_attack(mut self, attack: AttackState) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_chase(mut self, chase: ChaseBehavior) -> Self {
        self.chase = Some(chase);
        self
    }

    pub fn clamped_to(mut self, screen: Vec2) -> Self {
        self.clamp_to = Some(screen);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.bounds.position()
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_some_and(|attack| attack.is_attacking())
    }

    pub fn animation(&self) -> Option<&AnimationState> {
        match &self.kind {
            EntityKind::AnimatedCharacter { animation, .. } => Some(animation),
            EntityKind::StaticProp { .. } => None,
        }
    }

    pub fn animation_mut(&mut self) -> Option<&mut AnimationState> {
        match &mut self.kind {
            EntityKind::AnimatedCharacter { animation, .. } => Some(animation),
            EntityKind::StaticProp { .. } => None,
        }
    }

    /// Move by `velocity * speed`, then clamp to the screen if required
    pub fn integrate(&mut self) {
        let delta = self.velocity.as_vec2() * self.speed;
        self.bounds.translate(delta);

        if let Some(screen) = self.clamp_to {
            self.bounds.clamp_within(screen);
        }
    }

    /// Advance the animation for this tick, if the entity has one
    pub fn animate(&mut self) {
        let velocity = self.velocity;
        let attacking = self.is_attacking();
        if let Some(animation) = self.animation_mut() {
            animation.advance(velocity, attacking);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prop_moves_by_raw_vector() {
        let mut prop = Entity::prop(Rect::new(10.0, 10.0, 32.0, 32.0), ImageId(0));
        prop.velocity = IVec2::new(1, -1);
        prop.integrate();
        assert_relative_eq!(prop.bounds.x, 11.0);
        assert_relative_eq!(prop.bounds.y, 9.0);
        assert!(prop.animation().is_none());
    }

    #[test]
    fn test_character_scales_by_speed() {
        let mut character = Entity::character(Rect::new(0.0, 0.0, 10.0, 10.0), SheetId(0), 3.0);
        character.velocity = IVec2::new(1, 1);
        character.integrate();
        assert_eq!(character.position(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_clamped_character_stays_on_screen() {
        let screen = Vec2::new(500.0, 500.0);
        let mut character =
            Entity::character(Rect::new(398.0, 1.0, 100.0, 100.0), SheetId(0), 2.0)
                .clamped_to(screen);
        character.velocity = IVec2::new(1, -1);

        for _ in 0..10 {
            character.integrate();
            assert!(character.bounds.x >= 0.0 && character.bounds.x <= 400.0);
            assert!(character.bounds.y >= 0.0 && character.bounds.y <= 400.0);
        }
        assert_eq!(character.position(), Vec2::new(400.0, 0.0));
    }

    #[test]
    fn test_animate_uses_velocity() {
        let mut character = Entity::character(Rect::new(0.0, 0.0, 10.0, 10.0), SheetId(0), 1.0);
        character.velocity = IVec2::new(-1, 0);
        character.animate();

        let animation = character.animation().copied().unwrap_or_default();
        assert!(animation.flip_horizontal);
        assert_eq!(animation.frame_timer, 1);
    }

    #[test]
    fn test_not_attacking_without_attack_state() {
        let character = Entity::character(Rect::new(0.0, 0.0, 10.0, 10.0), SheetId(0), 1.0);
        assert!(!character.is_attacking());
        assert!(character.with_attack(AttackState::default()).attack.is_some());
    }
}
