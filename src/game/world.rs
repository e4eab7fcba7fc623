// World: owned entity registry and the per-tick update

use glam::{IVec2, Vec2};
use log::debug;

use super::attack::AttackEvent;
use super::entity::{Entity, EntityId};

/// Player intent for one tick, derived from input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Movement direction, each component in {-1, 0, 1}
    pub direction: IVec2,
    /// True only on the tick the attack input went down
    pub attack_pressed: bool,
}

/// All live entities, updated in insertion order
#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    player: Option<EntityId>,
    /// When set, a finished attack also drops the attack pose
    release_attack_pose: bool,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_release_attack_pose(&mut self, release: bool) {
        self.release_attack_pose = release;
    }

    /// Add an entity to the end of the registry
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(entity);
        id
    }

    /// Add the player-controlled entity
    pub fn spawn_player(&mut self, entity: Entity) -> EntityId {
        let id = self.spawn(entity);
        self.player = Some(id);
        id
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entity(id))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Run one fixed tick. `now_ms` is the game clock used for attack cooldowns.
    pub fn tick(&mut self, controls: &Controls, now_ms: u64) {
        for index in 0..self.entities.len() {
            let is_player = self.player.map(|id| id.0) == Some(index);

            // Chasers follow wherever the player is right now, which already includes
            // this tick's move when the player was spawned first
            let target = self.player_position();

            let release_attack_pose = self.release_attack_pose;
            let entity = &mut self.entities[index];

            if is_player {
                Self::drive_player(entity, controls, now_ms, release_attack_pose);
            }

            if let (Some(chase), Some(target)) = (entity.chase.as_mut(), target) {
                if !is_player {
                    let was_chasing = chase.is_chasing();
                    entity.velocity = chase.steer(entity.bounds.position(), target);
                    if was_chasing != chase.is_chasing() {
                        debug!(
                            "Entity {} {} chase",
                            index,
                            if was_chasing { "stopped" } else { "started" }
                        );
                    }
                }
            }

            entity.integrate();
            entity.animate();
        }
    }

    fn drive_player(
        entity: &mut Entity,
        controls: &Controls,
        now_ms: u64,
        release_attack_pose: bool,
    ) {
        entity.velocity = controls.direction;

        let Some(attack) = entity.attack.as_mut() else {
            return;
        };

        match attack.update(controls.attack_pressed, now_ms) {
            Some(AttackEvent::Started) => {
                debug!(
                    "Player attack started at {} ms, locked for {} ms",
                    now_ms,
                    attack.cooldown_ms()
                );
                if let Some(animation) = entity.animation_mut() {
                    animation.reset_frame();
                }
            }
            Some(AttackEvent::Finished) => {
                if let Some(animation) = entity.animation_mut() {
                    animation.reset_frame();
                    if release_attack_pose {
                        animation.pose = animation.pose.to_locomotion();
                    }
                }
                debug!(
                    "Player attack finished at {} ms, pose {:?}",
                    now_ms,
                    entity.animation().map(|a| a.pose)
                );
            }
            None => {}
        }

        if entity.is_attacking() {
            entity.velocity = IVec2::ZERO;
        }
    }

    /// Position of the player, if one was spawned
    pub fn player_position(&self) -> Option<Vec2> {
        self.player().map(Entity::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::game::attack::AttackState;
    use crate::game::chase::ChaseBehavior;
    use crate::game::entity::{ImageId, SheetId};
    use crate::game::pose::{Direction, Pose};
    use approx::assert_relative_eq;

    fn player(x: f32, y: f32, screen: Vec2) -> Entity {
        Entity::character(Rect::new(x, y, 100.0, 100.0), SheetId(0), 2.0).clamped_to(screen)
    }

    fn walk(direction: IVec2) -> Controls {
        Controls {
            direction,
            attack_pressed: false,
        }
    }

    fn attack() -> Controls {
        Controls {
            direction: IVec2::ZERO,
            attack_pressed: true,
        }
    }

    fn pose_of(world: &World, id: EntityId) -> Pose {
        world
            .entity(id)
            .and_then(Entity::animation)
            .map(|a| a.pose)
            .unwrap_or_default()
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = World::new();
        assert_eq!(world.len(), 0);
        assert!(world.player().is_none());
    }

    #[test]
    fn test_spawn_preserves_order() {
        let mut world = World::new();
        let a = world.spawn(Entity::prop(Rect::new(0.0, 0.0, 1.0, 1.0), ImageId(0)));
        let b = world.spawn_player(player(0.0, 0.0, Vec2::splat(500.0)));
        assert_eq!(a.0, 0);
        assert_eq!(b.0, 1);
        assert_eq!(world.player(), world.entity(b));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_player_moves_with_controls() {
        let mut world = World::new();
        let id = world.spawn_player(player(250.0, 250.0, Vec2::splat(500.0)));

        world.tick(&walk(IVec2::new(1, -1)), 0);
        let pos = world.player_position().unwrap_or_default();
        assert_relative_eq!(pos.x, 252.0);
        assert_relative_eq!(pos.y, 248.0);
        assert_eq!(pose_of(&world, id), Pose::Locomotion(Direction::UpHorizontal));
    }

    #[test]
    fn test_player_clamped_for_any_input() {
        let screen = Vec2::new(500.0, 500.0);
        let mut world = World::new();
        world.spawn_player(player(250.0, 250.0, screen));

        let directions = [
            IVec2::new(-1, -1),
            IVec2::new(1, 1),
            IVec2::new(1, -1),
            IVec2::new(-1, 1),
            IVec2::new(0, 1),
        ];

        for direction in directions {
            for tick in 0..200 {
                world.tick(&walk(direction), tick);
                let pos = world.player_position().unwrap_or_default();
                assert!(pos.x >= 0.0 && pos.x <= screen.x - 100.0);
                assert!(pos.y >= 0.0 && pos.y <= screen.y - 100.0);
            }
        }
    }

    #[test]
    fn test_props_update_in_registry() {
        let mut world = World::new();
        let mut drifting = Entity::prop(Rect::new(5.0, 5.0, 10.0, 10.0), ImageId(0));
        drifting.velocity = IVec2::new(1, 0);
        let prop = world.spawn(drifting);

        world.tick(&Controls::default(), 0);
        world.tick(&Controls::default(), 16);
        assert_eq!(world.entity(prop).map(Entity::position), Some(Vec2::new(7.0, 5.0)));
    }

    #[test]
    fn test_attack_locks_movement() {
        let mut world = World::new();
        let id = world.spawn_player(
            player(250.0, 250.0, Vec2::splat(500.0)).with_attack(AttackState::default()),
        );

        world.tick(&walk(IVec2::new(1, 0)), 0);
        world.tick(&attack(), 16);

        assert!(world.entity(id).is_some_and(Entity::is_attacking));
        assert_eq!(pose_of(&world, id), Pose::Attack(Direction::Horizontal));

        // Holding a direction does not move an attacking player
        let before = world.player_position();
        world.tick(&walk(IVec2::new(1, 0)), 32);
        assert_eq!(world.player_position(), before);
        assert_eq!(world.entity(id).map(|e| e.velocity), Some(IVec2::ZERO));
    }

    #[test]
    fn test_attack_start_resets_frame() {
        let mut world = World::new();
        let id = world.spawn_player(
            player(250.0, 250.0, Vec2::splat(500.0)).with_attack(AttackState::default()),
        );

        for tick in 0..6 {
            world.tick(&walk(IVec2::new(0, 1)), tick * 16);
        }
        assert_eq!(world.entity(id).and_then(Entity::animation).map(|a| a.frame), Some(1));

        world.tick(&attack(), 100);
        assert_eq!(world.entity(id).and_then(Entity::animation).map(|a| a.frame), Some(0));
    }

    #[test]
    fn test_attack_window() {
        let mut world = World::new();
        let id = world.spawn_player(
            player(250.0, 250.0, Vec2::splat(500.0)).with_attack(AttackState::default()),
        );

        world.tick(&attack(), 1_000);
        world.tick(&walk(IVec2::new(1, 0)), 1_299);
        assert!(world.entity(id).is_some_and(Entity::is_attacking));

        world.tick(&walk(IVec2::new(1, 0)), 1_300);
        assert!(!world.entity(id).is_some_and(Entity::is_attacking));
        // Free to move on the tick the lock ends
        assert_relative_eq!(world.player_position().unwrap_or_default().x, 252.0);
    }

    #[test]
    fn test_attack_pose_lingers_when_idle() {
        let mut world = World::new();
        let id = world.spawn_player(
            player(250.0, 250.0, Vec2::splat(500.0)).with_attack(AttackState::default()),
        );

        world.tick(&attack(), 0);
        let mut now = 0;
        while world.entity(id).is_some_and(Entity::is_attacking) {
            now += 16;
            world.tick(&Controls::default(), now);
        }

        assert_eq!(pose_of(&world, id), Pose::Attack(Direction::Down));
        world.tick(&Controls::default(), now + 16);
        assert_eq!(pose_of(&world, id), Pose::Attack(Direction::Down));

        world.tick(&walk(IVec2::new(0, -1)), now + 32);
        assert_eq!(pose_of(&world, id), Pose::Locomotion(Direction::Up));
    }

    #[test]
    fn test_release_attack_pose_option() {
        let mut world = World::new();
        world.set_release_attack_pose(true);
        let id = world.spawn_player(
            player(250.0, 250.0, Vec2::splat(500.0)).with_attack(AttackState::default()),
        );

        world.tick(&attack(), 0);
        world.tick(&Controls::default(), 300);
        assert_eq!(pose_of(&world, id), Pose::Locomotion(Direction::Down));
    }

    fn chase_world(enemy_x: f32, radius: f32) -> (World, EntityId) {
        let mut world = World::new();
        world.spawn_player(Entity::character(Rect::new(0.0, 0.0, 10.0, 10.0), SheetId(0), 2.0));
        let enemy = world.spawn(
            Entity::character(Rect::new(enemy_x, 0.0, 10.0, 10.0), SheetId(1), 2.0)
                .with_chase(ChaseBehavior::new(radius)),
        );
        (world, enemy)
    }

    #[test]
    fn test_enemy_chases_at_radius() {
        let (mut world, enemy) = chase_world(100.0, 100.0);
        world.tick(&Controls::default(), 0);

        let entity = world.entity(enemy);
        assert_eq!(entity.map(|e| e.velocity), Some(IVec2::new(-1, 0)));
        assert_eq!(entity.map(Entity::position), Some(Vec2::new(98.0, 0.0)));
    }

    #[test]
    fn test_enemy_ignores_player_beyond_radius() {
        let (mut world, enemy) = chase_world(101.0, 100.0);
        world.tick(&Controls::default(), 0);

        let entity = world.entity(enemy);
        assert_eq!(entity.map(|e| e.velocity), Some(IVec2::ZERO));
        assert_eq!(entity.map(Entity::position), Some(Vec2::new(101.0, 0.0)));
    }

    #[test]
    fn test_enemy_sees_players_updated_position() {
        // Player steps into range on this tick; the enemy reacts in the same tick
        let mut world = World::new();
        world.spawn_player(Entity::character(Rect::new(0.0, 0.0, 10.0, 10.0), SheetId(0), 2.0));
        let enemy = world.spawn(
            Entity::character(Rect::new(102.0, 0.0, 10.0, 10.0), SheetId(1), 2.0)
                .with_chase(ChaseBehavior::new(100.0)),
        );

        world.tick(&walk(IVec2::new(1, 0)), 0);
        assert_eq!(world.entity(enemy).map(|e| e.velocity), Some(IVec2::new(-1, 0)));
    }

    #[test]
    fn test_enemy_animates_while_chasing() {
        let (mut world, enemy) = chase_world(50.0, 100.0);
        world.tick(&Controls::default(), 0);

        let animation = world.entity(enemy).and_then(Entity::animation).copied();
        let animation = animation.unwrap_or_default();
        assert!(animation.flip_horizontal);
        assert_eq!(animation.pose, Pose::Locomotion(Direction::Horizontal));
    }
}
