//! Top-level simulation loop.
//!
//! [`Simulation`] owns the player, the entity arena, the projectile pool
//! and the deterministic RNG. One [`step`](Simulation::step) advances the
//! whole world a single fixed frame and returns every event that frame
//! produced. Walls are passed in per step so the caller stays free to
//! stream or mutate level geometry.

use glam::Vec2;

use crate::config::SimConfig;
use crate::events::{COLOR_DAMAGE, SimEvent};
use crate::input::ActionState;
use crate::physics::body::Aabb;
use crate::player::PlayerController;
use crate::rng::SimpleRng;
use crate::systems::projectile::ProjectileSystem;
use crate::world::{Entity, EntityArena, EntityId};

/// The full simulation state.
pub struct Simulation {
    pub config: SimConfig,
    pub player: PlayerController,
    pub entities: EntityArena,
    pub projectiles: ProjectileSystem,
    rng: SimpleRng,
}

impl Simulation {
    /// Build a simulation with the player at `player_spawn`. The seed fixes
    /// bot behavior, making runs reproducible.
    pub fn new(config: SimConfig, player_spawn: Vec2, seed: u32) -> Self {
        let player = PlayerController::new(player_spawn, &config);
        Self {
            config,
            player,
            entities: EntityArena::new(),
            projectiles: ProjectileSystem::new(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn spawn_bot(&mut self, position: Vec2) -> EntityId {
        self.entities.spawn(Entity::bot(position, &self.config))
    }

    pub fn spawn_dummy(&mut self, position: Vec2, health: i32) -> EntityId {
        self.entities
            .spawn(Entity::dummy(position, self.config.bot.size, health))
    }

    /// Advance the world one fixed frame.
    ///
    /// Order: player (input, hook, weapons, movement), then entities, then
    /// projectiles, then removal of entities that died this frame.
    pub fn step(&mut self, actions: &ActionState, walls: &[Aabb]) -> Vec<SimEvent> {
        let mut events = Vec::new();

        self.player.update(
            actions,
            walls,
            &mut self.entities,
            &mut self.projectiles,
            &self.config,
            &mut events,
        );

        for (_, entity) in self.entities.iter_mut() {
            entity.update(walls, &self.config, &mut self.rng);
        }

        self.projectiles.update(
            walls,
            &mut self.player.body,
            &mut self.entities,
            &self.config,
            &mut events,
        );
        self.projectiles.retain_active();

        let dead: Vec<(EntityId, Vec2)> = self
            .entities
            .iter()
            .filter(|(_, e)| !e.alive)
            .map(|(id, e)| (id, e.body.position))
            .collect();
        for (id, position) in dead {
            self.entities.despawn(id);
            events.push(SimEvent::EntityDied { id, position });
            events.push(SimEvent::EmitParticles {
                position,
                count: 14,
                color: COLOR_DAMAGE,
                speed: (1.0, 4.0),
                life: (15, 35),
            });
        }

        events
    }
}
