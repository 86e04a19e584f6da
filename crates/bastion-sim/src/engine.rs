//! Simulation engine: the core of the battle.
//!
//! `SimulationEngine` owns the simulation context, the per-side special
//! weapon ledgers and the opponent, processes commands, and runs all systems
//! in a fixed order each tick. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bastion_core::catalog::UnitCatalog;
use bastion_core::commands::Command;
use bastion_core::components::Actor;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::SimEvent;
use bastion_core::types::{Battlefield, Position, SimTime};

use crate::context::SimContext;
use crate::effects::{EffectSink, NullEffects};
use crate::factory;
use crate::opponent::{self, Opponent};
use crate::specials::{self, SpecialLedger};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub difficulty: Difficulty,
    pub battlefield: Battlefield,
    /// Ticks before the opponent may use special weapons.
    pub grace_ticks: u64,
    pub opponent_income_per_tick: u32,
    pub opponent_starting_resources: u32,
    /// Whether precision strikes fly as projectiles (delayed impact) or land
    /// immediately at reduced strength.
    pub ballistic_strikes: bool,
    pub catalog: Arc<UnitCatalog>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            battlefield: Battlefield::default(),
            grace_ticks: DEFAULT_GRACE_TICKS,
            opponent_income_per_tick: DEFAULT_OPPONENT_INCOME,
            opponent_starting_resources: DEFAULT_OPPONENT_RESOURCES,
            ballistic_strikes: true,
            catalog: Arc::new(UnitCatalog::builtin()),
        }
    }
}

/// What happened during one call to `tick`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// The tick that was simulated.
    pub tick: u64,
    pub phase: GamePhase,
    pub events: Vec<SimEvent>,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    ctx: SimContext,
    phase: GamePhase,
    command_queue: VecDeque<Command>,
    despawn_buffer: Vec<Entity>,
    ledgers: [SpecialLedger; 2],
    opponent: Opponent,
    battle_started: bool,
}

fn ledger_index(team: Team) -> Option<usize> {
    match team {
        Team::Player => Some(0),
        Team::Opponent => Some(1),
        Team::Neutral => None,
    }
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config and no
    /// presentation layer.
    pub fn new(config: SimConfig) -> Self {
        Self::with_effects(config, Box::new(NullEffects))
    }

    /// Create an engine that reports effects to `effects`.
    pub fn with_effects(config: SimConfig, effects: Box<dyn EffectSink>) -> Self {
        Self {
            ctx: SimContext {
                world: World::new(),
                time: SimTime::default(),
                battlefield: config.battlefield,
                rng: ChaCha8Rng::seed_from_u64(config.seed),
                effects,
                events: Vec::new(),
                catalog: config.catalog,
            },
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            ledgers: [
                SpecialLedger::new(Team::Player, config.ballistic_strikes),
                SpecialLedger::new(Team::Opponent, config.ballistic_strikes),
            ],
            opponent: Opponent::new(
                config.difficulty,
                config.grace_ticks,
                config.opponent_starting_resources,
                config.opponent_income_per_tick,
            ),
            battle_started: false,
        }
    }

    /// Place both sides' structures. Enables the victory check.
    pub fn setup_battle(&mut self) {
        factory::setup_battle(&mut self.ctx);
        self.battle_started = true;
    }

    /// Queue a command for processing at the next tick.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and report what happened.
    pub fn tick(&mut self) -> TickReport {
        self.process_phase_commands();

        let tick = self.ctx.time.tick;
        if self.phase == GamePhase::Active {
            self.run_systems();
            self.ctx.time.advance();
        }

        TickReport {
            tick,
            phase: self.phase,
            events: std::mem::take(&mut self.ctx.events),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn battlefield(&self) -> Battlefield {
        self.ctx.battlefield
    }

    pub fn ledger(&self, team: Team) -> Option<&SpecialLedger> {
        ledger_index(team).map(|i| &self.ledgers[i])
    }

    pub fn ledger_mut(&mut self, team: Team) -> Option<&mut SpecialLedger> {
        ledger_index(team).map(|i| &mut self.ledgers[i])
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    pub fn opponent_mut(&mut self) -> &mut Opponent {
        &mut self.opponent
    }

    /// Direct access to the context, for harnesses that stage situations
    /// by hand.
    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    /// Spawn a unit outside the production rules (no cost, no cap).
    pub fn spawn_unit(&mut self, team: Team, kind: ActorKind, position: Position) -> Entity {
        factory::spawn_unit(&mut self.ctx, team, kind, position)
    }

    pub fn spawn_structure(&mut self, team: Team, kind: ActorKind, x: f64) -> Entity {
        factory::spawn_structure(&mut self.ctx, team, kind, x)
    }

    /// Pause and resume take effect before anything else, so a paused engine
    /// can still be resumed. Everything else waits for the orders stage.
    fn process_phase_commands(&mut self) {
        let mut phase = self.phase;
        self.command_queue.retain(|command| match command {
            Command::Pause => {
                if phase == GamePhase::Active {
                    phase = GamePhase::Paused;
                }
                false
            }
            Command::Resume => {
                if phase == GamePhase::Paused {
                    phase = GamePhase::Active;
                }
                false
            }
            _ => true,
        });
        self.phase = phase;
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::CastSpecial { team, kind, x, y } => {
                if let Some(i) = ledger_index(team) {
                    specials::cast(&mut self.ctx, &mut self.ledgers[i], kind, Position::new(x, y));
                }
            }
            Command::RecallDrones { team } => {
                let recalled = systems::drones::recall(&mut self.ctx, team);
                tracing::debug!(?team, recalled, "drones recalled");
            }
            Command::SpawnUnit { team, kind } => {
                if team != Team::Neutral {
                    factory::spawn_at_edge(&mut self.ctx, team, kind);
                    self.ctx.emit(SimEvent::Produced { team, kind });
                }
            }
            Command::Pause | Command::Resume => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Status upkeep (disable expiry, weapon timers)
        systems::status::run(&mut self.ctx);
        // 2. Unit movement
        systems::movement::run(&mut self.ctx);
        // 3. Fire control and drone launches
        systems::combat::run(&mut self.ctx);
        // 4. Projectiles in flight
        systems::ballistics::run(&mut self.ctx);
        // 5. Drones
        systems::drones::run(&mut self.ctx);
        // 6. Special weapons: cooldowns, then strikes whose tick has come
        for ledger in &mut self.ledgers {
            ledger.tick_cooldowns();
            specials::resolve_pending(&mut self.ctx, ledger);
        }
        // 7. Orders
        self.process_commands();
        // 8. Opponent decisions
        opponent::run(&mut self.ctx, &mut self.opponent, &mut self.ledgers[1]);
        // 9. Cleanup (destroyed, out of bounds, non-finite)
        systems::cleanup::run(&mut self.ctx, &mut self.despawn_buffer);
        // 10. Victory
        self.check_victory();
    }

    fn check_victory(&mut self) {
        if !self.battle_started {
            return;
        }
        let standing = |team: Team| {
            self.ctx
                .world
                .query::<&Actor>()
                .iter()
                .any(|(_, a)| a.team == team && a.kind == ActorKind::CommandPost)
        };
        let player = standing(Team::Player);
        let opponent = standing(Team::Opponent);
        let winner = match (player, opponent) {
            (true, true) => return,
            (true, false) => Team::Player,
            (false, true) => Team::Opponent,
            (false, false) => Team::Neutral,
        };
        tracing::info!(?winner, tick = self.ctx.time.tick, "battle over");
        self.phase = GamePhase::Over { winner };
        self.ctx.emit(SimEvent::BattleOver { winner });
    }
}
