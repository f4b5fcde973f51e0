//! Public engine API.
//!
//! `GameEngine` is what an external actor drives. It accepts the inbound
//! signals (start, roll, movement completion, decisions), rejects the ones
//! the current state does not expect, and lets presentation code observe
//! every published fact.
//!
//! ```
//! use rust_board::board::TileRecord;
//! use rust_board::core::SessionBuilder;
//! use rust_board::session::{GameEngine, Pending};
//!
//! let config = SessionBuilder::new()
//!     .external_dice()
//!     .tiles(vec![TileRecord::start(), TileRecord::chance("Chance"), TileRecord::start()])
//!     .build();
//! let mut engine = GameEngine::new(config, 42).unwrap();
//!
//! engine.start().unwrap();
//! assert!(matches!(engine.pending(), Pending::Roll { .. }));
//!
//! engine.roll_with(2).unwrap();
//! let Pending::Movement(mv) = engine.pending().clone() else { unreachable!() };
//! engine.complete_movement(mv.player, mv.to).unwrap();
//! assert_eq!(engine.session().turn_number, 2);
//! ```

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::warn;

use crate::core::{
    DiceRoller, EngineError, GameRng, GameSession, PlayerId, RandomSource, SessionConfig, StandardDice,
};
use crate::events::{EventKind, GameEvent, SubscriptionId};
use crate::rules::MovementResolver;
use crate::turn::SequencerState;

use super::context::{Pending, SessionContext};

/// External actor's answer to an open property detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Buy the property. Only valid on a purchasable view.
    Purchase,
    /// Do not buy. Only valid on a purchasable view.
    Decline,
    /// Close a view that offers nothing. Only valid on a non-purchasable view.
    Acknowledge,
}

impl Decision {
    /// Does this answer fit a view with the given purchasable flag?
    #[must_use]
    pub fn answers(self, purchasable: bool) -> bool {
        match self {
            Decision::Purchase | Decision::Decline => purchasable,
            Decision::Acknowledge => !purchasable,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Decision::Purchase => "purchase",
            Decision::Decline => "decline",
            Decision::Acknowledge => "acknowledge",
        }
    }
}

/// The turn/event orchestration engine for one session.
#[derive(Debug)]
pub struct GameEngine {
    ctx: SessionContext,
}

impl GameEngine {
    /// Create an engine whose dice and chance draws come from `seed`.
    ///
    /// Dice are installed only if the configuration names a strategy.
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, EngineError> {
        let rng = GameRng::new(seed);
        let dice = config.dice.map(|strategy| {
            Box::new(StandardDice::new(strategy, Box::new(rng.for_context("dice")))) as Box<dyn DiceRoller>
        });
        let ctx = SessionContext::new(&config, Box::new(rng.for_context("chance")), dice)?;
        Ok(Self { ctx })
    }

    /// Create an engine drawing chance outcomes from `chance`.
    ///
    /// Configured dice roll from a fixed seed; use [`with_dice`](Self::with_dice)
    /// to replace them.
    pub fn with_random(config: SessionConfig, chance: Box<dyn RandomSource>) -> Result<Self, EngineError> {
        let dice = config.dice.map(|strategy| {
            Box::new(StandardDice::new(strategy, Box::new(GameRng::new(0).for_context("dice"))))
                as Box<dyn DiceRoller>
        });
        let ctx = SessionContext::new(&config, chance, dice)?;
        Ok(Self { ctx })
    }

    /// Install a dice provider, replacing any configured one.
    #[must_use]
    pub fn with_dice(mut self, dice: Box<dyn DiceRoller>) -> Self {
        self.ctx.dice = Some(dice);
        self
    }

    // === Observation ===

    /// Observe events of `kind`. Observers run before the engine reacts.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        observer: impl Fn(&GameSession, &GameEvent) + 'static,
    ) -> SubscriptionId {
        self.ctx
            .bus
            .subscribe(kind, move |ctx: &mut SessionContext, event: &GameEvent| observer(&ctx.session, event))
    }

    /// Observe every event kind with one observer.
    pub fn subscribe_all(
        &mut self,
        observer: impl Fn(&GameSession, &GameEvent) + 'static,
    ) -> Vec<(EventKind, SubscriptionId)> {
        let observer = Rc::new(observer);
        EventKind::ALL
            .iter()
            .map(|&kind| {
                let observer = Rc::clone(&observer);
                (kind, self.subscribe(kind, move |session, event| observer(session, event)))
            })
            .collect()
    }

    /// Remove an observer.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        self.ctx.bus.unsubscribe(kind, id)
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        self.ctx.session()
    }

    /// What the engine is waiting for.
    #[must_use]
    pub fn pending(&self) -> &Pending {
        self.ctx.pending()
    }

    #[must_use]
    pub fn sequencer_state(&self) -> SequencerState {
        self.ctx.sequencer().state()
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.ctx.sequencer().active()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ctx.session().is_finished()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.ctx.session().winner()
    }

    /// Does the engine have a dice provider?
    #[must_use]
    pub fn has_dice(&self) -> bool {
        self.ctx.dice.is_some()
    }

    // === Inbound signals ===

    /// Start the session: `GameStarted`, then the first seat's turn.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.signal("start", SessionContext::start)
    }

    /// Roll with the installed dice provider. Returns the rolled value.
    pub fn roll(&mut self) -> Result<u32, EngineError> {
        self.signal("roll", |ctx| {
            let player = expect_roll(ctx, "roll")?;
            let dice = ctx
                .dice
                .as_mut()
                .ok_or(EngineError::MissingCollaborator("dice provider"))?;
            let value = dice.roll();
            rolled(ctx, player, value);
            Ok(value)
        })
    }

    /// Roll a value chosen by the external actor.
    pub fn roll_with(&mut self, value: u32) -> Result<(), EngineError> {
        self.signal("roll", |ctx| {
            let player = expect_roll(ctx, "roll")?;
            if value == 0 {
                return Err(EngineError::InvalidRoll(value));
            }
            rolled(ctx, player, value);
            Ok(())
        })
    }

    /// The movement of `player` to `position` has finished.
    pub fn complete_movement(&mut self, player: PlayerId, position: usize) -> Result<(), EngineError> {
        self.signal("movement completion", |ctx| {
            let Pending::Movement(mv) = ctx.pending else {
                return Err(ctx.unexpected("movement completion"));
            };
            let tile = MovementResolver::complete(&mut ctx.session, &mv, player, position)?;

            ctx.pending = Pending::Idle;
            ctx.publish(GameEvent::PlayerLanded { player, tile });
            Ok(())
        })
    }

    /// Answer the open property detail view.
    pub fn decide(&mut self, decision: Decision) -> Result<(), EngineError> {
        self.signal("decision", |ctx| {
            let Pending::Decision(pending) = &ctx.pending else {
                return Err(ctx.unexpected("decision"));
            };
            let pending = pending.clone();

            if !decision.answers(pending.purchasable()) {
                return Err(EngineError::InvalidDecision(decision.name()));
            }

            ctx.pending = Pending::Idle;
            if decision == Decision::Purchase {
                ctx.publish(GameEvent::PurchaseMade {
                    tile: pending.view.tile,
                    buyer: pending.player,
                    price: pending.view.price,
                });
            }
            ctx.publish(GameEvent::StepCompleted { player: pending.player });
            Ok(())
        })
    }

    /// Run an inbound signal, logging rejections. A rejected signal leaves
    /// the session untouched.
    fn signal<T>(
        &mut self,
        input: &'static str,
        f: impl FnOnce(&mut SessionContext) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        if self.ctx.session.is_finished() {
            warn!(input, "signal after game over");
            return Err(EngineError::GameOver);
        }
        let result = f(&mut self.ctx);
        if let Err(err) = &result {
            warn!(input, %err, pending = %self.ctx.pending, "signal rejected");
        }
        result
    }
}

fn expect_roll(ctx: &SessionContext, input: &'static str) -> Result<PlayerId, EngineError> {
    match ctx.pending {
        Pending::Roll { player } => Ok(player),
        _ => Err(ctx.unexpected(input)),
    }
}

fn rolled(ctx: &mut SessionContext, player: PlayerId, value: u32) {
    ctx.pending = Pending::Idle;
    ctx.publish(GameEvent::DiceRolled { player, value });
}
