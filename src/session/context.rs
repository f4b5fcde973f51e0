//! Explicit session context.
//!
//! `SessionContext` owns everything one game needs: the session state,
//! the event bus, the random sources and the turn sequencer. Handlers on
//! the bus receive it as `&mut SessionContext`; there is no global
//! registry.
//!
//! The engine's own reactions to facts (turn start runs the strategy,
//! landing resolves the tile, bankruptcy eliminates, ...) are bus
//! handlers installed at [`ENGINE_PRIORITY`], below the default priority
//! observers get. Observers therefore see each fact before the engine
//! reacts to it and publishes the next one.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    BalanceChange, ChanceConfig, DiceRoller, EngineError, GameSession, PlayerId, RandomSource,
    SessionConfig,
};
use crate::effects::{ChanceOutcome, EffectOutcome, PendingDecision, TileEffectResolver};
use crate::events::{EventBus, EventKind, GameEvent};
use crate::rules::{Elimination, EliminationEvaluator, Move, MovementResolver};
use crate::turn::{Advance, TurnOutcome, TurnSequencer, TurnStrategy};

/// Priority of the engine's internal reactors.
pub const ENGINE_PRIORITY: i32 = -100;

/// What the engine is waiting for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pending {
    /// Not started (or nothing outstanding).
    #[default]
    Idle,
    /// The active player may roll.
    Roll { player: PlayerId },
    /// A move is in flight; waiting for the movement completion callback.
    Movement(Move),
    /// A property detail view is open.
    Decision(PendingDecision),
    /// The game is over.
    Finished,
}

impl Pending {
    /// The player the engine is waiting on, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Pending::Roll { player } => Some(*player),
            Pending::Movement(mv) => Some(mv.player),
            Pending::Decision(decision) => Some(decision.player),
            Pending::Idle | Pending::Finished => None,
        }
    }
}

impl std::fmt::Display for Pending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pending::Idle => write!(f, "idle"),
            Pending::Roll { player } => write!(f, "waiting for {} to roll", player),
            Pending::Movement(mv) => {
                write!(f, "waiting for {} to finish moving to {}", mv.player, mv.to)
            }
            Pending::Decision(decision) => {
                write!(f, "waiting for {} to decide on {}", decision.player, decision.view.name)
            }
            Pending::Finished => write!(f, "game over"),
        }
    }
}

/// Engine reactor: a bus handler that can fail.
type Reactor = fn(&mut SessionContext, &GameEvent) -> Result<(), EngineError>;

/// Everything one game session needs, passed explicitly to every handler.
pub struct SessionContext {
    pub(crate) session: GameSession,
    pub(crate) bus: EventBus<SessionContext>,
    pub(crate) dice: Option<Box<dyn DiceRoller>>,
    pub(crate) sequencer: TurnSequencer,
    pub(crate) pending: Pending,
    chance_rng: Box<dyn RandomSource>,
    chance: ChanceConfig,
    continuation_roll: u32,

    /// Set while `begin_turn` is draining turn starts.
    starting_turns: bool,
    /// Turn start requested from inside a running turn start.
    deferred_turn: Option<PlayerId>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.session)
            .field("bus", &self.bus)
            .field("sequencer", &self.sequencer)
            .field("pending", &self.pending)
            .field("has_dice", &self.dice.is_some())
            .field("deferred_turn", &self.deferred_turn)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Build a context with the engine reactors installed.
    pub fn new(
        config: &SessionConfig,
        chance_rng: Box<dyn RandomSource>,
        dice: Option<Box<dyn DiceRoller>>,
    ) -> Result<Self, EngineError> {
        let session = GameSession::new(config)?;

        let mut bus = EventBus::new();
        install_reactors(&mut bus);

        Ok(Self {
            session,
            bus,
            dice,
            sequencer: TurnSequencer::new(),
            pending: Pending::Idle,
            chance_rng,
            chance: config.chance,
            continuation_roll: config.continuation_roll,
            starting_turns: false,
            deferred_turn: None,
        })
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    #[must_use]
    pub fn sequencer(&self) -> &TurnSequencer {
        &self.sequencer
    }

    /// Dispatch `event` to its handlers, depth-first.
    pub fn publish(&mut self, event: GameEvent) {
        debug!(kind = ?event.kind(), player = ?event.player(), "publish");
        let handlers = self.bus.snapshot(event.kind());
        for handler in handlers {
            handler(self, &event);
        }
    }

    /// Start the session with the first seat.
    pub(crate) fn start(&mut self) -> Result<(), EngineError> {
        let Advance::Next(first) = self.sequencer.start(&self.session) else {
            return Err(self.unexpected("start"));
        };

        info!(
            players = self.session.seat_count(),
            board_size = self.session.board().size(),
            "game started"
        );
        self.publish(GameEvent::GameStarted {
            players: self.session.seat_count(),
            board_size: self.session.board().size(),
        });
        self.begin_turn(first);
        Ok(())
    }

    /// Error for an inbound signal the current state does not accept.
    pub(crate) fn unexpected(&self, input: &'static str) -> EngineError {
        EngineError::UnexpectedInput {
            input,
            pending: self.pending.to_string(),
        }
    }

    /// Publish `TurnStarted` for `player`.
    ///
    /// A skipped turn ends inside its own `TurnStarted` dispatch and asks
    /// for the next turn start from there. Those nested requests are
    /// deferred and drained by this loop, so stack depth stays constant
    /// however many detained players are skipped in a row.
    fn begin_turn(&mut self, player: PlayerId) {
        if self.starting_turns {
            self.deferred_turn = Some(player);
            return;
        }

        self.starting_turns = true;
        let mut next = Some(player);
        while let Some(player) = next.take() {
            if self.session.is_finished() {
                break;
            }
            self.session.turn_number += 1;
            let turn = self.session.turn_number;
            debug!(%player, turn, "turn started");
            self.publish(GameEvent::TurnStarted { player, turn });
            next = self.deferred_turn.take();
        }
        self.deferred_turn = None;
        self.starting_turns = false;
    }

    /// Publish the single game-end fact.
    fn finish(&mut self, winner: PlayerId) -> Result<(), EngineError> {
        if self.session.is_finished() {
            return Ok(());
        }
        let name = self.session.player(winner)?.name.clone();
        self.session.finish(winner);
        self.sequencer.finish();
        self.pending = Pending::Finished;

        info!(%winner, %name, turns = self.session.turn_number, "game ended");
        self.publish(GameEvent::GameEnded { winner, name });
        Ok(())
    }

    fn credit(&mut self, player: PlayerId, amount: u64) -> Result<(), EngineError> {
        let change = self.session.player_mut(player)?.credit(amount);
        self.balance_changed(player, change);
        Ok(())
    }

    fn debit(&mut self, player: PlayerId, amount: u64) -> Result<(), EngineError> {
        let change = self.session.player_mut(player)?.debit(amount);
        self.balance_changed(player, change);
        Ok(())
    }

    fn balance_changed(&mut self, player: PlayerId, change: BalanceChange) {
        if change.changed() {
            self.publish(GameEvent::BalanceChanged {
                player,
                old: change.old,
                new: change.new,
            });
        }
    }
}

fn install_reactors(bus: &mut EventBus<SessionContext>) {
    let reactors: [(EventKind, Reactor); 9] = [
        (EventKind::TurnStarted, on_turn_started),
        (EventKind::DiceRolled, on_dice_rolled),
        (EventKind::PlayerLanded, on_player_landed),
        (EventKind::PurchaseMade, on_purchase_made),
        (EventKind::BalanceChanged, on_balance_changed),
        (EventKind::PlayerEliminated, on_player_eliminated),
        (EventKind::StepCompleted, on_step_completed),
        (EventKind::TurnEnded, on_turn_ended),
        (EventKind::TurnContinued, on_turn_continued),
    ];

    for (kind, reactor) in reactors {
        bus.subscribe_with_priority(kind, ENGINE_PRIORITY, move |ctx, event| {
            if let Err(err) = reactor(ctx, event) {
                warn!(?kind, %err, "engine reactor failed");
            }
        });
    }
}

fn on_turn_started(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::TurnStarted { player, .. } = event else {
        return Ok(());
    };

    let record = ctx.session.player_mut(player)?;
    record.last_roll = 0;
    let outcome = record.strategy.advance();

    match outcome {
        TurnOutcome::Skip { remaining } => {
            debug!(%player, remaining, "detained, turn skipped");
            ctx.publish(GameEvent::TurnEnded { player });
        }
        TurnOutcome::Roll | TurnOutcome::Released => {
            if outcome == TurnOutcome::Released {
                info!(%player, "released from detainment");
            }
            ctx.pending = Pending::Roll { player };
            ctx.publish(GameEvent::ReadyToRoll { player });
        }
    }
    Ok(())
}

fn on_dice_rolled(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::DiceRolled { player, value } = event else {
        return Ok(());
    };

    let mv = MovementResolver::begin(&mut ctx.session, player, value)?;
    ctx.pending = Pending::Movement(mv);
    ctx.publish(GameEvent::MoveStarted {
        player,
        from: mv.from,
        to: mv.to,
    });
    Ok(())
}

fn on_player_landed(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::PlayerLanded { player, tile } = event else {
        return Ok(());
    };

    let outcome = TileEffectResolver::resolve(
        &ctx.session,
        player,
        tile.index(),
        &ctx.chance,
        ctx.chance_rng.as_mut(),
    )?;
    debug!(%player, %tile, ?outcome, "tile effect");

    match outcome {
        EffectOutcome::PassThrough => {
            ctx.publish(GameEvent::StepCompleted { player });
        }
        EffectOutcome::Chance(chance) => {
            ctx.publish(GameEvent::ChanceResolved { player, outcome: chance });
            match chance {
                ChanceOutcome::Reward(amount) => ctx.credit(player, amount)?,
                ChanceOutcome::Penalty(amount) => ctx.debit(player, amount)?,
            }
            ctx.publish(GameEvent::StepCompleted { player });
        }
        EffectOutcome::Detain { turns } => {
            ctx.session.player_mut(player)?.strategy = TurnStrategy::detained(turns);
            info!(%player, turns, "player detained");
            ctx.publish(GameEvent::PlayerDetained { player, turns });
            ctx.publish(GameEvent::TurnEnded { player });
        }
        EffectOutcome::Property { rent, decision } => {
            if let Some(rent) = rent {
                // An eliminated owner keeps the deed but collects nothing
                if ctx.session.is_active(rent.owner) {
                    ctx.credit(rent.owner, rent.amount)?;
                } else {
                    debug!(owner = %rent.owner, amount = rent.amount, "owner eliminated, rent not paid out");
                }
                ctx.debit(player, rent.amount)?;
            }

            if ctx.session.is_finished() {
                return Ok(());
            }
            if !ctx.session.is_active(player) {
                ctx.publish(GameEvent::StepCompleted { player });
                return Ok(());
            }

            let view = decision.view.clone();
            ctx.pending = Pending::Decision(decision);
            ctx.publish(GameEvent::DecisionRequested { player, view });
        }
    }
    Ok(())
}

fn on_purchase_made(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::PurchaseMade { tile, buyer, price } = event else {
        return Ok(());
    };

    ctx.session.set_owner(tile, buyer)?;
    info!(%buyer, %tile, price, "property purchased");
    ctx.debit(buyer, price)
}

fn on_balance_changed(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::BalanceChanged { player, old, new } = event else {
        return Ok(());
    };

    if EliminationEvaluator::is_bankruptcy(BalanceChange { old, new }) && ctx.session.is_active(player) {
        ctx.publish(GameEvent::PlayerEliminated { player });
    }
    Ok(())
}

fn on_player_eliminated(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::PlayerEliminated { player } = event else {
        return Ok(());
    };

    match EliminationEvaluator::eliminate(&mut ctx.session, player) {
        Elimination::Winner(winner) => ctx.finish(winner),
        Elimination::Removed | Elimination::AlreadyOut => Ok(()),
    }
}

fn on_step_completed(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::StepCompleted { player } = event else {
        return Ok(());
    };
    if ctx.sequencer.is_over() {
        return Ok(());
    }

    // The continuation check runs after every effect of the landing
    let next = if !ctx.session.is_active(player) {
        GameEvent::TurnEnded { player }
    } else if ctx.session.player(player)?.last_roll == ctx.continuation_roll {
        GameEvent::TurnContinued { player }
    } else {
        GameEvent::TurnEnded { player }
    };
    ctx.publish(next);
    Ok(())
}

fn on_turn_ended(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::TurnEnded { player } = event else {
        return Ok(());
    };

    match ctx.sequencer.turn_ended(&ctx.session, player) {
        Advance::Next(next) => ctx.begin_turn(next),
        Advance::GameOver(winner) => ctx.finish(winner)?,
        Advance::Ignored => {}
    }
    Ok(())
}

fn on_turn_continued(ctx: &mut SessionContext, event: &GameEvent) -> Result<(), EngineError> {
    let &GameEvent::TurnContinued { player } = event else {
        return Ok(());
    };

    if let Advance::Next(next) = ctx.sequencer.turn_continued(player) {
        debug!(%player, "continuation roll, same player goes again");
        ctx.begin_turn(next);
    }
    Ok(())
}
