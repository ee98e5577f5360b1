//! The match state machine.
//!
//! ## Turn structure
//!
//! Each round starts with a fresh shuffled deck dealt to every seat and one
//! card flipped onto the discard pile. Starting left of the dealer, every
//! player turns two cards face-up (`FirstTurn`). Play then proceeds in the
//! same order (`Playing`):
//!
//! 1. draw from the deck or the discard pile
//! 2. place the card (replace a position or stack a Power card), or
//!    discard it and turn one face-down card over
//! 3. completed triads are set aside and their Wild cards frozen
//!
//! A player may go out instead of drawing. Every other player then gets
//! exactly one more turn (`FinalTurns`) before the round is scored.
//!
//! ## Invalid calls
//!
//! Handlers never fail loudly. A call whose preconditions do not hold
//! leaves the state untouched, logs the reason at `trace` level, and
//! returns `false`. Use the `rules` queries to find out what is legal.

use im::Vector;
use log::{debug, trace};

use super::phase::Phase;
use super::player::Player;
use crate::cards::{
    create_deck, deal, draw_from_pile, replenish_from_discard, shuffle, Card, Drawn,
    ModifierSign, Replenished, MAX_WILD_VALUE,
};
use crate::completion::completion_type;
use crate::core::{GameRng, GameRngState, MatchConfig, PlayerId, PlayerMap};
use crate::events::{DrawSource, GameEvent};
use crate::hand::{Hand, Location, Position};
use crate::rules::{self, Action};
use crate::scoring::{calculate_round_scores, count_unfrozen_wilds, winner};

/// Cards each player turns face-up before regular play.
pub const FIRST_TURN_REVEALS: usize = 2;

/// Authoritative state of one match.
///
/// Cloning is cheap enough for lookahead: the event log is an `im::Vector`
/// and everything else is small.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: MatchConfig,

    // === Round progression ===
    /// Starts at 1.
    pub round: u32,
    pub max_rounds: u32,
    pub dealer: PlayerId,
    pub current_player: PlayerId,
    pub phase: Phase,

    // === Cards ===
    pub players: PlayerMap<Player>,
    /// Top of the pile is the last element.
    pub draw_pile: Vec<Card>,
    /// Top of the pile is the last element.
    pub discard_pile: Vec<Card>,
    /// Drawn this turn and not yet placed or discarded.
    pub drawn_card: Option<Card>,

    // === Round bookkeeping ===
    /// Reveals the current player has made during `FirstTurn`.
    pub first_turn_reveals: usize,
    pub first_out: Option<PlayerId>,
    pub final_turns_remaining: usize,
    pub awaiting_reveal_after_discard: bool,

    /// Short status line for whoever renders the table.
    pub message: String,
    pub events: Vector<GameEvent>,

    rng: GameRng,
}

impl GameState {
    /// Seat the players from `config`. Call `start_round` to deal.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let players = PlayerMap::from_vec(
            config
                .player_names
                .iter()
                .zip(&config.is_human)
                .map(|(name, &is_human)| Player::new(name.clone(), is_human))
                .collect(),
        );

        Self {
            round: 1,
            max_rounds: config.max_rounds,
            dealer: PlayerId::new(0),
            current_player: PlayerId::new(0),
            phase: Phase::Setup,
            players,
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            drawn_card: None,
            first_turn_reveals: 0,
            first_out: None,
            final_turns_remaining: 0,
            awaiting_reveal_after_discard: false,
            message: String::new(),
            events: Vector::new(),
            rng: GameRng::new(config.seed),
            config,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&Hand> {
        self.players.get(player).map(|p| &p.hand)
    }

    #[must_use]
    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Winner once the match is over: lowest total, earliest seat on ties.
    #[must_use]
    pub fn result(&self) -> Option<PlayerId> {
        if !self.is_game_over() {
            return None;
        }
        winner(&self.totals())
    }

    #[must_use]
    pub fn totals(&self) -> Vec<i32> {
        self.players.values().map(|p| p.total_score).collect()
    }

    /// Checkpoint of the match RNG, for resuming reshuffles later.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind the match RNG to a checkpoint taken with [`Self::rng_state`].
    pub fn restore_rng(&mut self, saved: &GameRngState) {
        self.rng = GameRng::from_state(saved);
    }

    /// Independent RNG stream for an AI driver.
    pub fn fork_rng(&mut self) -> GameRng {
        self.rng.fork()
    }

    // === Dispatch ===

    /// Apply `action` on behalf of `player`.
    ///
    /// Only the current player may act. Returns whether the action took
    /// effect.
    pub fn apply(&mut self, player: PlayerId, action: &Action) -> bool {
        if player != self.current_player {
            trace!("{player} acted out of turn ({action:?}); current is {}", self.current_player);
            return false;
        }

        match *action {
            Action::Reveal(at) => self.handle_first_turn_reveal(at),
            Action::DrawFromDeck => self.handle_draw_from_deck(),
            Action::DrawFromDiscard => self.handle_draw_from_discard(),
            Action::Discard => self.handle_discard(),
            Action::Replace(at) => self.handle_place_card(at),
            Action::Powerset { at, sign } => self.handle_add_powerset(at, sign),
            Action::SwapWild { from, to } => self.handle_kapow_swap(from, to),
            Action::DeclareWild { at, value } => self.handle_declare_wild(at, value),
            Action::DeclareDrawnWild(value) => self.handle_declare_drawn_wild(value),
            Action::RevealAfterDiscard(at) => self.handle_reveal_after_discard(at),
            Action::GoOut => self.handle_go_out(),
        }
    }

    // === Round lifecycle ===

    /// Deal the first round. Later rounds are dealt by `advance_round`.
    pub fn start_round(&mut self) -> bool {
        if self.phase != Phase::Setup {
            return ignored("start round", "match already started");
        }
        self.deal_round();
        true
    }

    fn deal_round(&mut self) {
        let count = self.player_count();
        let deck = shuffle(&create_deck(), &mut self.rng);
        let dealt = deal(&deck, count, self.config.cards_per_player);

        for ((_, player), cards) in self.players.iter_mut().zip(dealt.hands) {
            player.hand = Hand::new(cards);
        }

        let Drawn { card, pile } = draw_from_pile(&dealt.remaining);
        self.draw_pile = pile;
        self.discard_pile = card
            .map(|mut seed| {
                seed.is_revealed = true;
                seed
            })
            .into_iter()
            .collect();

        self.drawn_card = None;
        self.first_out = None;
        self.final_turns_remaining = 0;
        self.first_turn_reveals = 0;
        self.awaiting_reveal_after_discard = false;
        self.current_player = self.dealer.left(count);
        self.set_phase(Phase::FirstTurn);

        debug!(
            "round {} dealt: dealer {}, {} cards in draw pile",
            self.round,
            self.dealer,
            self.draw_pile.len()
        );
        self.message = format!("Round {}: Reveal 2 cards to begin.", self.round);
        self.record(GameEvent::RoundStarted {
            round: self.round,
            dealer: self.dealer,
            first_player: self.current_player,
        });
    }

    /// Move from `Scoring` to the next round, or end the match after the
    /// last one.
    pub fn advance_round(&mut self) -> bool {
        if self.phase != Phase::Scoring {
            return ignored("advance round", "round not scored yet");
        }

        if self.round >= self.max_rounds {
            self.set_phase(Phase::GameOver);
            let totals = self.totals();
            if let Some(winner) = winner(&totals) {
                debug!("game over after {} rounds, {winner} wins with {:?}", self.round, totals);
                self.message = format!("Game Over! {} wins!", self.players[winner].name);
                self.record(GameEvent::GameOver { winner, totals });
            }
            return true;
        }

        self.round += 1;
        self.dealer = self.dealer.left(self.player_count());
        self.deal_round();
        true
    }

    // === First turn ===

    pub fn handle_first_turn_reveal(&mut self, at: Location) -> bool {
        if self.phase != Phase::FirstTurn {
            return ignored("first-turn reveal", "not the first turn");
        }
        let player = self.current_player;
        if !self.players[player].hand.reveal(at) {
            return ignored("first-turn reveal", "position is not face-down");
        }
        self.record(GameEvent::CardRevealed { player, at });

        self.first_turn_reveals += 1;
        if self.first_turn_reveals < FIRST_TURN_REVEALS {
            self.message = "Reveal 1 more card.".to_string();
            return true;
        }

        self.first_turn_reveals = 0;
        let count = self.player_count();
        let opener = self.dealer.left(count);
        let next = player.left(count);

        if next == opener {
            self.current_player = opener;
            self.set_phase(Phase::Playing);
            self.message = format!("{}'s turn. Draw a card.", self.current().name);
        } else {
            self.current_player = next;
            self.message = format!("{}: Reveal 2 cards.", self.current().name);
        }
        true
    }

    // === Drawing ===

    /// Why the current player cannot start a draw, if they cannot.
    fn draw_blocker(&self) -> Option<&'static str> {
        if !self.phase.is_turn_phase() {
            Some("not a turn phase")
        } else if self.drawn_card.is_some() {
            Some("a drawn card is still pending")
        } else if self.awaiting_reveal_after_discard {
            Some("a reveal after discard is pending")
        } else {
            None
        }
    }

    /// Draw the top of the deck face-up, reshuffling the discard pile into
    /// a new deck first if the deck is empty.
    pub fn handle_draw_from_deck(&mut self) -> bool {
        if let Some(reason) = self.draw_blocker() {
            return ignored("draw from deck", reason);
        }

        if self.draw_pile.is_empty() {
            let Replenished {
                draw_pile,
                discard_pile,
            } = replenish_from_discard(&self.discard_pile, &mut self.rng);
            if !draw_pile.is_empty() {
                debug!("draw pile empty, reshuffled {} discards", draw_pile.len());
                self.record(GameEvent::DrawPileReplenished {
                    cards: draw_pile.len(),
                });
            }
            self.draw_pile = draw_pile;
            self.discard_pile = discard_pile;
        }

        let Drawn { card, pile } = draw_from_pile(&self.draw_pile);
        let Some(mut card) = card else {
            return ignored("draw from deck", "no cards left to draw");
        };
        card.is_revealed = true;
        self.draw_pile = pile;
        self.take_drawn(card, DrawSource::Deck);
        true
    }

    pub fn handle_draw_from_discard(&mut self) -> bool {
        if let Some(reason) = self.draw_blocker() {
            return ignored("draw from discard", reason);
        }

        let Drawn { card, pile } = draw_from_pile(&self.discard_pile);
        let Some(card) = card else {
            return ignored("draw from discard", "discard pile is empty");
        };
        self.discard_pile = pile;
        self.take_drawn(card, DrawSource::Discard);
        true
    }

    fn take_drawn(&mut self, card: Card, source: DrawSource) {
        self.message = match source {
            DrawSource::Deck => format!("Drew a {card}. Place it or discard."),
            DrawSource::Discard => format!("Took {card} from discard. Place it in your hand."),
        };
        self.record(GameEvent::CardDrawn {
            player: self.current_player,
            source,
            card: card.clone(),
        });
        self.drawn_card = Some(card);
    }

    // === Disposing of the drawn card ===

    /// Put the drawn card at `at`; everything previously there is
    /// discarded face-up.
    pub fn handle_place_card(&mut self, at: Location) -> bool {
        if !self.phase.is_turn_phase() {
            return ignored("place card", "not a turn phase");
        }
        let Some(card) = self.drawn_card.take() else {
            return ignored("place card", "no drawn card");
        };

        let player = self.current_player;
        let mut placed = card.clone();
        placed.is_revealed = true;

        match self.players[player].hand.replace(at, card) {
            Err(card) => {
                self.drawn_card = Some(card);
                ignored("place card", "target triad is out of play")
            }
            Ok(previous) => {
                let replaced: Vec<Card> = previous.into_iter().map(to_discard).collect();
                self.discard_pile.extend(replaced.iter().cloned());
                self.message = format!("Placed {placed} at {at}.");
                self.record(GameEvent::CardPlaced {
                    player,
                    at,
                    card: placed,
                    replaced,
                });
                self.check_completed_triads(player);
                self.end_turn();
                true
            }
        }
    }

    /// Stack the drawn Power card beneath the face-up card at `at`.
    pub fn handle_add_powerset(&mut self, at: Location, sign: ModifierSign) -> bool {
        if !self.phase.is_turn_phase() {
            return ignored("add powerset", "not a turn phase");
        }
        let card = match self.drawn_card.take() {
            Some(card) if card.is_power() => card,
            other => {
                self.drawn_card = other;
                return ignored("add powerset", "drawn card is not a Power card");
            }
        };

        let player = self.current_player;
        let mut stacked = card.clone();
        stacked.is_revealed = true;

        if let Err(card) = self.players[player].hand.add_to_powerset(at, card, sign) {
            self.drawn_card = Some(card);
            return ignored("add powerset", "target is face-down or out of play");
        }

        self.message = format!("Stacked {stacked} at {at}.");
        self.record(GameEvent::PowerStacked {
            player,
            at,
            card: stacked,
            sign,
        });
        self.check_completed_triads(player);
        self.end_turn();
        true
    }

    /// Discard the drawn card. The player then owes one reveal, unless
    /// nothing in their hand is face-down, in which case the turn ends.
    pub fn handle_discard(&mut self) -> bool {
        if !self.phase.is_turn_phase() {
            return ignored("discard", "not a turn phase");
        }
        let Some(card) = self.drawn_card.take() else {
            return ignored("discard", "no drawn card");
        };

        let player = self.current_player;
        let card = to_discard(card);
        self.discard_pile.push(card.clone());
        self.record(GameEvent::CardDiscarded { player, card });

        if self.players[player].hand.unrevealed_locations().is_empty() {
            self.message = "Discarded.".to_string();
            self.check_completed_triads(player);
            self.end_turn();
        } else {
            self.awaiting_reveal_after_discard = true;
            self.message = "Discarded. Reveal a face-down card.".to_string();
        }
        true
    }

    pub fn handle_reveal_after_discard(&mut self, at: Location) -> bool {
        if !self.awaiting_reveal_after_discard {
            return ignored("reveal after discard", "no reveal owed");
        }
        let player = self.current_player;
        if !self.players[player].hand.reveal(at) {
            return ignored("reveal after discard", "position is not face-down");
        }

        self.awaiting_reveal_after_discard = false;
        self.record(GameEvent::CardRevealed { player, at });
        self.check_completed_triads(player);
        self.end_turn();
        true
    }

    // === Wild cards ===

    /// Exchange a lone, face-up, unfrozen Wild card at `from` with
    /// whatever is at `to`. Does not end the turn.
    pub fn handle_kapow_swap(&mut self, from: Location, to: Location) -> bool {
        if !self.phase.is_turn_phase() || self.awaiting_reveal_after_discard {
            return ignored("wild swap", "not available right now");
        }
        let player = self.current_player;
        let hand = &mut self.players[player].hand;
        if !rules::can_swap_wild(hand, from) || !hand.swap_wild(from, to) {
            return ignored("wild swap", "no swappable Wild at source or bad target");
        }

        self.message = "KAPOW! card swapped.".to_string();
        self.record(GameEvent::WildSwapped { player, from, to });
        true
    }

    /// Declare the value a face-up, unfrozen Wild card in hand stands for.
    pub fn handle_declare_wild(&mut self, at: Location, value: u8) -> bool {
        if !self.phase.is_turn_phase() {
            return ignored("declare wild", "not a turn phase");
        }
        let player = self.current_player;
        let hand = &mut self.players[player].hand;
        let face_up = hand.position(at).is_some_and(Position::is_revealed);
        if !face_up || !hand.assign_wild_value(at, value) {
            return ignored("declare wild", "no free face-up Wild there, or value out of range");
        }

        self.record(GameEvent::WildDeclared {
            player,
            at: Some(at),
            value,
        });
        true
    }

    /// Declare the value of a drawn Wild card before placing it.
    pub fn handle_declare_drawn_wild(&mut self, value: u8) -> bool {
        if !self.phase.is_turn_phase() || value > MAX_WILD_VALUE {
            return ignored("declare drawn wild", "not a turn phase or value out of range");
        }
        let Some(card) = self.drawn_card.as_mut().filter(|c| c.is_free_wild()) else {
            return ignored("declare drawn wild", "drawn card is not a Wild");
        };
        card.assigned_value = Some(value);

        self.record(GameEvent::WildDeclared {
            player: self.current_player,
            at: None,
            value,
        });
        true
    }

    // === Going out ===

    /// End active play: everyone else gets one more turn.
    pub fn handle_go_out(&mut self) -> bool {
        if !rules::can_go_out(self) {
            return ignored("go out", "only allowed before drawing during regular play");
        }

        let player = self.current_player;
        self.first_out = Some(player);
        self.final_turns_remaining = self.player_count() - 1;
        self.set_phase(Phase::FinalTurns);

        debug!("{player} went out in round {}", self.round);
        self.message = format!(
            "{} goes out! Others get one final turn.",
            self.players[player].name
        );
        self.record(GameEvent::WentOut { player });
        self.advance_to_next_player();
        true
    }

    // === Turn bookkeeping ===

    /// Set aside every newly completed triad of `player`, freezing its Wild
    /// cards.
    fn check_completed_triads(&mut self, player: PlayerId) {
        let mut completed = Vec::new();
        for (index, triad) in self.players[player].hand.triads_mut().enumerate() {
            if let Some(kind) = completion_type(triad) {
                triad.is_discarded = true;
                triad.freeze_wilds();
                completed.push((index, kind));
            }
        }

        for (triad, kind) in completed {
            debug!("{player} completed triad {} ({kind:?})", triad + 1);
            self.record(GameEvent::TriadCompleted { player, triad, kind });
        }
    }

    fn end_turn(&mut self) {
        if self.phase == Phase::FinalTurns {
            self.final_turns_remaining = self.final_turns_remaining.saturating_sub(1);
            if self.final_turns_remaining == 0 {
                self.end_round();
                return;
            }
        }
        self.advance_to_next_player();
    }

    fn advance_to_next_player(&mut self) {
        let count = self.player_count();
        self.current_player = self.current_player.left(count);
        if self.phase == Phase::FinalTurns && Some(self.current_player) == self.first_out {
            self.current_player = self.current_player.left(count);
        }
        self.message = format!("{}'s turn.", self.current().name);
    }

    fn end_round(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.hand.reveal_all();
        }

        let scores = calculate_round_scores(self.players.values().map(|p| &p.hand), self.first_out);
        let unfrozen_wilds: Vec<usize> = self
            .players
            .values()
            .map(|p| count_unfrozen_wilds(&p.hand))
            .collect();

        for ((_, player), &score) in self.players.iter_mut().zip(&scores.adjusted) {
            player.record_round(score);
        }

        if let Some(first) = self.first_out.filter(|&p| scores.penalized(p)) {
            let i = first.index();
            if let (Some(&raw), Some(&doubled)) = (scores.raw.get(i), scores.adjusted.get(i)) {
                debug!("{first} went out without the low hand: {raw} doubled to {doubled}");
                self.record(GameEvent::PenaltyApplied {
                    player: first,
                    raw,
                    doubled,
                });
            }
        }

        debug!("round {} scored: {:?}", self.round, scores.adjusted);
        self.record(GameEvent::RoundScored {
            round: self.round,
            scores,
            unfrozen_wilds,
        });
        self.set_phase(Phase::Scoring);
        self.message = "Round complete!".to_string();
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("phase {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn record(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}

/// A card headed for the discard pile: face-up, any Wild declaration dropped.
fn to_discard(mut card: Card) -> Card {
    card.is_revealed = true;
    card.clear_declaration();
    card
}

fn ignored(what: &str, reason: &str) -> bool {
    trace!("{what} ignored: {reason}");
    false
}
