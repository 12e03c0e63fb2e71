//! One turn: skip, draw, discard, resolve, notify.

use super::{Game, Resolution, TurnRecord};
use crate::cards::{MAX_HAND, WISE_DRAW};
use crate::core::PlayerId;
use crate::policy::CardEvent;
use crate::table::TableView;

impl Game {
    /// Play the current seat's turn and advance the turn counter.
    ///
    /// Panics if the deck is empty when a plain draw is due; callers check
    /// [`Game::conclude`] first, as [`Game::run`] does.
    pub fn process_turn(&mut self) -> TurnRecord {
        let me = self.current_player();
        let turn = self.turn;
        tracing::info!("----- turn {} ({} cards left) -----", turn, self.deck.count());
        tracing::info!("{}'s turn", self.players[me].name());

        let (event, resolution) = if self.players[me].is_dropped() {
            tracing::info!("{} is out, skipping", self.players[me].name());
            (None, Resolution::Skipped)
        } else {
            self.draw_phase(me);
            match self.discard_phase(me) {
                Some(event) => {
                    let resolution = self.resolve(me, &event);
                    self.notify_opponents(me, &event);
                    (Some(event), resolution)
                }
                None => (None, Resolution::NoDiscard),
            }
        };

        let record = TurnRecord {
            turn,
            player: me,
            event,
            resolution,
        };
        self.history.push(record.clone());
        self.turn += 1;
        record
    }

    fn draw_phase(&mut self, me: PlayerId) {
        if self.players[me].called_wise() {
            let candidates = self.deck.draw_n(WISE_DRAW);
            tracing::info!("{} draws {} cards for the Sage", self.players[me].name(), candidates.len());
            tracing::debug!("sage candidates: {:?}", candidates);

            if !candidates.is_empty() {
                let view = TableView::new(&self.players, &self.deck, self.turn);
                let kept = self.policies[me].select_from_wise(&view, me, &candidates, &mut self.rng);

                let mut rest = candidates.clone();
                match rest.iter().position(|&c| c == kept) {
                    Some(pos) => rest.remove(pos),
                    None => panic!("policy kept {kept}, which is not among {candidates:?}"),
                };
                tracing::debug!("kept {}, returning {:?}", kept, rest);

                self.players[me].take(kept);
                self.deck.return_and_shuffle(rest, &mut self.rng);
            }
        } else {
            let card = self.deck.draw();
            tracing::debug!("{} draws {}", self.players[me].name(), card);
            self.players[me].take(card);
        }

        // Both last only until the holder's next turn.
        self.players[me].set_called_wise(false);
        self.players[me].set_protected(false);
    }

    fn discard_phase(&mut self, me: PlayerId) -> Option<CardEvent> {
        if self.players[me].hand().count() < MAX_HAND {
            return None;
        }
        tracing::debug!("{} holds {}", self.players[me].name(), self.players[me].hand());

        let view = TableView::new(&self.players, &self.deck, self.turn);
        let event = self.policies[me].select_discard(&view, me, &mut self.rng);

        self.players[me].discard_specified(event.discarded);
        tracing::info!(
            "{} discards {} {}",
            self.players[me].name(),
            event.discarded,
            event.discarded.label()
        );
        Some(event)
    }

    fn notify_opponents(&mut self, me: PlayerId, event: &CardEvent) {
        let watchers: Vec<PlayerId> = self
            .players
            .player_ids()
            .filter(|&id| id != me && self.players[id].is_alive())
            .collect();

        let view = TableView::new(&self.players, &self.deck, self.turn);
        for id in watchers {
            self.policies[id].observe_opponent_event(&view, id, me, event);
        }
    }
}
