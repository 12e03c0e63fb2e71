//! Console-driven policy.
//!
//! Every decision becomes a numbered prompt. Input that is not a number from
//! the offered set is rejected and the prompt repeats. End of input picks the
//! first offered choice so a closed stdin cannot hang the game.

use std::fmt::Display;
use std::io::{self, BufRead, Read, Stdout, Write};

use super::{CardEvent, DecisionPolicy};
use crate::cards::{Hand, Rank};
use crate::core::{GameRng, PlayerId};
use crate::table::TableView;

/// Decision policy that asks a human over a reader/writer pair.
#[derive(Debug)]
pub struct InteractivePolicy<R, W> {
    input: R,
    output: W,
}

/// Line-at-a-time reader over the process stdin.
///
/// Holds no lock between calls and buffers at most one line, so several
/// console seats can share stdin without stealing each other's input.
#[derive(Debug, Default)]
pub struct ConsoleInput {
    line: String,
    pos: usize,
}

impl Read for ConsoleInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ConsoleInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            io::stdin().read_line(&mut self.line)?;
        }
        Ok(&self.line.as_bytes()[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}

impl InteractivePolicy<ConsoleInput, Stdout> {
    /// Prompt on stdout, read from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(ConsoleInput::default(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn say(&mut self, line: impl Display) {
        if let Err(err) = writeln!(self.output, "{line}") {
            tracing::debug!("prompt write failed: {}", err);
        }
    }

    /// Block until one of `candidates` is entered.
    fn choose(&mut self, question: &str, candidates: &[u8]) -> u8 {
        assert!(!candidates.is_empty(), "prompt {question:?} offered no choices");

        loop {
            self.say(format_args!("{question} {candidates:?}"));
            if let Err(err) = self.output.flush() {
                tracing::debug!("prompt flush failed: {}", err);
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    tracing::warn!("input closed, choosing {}", candidates[0]);
                    return candidates[0];
                }
                Err(err) => {
                    tracing::warn!("input error ({}), choosing {}", err, candidates[0]);
                    return candidates[0];
                }
                Ok(_) => {}
            }

            match line.trim().parse::<u8>() {
                Ok(n) if candidates.contains(&n) => return n,
                _ => self.say(format_args!("invalid input: {}", line.trim())),
            }
        }
    }

    fn choose_rank(&mut self, question: &str, ranks: &[Rank]) -> Rank {
        let mut values: Vec<u8> = ranks.iter().map(|r| r.value()).collect();
        values.dedup();
        let picked = self.choose(question, &values);
        ranks
            .iter()
            .copied()
            .find(|r| r.value() == picked)
            .unwrap_or(ranks[0])
    }

    fn choose_target(&mut self, table: &TableView<'_>, me: PlayerId) -> Option<PlayerId> {
        let opponents = table.alive_opponents(me);
        match opponents.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => {
                for (i, id) in opponents.iter().enumerate() {
                    let name = table.player(*id).name().to_string();
                    self.say(format_args!("{name}: [{i}]"));
                }
                let indices: Vec<u8> = (0..opponents.len() as u8).collect();
                let picked = self.choose("Target?", &indices);
                Some(opponents[usize::from(picked)])
            }
        }
    }
}

impl<R: BufRead, W: Write> DecisionPolicy for InteractivePolicy<R, W> {
    fn select_discard(&mut self, table: &TableView<'_>, me: PlayerId, _rng: &mut GameRng) -> CardEvent {
        let hand = table.player(me).hand();
        self.say(format_args!("Your hand: {hand}"));

        // The Hero can only leave the hand by force.
        let allowed: Vec<Rank> = if hand.contains(Rank::Hero) {
            vec![hand.the_other(Rank::Hero)]
        } else {
            let mut cards = hand.all().to_vec();
            cards.sort();
            cards
        };
        let discarded = self.choose_rank("Discard which card?", &allowed);

        let target = if discarded.needs_target() {
            self.choose_target(table, me)
        } else {
            None
        };
        let guess = if discarded == Rank::Soldier {
            Some(self.choose_rank("Investigation: guess their card", &Rank::ALL))
        } else {
            None
        };

        CardEvent {
            discarded,
            target,
            guess,
        }
    }

    fn select_from_wise(
        &mut self,
        _table: &TableView<'_>,
        _me: PlayerId,
        candidates: &[Rank],
        _rng: &mut GameRng,
    ) -> Rank {
        let shown: String = candidates.iter().map(ToString::to_string).collect();
        self.say(format_args!("Sage draws: {shown}"));

        let mut sorted = candidates.to_vec();
        sorted.sort();
        self.choose_rank("Keep which card?", &sorted)
    }

    fn select_on_public_execution(
        &mut self,
        _me: PlayerId,
        target: PlayerId,
        revealed: &Hand,
        _rng: &mut GameRng,
    ) -> Rank {
        self.say(format_args!("{target} reveals {revealed}"));
        let mut cards = revealed.all().to_vec();
        cards.sort();
        self.choose_rank("Which card do they discard?", &cards)
    }

    fn select_on_plague(&mut self, _me: PlayerId, target: PlayerId, hidden: &Hand, _rng: &mut GameRng) -> Rank {
        self.say(format_args!("{target} holds [?][?]"));
        let picked = self.choose("Discard left [0] or right [1]?", &[0, 1]);
        hidden.at(usize::from(picked))
    }

    fn observe_clairvoyance(&mut self, table: &TableView<'_>, _me: PlayerId, target: PlayerId, seen: Rank) {
        let name = table.player(target).name().to_string();
        self.say(format_args!("{name} is holding {seen} {}", seen.label()));
    }

    fn observe_opponent_event(
        &mut self,
        table: &TableView<'_>,
        _me: PlayerId,
        opponent: PlayerId,
        event: &CardEvent,
    ) {
        let name = table.player(opponent).name().to_string();
        self.say(format_args!("{name} played {event}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::PlayerMap;
    use crate::table::Player;

    fn table(hands: &[&[Rank]]) -> (PlayerMap<Player>, Deck) {
        let mut players = PlayerMap::new(hands.len(), |id| Player::new(id, format!("p{}", id.0), false));
        for (i, cards) in hands.iter().enumerate() {
            for &c in *cards {
                players[PlayerId::new(i as u8)].take(c);
            }
        }
        (players, Deck::stacked([Rank::Boy], Some(Rank::Hero)))
    }

    fn written(policy: &InteractivePolicy<&[u8], Vec<u8>>) -> String {
        String::from_utf8_lossy(policy.output()).into_owned()
    }

    #[test]
    fn test_reprompts_until_valid() {
        let (players, deck) = table(&[&[Rank::Sage, Rank::Maiden], &[Rank::Boy]]);
        let view = TableView::new(&players, &deck, 2);
        let mut policy = InteractivePolicy::new("abc\n9\n4\n".as_bytes(), Vec::new());
        let mut rng = GameRng::new(0);

        let event = policy.select_discard(&view, PlayerId::new(0), &mut rng);
        assert_eq!(event, CardEvent::untargeted(Rank::Maiden));

        let out = written(&policy);
        assert!(out.contains("invalid input: abc"));
        assert!(out.contains("invalid input: 9"));
    }

    #[test]
    fn test_hero_holder_offered_only_other_card() {
        let (players, deck) = table(&[&[Rank::Hero, Rank::Reaper], &[Rank::Boy]]);
        let view = TableView::new(&players, &deck, 2);
        let mut policy = InteractivePolicy::new("10\n5\n".as_bytes(), Vec::new());
        let mut rng = GameRng::new(0);

        let event = policy.select_discard(&view, PlayerId::new(0), &mut rng);
        // Single opponent is targeted without asking.
        assert_eq!(event, CardEvent::targeted(Rank::Reaper, PlayerId::new(1)));
        assert!(written(&policy).contains("invalid input: 10"));
    }

    #[test]
    fn test_soldier_asks_target_and_guess() {
        let (players, deck) = table(&[&[Rank::Soldier, Rank::Sage], &[Rank::Boy], &[Rank::Noble]]);
        let view = TableView::new(&players, &deck, 3);
        let mut policy = InteractivePolicy::new("2\n1\n6\n".as_bytes(), Vec::new());
        let mut rng = GameRng::new(0);

        let event = policy.select_discard(&view, PlayerId::new(0), &mut rng);
        assert_eq!(event, CardEvent::investigation(PlayerId::new(2), Rank::Noble));
        assert!(written(&policy).contains("p2: [1]"));
    }

    #[test]
    fn test_end_of_input_picks_first_choice() {
        let (players, deck) = table(&[&[Rank::Sage, Rank::Maiden], &[Rank::Boy]]);
        let view = TableView::new(&players, &deck, 2);
        let mut policy = InteractivePolicy::new("".as_bytes(), Vec::new());
        let mut rng = GameRng::new(0);

        let event = policy.select_discard(&view, PlayerId::new(0), &mut rng);
        assert_eq!(event.discarded, Rank::Maiden);
    }

    /// Output that accepts nothing.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_failing_output_still_reads_answer() {
        let mut policy = InteractivePolicy::new("1\n".as_bytes(), BrokenPipe);
        let mut rng = GameRng::new(0);
        let hidden = Hand::of(&[Rank::Spirit, Rank::Maiden]);

        let picked = policy.select_on_plague(PlayerId::new(0), PlayerId::new(1), &hidden, &mut rng);
        assert_eq!(picked, Rank::Maiden);
    }

    #[test]
    fn test_plague_picks_by_position() {
        let mut policy = InteractivePolicy::new("1\n".as_bytes(), Vec::new());
        let mut rng = GameRng::new(0);
        let hidden = Hand::of(&[Rank::Spirit, Rank::Maiden]);

        let picked = policy.select_on_plague(PlayerId::new(0), PlayerId::new(1), &hidden, &mut rng);
        assert_eq!(picked, Rank::Maiden);
        assert!(!written(&policy).contains("[8]"));
    }

    #[test]
    fn test_public_execution_and_wise() {
        let (players, deck) = table(&[&[Rank::Boy], &[Rank::Noble]]);
        let view = TableView::new(&players, &deck, 3);
        let mut policy = InteractivePolicy::new("3\n10\n1\n".as_bytes(), Vec::new());
        let mut rng = GameRng::new(0);

        let revealed = Hand::of(&[Rank::Noble, Rank::Hero]);
        let picked = policy.select_on_public_execution(PlayerId::new(0), PlayerId::new(1), &revealed, &mut rng);
        assert_eq!(picked, Rank::Hero);

        let kept = policy.select_from_wise(&view, PlayerId::new(0), &[Rank::Spirit, Rank::Boy, Rank::Maiden], &mut rng);
        assert_eq!(kept, Rank::Boy);
        assert!(written(&policy).contains("Sage draws: [8][1][4]"));
    }
}
