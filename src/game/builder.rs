//! Fluent construction of a [`Game`].

use super::Game;
use crate::cards::Deck;
use crate::core::{ConfigError, GameConfig, GameRng, PlayerConfig, PlayerId, PlayerMap};
use crate::policy::{DecisionPolicy, HeuristicPolicy, InteractivePolicy};
use crate::table::Player;

struct Seat {
    config: PlayerConfig,
    policy: Box<dyn DecisionPolicy>,
}

/// Builder for creating a Game.
///
/// Seats are added in turn order; the first seat added moves first.
/// ```no_run
/// # use xeno::GameBuilder;
/// let mut game = GameBuilder::new()
///     .seed(7)
///     .player("Alice")
///     .player("Bob")
///     .build()
///     .expect("two uniquely named seats");
/// let outcome = game.run();
/// println!("{:?}", outcome.result);
/// ```
#[derive(Default)]
pub struct GameBuilder {
    seed: u64,
    seats: Vec<Seat>,
    deck: Option<Deck>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats and seed from a configuration. Interactive seats prompt on
    /// the console.
    pub fn from_config(config: &GameConfig) -> Self {
        config
            .players
            .iter()
            .fold(Self::new().seed(config.seed), |builder, seat| {
                let policy: Box<dyn DecisionPolicy> = if seat.interactive {
                    Box::new(InteractivePolicy::stdio())
                } else {
                    Box::new(HeuristicPolicy::new())
                };
                builder.push(seat.clone(), policy)
            })
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add an automated seat. An empty name becomes `Player N`.
    pub fn player(self, name: impl Into<String>) -> Self {
        self.push(PlayerConfig::automated(name), Box::new(HeuristicPolicy::new()))
    }

    /// Add a seat played from the console.
    pub fn interactive_player(self, name: impl Into<String>) -> Self {
        self.push(PlayerConfig::interactive(name), Box::new(InteractivePolicy::stdio()))
    }

    /// Add a seat driven by a custom policy.
    pub fn seat(self, config: PlayerConfig, policy: impl DecisionPolicy + 'static) -> Self {
        self.push(config, Box::new(policy))
    }

    /// Play with a prepared deck instead of shuffling a fresh one.
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    fn push(mut self, config: PlayerConfig, policy: Box<dyn DecisionPolicy>) -> Self {
        self.seats.push(Seat { config, policy });
        self
    }

    /// The configuration this builder describes, policies aside.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            players: self.seats.iter().map(|s| s.config.clone()).collect(),
        }
    }

    /// Validate the seats and deal the table.
    pub fn build(self) -> Result<Game, ConfigError> {
        self.config().validate()?;

        let mut rng = GameRng::new(self.seed);
        let deck = match self.deck {
            Some(deck) => deck,
            None => Deck::shuffled(&mut rng),
        };

        let mut players = Vec::with_capacity(self.seats.len());
        let mut policies = Vec::with_capacity(self.seats.len());
        for (i, seat) in self.seats.into_iter().enumerate() {
            let id = PlayerId::new(i as u8);
            players.push(Player::new(id, seat.config.display_name(i), seat.config.interactive));
            policies.push(seat.policy);
        }

        tracing::debug!("seed {}, deck {:?}", self.seed, deck);
        Ok(Game::new(
            deck,
            PlayerMap::from_vec(players),
            PlayerMap::from_vec(policies),
            rng,
        ))
    }
}
