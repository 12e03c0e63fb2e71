//! Card ranks, their labels, and the fixed deck composition.

use serde::{Deserialize, Serialize};

/// A card's identity. The numeric value is both its effect selector and its
/// strength when hands are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rank {
    /// Revolution: public execution from the second appearance on.
    Boy = 1,
    /// Investigation: guess the target's card.
    Soldier = 2,
    /// Clairvoyance: look at the target's card.
    FortuneTeller = 3,
    /// Protection until the holder's next turn.
    Maiden = 4,
    /// Plague: target draws, discards a concealed card.
    Reaper = 5,
    /// Confrontation: the lower card is eliminated.
    Noble = 6,
    /// Wise: next turn draws three, keeps one.
    Sage = 7,
    /// Exchange hands with the target.
    Spirit = 8,
    /// Public execution, emperor variant.
    Emperor = 9,
    /// Never discarded by choice; may reincarnate.
    Hero = 10,
}

/// The 18-card composition: two copies of 1..=8, one 9 and one 10.
pub const FULL_DECK: [Rank; 18] = [
    Rank::Boy,
    Rank::Boy,
    Rank::Soldier,
    Rank::Soldier,
    Rank::FortuneTeller,
    Rank::FortuneTeller,
    Rank::Maiden,
    Rank::Maiden,
    Rank::Reaper,
    Rank::Reaper,
    Rank::Noble,
    Rank::Noble,
    Rank::Sage,
    Rank::Sage,
    Rank::Spirit,
    Rank::Spirit,
    Rank::Emperor,
    Rank::Hero,
];

/// Total cards in play, revival card included.
pub const DECK_SIZE: usize = FULL_DECK.len();

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 10] = [
        Rank::Boy,
        Rank::Soldier,
        Rank::FortuneTeller,
        Rank::Maiden,
        Rank::Reaper,
        Rank::Noble,
        Rank::Sage,
        Rank::Spirit,
        Rank::Emperor,
        Rank::Hero,
    ];

    /// Numeric value 1..=10.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value, if in 1..=10.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Character name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Boy => "Boy",
            Rank::Soldier => "Soldier",
            Rank::FortuneTeller => "Fortune Teller",
            Rank::Maiden => "Maiden",
            Rank::Reaper => "Reaper",
            Rank::Noble => "Noble",
            Rank::Sage => "Sage",
            Rank::Spirit => "Spirit",
            Rank::Emperor => "Emperor",
            Rank::Hero => "Hero",
        }
    }

    /// Name of the effect triggered by discarding this card.
    #[must_use]
    pub const fn effect(self) -> &'static str {
        match self {
            Rank::Boy => "Revolution",
            Rank::Soldier => "Investigation",
            Rank::FortuneTeller => "Clairvoyance",
            Rank::Maiden => "Protection",
            Rank::Reaper => "Plague",
            Rank::Noble => "Confrontation",
            Rank::Sage => "Wise",
            Rank::Spirit => "Exchange",
            Rank::Emperor => "Public Execution",
            Rank::Hero => "Concealment / Reincarnation",
        }
    }

    /// Display label, e.g. `Reaper (Plague)`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.effect())
    }

    /// Whether discarding this card requires choosing an opponent.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(
            self,
            Rank::Boy
                | Rank::Soldier
                | Rank::FortuneTeller
                | Rank::Reaper
                | Rank::Noble
                | Rank::Spirit
                | Rank::Emperor
        )
    }

    /// How many copies the full deck holds.
    #[must_use]
    pub fn copies(self) -> usize {
        FULL_DECK.iter().filter(|&&r| r == self).count()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.value())
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::from_value(value).ok_or_else(|| format!("rank out of range: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_round_trip() {
        for (i, rank) in Rank::ALL.iter().enumerate() {
            assert_eq!(rank.value() as usize, i + 1);
            assert_eq!(Rank::from_value(rank.value()), Some(*rank));
        }
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(11), None);
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(Rank::Boy < Rank::Soldier);
        assert!(Rank::Emperor < Rank::Hero);
        assert_eq!(Rank::ALL.iter().max(), Some(&Rank::Hero));
    }

    #[test]
    fn test_composition() {
        assert_eq!(DECK_SIZE, 18);
        for rank in Rank::ALL {
            let expected = if rank >= Rank::Emperor { 1 } else { 2 };
            assert_eq!(rank.copies(), expected, "{}", rank.label());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Rank::Reaper.label(), "Reaper (Plague)");
        assert_eq!(Rank::Emperor.label(), "Emperor (Public Execution)");
        assert_eq!(format!("{}", Rank::Hero), "[10]");
    }

    #[test]
    fn test_needs_target() {
        let untargeted: Vec<_> = Rank::ALL.into_iter().filter(|r| !r.needs_target()).collect();
        assert_eq!(untargeted, vec![Rank::Maiden, Rank::Sage, Rank::Hero]);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Rank::Spirit).unwrap();
        assert_eq!(json, "8");
        let back: Rank = serde_json::from_str("10").unwrap();
        assert_eq!(back, Rank::Hero);
        assert!(serde_json::from_str::<Rank>("11").is_err());
    }
}
