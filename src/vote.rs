//! Round selection model and validation rules.
//!
//! A recorded round names the first card dealt and the set of outcome
//! boxes that hit. The boxes are partitioned into sections: the TOP
//! section behaves like a radio group (exactly one winner per round),
//! the RIGHT section allows one hand-strength box plus, independently,
//! four of a kind. Validation mirrors the server's rules so bad rounds
//! are rejected before they ever leave the client.

use thiserror::Error;

/// Card ranks in ascending order, `T` standing for 10
pub const RANKS: &str = "23456789TJQKA";

/// Card suits: hearts, diamonds, clubs, spades
pub const SUITS: [char; 4] = ['h', 'd', 'c', 's'];

// ============================================================================
// Box Types
// ============================================================================

/// Section a box belongs to on the dashboard
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Section {
    /// Round winner: exactly one per round
    Top,
    /// Side bets tallied against all rounds
    LeftGroup,
    /// Hand strength: one non-four-kind box, four kind independent
    Right,
}

/// An outcome box on the voting grid
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BoxKey {
    CowboyWin,
    Draw,
    BullWin,
    SuitedCombo,
    PairAny,
    Aa,
    HighOnePair,
    TwoPair,
    Trips,
    FullHouse,
    FourKind,
}

impl BoxKey {
    /// All boxes, in grid display order
    pub const ALL: [BoxKey; 11] = [
        BoxKey::CowboyWin,
        BoxKey::Draw,
        BoxKey::BullWin,
        BoxKey::SuitedCombo,
        BoxKey::PairAny,
        BoxKey::Aa,
        BoxKey::HighOnePair,
        BoxKey::TwoPair,
        BoxKey::Trips,
        BoxKey::FullHouse,
        BoxKey::FourKind,
    ];

    /// Get the wire key used in form submissions
    pub fn key(&self) -> &'static str {
        match self {
            BoxKey::CowboyWin => "cowboy_win",
            BoxKey::Draw => "draw",
            BoxKey::BullWin => "bull_win",
            BoxKey::SuitedCombo => "suited_combo",
            BoxKey::PairAny => "pair_any",
            BoxKey::Aa => "aa",
            BoxKey::HighOnePair => "high_onepair",
            BoxKey::TwoPair => "two_pair",
            BoxKey::Trips => "trips",
            BoxKey::FullHouse => "full_house",
            BoxKey::FourKind => "four_kind",
        }
    }

    /// Get the display label for this box
    pub fn label(&self) -> &'static str {
        match self {
            BoxKey::CowboyWin => "Cowboy wins",
            BoxKey::Draw => "Draw",
            BoxKey::BullWin => "Bull wins",
            BoxKey::SuitedCombo => "Straight / Flush",
            BoxKey::PairAny => "Any pair",
            BoxKey::Aa => "AA",
            BoxKey::HighOnePair => "High card / One pair",
            BoxKey::TwoPair => "Two pair",
            BoxKey::Trips => "Three of a kind",
            BoxKey::FullHouse => "Full house",
            BoxKey::FourKind => "Four of a kind",
        }
    }

    /// Get the payout tag shown next to the label
    pub fn payout(&self) -> &'static str {
        match self {
            BoxKey::CowboyWin => "x2",
            BoxKey::Draw => "x20",
            BoxKey::BullWin => "x2",
            BoxKey::SuitedCombo => "x1.66",
            BoxKey::PairAny => "x8.5",
            BoxKey::Aa => "x100",
            BoxKey::HighOnePair => "x2.2",
            BoxKey::TwoPair => "x3.1",
            BoxKey::Trips => "x4.7",
            BoxKey::FullHouse => "x20",
            BoxKey::FourKind => "x248",
        }
    }

    /// Get the section this box belongs to
    pub fn section(&self) -> Section {
        match self {
            BoxKey::CowboyWin | BoxKey::Draw | BoxKey::BullWin => Section::Top,
            BoxKey::SuitedCombo | BoxKey::PairAny | BoxKey::Aa => Section::LeftGroup,
            BoxKey::HighOnePair
            | BoxKey::TwoPair
            | BoxKey::Trips
            | BoxKey::FullHouse
            | BoxKey::FourKind => Section::Right,
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Reasons a round fails client-side validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    #[error("Please choose the first card before saving")]
    MissingFirstCard,

    #[error("A TOP box (Cowboy wins, Draw or Bull wins) must be selected")]
    NoTopSelection,

    #[error("Only one TOP box may be selected")]
    MultipleTopSelection,

    #[error("At least one RIGHT box must be selected")]
    NoRightSelection,

    #[error("At most one RIGHT box may be selected, not counting four of a kind")]
    MultipleRightSelection,
}

/// The operator's in-progress selection for the current round
#[derive(Clone, Debug, Default)]
pub struct VoteSelection {
    /// Selected boxes in click order, duplicate-free
    selected: Vec<BoxKey>,
    /// First card dealt, as rank+suit (e.g. `Ah`, `Td`); empty until chosen
    pub first_card: String,
}

impl VoteSelection {
    /// Toggle a box. TOP boxes are exclusive: selecting one deselects any
    /// other TOP box; selecting it again clears it.
    pub fn toggle(&mut self, key: BoxKey) {
        if key.section() == Section::Top {
            self.selected
                .retain(|b| b.section() != Section::Top || *b == key);
        }

        if let Some(pos) = self.selected.iter().position(|b| *b == key) {
            self.selected.remove(pos);
        } else {
            self.selected.push(key);
        }
    }

    /// Clear every selected box (keeps the first card)
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, key: BoxKey) -> bool {
        self.selected.contains(&key)
    }

    pub fn selected(&self) -> &[BoxKey] {
        &self.selected
    }

    /// Check the selection against the server's round rules:
    /// a first card, exactly one TOP box, at least one RIGHT box, and at
    /// most one RIGHT box not counting four of a kind.
    pub fn validate(&self) -> Result<(), VoteError> {
        if self.first_card.trim().is_empty() {
            return Err(VoteError::MissingFirstCard);
        }

        let top = self
            .selected
            .iter()
            .filter(|b| b.section() == Section::Top)
            .count();
        if top == 0 {
            return Err(VoteError::NoTopSelection);
        }
        if top > 1 {
            return Err(VoteError::MultipleTopSelection);
        }

        let right: Vec<BoxKey> = self
            .selected
            .iter()
            .copied()
            .filter(|b| b.section() == Section::Right)
            .collect();
        if right.is_empty() {
            return Err(VoteError::NoRightSelection);
        }
        if right.iter().filter(|b| **b != BoxKey::FourKind).count() > 1 {
            return Err(VoteError::MultipleRightSelection);
        }

        Ok(())
    }

    /// Form fields for the `/save` submission: one `selected_box` entry
    /// per box in click order, then the first card.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = self
            .selected
            .iter()
            .map(|b| ("selected_box", b.key().to_string()))
            .collect();
        fields.push(("first_card", self.first_card.clone()));
        fields
    }
}

// ============================================================================
// Deck
// ============================================================================

/// Every card in the deck as rank+suit codes, rank-major order
pub fn all_cards() -> Vec<String> {
    RANKS
        .chars()
        .flat_map(|r| SUITS.iter().map(move |s| format!("{}{}", r, s)))
        .collect()
}

/// Display label for a card code: `Th` becomes `10♥`
pub fn card_label(card: &str) -> String {
    let mut chars = card.chars();
    let (Some(rank), Some(suit)) = (chars.next(), chars.next()) else {
        return card.to_string();
    };

    let rank = match rank.to_ascii_uppercase() {
        'T' => "10".to_string(),
        r => r.to_string(),
    };
    let symbol = match suit.to_ascii_lowercase() {
        's' => '♠',
        'h' => '♥',
        'd' => '♦',
        'c' => '♣',
        other => other,
    };

    format!("{}{}", rank, symbol)
}
