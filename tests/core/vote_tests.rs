//! Tests for the round selection model and validation rules
//!
//! Tests cover:
//! - Toggle semantics, including the TOP radio group
//! - The server's round validation rules
//! - Form field encoding and the card deck

use cardscope::vote::{all_cards, card_label, BoxKey, Section, VoteError, VoteSelection};

fn valid_selection() -> VoteSelection {
    let mut vote = VoteSelection::default();
    vote.first_card = "Ah".to_string();
    vote.toggle(BoxKey::CowboyWin);
    vote.toggle(BoxKey::TwoPair);
    vote
}

// ============================================
// Toggle Tests
// ============================================

#[test]
fn test_toggle_selects_and_deselects() {
    let mut vote = VoteSelection::default();
    vote.toggle(BoxKey::Aa);
    assert!(vote.is_selected(BoxKey::Aa));

    vote.toggle(BoxKey::Aa);
    assert!(!vote.is_selected(BoxKey::Aa));
}

#[test]
fn test_top_boxes_are_exclusive() {
    let mut vote = VoteSelection::default();
    vote.toggle(BoxKey::CowboyWin);
    vote.toggle(BoxKey::BullWin);

    assert!(!vote.is_selected(BoxKey::CowboyWin));
    assert!(vote.is_selected(BoxKey::BullWin));
}

#[test]
fn test_top_exclusivity_leaves_other_sections_alone() {
    let mut vote = VoteSelection::default();
    vote.toggle(BoxKey::Aa);
    vote.toggle(BoxKey::FourKind);
    vote.toggle(BoxKey::Draw);
    vote.toggle(BoxKey::CowboyWin);

    assert!(vote.is_selected(BoxKey::Aa));
    assert!(vote.is_selected(BoxKey::FourKind));
    assert!(vote.is_selected(BoxKey::CowboyWin));
    assert!(!vote.is_selected(BoxKey::Draw));
}

#[test]
fn test_clear_keeps_first_card() {
    let mut vote = valid_selection();
    vote.clear();

    assert!(vote.selected().is_empty());
    assert_eq!(vote.first_card, "Ah");
}

// ============================================
// Validation Tests
// ============================================

#[test]
fn test_valid_round_passes() {
    assert_eq!(valid_selection().validate(), Ok(()));
}

#[test]
fn test_four_kind_allowed_alongside_another_right_box() {
    let mut vote = valid_selection();
    vote.toggle(BoxKey::FourKind);
    assert_eq!(vote.validate(), Ok(()));
}

#[test]
fn test_missing_first_card_rejected() {
    let mut vote = valid_selection();
    vote.first_card = String::new();
    assert_eq!(vote.validate(), Err(VoteError::MissingFirstCard));

    vote.first_card = "   ".to_string();
    assert_eq!(vote.validate(), Err(VoteError::MissingFirstCard));
}

#[test]
fn test_missing_top_rejected() {
    let mut vote = VoteSelection::default();
    vote.first_card = "Ah".to_string();
    vote.toggle(BoxKey::TwoPair);
    assert_eq!(vote.validate(), Err(VoteError::NoTopSelection));
}

#[test]
fn test_missing_right_rejected() {
    let mut vote = VoteSelection::default();
    vote.first_card = "Ah".to_string();
    vote.toggle(BoxKey::Draw);
    assert_eq!(vote.validate(), Err(VoteError::NoRightSelection));
}

#[test]
fn test_two_non_four_kind_rights_rejected() {
    let mut vote = valid_selection();
    vote.toggle(BoxKey::FullHouse);
    assert_eq!(vote.validate(), Err(VoteError::MultipleRightSelection));
}

// ============================================
// Encoding & Deck Tests
// ============================================

#[test]
fn test_form_fields_in_click_order() {
    let mut vote = VoteSelection::default();
    vote.first_card = "Td".to_string();
    vote.toggle(BoxKey::BullWin);
    vote.toggle(BoxKey::FourKind);

    let fields = vote.form_fields();
    assert_eq!(
        fields,
        vec![
            ("selected_box", "bull_win".to_string()),
            ("selected_box", "four_kind".to_string()),
            ("first_card", "Td".to_string()),
        ]
    );
}

#[test]
fn test_deck_has_52_unique_cards() {
    let cards = all_cards();
    assert_eq!(cards.len(), 52);

    let mut deduped = cards.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 52);
}

#[test]
fn test_card_labels() {
    assert_eq!(card_label("Th"), "10♥");
    assert_eq!(card_label("As"), "A♠");
    assert_eq!(card_label("2c"), "2♣");
    assert_eq!(card_label("Kd"), "K♦");
}

#[test]
fn test_sections_partition_all_boxes() {
    let top = BoxKey::ALL.iter().filter(|b| b.section() == Section::Top).count();
    let right = BoxKey::ALL.iter().filter(|b| b.section() == Section::Right).count();
    assert_eq!(top, 3);
    assert_eq!(right, 5);
}
