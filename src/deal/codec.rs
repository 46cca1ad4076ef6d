//! Deal encoding: comma-separated card tokens.
//!
//! A corpus line is 52 tokens, each followed by a comma:
//!
//! ```text
//! CA,H10,SK,D7,...,C4,
//! ```
//!
//! Decoding tolerates surrounding whitespace and the trailing comma, but
//! rejects anything that is not exactly 52 valid, distinct cards.

use rustc_hash::FxHashSet;

use crate::core::card::{Card, DECK_SIZE};
use crate::core::error::DeckIntegrityError;

/// Encode cards as a comma-terminated token line (no newline).
#[must_use]
pub fn encode(cards: &[Card]) -> String {
    let mut line = String::with_capacity(cards.len() * 4);
    for card in cards {
        line.push_str(&card.token());
        line.push(',');
    }
    line
}

/// Decode a token line into exactly 52 distinct cards.
pub fn decode(line: &str) -> Result<Vec<Card>, DeckIntegrityError> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    let mut seen = FxHashSet::default();

    let tokens = line.trim().split(',').map(str::trim).filter(|t| !t.is_empty());
    for (index, token) in tokens.enumerate() {
        let card: Card = token.parse().map_err(|_| DeckIntegrityError::InvalidToken {
            index,
            token: token.to_string(),
        })?;
        if !seen.insert(card) {
            return Err(DeckIntegrityError::Duplicate { card });
        }
        cards.push(card);
    }

    if cards.len() != DECK_SIZE {
        return Err(DeckIntegrityError::WrongCount { found: cards.len() });
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::standard_deck;

    #[test]
    fn test_encode_format() {
        let deck = standard_deck();
        let line = encode(&deck);

        assert!(line.starts_with("CA,C2,C3,"));
        assert!(line.contains(",C10,CJ,CQ,CK,HA,"));
        assert!(line.ends_with("DQ,DK,"));
        assert_eq!(line.matches(',').count(), DECK_SIZE);
    }

    #[test]
    fn test_decode_with_newline() {
        let deck = standard_deck();
        let line = format!("{}\n", encode(&deck));
        assert_eq!(decode(&line).unwrap(), deck);
    }

    #[test]
    fn test_decode_without_trailing_comma() {
        let deck = standard_deck();
        let line = encode(&deck);
        let trimmed = line.trim_end_matches(',');
        assert_eq!(decode(trimmed).unwrap(), deck);
    }

    #[test]
    fn test_decode_short_line() {
        let deck = standard_deck();
        let line = encode(&deck[..51]);
        assert_eq!(decode(&line), Err(DeckIntegrityError::WrongCount { found: 51 }));
        assert_eq!(decode(""), Err(DeckIntegrityError::WrongCount { found: 0 }));
    }

    #[test]
    fn test_decode_invalid_token() {
        let mut tokens: Vec<String> = standard_deck().iter().map(|c| c.token()).collect();
        tokens[5] = "X6".to_string();
        let line = tokens.join(",");

        assert_eq!(
            decode(&line),
            Err(DeckIntegrityError::InvalidToken {
                index: 5,
                token: "X6".to_string()
            })
        );
    }

    #[test]
    fn test_decode_duplicate() {
        let mut deck = standard_deck();
        deck[10] = deck[3];
        let line = encode(&deck);

        assert_eq!(decode(&line), Err(DeckIntegrityError::Duplicate { card: deck[3] }));
    }
}
