//! Program-derived addresses used by the liquidity instructions.

use solana_sdk::pubkey::Pubkey;

pub const POSITION_SEED: &[u8] = b"position";
pub const TICK_SEED: &[u8] = b"tick";
pub const TICK_BITMAP_SEED: &[u8] = b"tick_bitmap";

/// Pool-level position aggregating every personal position on the same range.
pub fn protocol_position(program_id: &Pubkey, pool: &Pubkey, tick_lower: i32, tick_upper: i32) -> Pubkey {
    let (address, _bump) = Pubkey::find_program_address(
        &[
            POSITION_SEED,
            pool.as_ref(),
            &tick_lower.to_be_bytes(),
            &tick_upper.to_be_bytes(),
        ],
        program_id,
    );
    address
}

/// State account of an initialized tick.
pub fn tick_state(program_id: &Pubkey, pool: &Pubkey, tick: i32) -> Pubkey {
    let (address, _bump) =
        Pubkey::find_program_address(&[TICK_SEED, pool.as_ref(), &tick.to_be_bytes()], program_id);
    address
}

/// Bitmap word (256 spaced ticks) that holds `tick`.
pub fn bitmap_word_position(tick: i32, tick_spacing: u16) -> i16 {
    let compressed = tick.div_euclid(i32::from(tick_spacing.max(1)));
    // |compressed| <= 443636, so the word index fits in i16
    (compressed >> 8) as i16
}

/// Bitmap account for the word containing `tick`.
pub fn tick_bitmap(program_id: &Pubkey, pool: &Pubkey, tick: i32, tick_spacing: u16) -> Pubkey {
    let word_position = bitmap_word_position(tick, tick_spacing);
    let (address, _bump) = Pubkey::find_program_address(
        &[TICK_BITMAP_SEED, pool.as_ref(), &word_position.to_be_bytes()],
        program_id,
    );
    address
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_word_position() {
        assert_eq!(bitmap_word_position(0, 10), 0);
        assert_eq!(bitmap_word_position(2_559, 10), 0);
        assert_eq!(bitmap_word_position(2_560, 10), 1);
        assert_eq!(bitmap_word_position(-1, 10), -1);
        assert_eq!(bitmap_word_position(-2_560, 10), -1);
        assert_eq!(bitmap_word_position(-2_561, 10), -2);
    }

    #[test]
    fn test_derivations_are_deterministic_and_distinct() {
        let program_id = Pubkey::new_unique();
        let pool = Pubkey::new_unique();

        let a = protocol_position(&program_id, &pool, -100, 100);
        assert_eq!(a, protocol_position(&program_id, &pool, -100, 100));
        assert_ne!(a, protocol_position(&program_id, &pool, -100, 110));
        assert_ne!(tick_state(&program_id, &pool, -100), tick_state(&program_id, &pool, 100));
    }
}
