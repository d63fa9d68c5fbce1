//! Bit serialization, bit-stuffing, and NRZI line coding (§4.2, §4.3).

use crate::errors::InvariantError;

/// AX.25 flag byte.
pub const FLAG: u8 = 0x7E;

/// Flattens `bytes` to an LSB-first bit sequence and wraps it in unstuffed
/// flag bytes, applying bit-stuffing to the frame body (§4.2).
///
/// `preamble_flags` and `trailer_flags` must each be ≥ 1.
pub fn serialize_and_stuff(bytes: &[u8], preamble_flags: u8, trailer_flags: u8) -> Vec<bool> {
    let preamble_flags = preamble_flags.max(1);
    let trailer_flags = trailer_flags.max(1);

    let mut out = Vec::with_capacity(bytes.len() * 8 + 8 * (preamble_flags + trailer_flags) as usize);

    for _ in 0..preamble_flags {
        push_byte_lsb_first(&mut out, FLAG);
    }

    let mut ones_run = 0usize;
    for &byte in bytes {
        for bit_idx in 0..8 {
            let bit = (byte >> bit_idx) & 1 == 1;
            out.push(bit);
            if bit {
                ones_run += 1;
                if ones_run == 5 {
                    out.push(false);
                    ones_run = 0;
                }
            } else {
                ones_run = 0;
            }
        }
    }

    for _ in 0..trailer_flags {
        push_byte_lsb_first(&mut out, FLAG);
    }

    out
}

fn push_byte_lsb_first(out: &mut Vec<bool>, byte: u8) {
    for bit_idx in 0..8 {
        out.push((byte >> bit_idx) & 1 == 1);
    }
}

/// Removes stuffed bits from a stuffed bit sequence (the inverse of the
/// stuffing step in [`serialize_and_stuff`]), used by Property 3 tests and
/// by the internal post-condition check. `data` must exclude the
/// surrounding flag bytes.
pub fn unstuff(data: &[bool]) -> Vec<bool> {
    let mut out = Vec::with_capacity(data.len());
    let mut ones_run = 0usize;
    let mut i = 0;
    while i < data.len() {
        let bit = data[i];
        out.push(bit);
        if bit {
            ones_run += 1;
            if ones_run == 5 {
                // Skip the stuffed 0 that follows.
                i += 1;
                ones_run = 0;
            }
        } else {
            ones_run = 0;
        }
        i += 1;
    }
    out
}

/// Verifies the bit-stuff invariant (§4.2, Property 2): no run of six or
/// more consecutive `1` bits appears in `stuffed_body` (the region between,
/// not including, the opening and closing flag bytes).
pub fn check_no_long_one_run(stuffed_body: &[bool]) -> Result<(), InvariantError> {
    let mut run = 0usize;
    for &bit in stuffed_body {
        if bit {
            run += 1;
            if run >= 6 {
                return Err(InvariantError::BitStuffRunLength { run });
            }
        } else {
            run = 0;
        }
    }
    Ok(())
}

/// NRZI-encodes a logical bit stream (§3, §4.3): a `0` bit toggles the line
/// level, a `1` bit holds it. `initial_level` is the line level just before
/// the first bit.
pub fn nrzi_encode(bits: &[bool], initial_level: bool) -> Vec<bool> {
    let mut level = initial_level;
    bits.iter()
        .map(|&bit| {
            if !bit {
                level = !level;
            }
            level
        })
        .collect()
}

/// NRZI-decodes a physical bit stream back to logical bits (Property 4):
/// `out[i] = 1 iff in[i] == in[i-1]`, with `in[-1] = initial_level`.
pub fn nrzi_decode(levels: &[bool], initial_level: bool) -> Vec<bool> {
    let mut prev = initial_level;
    levels
        .iter()
        .map(|&level| {
            let bit = level == prev;
            prev = level;
            bit
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_unstuffed() {
        let stuffed = serialize_and_stuff(&[0x00], 1, 1);
        // First 8 bits are the opening flag 0x7E LSB-first: 0,1,1,1,1,1,1,0.
        let flag_bits: Vec<bool> = stuffed[..8].to_vec();
        assert_eq!(
            flag_bits,
            vec![false, true, true, true, true, true, false, false]
        );
    }

    #[test]
    fn stuffing_inserts_zero_after_five_ones() {
        // 0xFF has 8 consecutive 1 bits -> stuffed after bit 5 and bit 10 (bits 6-10 are
        // ones 6,7,8 of this byte plus continuation), verified via no-long-run check.
        let stuffed = serialize_and_stuff(&[0xFF], 1, 1);
        let body = &stuffed[8..stuffed.len() - 8];
        check_no_long_one_run(body).unwrap();
        // There must be more bits than the raw 8 due to stuffing.
        assert!(body.len() > 8);
    }

    #[test]
    fn unstuff_is_inverse_of_stuff() {
        let original = vec![
            true, true, true, true, true, true, true, false, true, true, true, true, true,
        ];
        // Manually stuff: insert 0 after every 5th consecutive 1.
        let mut stuffed = Vec::new();
        let mut run = 0;
        for &bit in &original {
            stuffed.push(bit);
            if bit {
                run += 1;
                if run == 5 {
                    stuffed.push(false);
                    run = 0;
                }
            } else {
                run = 0;
            }
        }
        let recovered = unstuff(&stuffed);
        assert_eq!(recovered, original);
    }

    #[test]
    fn no_long_run_detects_violation() {
        let bad = vec![true; 6];
        assert!(check_no_long_one_run(&bad).is_err());
    }

    #[test]
    fn flag_pattern_appears_only_at_flag_positions() {
        // Property/Scenario 4: the exact 8-bit pattern 0,1,1,1,1,1,1,0
        // (0x7E LSB-first) must not occur anywhere in the stuffed body,
        // including frame bytes chosen to contain a literal 0x7E.
        let frame_bytes = [0x7E, 0xFF, 0x00, 0x7E, 0xAA];
        let stuffed = serialize_and_stuff(&frame_bytes, 1, 1);

        let flag_pattern = [false, true, true, true, true, true, true, false];
        let occurrences: Vec<usize> = (0..=stuffed.len().saturating_sub(8))
            .filter(|&i| stuffed[i..i + 8] == flag_pattern)
            .collect();

        // Only the opening flag (offset 0) and the closing flag (the last
        // 8 bits) may match; the stuffed body in between must never
        // reproduce the pattern.
        let last_flag_offset = stuffed.len() - 8;
        assert_eq!(occurrences, vec![0, last_flag_offset]);
    }

    #[test]
    fn nrzi_roundtrip() {
        let bits = vec![true, false, false, true, true, false, true, false, false, false];
        let encoded = nrzi_encode(&bits, true);
        let decoded = nrzi_decode(&encoded, true);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn nrzi_hold_on_one_toggle_on_zero() {
        let encoded = nrzi_encode(&[true, true, false, false], true);
        assert_eq!(encoded, vec![true, true, false, true]);
    }
}
