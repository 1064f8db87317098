pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Round up to the next even value. Encoders reject odd chroma-subsampled sizes.
pub(crate) fn round_up_even(v: u32) -> Option<u32> {
    if v.is_multiple_of(2) {
        Some(v)
    } else {
        v.checked_add(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
