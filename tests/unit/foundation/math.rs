use super::*;

#[test]
fn mul_div255_hits_endpoints() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn round_up_even_only_touches_odd_values() {
    assert_eq!(round_up_even(0), Some(0));
    assert_eq!(round_up_even(101), Some(102));
    assert_eq!(round_up_even(1280), Some(1280));
    assert_eq!(round_up_even(u32::MAX), None);
}
