/// Number of entries in the upper triangle (including the
/// diagonal) of a `k × k` matrix.
pub fn triangular_number(k: usize) -> usize {
    (k * (k + 1)) >> 1
}

#[test]
fn test_triangular_number() {
    assert_eq!(triangular_number(0), 0);
    assert_eq!(triangular_number(1), 1);
    assert_eq!(triangular_number(4), 10);
}
