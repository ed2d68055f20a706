use qfix_math::{Fixed, Q15_16, Q7_8};

// Determinism tests for Q15.16 conversions and kernels.
// These use rational values exactly representable in binary to avoid
// any cross-platform rounding ambiguity.

type F = Fixed<Q15_16>;

#[test]
fn test_q15_16_determinism_rationals() {
    let q: i32 = 1 << 16; // FRAC_BITS = 16

    let vals: [f64; 13] = [
        0.0, 1.0, -1.0, 0.5, -0.5, 0.25, -0.25, 0.75, -0.75, 1.25, -1.25, 127.0, -128.0,
    ];

    let expected: Vec<i32> = vec![
        0,
        q,
        -q,
        q / 2,
        -q / 2,
        q / 4,
        -q / 4,
        (3 * q) / 4,
        -(3 * q) / 4,
        q + (q / 4),
        -q - (q / 4),
        127 * q,
        -128 * q,
    ];

    let raw: Vec<i32> = vals.iter().map(|&v| F::from_float(v).raw()).collect();
    assert_eq!(raw, expected, "Q15.16 encoding mismatch");

    for (i, &v) in vals.iter().enumerate() {
        assert_eq!(F::from_float(v).to_float(), v, "Round-trip mismatch at {}", i);
    }
}

#[test]
fn test_q15_16_arithmetic_determinism() {
    let q: i32 = 1 << 16;

    let a = F::from_float(1.25);
    let b = F::from_float(-0.75);

    assert_eq!((a + b).raw(), q / 2);
    assert_eq!((a - b).raw(), 2 * q);
    // 1.25 * -0.75 = -0.9375 = -(15/16)
    assert_eq!((a * b).raw(), -(15 * q) / 16);
    // 1.25 / 0.5 = 2.5
    assert_eq!(a.divide(F::half()).unwrap().raw(), (5 * q) / 2);
    assert_eq!(b.absolute().raw(), (3 * q) / 4);
    assert_eq!(F::from_int(3).int_power(4).unwrap().raw(), 81 * q);
}

#[test]
fn test_kernel_fixed_points() {
    // These reach exact raw results in Q15.16.
    assert_eq!(F::from_int(4).sqrt().unwrap(), F::two());
    assert_eq!(F::zero().cos(), F::one());
    assert_eq!(F::pi().cos(), F::minus_one());
    assert_eq!(F::zero().sin(), F::zero());
    assert_eq!(F::half_pi().tan(), F::max_value());
}

#[test]
fn test_q7_8_encoding() {
    assert_eq!(Fixed::<Q7_8>::from_float(1.5).raw(), 384);
    assert_eq!(Fixed::<Q7_8>::from_float(-0.00390625).raw(), -1);
    assert_eq!(Fixed::<Q7_8>::from_int(-3).raw(), -768);
}
