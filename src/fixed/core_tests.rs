use super::*;

fn mags<B: DspBackend>(src: &[i16]) -> std::vec::Vec<i16> {
    let mut out = std::vec![0i16; src.len() / 2];
    B::cmplx_mag(src, &mut out);
    out
}

#[test]
fn test_scalar_magnitude_rounds() {
    // sqrt(25) = 5, sqrt(2) = 1.41 -> 1, sqrt(5) = 2.24 -> 2, sqrt(13) = 3.61 -> 4
    let src = [3, 4, 1, 1, 1, 2, 2, 3];
    assert_eq!(mags::<ScalarBackend>(&src), [5, 1, 2, 4]);
}

#[test]
fn test_scalar_magnitude_saturates() {
    let src = [i16::MIN, i16::MIN, i16::MAX, i16::MAX, i16::MIN, 0];
    assert_eq!(mags::<ScalarBackend>(&src), [i16::MAX, i16::MAX, i16::MAX]);
}

#[test]
fn test_raw_magnitude_is_half_scale() {
    let src = [6, 8, 3, 4, 0, 0];
    let mut out = [0i16; 3];
    cmplx_mag_q15(&src, &mut out);
    // 10 -> 5, 5 -> 3 (rounded halving), 0 -> 0
    assert_eq!(out, [5, 3, 0]);
}

#[test]
fn test_vector_magnitude_corrects_scale() {
    let src = [6, 8, 3, 4, i16::MIN, i16::MIN];
    assert_eq!(mags::<VectorBackend>(&src), [10, 6, i16::MAX]);
}

#[test]
fn test_backends_agree_on_magnitude_within_one_lsb() {
    let mut src = std::vec::Vec::new();
    for re in (-32768i32..32768).step_by(1021) {
        for im in (-32768i32..32768).step_by(2039) {
            src.push(re as i16);
            src.push(im as i16);
        }
    }
    let scalar = mags::<ScalarBackend>(&src);
    let vector = mags::<VectorBackend>(&src);
    for (i, (s, v)) in scalar.iter().zip(&vector).enumerate() {
        let diff = *v as i32 - *s as i32;
        assert!(
            (0..=1).contains(&diff),
            "pair {}: ({}, {}) scalar {} vector {}",
            i,
            src[2 * i],
            src[2 * i + 1],
            s,
            v
        );
    }
}

#[test]
fn test_magnitude_respects_shorter_destination() {
    let src = [3, 4, 6, 8];
    let mut out = [-1i16; 1];
    VectorBackend::cmplx_mag(&src, &mut out);
    assert_eq!(out, [6]);
    ScalarBackend::cmplx_mag(&src, &mut out);
    assert_eq!(out, [5]);
}

#[test]
fn test_add_and_sub_saturate() {
    let adds: [fn(&mut [i16], &[i16]); 2] =
        [ScalarBackend::add_assign_q15, VectorBackend::add_assign_q15];
    for backend_add in adds {
        let mut dst = [1, i16::MAX, i16::MIN, -5];
        backend_add(&mut dst, &[2, 1, -1, 5]);
        assert_eq!(dst, [3, i16::MAX, i16::MIN, 0]);
    }
    let subs: [fn(&mut [i16], &[i16]); 2] =
        [ScalarBackend::sub_assign_q15, VectorBackend::sub_assign_q15];
    for backend_sub in subs {
        let mut dst = [1, i16::MIN, i16::MAX, -5];
        backend_sub(&mut dst, &[2, 1, -1, 5]);
        assert_eq!(dst, [-1, i16::MIN, i16::MAX, -10]);
    }
}

#[test]
fn test_vector_blocks_and_tail() {
    // 2 full blocks of LANES pairs plus a 3 value tail
    let n = LANES * 2 * 2 + 3;
    let a: std::vec::Vec<i16> = (0..n as i16).collect();
    let b: std::vec::Vec<i16> = (0..n as i16).map(|x| 100 - x).collect();

    let mut scalar = a.clone();
    ScalarBackend::add_assign_q15(&mut scalar, &b);
    let mut vector = a.clone();
    VectorBackend::add_assign_q15(&mut vector, &b);

    assert_eq!(scalar, vector);
    assert!(vector.iter().all(|&x| x == 100));
}

#[test]
fn test_q31_add_saturates() {
    let adds: [fn(&mut [i32], &[i32]); 2] =
        [ScalarBackend::add_assign_q31, VectorBackend::add_assign_q31];
    for backend_add in adds {
        let mut dst = [i32::MAX - 1, 10, i32::MIN];
        backend_add(&mut dst, &[5, -20, -1]);
        assert_eq!(dst, [i32::MAX, -10, i32::MIN]);
    }
}

#[test]
fn test_widen_and_narrow() {
    let src = [1i16, -1, i16::MAX, i16::MIN, 0];
    let mut wide = [0i32; 5];
    let mut back = [0i16; 5];

    ScalarBackend::q15_to_q31(&src, &mut wide);
    assert_eq!(wide, [1 << 16, -1 << 16, (i16::MAX as i32) << 16, i32::MIN, 0]);
    ScalarBackend::q31_to_q15(&wide, &mut back);
    assert_eq!(back, src);

    let mut vwide = [0i32; 5];
    VectorBackend::q15_to_q31(&src, &mut vwide);
    assert_eq!(vwide, wide);
    VectorBackend::q31_to_q15(&vwide, &mut back);
    assert_eq!(back, src);
}

#[test]
fn test_narrow_truncates() {
    // 1.5 and -1.5 in Q16 terms
    let wide = [(1 << 16) + (1 << 15), -(1 << 16) - (1 << 15)];
    let mut out = [0i16; 2];
    ScalarBackend::q31_to_q15(&wide, &mut out);
    assert_eq!(out, [1, -2]);
}

#[test]
fn test_float_helpers() {
    let (s, c) = sin_cos(0.0);
    assert_eq!((s, c), (0.0, 1.0));
    assert!((atan2(4.0, 3.0) - 0.927_295_2).abs() < 1e-6);
    assert_eq!(atan2(0.0, 0.0), 0.0);
    assert_eq!(sqrt(6.25), 2.5);
    assert_eq!(sqrt(0.0), 0.0);
}

#[test]
fn test_backend_names() {
    assert_eq!(ScalarBackend::NAME, "scalar");
    assert_eq!(VectorBackend::NAME, "vector");
}
