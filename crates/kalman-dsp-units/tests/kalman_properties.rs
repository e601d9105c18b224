// SPDX-License-Identifier: LGPL-3.0-or-later
//
// Behavioural tests for the scalar Kalman filter, the per-channel bank and
// the frame processor.
//
// Random parameters are drawn from the conventional [0.01, 1] range and
// random signals from a seeded ChaCha generator so every run is
// reproducible.

use kalman_dsp_units::filters::bank::KalmanBank;
use kalman_dsp_units::filters::kalman::ScalarKalmanFilter;
use kalman_dsp_units::processor::{KalmanParams, KalmanProcessor, PARAM_MAX, PARAM_MIN};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ---- Helpers ----

fn gen_param(rng: &mut ChaCha8Rng) -> f64 {
    PARAM_MIN + (PARAM_MAX - PARAM_MIN) * rng.random::<f64>()
}

fn gen_signal(rng: &mut ChaCha8Rng, len: usize) -> Vec<f32> {
    (0..len).map(|_| rng.random::<f32>() * 2.0 - 1.0).collect()
}

const SEEDS: [u64; 5] = [3, 17, 256, 4242, 80085];

// ---- ScalarKalmanFilter ----

#[test]
fn converges_to_noiseless_constant() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let r = gen_param(&mut rng);
        let e = gen_param(&mut rng);
        let q = gen_param(&mut rng);
        let v = rng.random_range(-100.0..100.0);

        let mut kf = ScalarKalmanFilter::with_seed(r, 0.0, e, q);
        let mut prev = (v - kf.current_estimate()).abs();
        for step in 0..500 {
            let y = kf.update_estimate(v);
            let dist = (v - y).abs();
            assert!(dist <= prev, "seed {seed}, step {step}: {dist} > {prev}");
            prev = dist;
        }
        assert!(prev < 1e-6 * v.abs().max(1.0), "seed {seed}: residual {prev}");
    }
}

#[test]
fn gain_strictly_inside_unit_interval() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut kf = ScalarKalmanFilter::with_seed(
            gen_param(&mut rng),
            0.0,
            gen_param(&mut rng),
            gen_param(&mut rng),
        );
        for z in gen_signal(&mut rng, 1000) {
            // Parameters may change between any two updates.
            if rng.random_bool(0.05) {
                kf.set_measurement_error(gen_param(&mut rng))
                    .set_process_noise(gen_param(&mut rng));
            }
            kf.update_estimate(f64::from(z));
            let k = kf.kalman_gain();
            assert!(k > 0.0 && k < 1.0, "seed {seed}: gain {k}");
        }
    }
}

#[test]
fn zero_process_noise_never_raises_error() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut kf =
            ScalarKalmanFilter::with_seed(gen_param(&mut rng), 0.0, gen_param(&mut rng), 0.0);
        let mut prev = kf.estimate_error();
        for z in gen_signal(&mut rng, 2000) {
            kf.update_estimate(f64::from(z));
            assert!(kf.estimate_error() <= prev, "seed {seed}");
            assert!(kf.estimate_error() > 0.0, "seed {seed}");
            prev = kf.estimate_error();
        }
    }
}

#[test]
fn reconfiguring_with_same_values_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let signal = gen_signal(&mut rng, 256);

    let mut once = ScalarKalmanFilter::new(0.1, 0.1, 0.1);
    let mut every_step = ScalarKalmanFilter::new(0.1, 0.1, 0.1);
    once.set_measurement_error(0.3).set_process_noise(0.05);

    for &z in &signal {
        every_step
            .set_measurement_error(0.3)
            .set_process_noise(0.05);
        assert_eq!(
            once.update_estimate(f64::from(z)),
            every_step.update_estimate(f64::from(z))
        );
    }
}

#[test]
fn extreme_ratio_keeps_error_positive() {
    // Huge prior uncertainty against a tiny measurement error drives the
    // gain to exactly 1.0 on the first step.
    let mut kf = ScalarKalmanFilter::with_seed(1e-300, 0.0, 1e12, 0.0);
    for i in 0..100 {
        let y = kf.update_estimate(2.5);
        assert!(y.is_finite(), "step {i}");
        assert!(kf.estimate_error() > 0.0, "step {i}");
    }
    assert_eq!(kf.current_estimate(), 2.5);
}

// ---- Scenarios ----

#[test]
fn scenario_constant_ten_for_fifty_steps() {
    for seed_estimate in [0.0, 0.1] {
        let mut kf = ScalarKalmanFilter::with_seed(0.1, seed_estimate, 0.1, 0.1);
        let mut y = seed_estimate;
        for _ in 0..50 {
            y = kf.update_estimate(10.0);
        }
        assert!((y - 10.0).abs() < 1e-3, "seed {seed_estimate}: got {y}");
    }
}

#[test]
fn scenario_two_channels_do_not_interact() {
    let mut bank = KalmanBank::new();
    bank.resize(2, 0.1, 0.1, 0.1);

    let mut pos = vec![0.0f32; 64];
    let mut neg = vec![0.0f32; 64];
    for _ in 0..4 {
        bank.process(0, &mut pos, &[5.0], 0.1, 0.1);
        bank.process(1, &mut neg, &[-5.0], 0.1, 0.1);
    }

    let mut alone = ScalarKalmanFilter::new(0.1, 0.1, 0.1);
    let mut expected = vec![0.0f32; 64];
    for _ in 0..4 {
        alone.process_cyclic(&mut expected, &[5.0]);
    }
    assert_eq!(pos, expected);
    assert!((pos[63] - 5.0).abs() < 1e-3);
    assert!((neg[63] + 5.0).abs() < 1e-3);
}

// ---- KalmanBank ----

#[test]
fn bank_wraps_for_random_lengths() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..20 {
        let src_len = rng.random_range(1..32);
        let dst_len = rng.random_range(0..256);
        let src = gen_signal(&mut rng, src_len);
        let mut dst = vec![0.0f32; dst_len];

        let mut bank = KalmanBank::new();
        bank.resize(1, 0.2, 0.3, 0.05);
        bank.process(0, &mut dst, &src, 0.2, 0.05);

        let mut reference = ScalarKalmanFilter::new(0.2, 0.3, 0.05);
        for (j, &out) in dst.iter().enumerate() {
            let want = reference.update_estimate(f64::from(src[j % src_len])) as f32;
            assert_eq!(out, want, "slot {j} (src_len {src_len}, dst_len {dst_len})");
        }
    }
}

#[test]
fn bank_reset_reanchors_without_losing_estimates() {
    let mut bank = KalmanBank::new();
    bank.resize(3, 0.1, 0.1, 0.1);
    let mut out = vec![0.0f32; 32];
    for ch in 0..3 {
        bank.process(ch, &mut out, &[ch as f32 + 1.0], 0.1, 0.1);
    }
    let before: Vec<f64> = bank.filters().iter().map(|f| f.current_estimate()).collect();

    bank.reset_all(0.6);

    let after: Vec<f64> = bank.filters().iter().map(|f| f.current_estimate()).collect();
    assert_eq!(before, after);
    assert!(bank.filters().iter().all(|f| f.estimate_error() == 0.6));
    assert_eq!(bank.estimate_error(), Some(0.6));
}

// ---- KalmanProcessor ----

#[test]
fn processor_end_to_end() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let params = KalmanParams::default();
    let mut proc = KalmanProcessor::new(params);

    // Upstream announces four channels; frames of 32 raw samples are
    // stretched to 48 output samples.
    proc.set_channels(4);
    let mut bank = KalmanBank::new();
    bank.resize(4, params.measurement_error, params.estimate_error, params.process_noise);

    for _ in 0..10 {
        let raw: Vec<Vec<f32>> = (0..4).map(|_| gen_signal(&mut rng, 32)).collect();
        let src: Vec<&[f32]> = raw.iter().map(|v| v.as_slice()).collect();

        let mut got = vec![vec![0.0f32; 48]; 4];
        let mut dst: Vec<&mut [f32]> = got.iter_mut().map(|v| v.as_mut_slice()).collect();
        proc.process(&mut dst, &src);

        for (ch, raw_ch) in raw.iter().enumerate() {
            let mut want = vec![0.0f32; 48];
            bank.process(ch, &mut want, raw_ch, params.measurement_error, params.process_noise);
            assert_eq!(got[ch], want, "channel {ch}");
        }
    }

    assert_eq!(proc.estimate_error(), bank.estimate_error());
}

#[test]
fn processor_renegotiation_cycle() {
    let mut proc = KalmanProcessor::new(KalmanParams::default());
    proc.set_channels(2);
    assert_eq!(proc.channels(), 2);

    // Upstream disconnects.
    proc.set_channels(0);
    assert_eq!(proc.channels(), 0);
    assert!(proc.info_readings().is_empty());
    proc.process(&mut [], &[]);

    // And reconnects with a different layout.
    proc.set_channels(3);
    assert_eq!(proc.channels(), 3);
    assert_eq!(proc.info_readings(), vec![("EstimateError", 0.1)]);
}
