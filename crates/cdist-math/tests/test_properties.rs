//! Property tests over randomly drawn parameter sets.

use cdist_core::Settings;
use cdist_math::distributions::{Beta, ContinuousDistribution, Gamma, LogNormal};
use cdist_math::random_numbers::MersenneTwisterUniformRng;
use proptest::prelude::*;

/// `exp(ln_density) == density` wherever the density is representable.
fn check_log_density<D: ContinuousDistribution>(d: &D, x: f64) -> Result<(), TestCaseError> {
    let ln_p = d.density_ln(x);
    let p = d.density(x);
    if ln_p > -700.0 && ln_p < 700.0 {
        let rel = (ln_p.exp() - p).abs() / p.abs().max(f64::MIN_POSITIVE);
        prop_assert!(rel < 1e-8, "x={x}: exp(ln p)={} vs p={p}", ln_p.exp());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn gamma_log_density_roundtrip(
        shape in 0.1_f64..500.0,
        log_rate in -8.0_f64..8.0,
        spread in 0.02_f64..5.0,
    ) {
        // x scales with the mean so the check lands where the mass is
        let rate = 10f64.powf(log_rate);
        let x = spread * shape / rate;
        let d = Gamma::with_settings(shape, rate, Settings::default()).unwrap();
        prop_assert!(d.density(x).is_finite());
        check_log_density(&d, x)?;
    }

    #[test]
    fn gamma_log_density_roundtrip_near_origin(
        shape in 0.1_f64..50.0,
        rate in 0.1_f64..1.0e6,
        log_x in -12.0_f64..-3.0,
    ) {
        let x = 10f64.powf(log_x);
        let d = Gamma::with_settings(shape, rate, Settings::default()).unwrap();
        check_log_density(&d, x)?;
    }

    #[test]
    fn beta_log_density_roundtrip(
        a in 0.1_f64..50.0,
        b in 0.1_f64..50.0,
        x in 0.001_f64..0.999,
    ) {
        let d = Beta::with_settings(a, b, Settings::default()).unwrap();
        check_log_density(&d, x)?;
    }

    #[test]
    fn log_normal_log_density_roundtrip(
        mu in -5.0_f64..5.0,
        sigma in 0.05_f64..3.0,
        x in 0.001_f64..100.0,
    ) {
        let d = LogNormal::with_settings(mu, sigma, Settings::default()).unwrap();
        check_log_density(&d, x)?;
    }

    #[test]
    fn gamma_samples_in_support(
        shape in 0.01_f64..20.0,
        rate in 0.01_f64..10.0,
        seed in any::<u64>(),
    ) {
        let mut d = Gamma::with_source(shape, rate, MersenneTwisterUniformRng::new(seed)).unwrap();
        for x in d.samples().take(64) {
            prop_assert!(x >= 0.0 && x.is_finite(), "Gamma({shape}, {rate}) sampled {x}");
        }
    }

    #[test]
    fn beta_samples_in_support(
        a in 0.001_f64..20.0,
        b in 0.001_f64..20.0,
        seed in any::<u64>(),
    ) {
        let mut d = Beta::with_source(a, b, MersenneTwisterUniformRng::new(seed)).unwrap();
        for x in d.samples().take(64) {
            prop_assert!((0.0..=1.0).contains(&x), "Beta({a}, {b}) sampled {x}");
        }
    }

    #[test]
    fn log_normal_samples_positive(
        mu in -5.0_f64..5.0,
        sigma in 0.0_f64..3.0,
        seed in any::<u64>(),
    ) {
        let mut d = LogNormal::with_source(mu, sigma, MersenneTwisterUniformRng::new(seed)).unwrap();
        for x in d.samples().take(64) {
            prop_assert!(x > 0.0 && x.is_finite(), "LogNormal({mu}, {sigma}) sampled {x}");
        }
    }

    #[test]
    fn cdf_monotone_and_bounded(
        shape in 0.1_f64..30.0,
        a in 0.1_f64..30.0,
        x in 0.0_f64..1.0,
        dx in 0.0_f64..0.5,
    ) {
        let g = Gamma::with_settings(shape, 1.0, Settings::default()).unwrap();
        let b = Beta::with_settings(a, shape, Settings::default()).unwrap();
        for (lo, hi) in [(g.cdf(x), g.cdf(x + dx)), (b.cdf(x), b.cdf(x + dx))] {
            prop_assert!((0.0..=1.0).contains(&lo) && (0.0..=1.0).contains(&hi));
            prop_assert!(lo <= hi + 1e-14, "cdf decreased: {lo} > {hi}");
        }
    }

    #[test]
    fn rejected_setter_is_atomic(
        shape in 0.0_f64..10.0,
        rate in 0.0_f64..10.0,
        bad in -10.0_f64..-1e-9,
    ) {
        let mut g = Gamma::with_settings(shape, rate, Settings::default()).unwrap();
        prop_assert!(g.set_parameters(bad, rate + 1.0).is_err());
        prop_assert!(g.set_rate(bad).is_err());
        prop_assert_eq!((g.shape(), g.rate()), (shape, rate));

        let mut b = Beta::with_settings(shape, rate, Settings::default()).unwrap();
        prop_assert!(b.set_parameters(shape + 1.0, bad).is_err());
        prop_assert_eq!((b.a(), b.b()), (shape, rate));
    }

    #[test]
    fn log_normal_mean_variance_roundtrip(
        mean in 0.1_f64..100.0,
        variance in 0.01_f64..100.0,
    ) {
        let d = LogNormal::with_mean_variance(mean, variance).unwrap();
        prop_assert!((d.mean() - mean).abs() / mean < 1e-9);
        prop_assert!((d.variance() - variance).abs() / variance < 1e-9);
    }
}
