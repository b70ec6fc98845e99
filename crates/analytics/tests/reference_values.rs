//! Indicator values checked against independently computed reference figures.

use analytics::{Indicator, RiskEngine};
use approx::assert_relative_eq;
use core_types::{FormulaSet, Period};
use test_case::test_case;

const POSITIVE: [f64; 9] = [0.01, 0.02, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01];
const NEGATIVE: [f64; 9] = [0.0, -0.06, -0.07, -0.01, -0.09, -0.02, -0.06, -0.08, -0.05];
const MIXED: [f64; 9] = [0.0, 0.01, 0.10, -0.04, 0.02, 0.03, 0.02, 0.01, -0.10];
const VOLATILE: [f64; 9] = [-0.03, 0.01, 0.04, 0.05, -0.10, -0.01, 0.02, 0.005, 0.01];
const VOLATILE_BENCHMARK: [f64; 9] = [0.01, 0.02, -0.05, 0.03, 0.10, -0.03, -0.01, 0.04, 0.01];
const SIMPLE_BENCHMARK: [f64; 9] = [0.01; 9];
const ZERO_BENCHMARK: [f64; 9] = [0.0; 9];
const NO_BENCHMARK: [f64; 9] = [f64::NAN; 9];

const TOLERANCE: f64 = 1e-9;

fn classic(portfolio: &[f64], benchmark: &[f64], risk_free_rate: f64, period: Period) -> RiskEngine {
    RiskEngine::with_formula_set(portfolio, benchmark, risk_free_rate, period, FormulaSet::Classic)
        .unwrap()
}

fn compounded(portfolio: &[f64], benchmark: &[f64], risk_free_rate: f64, period: Period) -> RiskEngine {
    RiskEngine::new(portfolio, benchmark, risk_free_rate, period).unwrap()
}

#[test]
fn max_drawdown_of_non_decreasing_curve_is_zero() {
    let risk = compounded(&POSITIVE, &SIMPLE_BENCHMARK, 0.0, Period::Daily);
    assert_eq!(risk.max_drawdown(), 0.0);
}

#[test]
fn max_drawdown_of_losing_curve_is_a_positive_magnitude() {
    let risk = compounded(&NEGATIVE, &SIMPLE_BENCHMARK, 0.0, Period::Daily);
    assert_relative_eq!(risk.max_drawdown(), 0.365_907_303_498_736, max_relative = TOLERANCE);
}

#[test]
fn single_period_series() {
    let risk = compounded(&[0.01], &[0.01], 0.0, Period::Daily);
    assert_eq!(risk.max_drawdown(), 0.0);
    assert_eq!(risk.calmar(), f64::INFINITY);
    assert!(risk.sharpe().is_nan());
    assert!(risk.sortino().is_nan());
    assert_eq!(risk.volatility(), 0.0);
    assert_eq!(risk.annual_volatility(), 0.0);
    assert_eq!(risk.excess_volatility(), 0.0);
    assert_eq!(risk.downside_risk(), 0.0);
    assert_eq!(risk.annual_downside_risk(), 0.0);
}

#[test_case(Period::Weekly, 0.246_908_305_139_982_08, 2.469_083_051_399_820_8, 0.388_515_693_948_705_83)]
#[test_case(Period::Monthly, 0.052_242_061_386_048_144, 0.522_420_613_860_481_44, 0.186_636_902_388_925_58)]
fn annualized_figures(period: Period, annual_return: f64, calmar: f64, annual_volatility: f64) {
    let risk = compounded(&MIXED, &SIMPLE_BENCHMARK, 0.0, period);
    assert_relative_eq!(risk.annual_return(), annual_return, max_relative = TOLERANCE);
    assert_relative_eq!(risk.calmar(), calmar, max_relative = TOLERANCE);
    assert_relative_eq!(risk.annual_volatility(), annual_volatility, max_relative = TOLERANCE);
}

#[test]
fn constant_series_has_zero_volatility() {
    let risk = compounded(&SIMPLE_BENCHMARK, &SIMPLE_BENCHMARK, 0.0, Period::Daily);
    assert_eq!(risk.annual_volatility(), 0.0);
}

#[test_case(&POSITIVE, 0.003_333_333_333_333_333_5, 0.052_915_026_221_291_815)]
#[test_case(&NEGATIVE, 0.031_797_973_380_564_85, 0.504_777_178_564_958_4)]
#[test_case(&VOLATILE, 0.044_331_453_594_234_63, 0.703_740_008_810_071_9)]
fn volatility_without_benchmark(portfolio: &[f64], volatility: f64, annual_volatility: f64) {
    let risk = compounded(portfolio, &NO_BENCHMARK, 0.0, Period::Daily);
    assert_relative_eq!(risk.volatility(), volatility, max_relative = TOLERANCE);
    assert_relative_eq!(risk.annual_volatility(), annual_volatility, max_relative = TOLERANCE);
}

#[test_case(&POSITIVE, &ZERO_BENCHMARK, 0.003_333_333_333_333_333_5, 0.052_915_026_221_291_815)]
#[test_case(&NEGATIVE, &ZERO_BENCHMARK, 0.031_797_973_380_564_85, 0.504_777_178_564_958_4)]
#[test_case(&VOLATILE, &VOLATILE_BENCHMARK, 0.079_834_899_079_983_26, 1.267_339_733_457_449_9)]
fn excess_volatility(portfolio: &[f64], benchmark: &[f64], volatility: f64, annual_volatility: f64) {
    let risk = compounded(portfolio, benchmark, 0.0, Period::Daily);
    assert_relative_eq!(risk.excess_volatility(), volatility, max_relative = TOLERANCE);
    assert_relative_eq!(risk.excess_annual_volatility(), annual_volatility, max_relative = TOLERANCE);
}

#[test_case(&POSITIVE, &ZERO_BENCHMARK, Period::Daily, 0.003_333_333_333_333_333_5, 0.052_915_026_221_291_815, 52.915_026_221_291_804)]
#[test_case(&POSITIVE, &SIMPLE_BENCHMARK, Period::Daily, 0.003_333_333_333_333_333, 0.052_915_026_221_291_81, 5.291_502_622_129_182)]
#[test_case(&NEGATIVE, &SIMPLE_BENCHMARK, Period::Daily, 0.031_797_973_380_564_85, 0.504_777_178_564_958_4, -29.399_110_399_937_154)]
#[test_case(&MIXED, &SIMPLE_BENCHMARK, Period::Weekly, 0.053_877_432_917_482_05, 0.388_515_693_948_705_83, -0.594_856_564_897_539_9)]
fn tracking_error_and_information_ratio(
    portfolio: &[f64],
    benchmark: &[f64],
    period: Period,
    tracking_error: f64,
    annual_tracking_error: f64,
    information_ratio: f64,
) {
    let risk = compounded(portfolio, benchmark, 0.0, period);
    assert_relative_eq!(risk.tracking_error(), tracking_error, max_relative = TOLERANCE);
    assert_relative_eq!(risk.annual_tracking_error(), annual_tracking_error, max_relative = TOLERANCE);
    assert_relative_eq!(risk.information_ratio(), information_ratio, max_relative = TOLERANCE);
    assert_eq!(risk.excess_sharpe().to_bits(), risk.information_ratio().to_bits());
}

mod classic_formula_set {
    use super::*;
    use test_case::test_case;

    #[test_case(&POSITIVE, 0.0252, Period::Daily, 0.004_444_444_444_444_445, 2.759_978_666_666_666_6)]
    #[test_case(&VOLATILE, 0.0252, Period::Daily, -0.675_555_555_555_555_8, 2.087_642_666_666_667)]
    #[test_case(&VOLATILE, 0.052, Period::Weekly, -0.675_555_555_555_555_8, 0.352_367_407_407_407_46)]
    #[test_case(&VOLATILE, 0.024, Period::Monthly, -0.675_555_555_555_555_8, 0.061_208_888_888_888_91)]
    fn beta_and_alpha(portfolio: &[f64], risk_free_rate: f64, period: Period, beta: f64, alpha: f64) {
        let risk = classic(portfolio, &VOLATILE_BENCHMARK, risk_free_rate, period);
        assert_relative_eq!(risk.beta(), beta, max_relative = TOLERANCE);
        assert_relative_eq!(risk.alpha(), alpha, max_relative = TOLERANCE);
    }

    #[test_case(&POSITIVE, 0.0, Period::Daily, 52.915_026_221_291_804)]
    #[test_case(&NEGATIVE, 0.0, Period::Daily, -24.406_808_633_910_085)]
    #[test_case(&VOLATILE, 0.0252, Period::Daily, -0.234_745_783_857_494_2)]
    #[test_case(&MIXED, 0.052, Period::Weekly, 0.609_727_979_019_978_4)]
    #[test_case(&MIXED, 0.036, Period::Monthly, 0.164_311_914_064_891_35)]
    fn sharpe(portfolio: &[f64], risk_free_rate: f64, period: Period, expected: f64) {
        let risk = classic(portfolio, &NO_BENCHMARK, risk_free_rate, period);
        assert_relative_eq!(risk.sharpe(), expected, max_relative = TOLERANCE);
    }

    #[test_case(0.0, Period::Weekly, 0.038_078_865_529_319_54, 0.274_590_604_354_919_6)]
    #[test_case(0.052, Period::Weekly, 0.038_540_563_047_262_3, 0.277_919_952_504_313_7)]
    #[test_case(0.0, Period::Monthly, 0.038_078_865_529_319_54, 0.131_909_059_582_729_2)]
    #[test_case(0.036, Period::Monthly, 0.039_476_258_687_975_99, 0.136_749_771_480_613_43)]
    fn downside_risk(risk_free_rate: f64, period: Period, downside: f64, annual_downside: f64) {
        let risk = classic(&MIXED, &NO_BENCHMARK, risk_free_rate, period);
        assert_relative_eq!(risk.downside_risk(), downside, max_relative = TOLERANCE);
        assert_relative_eq!(risk.annual_downside_risk(), annual_downside, max_relative = TOLERANCE);
    }

    #[test_case(&NEGATIVE, 0.0252, Period::Daily, -12.765_908_412_673_111)]
    #[test_case(&MIXED, 0.0, Period::Weekly, 1.052_071_281_053_332_1)]
    #[test_case(&MIXED, 0.052, Period::Weekly, 0.852_363_735_508_381_8)]
    #[test_case(&MIXED, 0.0, Period::Monthly, 0.505_398_695_719_269)]
    #[test_case(&MIXED, 0.036, Period::Monthly, 0.224_253_878_705_853_53)]
    fn sortino(portfolio: &[f64], risk_free_rate: f64, period: Period, expected: f64) {
        let risk = classic(portfolio, &NO_BENCHMARK, risk_free_rate, period);
        assert_relative_eq!(risk.sortino(), expected, max_relative = TOLERANCE);
    }

    #[test]
    fn sortino_without_downside_is_nan() {
        assert!(classic(&POSITIVE, &NO_BENCHMARK, 0.0, Period::Daily).sortino().is_nan());
        assert!(classic(&[0.01], &[f64::NAN], 0.0, Period::Daily).sortino().is_nan());
    }
}

mod compounded_formula_set {
    use super::*;

    #[test]
    fn volatile_daily_series() {
        let risk = compounded(&VOLATILE, &VOLATILE_BENCHMARK, 0.0252, Period::Daily);
        let expected = [
            (Indicator::ReturnRate, -0.013_082_027_751_391_6),
            (Indicator::AnnualReturn, -0.308_376_697_736_471_5),
            (Indicator::BenchmarkReturn, 0.118_501_839_405_922_39),
            (Indicator::BenchmarkAnnualReturn, 22.005_287_971_903_38),
            (Indicator::Beta, -0.675_555_555_555_555_6),
            (Indicator::Alpha, 2.088_163_857_415_558_3),
            (Indicator::BenchmarkVolatility, 0.043_301_270_189_221_93),
            (Indicator::BenchmarkAnnualVolatility, 0.687_386_354_243_376),
            (Indicator::MaxDrawdown, 0.109),
            (Indicator::Sharpe, -0.234_303_780_443_101_18),
            (Indicator::DownsideRisk, 0.036_819_441_824_887_79),
            (Indicator::AnnualDownsideRisk, 0.584_490_518_885_179_8),
            (Indicator::Sortino, -0.282_107_132_939_914_74),
            (Indicator::Calmar, -2.829_144_015_930_932_5),
            (Indicator::ExcessReturnRate, -0.142_986_241_501_696),
            (Indicator::ExcessAnnualReturn, -0.986_705_921_589_227_9),
            (Indicator::ExcessMaxDrawdown, 0.2),
            (Indicator::GeometricExcessReturn, -0.117_642_960_003_716_49),
            (Indicator::GeometricExcessAnnualReturn, -0.969_936_333_633_023_6),
            (Indicator::GeometricExcessDrawdown, 0.181_818_181_818_181_88),
            (Indicator::Var, 0.074_868_682_737_412_98),
            (Indicator::WinRate, 6.0 / 9.0),
            (Indicator::ExcessWinRate, 4.0 / 9.0),
            (Indicator::Correlation, -0.659_856_857_090_410_5),
            (Indicator::UlcerIndex, 0.070_725_809_935_202_11),
            (Indicator::UlcerPerformanceIndex, -4.716_477_592_014_701),
        ];
        for (indicator, value) in expected {
            assert_relative_eq!(risk.get(indicator), value, max_relative = 1e-8);
        }
    }

    #[test]
    fn weekly_series_against_constant_benchmark() {
        let risk = compounded(&MIXED, &SIMPLE_BENCHMARK, 0.052, Period::Weekly);
        assert_relative_eq!(risk.sharpe(), 0.613_028_149_736_571_2, max_relative = TOLERANCE);
        assert_relative_eq!(risk.downside_risk(), 0.040_694_207_431_998_46, max_relative = TOLERANCE);
        assert_relative_eq!(risk.sortino(), 0.811_623_695_317_126_3, max_relative = TOLERANCE);
        assert_relative_eq!(risk.excess_max_drawdown(), 0.120_255_558_999_999_97, max_relative = TOLERANCE);
        assert_relative_eq!(risk.geometric_excess_drawdown(), 0.119_063_830_158_516_1, max_relative = TOLERANCE);
        assert_relative_eq!(risk.ulcer_index(), 0.036_564_463_622_484_6, max_relative = TOLERANCE);
        assert_relative_eq!(risk.ulcer_performance_index(), 5.330_539_158_247_82, max_relative = TOLERANCE);
        assert_relative_eq!(risk.var(), 0.083_165_453_298_748_15, max_relative = 1e-8);
    }

    #[test]
    fn formula_sets_agree_without_a_risk_free_rate_except_downside() {
        let new = compounded(&VOLATILE, &VOLATILE_BENCHMARK, 0.0, Period::Daily);
        let old = classic(&VOLATILE, &VOLATILE_BENCHMARK, 0.0, Period::Daily);
        for indicator in [Indicator::Alpha, Indicator::Sharpe, Indicator::Beta, Indicator::Calmar] {
            assert_relative_eq!(new.get(indicator), old.get(indicator), max_relative = 1e-12);
        }
        // Below-mean versus below-zero semi-deviation.
        assert!(new.downside_risk() != old.downside_risk());
    }
}

#[test]
fn param_var_of_median_is_close_to_zero() {
    let risk = compounded(&VOLATILE, &VOLATILE_BENCHMARK, 0.0, Period::Daily);
    assert!(risk.param_var(0.5).abs() < 0.005);
    assert_eq!(risk.param_var(0.05).to_bits(), risk.var().to_bits());
}
