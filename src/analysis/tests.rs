use super::analyzer::*;
use crate::extract::{PatternSet, PatternSpec};
use crate::units::{BaseUnit, Normalizer, Prefix, UnitError};

const SAMPLE_LIS: &str = r#"
 ****** HSPICE -- transient analysis tnom= 25.000 temp= 25.000 *****
 static_power= 1.2500n  targ= 5.0000n
 av_pow= 3.1000u  from= 0.  to= 10.0000n
 ***** job concluded
 ****** transient analysis tnom= 25.000 temp= 25.000 *****
 static_power= 980.0000p  targ= 5.0000n
 av_pow= failed
 ***** job concluded
 ****** transient analysis tnom= 25.000 temp= 25.000 *****
 static_power= 1.1000n  targ= 5.0000n
 av_pow= 2.9000u  from= 0.  to= 10.0000n
 ***** job concluded
"#;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_analyze_hspice_listing() {
    let patterns = PatternSet::new(vec![
        PatternSpec::parameter("static_power"),
        PatternSpec::parameter("av_pow"),
    ])
    .unwrap();
    let normalizer = Normalizer::new(Prefix::Pico.into());

    let analysis = analyze_text("sample.lis", SAMPLE_LIS, &patterns, &normalizer).unwrap();
    assert_eq!(analysis.source, "sample.lis");
    assert_eq!(analysis.target, BaseUnit::from(Prefix::Pico));

    let power = analysis.series("static_power").unwrap();
    assert_eq!(power.values.len(), 3);
    assert!(approx_eq(power.values[0], 1250.0));
    assert!(approx_eq(power.values[1], 980.0));
    assert!(approx_eq(power.values[2], 1100.0));
    assert_eq!(power.failed, 0);

    let av_pow = analysis.series("av_pow").unwrap();
    assert_eq!(av_pow.values.len(), 2);
    assert!(approx_eq(av_pow.values[0], 3.1e6));
    assert!(approx_eq(av_pow.values[1], 2.9e6));
    assert_eq!(av_pow.failed, 1);
}

#[test]
fn test_missing_label_is_empty_not_error() {
    let patterns = PatternSet::new(vec![
        PatternSpec::parameter("static_power"),
        PatternSpec::parameter("total_tp"),
    ])
    .unwrap();
    let normalizer = Normalizer::new(BaseUnit::NONE);

    let analysis = analyze_text("sample.lis", SAMPLE_LIS, &patterns, &normalizer).unwrap();
    assert!(analysis.series("total_tp").unwrap().is_empty());
    assert!(!analysis.is_empty());
}

#[test]
fn test_empty_text_yields_no_values() {
    let patterns = PatternSet::common();
    let normalizer = Normalizer::new(Prefix::Pico.into());

    let analysis = analyze_text("empty.lis", "", &patterns, &normalizer).unwrap();
    assert_eq!(analysis.series.len(), patterns.len());
    assert!(analysis.is_empty());
}

#[test]
fn test_unknown_prefix_aborts() {
    let patterns = PatternSet::new(vec![PatternSpec::new("power", "", "W")]).unwrap();
    let normalizer = Normalizer::new(Prefix::Micro.into());

    let err = analyze_text("bad.lis", "p1 3.3mW p2 1.0xW", &patterns, &normalizer).unwrap_err();
    assert_eq!(err.label, "power");
    assert_eq!(
        err.source,
        UnitError::UnknownPrefix {
            prefix: 'x',
            token: "1.0x".to_string()
        }
    );
    assert!(err.to_string().contains("1.0x"));
}

#[test]
fn test_spaced_unit_example() {
    let patterns = PatternSet::new(vec![PatternSpec::new("power", "", "W")]).unwrap();
    let normalizer = Normalizer::new(Prefix::Micro.into());

    let analysis = analyze_text("p.txt", "leakage 3.3m W", &patterns, &normalizer).unwrap();
    let values = &analysis.series("power").unwrap().values;
    assert_eq!(values.len(), 1);
    assert!(approx_eq(values[0], 3300.0));
}

#[test]
fn test_prose_around_delays_does_not_abort() {
    let patterns = PatternSet::new(vec![PatternSpec::new("delay", "", "s")]).unwrap();
    let normalizer = Normalizer::new(Prefix::Pico.into());

    let text = "step 12 is done\ntpd 1.5ns\n5 steps later\n";
    let analysis = analyze_text("run.log", text, &patterns, &normalizer).unwrap();
    let values = &analysis.series("delay").unwrap().values;
    assert_eq!(values.len(), 1);
    assert!(approx_eq(values[0], 1500.0));
}

#[test]
fn test_key_only_value_with_stray_letters_aborts() {
    let patterns = PatternSet::new(vec![PatternSpec::parameter("av_pow")]).unwrap();
    let normalizer = Normalizer::new(Prefix::Micro.into());

    let err = analyze_text("run.lis", "av_pow= 4.4mW\nav_pow= 3.3xy\n", &patterns, &normalizer)
        .unwrap_err();
    assert_eq!(err.label, "av_pow");
    assert_eq!(
        err.source,
        UnitError::UnknownPrefix {
            prefix: 'x',
            token: "3.3x".to_string()
        }
    );
}
