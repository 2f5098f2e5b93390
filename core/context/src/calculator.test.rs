use super::*;

#[test]
fn empty_text_is_zero_tokens() {
    let calc = ContextCalculator::default();
    assert_eq!(calc.estimate_tokens(""), 0);
}

#[test]
fn longer_text_never_estimates_fewer_tokens() {
    let calc = ContextCalculator::default();
    let short = calc.estimate_tokens("hello");
    let long = calc.estimate_tokens("hello world, this is much longer");
    assert!(long >= short);
}

#[test]
fn identical_text_is_stable_across_calls() {
    let calc = ContextCalculator::default();
    let text = "the quick brown fox";
    assert_eq!(calc.estimate_tokens(text), calc.estimate_tokens(text));
}

#[test]
fn custom_ratio_changes_estimate() {
    let coarse = ContextCalculator::new(2.0);
    let fine = ContextCalculator::new(8.0);
    let text = "0123456789012345";
    assert!(coarse.estimate_tokens(text) > fine.estimate_tokens(text));
}
