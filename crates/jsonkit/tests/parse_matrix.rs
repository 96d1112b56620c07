//! Table-driven coverage of the strict/lenient option matrix.

use jsonkit::{decode_str, encode, EncoderOptions, Json, ParserOptions};
use rstest::rstest;

#[rstest]
#[case::object(r#"{"a":1}"#)]
#[case::array(r#"[1,2,3]"#)]
#[case::nested(r#"{"a":[1,{"b":null}]}"#)]
#[case::scalar_string(r#""hello""#)]
#[case::scalar_number(r"42")]
#[case::unicode_escape(r#""café""#)]
fn strict_mode_accepts_well_formed_json(#[case] input: &str) {
    assert!(decode_str(input, ParserOptions::strict()).is_ok());
}

#[rstest]
#[case::trailing_comma_array("[1,]")]
#[case::trailing_comma_object(r#"{"a":1,}"#)]
#[case::leading_plus("+5")]
#[case::bare_leading_fraction(".5")]
#[case::bare_trailing_fraction("5.")]
#[case::line_comment("1 // trailing\n")]
#[case::block_comment("/* leading */ 1")]
fn strict_mode_rejects_what_lenient_mode_accepts(#[case] input: &str) {
    assert!(decode_str(input, ParserOptions::strict()).is_err());
    assert!(decode_str(input, ParserOptions::lenient()).is_ok());
}

#[rstest]
#[case::unterminated_string(r#""abc"#)]
#[case::unterminated_object(r#"{"a":1"#)]
#[case::unterminated_array("[1,2")]
#[case::bad_escape(r#""\q""#)]
#[case::lone_colon(":")]
#[case::empty_input("")]
fn both_modes_reject_malformed_input(#[case] input: &str) {
    assert!(decode_str(input, ParserOptions::strict()).is_err());
    assert!(decode_str(input, ParserOptions::lenient()).is_err());
}

#[rstest]
#[case::max_depth_1(1, "[1]", true)]
#[case::max_depth_1_nested(1, "[[1]]", false)]
#[case::max_depth_3_exact(3, "[[[1]]]", true)]
#[case::max_depth_3_exceeded(3, "[[[[1]]]]", false)]
fn max_depth_bounds_nesting(#[case] max_depth: u32, #[case] input: &str, #[case] should_succeed: bool) {
    let opts = ParserOptions {
        max_depth,
        ..ParserOptions::default()
    };
    assert_eq!(decode_str(input, opts).is_ok(), should_succeed);
}

#[rstest]
#[case::integer("42", "42")]
#[case::negative("-7", "-7")]
#[case::fractional("1.5", "1.5")]
#[case::integral_double("3.0", "3.0")]
#[case::exponent("1e2", "100.0")]
fn numbers_round_trip_through_encode(#[case] input: &str, #[case] expected: &str) {
    let v = decode_str(input, ParserOptions::default()).unwrap();
    assert_eq!(encode(&v, &EncoderOptions::default()), expected);
}

#[test]
fn empty_containers_round_trip() {
    for (input, expected) in [("{}", Json::Object(Default::default())), ("[]", Json::Array(vec![]))] {
        let v = decode_str(input, ParserOptions::default()).unwrap();
        assert_eq!(v, expected);
        assert_eq!(encode(&v, &EncoderOptions::default()), input);
    }
}
