use icu_mf_parser::{
    Element, ErrorKind, NumberStyle, ParserOptions, PluralType, SkeletonError, error_kind_name, parse, parse_message,
};
use serde_json::json;

#[test]
fn parses_a_realistic_message() {
    let input = "{gender, select, female {{count, plural, offset:1 =0 {She has no <b>friends</b>} \
                 one {She and {name} went} other {She, {name} and # others went}}} \
                 other {{count, plural, =0 {They have none} other {They have # friends}}}}";
    let message = parse_message(input).expect("parse");
    let Element::Select(select) = &message.elements[0] else {
        panic!("expected select");
    };
    let female = select.option("female").expect("female branch");
    let Element::Plural(plural) = &female.value[0] else {
        panic!("expected plural");
    };
    assert_eq!(plural.plural_type, PluralType::Cardinal);
    assert_eq!(plural.offset, 1);
    assert_eq!(plural.options.len(), 3);
    assert!(matches!(plural.option("=0").map(|option| &option.value[1]), Some(Element::Tag(_))));
}

#[test]
fn serializes_ast_as_tagged_json() {
    let options = ParserOptions::default().with_capture_location(false);
    let message = parse("Hi {n, number, ::percent}", &options).expect("parse");
    let json = serde_json::to_value(&message.elements).expect("json");
    assert_eq!(
        json,
        json!([
            {"type": "literal", "value": "Hi "},
            {
                "type": "number",
                "value": "n",
                "style": {
                    "kind": "skeleton",
                    "tokens": [{"stem": "percent", "options": []}],
                    "parsedOptions": {"style": "percent"}
                }
            }
        ])
    );
}

#[test]
fn skeleton_failures_expose_source() {
    let err = parse_message("{n, number, ::precision-integer bogus}").expect_err("invalid skeleton");
    assert_eq!(err.kind(), ErrorKind::InvalidNumberSkeleton);
    assert_eq!(err.kind_name(), "INVALID_NUMBER_SKELETON");
    assert!(matches!(err.cause(), Some(SkeletonError::Number(_))));
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.location().slice("{n, number, ::precision-integer bogus}").is_some());
}

#[test]
fn locations_point_into_the_source() {
    let input = "héllo {name}";
    let message = parse_message(input).expect("parse");
    let location = message.elements[1].location().expect("location");
    assert_eq!(location.slice(input), Some("{name}"));
    assert_eq!(location.start().column, 7);
    assert_eq!(location.start().offset, 7);
}

#[test]
fn error_kind_names_resolve() {
    assert_eq!(error_kind_name(0), Ok("OTHER"));
    assert_eq!(error_kind_name(27), Ok("UNCLOSED_TAG"));
    assert!(error_kind_name(24).is_err());
    assert!(matches!(parse_message("{a, plural, one {x}}"), Err(err) if err.kind() == ErrorKind::MissingOtherClause));
}

#[test]
fn simple_number_style_is_kept_verbatim() {
    let message = parse_message("{n, number, currency}").expect("parse");
    let Element::Number(number) = &message.elements[0] else {
        panic!("expected number");
    };
    assert_eq!(
        number.style,
        Some(NumberStyle::Simple {
            value: "currency".to_string()
        })
    );
}
