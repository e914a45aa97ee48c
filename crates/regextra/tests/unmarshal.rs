//! Record population through the derive macro.

use lazy_static::lazy_static;
use pretty_assertions::assert_eq;
use regextra::{
    ConversionReason, Error, FieldKind, Pattern, Record, SkipSentinel, Unmarshaler, unmarshal,
    unmarshal_all,
};

lazy_static! {
    static ref PERSON: Pattern = Pattern::new(r"(?P<name>\w+) is (?P<age>\d+)").unwrap();
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Person {
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Measurement {
    pub sensor: String,
    pub reading: f64,
    pub samples: u32,
    pub healthy: bool,
    pub offset: i16,
}

#[derive(Debug, Default, Record)]
struct Tagged {
    #[regex = "count"]
    pub value: String,
    pub count: String,
    #[regex = "missing"]
    pub name: String,
}

#[derive(Debug, Default, Record)]
struct WithPrivate {
    pub name: String,
    age: i64,
}

#[derive(Debug, Default, PartialEq)]
struct Address {
    street: String,
}

#[derive(Debug, Default, Record)]
struct Nested {
    pub name: String,
    pub address: Address,
    pub age: i64,
}

#[derive(Debug, Default, Record)]
struct Keywords {
    pub r#type: String,
    #[regex(skip)]
    pub name: String,
}

#[test]
fn test_unmarshal_person() {
    let mut person = Person::default();
    unmarshal(&PERSON, "Alice is 30", &mut person).unwrap();
    assert_eq!(
        person,
        Person {
            name: "Alice".to_string(),
            age: 30
        }
    );
}

#[test]
fn test_unmarshal_no_match_leaves_record() {
    let mut person = Person {
        name: "Before".to_string(),
        age: 7,
    };
    unmarshal(&PERSON, "nobody here", &mut person).unwrap();
    assert_eq!(person.name, "Before");
    assert_eq!(person.age, 7);
}

#[test]
fn test_unmarshal_case_insensitive_fields() {
    #[derive(Debug, Default, Record)]
    struct Shouting {
        pub name: String,
        pub age: u8,
    }

    let pattern = Pattern::new(r"(?P<NAME>\w+) is (?P<Age>\d+)").unwrap();
    let mut shouting = Shouting::default();
    unmarshal(&pattern, "Bob is 25", &mut shouting).unwrap();
    assert_eq!(shouting.name, "Bob");
    assert_eq!(shouting.age, 25);
}

#[test]
fn test_unmarshal_all_kinds() {
    let pattern = Pattern::new(
        r"(?P<sensor>\w+): (?P<reading>-?[\d.]+) over (?P<samples>\d+) samples, ok=(?P<healthy>\w+), offset (?P<offset>-?\d+)",
    )
    .unwrap();

    let mut measurement = Measurement::default();
    unmarshal(
        &pattern,
        "thermo: -3.75 over 12 samples, ok=true, offset -40",
        &mut measurement,
    )
    .unwrap();

    assert_eq!(
        measurement,
        Measurement {
            sensor: "thermo".to_string(),
            reading: -3.75,
            samples: 12,
            healthy: true,
            offset: -40,
        }
    );
}

#[test]
fn test_override_has_priority() {
    let pattern = Pattern::new(r"(?P<value>\w+) (?P<count>\d+) (?P<name>\w+)").unwrap();
    let mut tagged = Tagged::default();
    unmarshal(&pattern, "apples 12 basket", &mut tagged).unwrap();

    assert_eq!(tagged.value, "12");
    assert_eq!(tagged.count, "12");
    // The override names a group the pattern lacks; no fallback to `name`.
    assert_eq!(tagged.name, "");
}

#[test]
fn test_private_fields_are_skipped() {
    let mut record = WithPrivate::default();
    unmarshal(&PERSON, "Alice is 30", &mut record).unwrap();
    assert_eq!(record.name, "Alice");
    assert_eq!(record.age, 0);
    assert!(!WithPrivate::FIELDS[1].writable);
}

#[test]
fn test_unsupported_field_type() {
    let pattern = Pattern::new(r"(?P<name>\w+) at (?P<address>\w+) aged (?P<age>\d+)").unwrap();
    let mut nested = Nested::default();
    let err = unmarshal(&pattern, "Alice at home aged 30", &mut nested).unwrap_err();

    assert!(err.to_string().contains("unsupported field type"), "{err}");
    match err {
        Error::Conversion(err) => {
            assert_eq!(err.field, "address");
            assert_eq!(err.reason, ConversionReason::Unsupported("Address"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(nested.name, "Alice");
    assert_eq!(nested.address, Address::default());
    assert_eq!(nested.age, 0);
}

#[test]
fn test_conversion_error_names_field_and_value() {
    let pattern = Pattern::new(r"(?P<name>\w+) is (?P<age>\w+)").unwrap();
    let mut person = Person::default();
    let err = unmarshal(&pattern, "Alice is thirty", &mut person).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("age"), "{message}");
    assert!(message.contains("\"thirty\""), "{message}");
    assert_eq!(person.name, "Alice");
}

#[test]
fn test_out_of_range_for_field_width() {
    #[derive(Debug, Default, Record)]
    struct Tiny {
        pub n: i8,
    }

    let pattern = Pattern::new(r"(?P<n>-?\d+)").unwrap();
    let mut tiny = Tiny::default();
    let err = unmarshal(&pattern, "300", &mut tiny).unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion(ref e) if matches!(e.reason, ConversionReason::OutOfRange { bits: 8, .. })
    ));
}

#[test]
fn test_single_precision_field() {
    #[derive(Debug, Default, Record)]
    struct Gauge {
        pub level: f32,
    }

    let pattern = Pattern::new(r"level=(?P<level>\S+)").unwrap();

    let mut gauge = Gauge::default();
    unmarshal(&pattern, "level=0.5", &mut gauge).unwrap();
    assert_eq!(gauge.level, 0.5f32);
    assert_eq!(Gauge::FIELDS[0].kind, FieldKind::Float { bits: 32 });

    let mut gauge = Gauge::default();
    let err = unmarshal(&pattern, "level=1e40", &mut gauge).unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion(ref e) if matches!(e.reason, ConversionReason::OutOfRange { bits: 32, .. })
    ));
    assert_eq!(gauge.level, 0.0);

    let mut gauge = Gauge::default();
    let err = unmarshal(&pattern, "level=high", &mut gauge).unwrap_err();
    assert!(err.to_string().contains("cannot convert \"high\" to float"), "{err}");
}

#[test]
fn test_derived_descriptors() {
    assert_eq!(Person::FIELDS.len(), 2);
    assert_eq!(Person::FIELDS[0].name, "name");
    assert_eq!(Person::FIELDS[1].kind, FieldKind::Signed { bits: 64 });
    assert_eq!(Tagged::FIELDS[0].tag, Some("count"));
    assert_eq!(Keywords::FIELDS[0].name, "type");
    assert_eq!(Keywords::FIELDS[1].tag, Some("-"));
    assert_eq!(Nested::FIELDS[1].kind, FieldKind::Unsupported("Address"));
}

#[test]
fn test_raw_identifier_and_skip_sentinel() {
    let pattern = Pattern::new(r"(?P<type>\w+) (?P<name>\w+)").unwrap();

    let mut keywords = Keywords::default();
    unmarshal(&pattern, "fruit apple", &mut keywords).unwrap();
    assert_eq!(keywords.r#type, "fruit");
    assert_eq!(keywords.name, "apple");

    let mut keywords = Keywords::default();
    Unmarshaler::new()
        .with_skip_sentinel(SkipSentinel::SkipField)
        .unmarshal(&pattern, "fruit apple", &mut keywords)
        .unwrap();
    assert_eq!(keywords.r#type, "fruit");
    assert_eq!(keywords.name, "");
}

#[test]
fn test_unmarshal_all_in_order() {
    let mut people: Vec<Person> = Vec::new();
    unmarshal_all(&PERSON, "Alice is 30 and Bob is 25", &mut people).unwrap();
    assert_eq!(
        people,
        vec![
            Person {
                name: "Alice".to_string(),
                age: 30
            },
            Person {
                name: "Bob".to_string(),
                age: 25
            },
        ]
    );
}

#[test]
fn test_unmarshal_all_replaces_previous_contents() {
    let mut people = vec![Person::default(); 3];
    unmarshal_all(&PERSON, "Carol is 41", &mut people).unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Carol");
}

#[test]
fn test_unmarshal_all_no_match_empties() {
    let mut people = vec![Person::default()];
    unmarshal_all(&PERSON, "no people here", &mut people).unwrap();
    assert!(people.is_empty());
}

#[test]
fn test_unmarshal_all_error_keeps_previous_contents() {
    let pattern = Pattern::new(r"(?P<name>\w+) is (?P<age>\w+)").unwrap();
    let mut people = vec![Person::default()];
    let err = unmarshal_all(&pattern, "Alice is 30 and Bob is old", &mut people).unwrap_err();
    assert!(matches!(err, Error::Conversion(_)));
    assert_eq!(people, vec![Person::default()]);
}

#[test]
fn test_unmarshal_all_duplicate_names_last_wins_per_occurrence() {
    #[derive(Debug, Default, Record)]
    struct Word {
        pub word: String,
    }

    let pattern = Pattern::new(r"(?P<word>\w+)-(?P<word>\w+)").unwrap();
    let mut words: Vec<Word> = Vec::new();
    unmarshal_all(&pattern, "a-b c-d", &mut words).unwrap();
    let words: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["b", "d"]);
}

#[test]
fn test_round_trip_reproduces_matched_text() {
    let text = "Alice is 30";
    let mut person = Person::default();
    unmarshal(&PERSON, text, &mut person).unwrap();

    let groups = regextra::named_groups(&PERSON, text);
    assert_eq!(person.name, groups["name"]);
    assert_eq!(person.age.to_string(), groups["age"]);
}

#[test]
fn test_unmarshal_is_idempotent() {
    let mut first = Person::default();
    let mut second = Person::default();
    unmarshal(&PERSON, "Dave is 52", &mut first).unwrap();
    unmarshal(&PERSON, "Dave is 52", &mut second).unwrap();
    assert_eq!(first, second);
}
