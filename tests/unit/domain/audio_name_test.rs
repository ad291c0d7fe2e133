use tolk::domain::{AudioFormat, AudioName, AudioNameError};

use crate::helpers::code;

#[test]
fn given_same_text_and_language_when_deriving_then_names_match() {
    let a = AudioName::derive("你好世界", &code("zh"), AudioFormat::Mp3);
    let b = AudioName::derive("你好世界", &code("zh"), AudioFormat::Mp3);

    assert_eq!(a, b);
}

#[test]
fn given_same_text_in_different_languages_when_deriving_then_names_differ() {
    let zh = AudioName::derive("你好", &code("zh"), AudioFormat::Mp3);
    let ja = AudioName::derive("你好", &code("ja"), AudioFormat::Mp3);

    assert_ne!(zh, ja);
}

#[test]
fn given_different_text_when_deriving_then_names_differ() {
    let a = AudioName::derive("bonjour", &code("fr"), AudioFormat::Mp3);
    let b = AudioName::derive("bonsoir", &code("fr"), AudioFormat::Mp3);

    assert_ne!(a, b);
}

#[test]
fn given_language_and_text_boundary_shift_when_deriving_then_names_differ() {
    // "en" + "glish" must not collide with "eng" + "lish".
    let a = AudioName::derive("glish", &code("en"), AudioFormat::Mp3);
    let b = AudioName::derive("lish", &code("eng"), AudioFormat::Mp3);

    assert_ne!(a, b);
}

#[test]
fn given_derived_name_when_inspected_then_is_hex_digest_with_extension() {
    let name = AudioName::derive("hello", &code("en"), AudioFormat::Wav);
    let (digest, extension) = name.as_str().split_once('.').unwrap();

    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(extension, "wav");
    assert_eq!(name.format(), AudioFormat::Wav);
}

#[test]
fn given_derived_name_when_parsed_then_equals_original() {
    let name = AudioName::derive("hello", &code("en"), AudioFormat::Mp3);

    assert_eq!(AudioName::parse(name.as_str()).unwrap(), name);
}

#[test]
fn given_path_traversal_when_parsing_then_rejects() {
    assert!(matches!(
        AudioName::parse("../../etc/passwd.mp3"),
        Err(AudioNameError::Malformed(_))
    ));
}

#[test]
fn given_uppercase_digest_when_parsing_then_rejects() {
    let raw = format!("{}.mp3", "A".repeat(64));

    assert!(matches!(AudioName::parse(&raw), Err(AudioNameError::Malformed(_))));
}

#[test]
fn given_unknown_extension_when_parsing_then_reports_format() {
    let raw = format!("{}.ogg", "a".repeat(64));

    assert_eq!(
        AudioName::parse(&raw),
        Err(AudioNameError::UnknownFormat("ogg".to_string()))
    );
}

#[test]
fn given_formats_when_queried_then_report_content_types() {
    assert_eq!(AudioFormat::Mp3.content_type(), "audio/mpeg");
    assert_eq!(AudioFormat::Wav.content_type(), "audio/wav");
    assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_extension("flac"), None);
}
