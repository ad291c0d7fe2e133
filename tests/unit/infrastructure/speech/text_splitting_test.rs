use tolk::infrastructure::speech::{MAX_PIECE_CHARS, split_text, voice_language};

use crate::helpers::code;

#[test]
fn given_short_text_when_splitting_then_returns_single_piece() {
    assert_eq!(split_text("Hello world.", MAX_PIECE_CHARS), vec!["Hello world."]);
}

#[test]
fn given_blank_text_when_splitting_then_returns_nothing() {
    assert!(split_text("  \n ", MAX_PIECE_CHARS).is_empty());
}

#[test]
fn given_long_sentence_when_splitting_then_breaks_on_word_boundaries() {
    let text = "one two three four five six";

    let pieces = split_text(text, 10);

    assert!(pieces.iter().all(|p| p.chars().count() <= 10));
    assert_eq!(pieces.join(" "), text);
}

#[test]
fn given_cjk_text_without_spaces_when_splitting_then_breaks_on_punctuation_or_hard_limit() {
    let text = "你好世界。今天天气很好，我们去公园散步吧";

    let pieces = split_text(text, 8);

    assert!(pieces.iter().all(|p| p.chars().count() <= 8));
    assert_eq!(pieces.concat(), text);
    assert_eq!(pieces[0], "你好世界。");
}

#[test]
fn given_run_longer_than_limit_when_splitting_then_hard_splits() {
    let text = "a".repeat(250);

    let pieces = split_text(&text, MAX_PIECE_CHARS);

    assert_eq!(pieces.len(), 3);
    assert_eq!(pieces[2].len(), 50);
}

#[test]
fn given_chinese_without_region_when_choosing_voice_then_defaults_to_mainland() {
    assert_eq!(voice_language(&code("zh")), "zh-CN");
    assert_eq!(voice_language(&code("zh-TW")), "zh-TW");
}

#[test]
fn given_other_language_with_region_when_choosing_voice_then_uses_primary_subtag() {
    assert_eq!(voice_language(&code("en-GB")), "en");
    assert_eq!(voice_language(&code("fr")), "fr");
}
