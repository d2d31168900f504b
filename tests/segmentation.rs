mod common;

use common::{MonoEngine, font};
use line_highlight::{
    highlight::{LineLayout, segment_lines},
    text::TextLayoutConfig,
};

const SAMPLES: &[&str] = &[
    "a",
    "hello world",
    "The quick brown fox jumps over the lazy dog",
    "first paragraph\nsecond paragraph is longer\n\nfourth",
    "  leading and trailing  ",
    "windows\r\nline\r\nendings",
    "unterminated\u{2029}separator",
    "Ünïcödé wörds wrap tøø",
];

const WIDTHS: &[f32] = &[25.0, 60.0, 95.0, 1000.0];

fn engine_line_count(engine: &MonoEngine, text: &str, width: f32) -> usize {
    engine
        .visual_lines(text, &font(), width)
        .map(|ranges| ranges.len())
        .unwrap_or(0)
}

#[test]
fn unterminated_text_keeps_the_engine_lines() {
    let engine = MonoEngine::new();

    for text in SAMPLES {
        for &width in WIDTHS {
            let lines = segment_lines(&engine, text, Some(&font()), width);

            assert_eq!(lines.len(), engine_line_count(&engine, text, width), "{text:?} at {width}");
            let rebuilt: String = lines.iter().map(|line| &text[line.range.clone()]).collect();
            assert_eq!(rebuilt, *text);
            assert!(lines.iter().enumerate().all(|(i, line)| line.index == i));
        }
    }
}

#[test]
fn terminated_text_gets_exactly_one_extra_line() {
    let engine = MonoEngine::new();

    for text in SAMPLES {
        for terminator in ["\n", "\n\n", "\r\n", "\u{2028}"] {
            let text = format!("{text}{terminator}");
            for &width in WIDTHS {
                let lines = segment_lines(&engine, &text, Some(&font()), width);

                assert_eq!(
                    lines.len(),
                    engine_line_count(&engine, &text, width) + 1,
                    "{text:?} at {width}"
                );
                let last = lines.last().map(|line| line.text.as_str());
                assert_eq!(last, Some(""));
            }
        }
    }
}

#[test]
fn segmentation_is_restartable() {
    let engine = MonoEngine::new();
    let text = "same input\nsame output\n";

    let first = segment_lines(&engine, text, Some(&font()), 60.0);
    let second = segment_lines(&engine, text, Some(&font()), 60.0);

    assert_eq!(first, second);
}

#[test]
fn line_breaks_follow_the_engine_configuration() {
    let mut engine = MonoEngine::new();
    engine.config = TextLayoutConfig {
        linebreak_char: ['\n'].into_iter().collect(),
        ..TextLayoutConfig::default()
    };

    // U+2028 is an ordinary character for this engine, so no extra line.
    let lines = segment_lines(&engine, "a\u{2028}", Some(&font()), 1000.0);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "a\u{2028}");
}
