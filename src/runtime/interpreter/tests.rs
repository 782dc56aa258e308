use super::*;
use crate::config::EngineConfig;
use crate::presenter::Recorder;
use crate::types::case::{Case, Character, Evidence, Gender, Testimony, TestimonyPiece};
use crate::types::screen::Overlays;
use crate::types::state::{GameState, TestimonyMode, TestimonyProgress};

struct Fixture {
    case: Case,
    state: GameState,
    presenter: Recorder,
    config: EngineConfig,
}

impl Fixture {
    fn new() -> Self {
        let mut case = Case::new();
        case.characters.insert(
            "phoenix".to_string(),
            Character::named("Phoenix", Gender::Male),
        );
        case.characters.insert(
            "maya".to_string(),
            Character::named("Maya", Gender::Female),
        );
        for id in ["badge", "knife"] {
            case.evidence.insert(id.to_string(), Evidence::default());
        }
        for id in ["next_block", "after"] {
            case.buffers.insert(id.to_string(), "More.".to_string());
        }
        let mut testimony = Testimony {
            title: "Witness".to_string(),
            speaker: "maya".to_string(),
            ..Testimony::default()
        };
        testimony.pieces.push(TestimonyPiece::new("I was there."));
        case.testimonies.insert("t1".to_string(), testimony);

        Self {
            case,
            state: GameState::new(),
            presenter: Recorder::new(),
            config: EngineConfig::default(),
        }
    }

    fn ctx(&mut self) -> Context<'_> {
        Context {
            case: &mut self.case,
            state: &mut self.state,
            presenter: &mut self.presenter,
            config: &self.config,
        }
    }

    fn parser(&self) -> TextParser {
        TextParser::new(&self.config.text)
    }
}

fn parse(parser: &mut TextParser, fx: &mut Fixture, now: u64) -> ParseStatus {
    parser.parse(now, &mut fx.ctx())
}

/// Lex the next chunk at t=0 and reveal all of it
fn show_chunk(parser: &mut TextParser, fx: &mut Fixture) -> ParseStatus {
    parse(parser, fx, 0);
    parse(parser, fx, 1_000_000)
}

#[test]
fn triggers_fire_in_order_with_the_text() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "A{add_evidence:badge;}B{add_evidence:knife;}C");

    parse(&mut parser, &mut fx, 0);
    assert_eq!(parser.text(), "ABC");
    assert_eq!(parser.queued_triggers().count(), 2);
    assert!(fx.state.visible_evidence.is_empty());

    parse(&mut parser, &mut fx, 50);
    assert_eq!(parser.visible_text(), "A");
    assert_eq!(fx.state.visible_evidence, vec!["badge".to_string()]);

    parse(&mut parser, &mut fx, 100);
    assert_eq!(parser.visible_text(), "AB");
    assert_eq!(
        fx.state.visible_evidence,
        vec!["badge".to_string(), "knife".to_string()]
    );

    parse(&mut parser, &mut fx, 150);
    assert!(parser.is_revealed());
    assert_eq!(parser.queued_triggers().count(), 0);
}

#[test]
fn break_escape_splits_chunks() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "One\\bTwo");

    let status = show_chunk(&mut parser, &mut fx);
    assert_eq!(status, ParseStatus::Paused);
    assert_eq!(parser.text(), "One");
    assert!(!parser.is_exhausted());

    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "Two");
    assert!(parser.is_exhausted());
}

#[test]
fn colour_spans_cover_tagged_text() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "Say <orange>hi<orange> to \\gMaya");

    parse(&mut parser, &mut fx, 0);
    assert_eq!(parser.text(), "Say hi to Maya");
    assert_eq!(
        parser.spans(),
        &[
            ColorSpan {
                start: 4,
                end: 6,
                color: FontColor::Orange
            },
            ColorSpan {
                start: 10,
                end: 14,
                color: FontColor::Green
            },
        ]
    );
}

#[test]
fn open_colour_carries_into_the_next_chunk() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "A\\cBlue\\bMore\\wX");

    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "ABlue");
    assert_eq!(
        parser.spans(),
        &[ColorSpan {
            start: 1,
            end: 5,
            color: FontColor::Blue
        }]
    );

    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "MoreX");
    assert_eq!(
        parser.spans(),
        &[ColorSpan {
            start: 0,
            end: 4,
            color: FontColor::Blue
        }]
    );
}

#[test]
fn colour_survives_a_page_break() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    let text = format!("\\g{}", "word ".repeat(40));
    parser.set_block("b", text.trim_end());

    show_chunk(&mut parser, &mut fx);
    assert!(!parser.is_exhausted());
    let first = parser.text().chars().count();
    assert_eq!(
        parser.spans(),
        &[ColorSpan {
            start: 0,
            end: first,
            color: FontColor::Green
        }]
    );

    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    let spans = parser.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans[0].color, FontColor::Green);
}

#[test]
fn spans_stay_in_bounds_across_chunks() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    let text = format!(
        "<blue>one<blue> \\gtwo\\w three\\n\\ofour\\nfive\\csix\\bseven\\oeight {}\\wend",
        "long ".repeat(30)
    );
    parser.set_block("b", &text);

    let mut chunks = 0;
    loop {
        show_chunk(&mut parser, &mut fx);
        chunks += 1;
        let len = parser.text().chars().count();
        let mut last_end = 0;
        for span in parser.spans() {
            assert!(span.start <= span.end && span.end <= len, "{span:?} in {len}");
            assert!(span.start >= last_end, "overlap at {span:?}");
            last_end = span.end;
        }
        if parser.is_exhausted() || chunks > 20 {
            break;
        }
        parser.next_step(&mut fx.ctx());
    }
    assert!(chunks >= 3);
    assert!(parser.is_exhausted());
}

#[test]
fn goto_after_blue_text_loads_next_block() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "<blue>Hello<blue>{goto:next_block;} World\\b");

    parse(&mut parser, &mut fx, 0);
    assert_eq!(parser.text(), "Hello World");
    assert_eq!(
        parser.spans(),
        &[ColorSpan {
            start: 0,
            end: 5,
            color: FontColor::Blue
        }]
    );

    let status = parse(&mut parser, &mut fx, 1_000_000);
    assert_eq!(status, ParseStatus::Goto("next_block".to_string()));
}

#[test]
fn goto_waits_for_the_reveal() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{goto:after;}Some words");

    parse(&mut parser, &mut fx, 0);
    assert_eq!(parse(&mut parser, &mut fx, 50), ParseStatus::Paused);
    assert_eq!(parser.next_block(), Some("after"));
    assert_eq!(
        parse(&mut parser, &mut fx, 1_000_000),
        ParseStatus::Goto("after".to_string())
    );
}

#[test]
fn next_block_waits_for_the_player_unless_direct() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "Hi{goto:after;}");
    show_chunk(&mut parser, &mut fx);

    parser.set_block("after", "More.");
    assert!(parser.is_waiting());
    assert_eq!(parser.text(), "Hi");

    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "More.");

    parser.set_block("b", "Now{direct_goto:after;}");
    parser.begin();
    show_chunk(&mut parser, &mut fx);
    parser.set_block("after", "More.");
    assert!(!parser.is_waiting());
}

#[test]
fn finishing_clears_text_and_speaker() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    fx.state.display_character = Some("maya".to_string());
    parser.set_block("b", "{speaker:phoenix;}Objection!");
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.speaker(), Some("phoenix"));

    parser.next_step(&mut fx.ctx());

    assert!(!parser.is_active());
    assert_eq!(parser.text(), "");
    assert_eq!(parser.speaker(), None);
    assert_eq!(parser.block_id(), None);
    assert_eq!(fx.state.display_character, None);
    assert_eq!(
        fx.state.screen.overlays,
        Overlays::for_screen(Screen::Main)
    );
}

#[test]
fn finishing_returns_to_examine() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    fx.state.screen.enter_family(Screen::Examine);
    fx.state.screen.dialogue(false);
    parser.set_block("b", "A scratch.");
    show_chunk(&mut parser, &mut fx);

    parser.next_step(&mut fx.ctx());
    assert!(fx.state.screen.is(Screen::Examine));
}

#[test]
fn end_dialogue_finishes_immediately() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "Bye{end_dialogue:;}");

    let status = show_chunk(&mut parser, &mut fx);
    assert_eq!(status, ParseStatus::Finished);
    assert!(!parser.is_active());
}

#[test]
fn skipping_reveals_silently() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{speaker:phoenix;}Hold it!");
    parse(&mut parser, &mut fx, 0);

    parser.next_step(&mut fx.ctx());
    assert!(parser.is_revealed());
    assert!(fx.presenter.effects().is_empty());
}

#[test]
fn unskippable_text_ignores_next() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "\\dListen carefully.");
    parse(&mut parser, &mut fx, 0);
    assert!(!parser.is_skippable());

    parser.next_step(&mut fx.ctx());
    assert!(!parser.is_revealed());
    assert_eq!(parser.visible_text(), "");
}

#[test]
fn speaker_gender_picks_the_blip() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{speaker:maya;}Hi there");
    show_chunk(&mut parser, &mut fx);

    let effects = fx.presenter.effects();
    assert_eq!(effects.len(), "Hithere".len());
    assert!(effects.iter().all(|e| *e == "sfx_female_blip"));
}

#[test]
fn narration_has_no_blip_but_dates_type() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "Quiet");
    show_chunk(&mut parser, &mut fx);
    assert!(fx.presenter.effects().is_empty());

    parser.set_block("d", "<date>May 9<date>");
    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    assert_eq!(
        fx.presenter.effects(),
        vec!["sfx_typewriter"; "May9".len()]
    );
}

#[test]
fn speed_sentinels_change_pace() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "\\+2Fast");
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.speed(), 30);

    let mut parser = fx.parser();
    parser.set_block("b", "\\-9Slow");
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.speed(), 100);

    let mut parser = fx.parser();
    parser.set_block("b", "\\+3A\\=B");
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.speed(), 50);
}

#[test]
fn sentinels_take_no_time() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "A\\+B");
    parse(&mut parser, &mut fx, 0);

    // A at 50ms; the sentinel then makes B due 40ms later
    parse(&mut parser, &mut fx, 50);
    assert_eq!(parser.visible_text(), "A");
    parse(&mut parser, &mut fx, 90);
    assert_eq!(parser.visible_text(), "AB");
}

#[test]
fn shake_arms_the_effect() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "Boom\\*!");
    show_chunk(&mut parser, &mut fx);
    assert!(fx.state.effects.shake);
}

#[test]
fn cross_examination_only_runs_jumps() {
    let mut fx = Fixture::new();
    fx.state.testimony = Some(TestimonyProgress {
        testimony: "t1".to_string(),
        piece: 0,
        mode: TestimonyMode::CrossExamining,
    });
    let mut parser = fx.parser();
    parser.set_block(
        "#cross:t1:0",
        "{add_evidence:badge;}I was there.{goto:after;}",
    );

    show_chunk(&mut parser, &mut fx);
    assert!(fx.state.visible_evidence.is_empty());
    assert_eq!(parser.next_block(), Some("after"));
}

#[test]
fn timed_goto_counts_frames() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{timed_goto:after,2;}Wait");
    show_chunk(&mut parser, &mut fx);

    assert_eq!(parse(&mut parser, &mut fx, 2_000_000), ParseStatus::Paused);
    assert_eq!(parse(&mut parser, &mut fx, 2_000_000), ParseStatus::Paused);
    assert_eq!(
        parse(&mut parser, &mut fx, 2_000_000),
        ParseStatus::Goto("after".to_string())
    );

    parser.set_block("after", "More.");
    assert!(!parser.is_waiting());
}

#[test]
fn leaving_a_block_cancels_its_timed_goto() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{timed_goto:after,5;}{goto:next_block;}Hi");
    assert_eq!(
        show_chunk(&mut parser, &mut fx),
        ParseStatus::Goto("next_block".to_string())
    );

    parser.set_block("next_block", "More.");
    assert!(!parser.has_timed_goto());
    parser.next_step(&mut fx.ctx());
    for _ in 0..8 {
        let status = parse(&mut parser, &mut fx, 2_000_000);
        assert_eq!(status, ParseStatus::Paused);
    }
    assert_eq!(parser.block_id(), Some("next_block"));
    assert_eq!(parser.text(), "More.");
}

#[test]
fn long_text_breaks_into_pages() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    let text = "word ".repeat(40);
    parser.set_block("b", text.trim_end());
    let metrics = FixedMetrics::from_config(&fx.config.text);

    show_chunk(&mut parser, &mut fx);
    let first = parser.text();
    assert!(line_count(&first, fx.config.text.box_width, &metrics) <= 3);
    assert!(!parser.is_exhausted());

    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    assert!(parser.text().starts_with("word") || parser.text().starts_with(' '));
}

#[test]
fn line_break_past_the_last_line_starts_a_page() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "one\\ntwo\\nthree\\nfour");

    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "one\ntwo\nthree");

    parser.next_step(&mut fx.ctx());
    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "four");
}

#[test]
fn blank_chunks_continue_on_their_own() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{add_evidence:badge;}\\bNext");

    parse(&mut parser, &mut fx, 0);
    assert_eq!(parse(&mut parser, &mut fx, 10), ParseStatus::Paused);
    assert_eq!(fx.state.visible_evidence, vec!["badge".to_string()]);

    show_chunk(&mut parser, &mut fx);
    assert_eq!(parser.text(), "Next");
}

#[test]
fn failing_trigger_leaves_state_alone() {
    let mut fx = Fixture::new();
    let mut parser = fx.parser();
    parser.set_block("b", "{add_evidence:ghost;}{warp:x;}Still here");

    show_chunk(&mut parser, &mut fx);
    assert!(fx.state.visible_evidence.is_empty());
    assert_eq!(parser.text(), "Still here");
}
