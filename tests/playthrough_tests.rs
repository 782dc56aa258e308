//! Playthrough Tests - drive the sample case from the office to the verdict
//! through the public API, the way a host would

use casedeck::cli::play::settle;
use casedeck::types::directive::Directive;
use casedeck::types::geometry::Point;
use casedeck::types::state::{PresentTarget, TestimonyMode};
use casedeck::{EngineConfig, Game, InputEvent, Key, Recorder, Screen, load_case};

const SAMPLE: &str = include_str!("../cases/turnabout_sample.json");

struct Player {
    game: Game<Recorder>,
    now: u64,
}

impl Player {
    fn new() -> Self {
        let file = load_case(SAMPLE.as_bytes()).expect("sample case loads");
        let mut game = Game::new(file.case, Recorder::new(), EngineConfig::default());
        assert!(game.start());
        let mut player = Self { game, now: 0 };
        player.settle();
        player
    }

    fn settle(&mut self) {
        self.now = settle(&mut self.game, self.now);
    }

    fn key(&mut self, key: Key) {
        self.game.handle(InputEvent::KeyDown(key));
        self.settle();
    }

    fn next(&mut self) {
        self.key(Key::Confirm);
    }

    fn text(&self) -> String {
        self.game.parser().visible_text()
    }

    fn speaker(&self) -> Option<&str> {
        self.game.parser().speaker()
    }

    /// From the opening line to the first cross-examination statement
    fn reach_cross_examination() -> Self {
        let mut player = Self::new();
        player.next();
        player.talk_to_maya();
        player.next();
        assert_eq!(player.text(), "I saw everything!");
        player.next();
        assert_eq!(player.text(), "Witness's Account");
        player.next();
        assert_eq!(player.text(), "I was home at one.");
        player.next();
        assert_eq!(player.text(), "The clock showed one.");
        player.next();
        assert_eq!(player.text(), "You may begin your cross-examination.");
        player.next();
        assert_eq!(player.text(), "I was home at one.");
        player
    }

    fn talk_to_maya(&mut self) {
        self.key(Key::Down);
        self.key(Key::Confirm);
        assert!(self.game.state().screen.is(Screen::Talk));
        self.key(Key::Confirm);
        assert_eq!(self.text(), "Let's go to court!");
    }
}

#[test]
fn opening_sets_the_scene() {
    let player = Player::new();
    let state = player.game.state();

    assert_eq!(player.text(), "Another day at the office.");
    assert_eq!(player.speaker(), Some("phoenix"));
    assert_eq!(state.current_location.as_deref(), Some("office"));
    assert_eq!(state.visible_evidence, vec!["clock".to_string()]);
    assert!(
        player
            .game
            .presenter()
            .directives()
            .contains(&Directive::music("mus_office"))
    );
    assert!(state.screen.overlays.text_box);
    assert!(state.screen.overlays.next_btn);
}

#[test]
fn investigating_the_desk() {
    let mut player = Player::new();
    player.next();
    assert!(!player.game.parser().is_active());
    assert!(player.game.state().screen.overlays.controls);

    player.key(Key::Confirm);
    assert!(player.game.state().screen.is(Screen::Examine));
    player.game.set_examine_cursor(Point::new(110, 90));
    player.key(Key::Confirm);

    assert_eq!(player.text(), "My desk. There's my badge.");
    assert_eq!(
        player.game.state().visible_evidence,
        vec!["clock".to_string(), "badge".to_string()]
    );
    assert_eq!(player.game.state().effects.added_evidence.as_deref(), Some("badge"));

    player.next();
    assert!(player.game.state().screen.is(Screen::Examine));
    player.key(Key::Back);
    assert!(player.game.state().screen.is(Screen::Main));
}

#[test]
fn talking_leads_to_court() {
    let mut player = Player::new();
    player.next();
    player.talk_to_maya();
    assert!(player.game.parser().is_waiting());

    player.next();
    assert_eq!(player.text(), "I saw everything!");
    assert_eq!(player.speaker(), Some("sahwit"));
    assert_eq!(
        player.game.state().current_location.as_deref(),
        Some("witness_stand")
    );
}

#[test]
fn testimony_then_cross_examination() {
    let player = Player::reach_cross_examination();
    let state = player.game.state();
    let progress = state.testimony.as_ref().expect("cross-examining");

    assert_eq!(progress.mode, TestimonyMode::CrossExamining);
    assert_eq!(progress.piece, 0);
    assert!(state.screen.overlays.press_btn);
    assert!(player.game.showing_statement());
}

#[test]
fn pressing_then_presenting_the_contradiction() {
    let mut player = Player::reach_cross_examination();

    player.key(Key::Press);
    assert_eq!(player.text(), "Are you sure?");
    assert_eq!(player.speaker(), Some("phoenix"));

    player.next();
    assert_eq!(player.text(), "The clock showed one.");
    assert_eq!(player.game.state().testimony.as_ref().map(|p| p.piece), Some(1));

    player.key(Key::CourtRecord);
    assert!(player.game.state().screen.is(Screen::EvidencePage));
    assert_eq!(player.game.state().present_target, Some(PresentTarget::Statement));
    assert_eq!(player.game.state().selected_item(true), Some("clock"));

    player.key(Key::Present);
    assert_eq!(player.text(), "Objection!");
    assert!(player.game.take_effects().shake);

    player.next();
    assert_eq!(player.text(), "Not guilty!");
    assert_eq!(player.speaker(), Some("judge"));
    assert_eq!(player.game.state().credibility, 100);
}

#[test]
fn the_statements_loop_until_something_is_found() {
    let mut player = Player::reach_cross_examination();
    player.next();
    assert_eq!(player.text(), "The clock showed one.");
    player.next();
    assert_eq!(player.text(), "I was home at one.");
}

#[test]
fn wrong_evidence_costs_credibility() {
    let mut player = Player::reach_cross_examination();

    player.key(Key::CourtRecord);
    player.key(Key::Present);
    assert_eq!(player.text(), "That makes no sense.");
    assert_eq!(player.game.state().credibility, 80);

    player.next();
    assert_eq!(player.text(), "The clock showed one.");
}

#[test]
fn sample_case_lints_clean() {
    let file = load_case(SAMPLE.as_bytes()).unwrap();
    let result = casedeck::lint::lint(&file.case);
    assert!(result.is_clean(), "{:#?}", result.issues);
}
