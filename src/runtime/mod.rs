//! Runtime: the game object and everything it drives
//!
//! [`Game`] owns the case, the game state, the interpreter and the presenter.
//! The host calls [`Game::tick`] once per frame and feeds input through
//! [`Game::handle`]; nothing here blocks or sleeps.

use crate::config::EngineConfig;
use crate::presenter::Presenter;
use crate::types::case::{Case, TalkOption};
use crate::types::geometry::Point;
use crate::types::screen::{Overlays, Screen};
use crate::types::state::{
    EXAMINE_ORIGIN, GameState, PlayerRequest, PresentTarget, QueuedEffects, TestimonyMode,
    TestimonyProgress,
};
use interpreter::{ParseStatus, TextParser};
use testimony::InternalBlock;

pub mod debug;
pub mod input;
pub mod interpreter;
pub mod layout;
pub mod testimony;
pub mod triggers;


/// Everything a trigger may read or change
pub struct Context<'a> {
    pub case: &'a mut Case,
    pub state: &'a mut GameState,
    pub presenter: &'a mut dyn Presenter,
    pub config: &'a EngineConfig,
}

pub struct Game<P: Presenter> {
    case: Case,
    state: GameState,
    parser: TextParser,
    presenter: P,
    config: EngineConfig,
    /// Block whose text is on screen; a loaded block may still wait behind it
    shown_block: Option<String>,
}

impl<P: Presenter> Game<P> {
    pub fn new(case: Case, presenter: P, config: EngineConfig) -> Self {
        let parser = TextParser::new(&config.text);
        Self {
            case,
            state: GameState::new(),
            parser,
            presenter,
            config,
            shown_block: None,
        }
    }

    fn split(&mut self) -> (&mut TextParser, Context<'_>) {
        (
            &mut self.parser,
            Context {
                case: &mut self.case,
                state: &mut self.state,
                presenter: &mut self.presenter,
                config: &self.config,
            },
        )
    }

    /// Run the case's initial block
    pub fn start(&mut self) -> bool {
        let initial = self.case.initial_block.clone();
        log::info!("starting case '{}' at '{initial}'", self.case.overview.name);
        self.state.screen.enter_family(Screen::Main);
        self.run_block(&initial)
    }

    /// Advance one frame; `now` is a millisecond timestamp
    pub fn tick(&mut self, now: u64) -> ParseStatus {
        if let Some(sequence) = self.state.sequence {
            if !self.presenter.sequence_done(sequence) {
                if self.state.screen.overlays != Overlays::hidden() {
                    self.state.screen.show(Screen::Main, Overlays::hidden());
                }
                return ParseStatus::Paused;
            }
            log::debug!("{sequence:?} sequence done");
            self.state.sequence = None;
        }

        let (parser, mut ctx) = self.split();
        let status = parser.parse(now, &mut ctx);

        if let ParseStatus::Goto(id) = &status
            && !self.load_block(id)
        {
            let (parser, mut ctx) = self.split();
            parser.finish(&mut ctx);
        }

        self.sync_shown_block();
        self.apply_dialogue_layout();
        self.activate_request();
        status
    }

    /// Load a block and start it straight away, as player actions do
    pub fn run_block(&mut self, id: &str) -> bool {
        if !self.load_block(id) {
            return false;
        }
        self.parser.begin();
        self.sync_shown_block();
        self.state.screen.dialogue(testimony::is_cross(id));
        true
    }

    fn load_block(&mut self, id: &str) -> bool {
        let text = match self.case.block(id) {
            Some(text) => text.to_string(),
            None => match testimony::parse_id(id).and_then(|b| testimony::block_text(&self.case, &b)) {
                Some(text) => text,
                None => {
                    log::warn!("block '{id}' does not exist");
                    return false;
                }
            },
        };
        self.parser.set_block(id, &text);
        true
    }

    /// Follow the parser once a loaded block starts showing
    fn sync_shown_block(&mut self) {
        if self.parser.is_waiting() {
            return;
        }
        let current = self.parser.block_id().map(str::to_string);
        if current != self.shown_block {
            if let Some(id) = &current {
                self.track_testimony(id);
            }
            self.shown_block = current;
        }
    }

    /// Whether a cross-examination statement is on screen
    pub fn showing_statement(&self) -> bool {
        self.shown_block.as_deref().is_some_and(testimony::is_cross)
    }

    fn track_testimony(&mut self, id: &str) {
        let progress = |testimony: String, piece: usize, mode: TestimonyMode| TestimonyProgress {
            testimony,
            piece,
            mode,
        };
        match testimony::parse_id(id) {
            Some(InternalBlock::Title { testimony }) => {
                self.state.testimony = Some(progress(testimony, 0, TestimonyMode::Displaying));
            }
            Some(InternalBlock::Piece { testimony, index }) => {
                self.state.testimony = Some(progress(testimony, index, TestimonyMode::Displaying));
            }
            Some(InternalBlock::Cross { testimony, index }) => {
                self.state.testimony =
                    Some(progress(testimony, index, TestimonyMode::CrossExamining));
            }
            None => {
                if self
                    .state
                    .testimony
                    .as_ref()
                    .is_some_and(|p| p.mode == TestimonyMode::Displaying)
                {
                    self.state.testimony = None;
                }
            }
        }
    }

    fn apply_dialogue_layout(&mut self) {
        if !self.parser.is_active()
            || self.state.sequence.is_some()
            || self.state.active_request.is_some()
            || !self.state.screen.is(Screen::Main)
        {
            return;
        }
        let press = self.showing_statement();
        if self.state.screen.overlays != Overlays::dialogue(press) {
            self.state.screen.dialogue(press);
        }
    }

    /// Hand a queued request to the player once the text is on screen
    fn activate_request(&mut self) {
        if self.state.queued_request.is_none()
            || self.state.sequence.is_some()
            || (self.parser.is_active() && !self.parser.is_revealed())
        {
            return;
        }
        let Some(request) = self.state.queued_request.take() else {
            return;
        };
        log::debug!("player request {request:?}");

        match &request {
            PlayerRequest::Evidence { .. } => {
                self.state.present_target = Some(PresentTarget::Request);
                let overlays = Overlays {
                    text_box: true,
                    present_btn: true,
                    back_btn: false,
                    ..Overlays::for_screen(Screen::EvidencePage)
                };
                self.state.screen.show(Screen::EvidencePage, overlays);
            }
            PlayerRequest::Answer => {
                self.state.selected_talk_option = 0;
                let overlays = Overlays {
                    lower_bar: true,
                    ..Overlays::default()
                };
                self.state.screen.show(Screen::Talk, overlays);
            }
            PlayerRequest::ImageContradiction { image, .. } => {
                self.state.temp_image = Some(image.clone());
                self.state.examine = EXAMINE_ORIGIN;
                let overlays = Overlays {
                    lower_bar: true,
                    ..Overlays::default()
                };
                self.state.screen.show(Screen::Examine, overlays);
            }
        }
        self.state.active_request = Some(request);
    }

    /// The player pressed "next" on the dialogue
    pub fn advance(&mut self) {
        if self.parser.is_revealed() || self.parser.is_waiting() {
            let sound = self.config.sounds.next_part.clone();
            self.presenter.play_effect(&sound);
        }
        let (parser, mut ctx) = self.split();
        parser.next_step(&mut ctx);
        self.sync_shown_block();
    }

    /// Travel to `location` and run its one-shot block if it has one
    pub fn arrive_at(&mut self, location: &str) {
        let (_, mut ctx) = self.split();
        let block = triggers::arrive(&mut ctx, location);
        self.state.screen.enter_family(Screen::Main);
        if let Some(block) = block {
            self.run_block(&block);
        }
    }

    /// Travel to the `index`th location reachable from here
    pub fn move_to(&mut self, index: usize) {
        let Some(target) = self
            .current_location()
            .and_then(|l| l.move_locations.get(index))
            .cloned()
        else {
            return;
        };
        if self.case.location(&target).is_none() {
            log::warn!("cannot move to unknown location '{target}'");
            return;
        }
        self.state.selected_location = index;
        self.arrive_at(&target);
    }

    /// Press the current cross-examination statement
    pub fn press(&mut self) {
        if !self.showing_statement() {
            log::info!("nothing to press");
            return;
        }
        let block = self.state.testimony.as_ref().and_then(|p| {
            self.case
                .testimony(&p.testimony)?
                .pieces
                .get(p.piece)?
                .press_block
                .clone()
        });
        match block {
            Some(block) => {
                self.run_block(&block);
            }
            None => log::info!("statement cannot be pressed"),
        }
    }

    /// Present a Court Record item to whoever is waiting for one
    pub fn present(&mut self, item: &str) {
        let Some(target) = self.state.present_target.take() else {
            log::info!("nothing to present '{item}' to");
            return;
        };
        log::info!("presenting '{item}' to {target:?}");

        let block = match target {
            PresentTarget::Request => match self.state.active_request.take() {
                Some(PlayerRequest::Evidence {
                    item: wanted,
                    correct,
                    wrong,
                }) => Some(if wanted == item { correct } else { wrong }),
                other => {
                    self.state.active_request = other;
                    None
                }
            },
            PresentTarget::Statement => self.statement_reaction(item),
            PresentTarget::Character(id) => self
                .case
                .character(&id)
                .and_then(|c| c.reaction_to(item))
                .map(str::to_string),
        };

        match block {
            Some(block) => {
                self.run_block(&block);
            }
            None => {
                log::warn!("no reaction to '{item}'");
                self.return_to_family();
            }
        }
    }

    fn statement_reaction(&mut self, item: &str) -> Option<String> {
        let progress = self.state.testimony.clone()?;
        let piece = self
            .case
            .testimony(&progress.testimony)?
            .pieces
            .get(progress.piece)?;
        if piece.present_id.as_deref() == Some(item)
            && let Some(block) = &piece.present_block
        {
            return Some(block.clone());
        }

        let empty = self.state.lose_credibility(self.config.credibility_penalty);
        log::info!("wrong item, credibility at {}%", self.state.credibility);
        if empty {
            self.case.core_blocks.failure.clone()
        } else {
            self.case.core_blocks.bad_evidence.clone()
        }
    }

    /// Options shown on the Talk screen
    pub fn talk_options(&self) -> Vec<TalkOption> {
        if matches!(self.state.active_request, Some(PlayerRequest::Answer)) {
            return self.state.talk_options.clone();
        }
        self.location_character()
            .and_then(|id| self.case.character(id))
            .map(|c| c.talk_options.clone())
            .unwrap_or_default()
    }

    pub fn choose_talk_option(&mut self, index: usize) {
        let options = self.talk_options();
        let Some(option) = options.get(index) else {
            return;
        };
        self.state.selected_talk_option = index;
        if matches!(self.state.active_request, Some(PlayerRequest::Answer)) {
            self.state.active_request = None;
            self.state.talk_options.clear();
        }
        self.run_block(&option.block);
    }

    /// Examine whatever is under the cursor
    pub fn examine(&mut self) {
        let point = self.state.examine;

        if let Some(PlayerRequest::ImageContradiction {
            region,
            correct,
            wrong,
            ..
        }) = &self.state.active_request
        {
            let block = if region.contains(point.x, point.y) {
                correct.clone()
            } else {
                wrong.clone()
            };
            self.state.active_request = None;
            self.state.temp_image = None;
            self.run_block(&block);
            return;
        }

        let block = self.current_location().and_then(|l| {
            l.hotspots
                .iter()
                .find(|h| h.rect.contains(point.x, point.y))
                .map(|h| h.block.clone())
        });
        if let Some(block) = block {
            self.run_block(&block);
        }
    }

    /// Leave the Court Record or a sub-screen for the underlying family
    pub fn return_to_family(&mut self) {
        if !matches!(self.state.active_request, Some(PlayerRequest::Evidence { .. })) {
            self.state.present_target = None;
        }
        if self.parser.is_active() && self.state.active_request.is_none() {
            let press = self.showing_statement();
            self.state.screen.dialogue(press);
            return;
        }
        let family = self.state.screen.prev_screen;
        self.state.screen.enter_family(family);
    }

    pub fn current_location(&self) -> Option<&crate::types::case::Location> {
        self.state
            .current_location
            .as_deref()
            .and_then(|id| self.case.location(id))
    }

    /// Character standing at the current location
    pub fn location_character(&self) -> Option<&str> {
        self.current_location()
            .and_then(|l| l.character.as_deref())
            .filter(|id| self.case.character(id).is_some())
    }

    pub fn set_examine_cursor(&mut self, point: Point) {
        self.state.examine = point;
    }

    /// Hand armed one-shot effects to the presentation layer
    pub fn take_effects(&mut self) -> QueuedEffects {
        self.state.effects.take()
    }

    pub fn case(&self) -> &Case {
        &self.case
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn parser(&self) -> &TextParser {
        &self.parser
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
