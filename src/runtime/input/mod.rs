//! Input router
//!
//! Maps key presses and clicks on the lower screen to game actions. What an
//! event does depends on the active screen family and its overlays; input is
//! ignored while a blocking sequence plays.

use super::Game;
use crate::presenter::Presenter;
use crate::types::event::{InputEvent, Key};
use crate::types::geometry::{Point, Rect};
use crate::types::screen::{Overlays, Screen};
use crate::types::state::{EXAMINE_ORIGIN, PAGE_SIZE, PlayerRequest, PresentTarget};


const TOP_RIGHT_BTN: Rect = Rect::new(176, 197, 80, 33);
const TOP_RIGHT_BTN_EXAMINE: Rect = Rect::new(176, 197, 79, 21);
const BACK_BTN: Rect = Rect::new(0, 359, 79, 30);
const BACK_BTN_EXAMINE: Rect = Rect::new(0, 369, 79, 21);
/// Doubles as the present button on Court Record pages
const EXAMINE_BTN: Rect = Rect::new(177, 369, 79, 21);
const PRESS_BTN: Rect = Rect::new(0, 197, 79, 33);
const NEXT_BTN: Rect = Rect::new(16, 242, 223, 111);

const CONTROLS_Y: i32 = 251;
const CONTROL_BTNS: [Rect; 4] = [
    Rect::new(8, CONTROLS_Y, 110, 26),
    Rect::new(134, CONTROLS_Y, 110, 26),
    Rect::new(8, CONTROLS_Y + 62, 110, 26),
    Rect::new(134, CONTROLS_Y + 62, 110, 26),
];
const CONTROL_EXAMINE: usize = 0;
const CONTROL_MOVE: usize = 1;
const CONTROL_TALK: usize = 2;
const CONTROL_PRESENT: usize = 3;

const MOVE_ROW: Rect = Rect::new(86, 237, 147, 17);
const TALK_ROW: Rect = Rect::new(5, 236, 200, 20);
const ROW_STEP: i32 = 25;

const PAGE_LEFT: Rect = Rect::new(1, 253, 16, 95);
const PAGE_RIGHT: Rect = Rect::new(239, 253, 16, 95);
const INFO_LEFT: Rect = Rect::new(0, 237, 16, 63);
const INFO_RIGHT: Rect = Rect::new(240, 237, 16, 63);
const SLOT_SIZE: i32 = 40;
const SLOTS_X: i32 = 36;
const SLOT_STEP: i32 = 48;
const SLOT_ROWS_Y: [i32; 2] = [259, 305];

/// Top edge of the lower screen
const LOWER_SCREEN_Y: i32 = 197;
/// Band of the lower screen showing the examined background
const EXAMINE_AREA: (i32, i32) = (219, 369);
const EXAMINE_MAX: Point = Point::new(256, 192);

fn slot_rect(slot: usize) -> Rect {
    let slot = slot as i32;
    Rect::new(
        SLOTS_X + SLOT_STEP * (slot % 4),
        SLOT_ROWS_Y[(slot / 4) as usize],
        SLOT_SIZE,
        SLOT_SIZE,
    )
}

fn row_hit(row: Rect, count: usize, x: i32, y: i32) -> Option<usize> {
    (0..count).find(|&i| row.offset_y(ROW_STEP * i as i32).contains(x, y))
}

fn wrap(index: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        0
    } else if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

impl<P: Presenter> Game<P> {
    /// Route one input event
    pub fn handle(&mut self, event: InputEvent) {
        if self.state.sequence.is_some() {
            log::trace!("ignoring {event:?} during a sequence");
            return;
        }
        match event {
            InputEvent::KeyDown(key) => self.on_key(key),
            InputEvent::MouseDown { x, y } => self.on_click(x, y),
        }
    }

    fn on_key(&mut self, key: Key) {
        let screen = self.state.screen.screen;
        let overlays = self.state.screen.overlays;

        match key {
            Key::CourtRecord if overlays.court_rec_btn => return self.open_court_record(),
            Key::CourtRecord if overlays.evidence_btn || overlays.profiles_btn => {
                return self.switch_record();
            }
            Key::Back if overlays.back_btn => return self.back(),
            Key::Press if overlays.press_btn => return self.press(),
            Key::Present if overlays.present_btn => return self.present_selected(),
            _ => {}
        }

        match screen {
            Screen::Main if overlays.text_box => {
                if key == Key::Confirm && overlays.next_btn {
                    self.advance();
                }
            }
            Screen::Main if overlays.controls => self.control_key(key),
            Screen::Main => {}
            Screen::Examine => self.examine_key(key),
            Screen::Move => {
                let count = self
                    .current_location()
                    .map_or(0, |l| l.move_locations.len());
                let selected = self.state.selected_location;
                match key {
                    Key::Up | Key::Down => {
                        self.state.selected_location = wrap(selected, count, key == Key::Down);
                    }
                    Key::Confirm => self.move_to(selected),
                    _ => {}
                }
            }
            Screen::Talk => {
                let count = self.talk_options().len();
                let selected = self.state.selected_talk_option;
                match key {
                    Key::Up | Key::Down => {
                        self.state.selected_talk_option = wrap(selected, count, key == Key::Down);
                    }
                    Key::Confirm => self.choose_talk_option(selected),
                    _ => {}
                }
            }
            Screen::EvidencePage | Screen::ProfilesPage => {
                let evidence = screen.is_evidence();
                match key {
                    Key::Left | Key::Right => {
                        self.state.step_selection(evidence, key == Key::Right);
                    }
                    Key::Up => self.state.prev_page(evidence),
                    Key::Down => self.state.next_page(evidence),
                    Key::Confirm => self.open_info(),
                    _ => {}
                }
            }
            Screen::EvidenceInfo | Screen::ProfileInfo => match key {
                Key::Left | Key::Right => {
                    self.state.step_item(screen.is_evidence(), key == Key::Right);
                }
                Key::Confirm if overlays.present_btn => self.present_selected(),
                _ => {}
            },
        }
    }

    fn on_click(&mut self, x: i32, y: i32) {
        let screen = self.state.screen.screen;
        let overlays = self.state.screen.overlays;
        let examining = screen == Screen::Examine;

        let top_right = if examining {
            TOP_RIGHT_BTN_EXAMINE
        } else {
            TOP_RIGHT_BTN
        };
        if top_right.contains(x, y) {
            if overlays.court_rec_btn {
                return self.open_court_record();
            }
            if overlays.evidence_btn || overlays.profiles_btn {
                return self.switch_record();
            }
        }

        let back = if examining { BACK_BTN_EXAMINE } else { BACK_BTN };
        if overlays.back_btn && back.contains(x, y) {
            return self.back();
        }
        if overlays.press_btn && PRESS_BTN.contains(x, y) {
            return self.press();
        }
        if overlays.present_btn && screen.is_court_record() && EXAMINE_BTN.contains(x, y) {
            return self.present_selected();
        }

        match screen {
            Screen::Main if overlays.text_box => {
                if overlays.next_btn && NEXT_BTN.contains(x, y) {
                    self.advance();
                }
            }
            Screen::Main if overlays.controls => {
                let hit = CONTROL_BTNS
                    .iter()
                    .position(|r| r.contains(x, y))
                    .filter(|&i| i < self.control_count());
                if let Some(control) = hit {
                    self.state.selected_control = control;
                    self.activate_control(control);
                }
            }
            Screen::Main => {}
            Screen::Examine => {
                if EXAMINE_BTN.contains(x, y) {
                    self.examine();
                } else if (EXAMINE_AREA.0..=EXAMINE_AREA.1).contains(&y) {
                    self.set_examine_cursor(Point::new(x, y - LOWER_SCREEN_Y));
                }
            }
            Screen::Move => {
                let count = self
                    .current_location()
                    .map_or(0, |l| l.move_locations.len());
                if let Some(row) = row_hit(MOVE_ROW, count, x, y) {
                    self.move_to(row);
                }
            }
            Screen::Talk => {
                let count = self.talk_options().len();
                if let Some(row) = row_hit(TALK_ROW, count, x, y) {
                    self.choose_talk_option(row);
                }
            }
            Screen::EvidencePage | Screen::ProfilesPage => {
                let evidence = screen.is_evidence();
                if PAGE_LEFT.contains(x, y) {
                    self.state.prev_page(evidence);
                } else if PAGE_RIGHT.contains(x, y) {
                    self.state.next_page(evidence);
                } else if let Some(slot) = (0..PAGE_SIZE).find(|&s| slot_rect(s).contains(x, y)) {
                    let current = if evidence {
                        self.state.selected_evidence
                    } else {
                        self.state.selected_profile
                    };
                    if self.state.select_slot(evidence, slot) && current == slot {
                        self.open_info();
                    }
                }
            }
            Screen::EvidenceInfo | Screen::ProfileInfo => {
                let evidence = screen.is_evidence();
                if INFO_LEFT.contains(x, y) {
                    self.state.step_item(evidence, false);
                } else if INFO_RIGHT.contains(x, y) {
                    self.state.step_item(evidence, true);
                }
            }
        }
    }

    /// Controls offered on the main screen: talking and presenting need someone to talk to
    fn control_count(&self) -> usize {
        if self.location_character().is_some() {
            4
        } else {
            2
        }
    }

    fn control_key(&mut self, key: Key) {
        let count = self.control_count();
        if self.state.selected_control >= count {
            self.state.selected_control = 0;
        }
        let selected = self.state.selected_control;
        match key {
            Key::Left | Key::Right => self.state.selected_control = selected ^ 1,
            Key::Up | Key::Down if count == 4 => self.state.selected_control = selected ^ 2,
            Key::Confirm => self.activate_control(selected),
            _ => {}
        }
    }

    fn activate_control(&mut self, control: usize) {
        match control {
            CONTROL_EXAMINE => {
                self.state.examine = EXAMINE_ORIGIN;
                self.state.screen.enter_family(Screen::Examine);
            }
            CONTROL_MOVE => {
                self.state.selected_location = 0;
                self.state.screen.enter_family(Screen::Move);
            }
            CONTROL_TALK if self.location_character().is_some() => {
                self.state.selected_talk_option = 0;
                self.state.screen.enter_family(Screen::Talk);
            }
            CONTROL_PRESENT => {
                let Some(character) = self.location_character().map(str::to_string) else {
                    return;
                };
                self.state.present_target = Some(PresentTarget::Character(character));
                let overlays = Overlays {
                    present_btn: true,
                    ..Overlays::for_screen(Screen::EvidencePage)
                };
                self.state.screen.show(Screen::EvidencePage, overlays);
            }
            _ => {}
        }
    }

    fn examine_key(&mut self, key: Key) {
        let step = self.config.examine_step;
        let Point { x, y } = self.state.examine;
        let (x, y) = match key {
            Key::Left => (x - step, y),
            Key::Right => (x + step, y),
            Key::Up => (x, y - step),
            Key::Down => (x, y + step),
            Key::Confirm => return self.examine(),
            _ => return,
        };
        self.set_examine_cursor(Point::new(
            x.clamp(0, EXAMINE_MAX.x),
            y.clamp(0, EXAMINE_MAX.y),
        ));
    }

    /// Open the evidence page over whatever is showing
    fn open_court_record(&mut self) {
        let overlays = self.state.screen.overlays;
        let mut record = Overlays {
            text_box: overlays.text_box,
            ..Overlays::for_screen(Screen::EvidencePage)
        };
        if self.parser.is_active() && self.showing_statement() {
            self.state.present_target = Some(PresentTarget::Statement);
            record.present_btn = true;
        }
        self.state.screen.show(Screen::EvidencePage, record);
    }

    fn switch_record(&mut self) {
        let overlays = self.state.screen.overlays;
        let target = match self.state.screen.screen {
            Screen::EvidencePage => Screen::ProfilesPage,
            Screen::ProfilesPage => Screen::EvidencePage,
            Screen::EvidenceInfo => Screen::ProfileInfo,
            Screen::ProfileInfo => Screen::EvidenceInfo,
            _ => return,
        };
        let switched = Overlays {
            text_box: overlays.text_box,
            present_btn: overlays.present_btn,
            back_btn: overlays.back_btn,
            ..Overlays::for_screen(target)
        };
        self.state.screen.show(target, switched);
    }

    fn open_info(&mut self) {
        let screen = self.state.screen.screen;
        if self.state.selected_item(screen.is_evidence()).is_none() {
            return;
        }
        let info = if screen.is_evidence() {
            Screen::EvidenceInfo
        } else {
            Screen::ProfileInfo
        };
        let overlays = self.state.screen.overlays;
        let shown = Overlays {
            text_box: overlays.text_box,
            present_btn: overlays.present_btn,
            ..Overlays::for_screen(info)
        };
        self.state.screen.show(info, shown);
    }

    fn back(&mut self) {
        let overlays = self.state.screen.overlays;
        match self.state.screen.screen {
            Screen::EvidencePage | Screen::ProfilesPage => self.return_to_family(),
            screen @ (Screen::EvidenceInfo | Screen::ProfileInfo) => {
                let page = if screen.is_evidence() {
                    Screen::EvidencePage
                } else {
                    Screen::ProfilesPage
                };
                let requested = matches!(
                    self.state.active_request,
                    Some(PlayerRequest::Evidence { .. })
                );
                let shown = Overlays {
                    text_box: overlays.text_box,
                    present_btn: overlays.present_btn,
                    back_btn: !requested,
                    ..Overlays::for_screen(page)
                };
                self.state.screen.show(page, shown);
            }
            Screen::Examine | Screen::Move | Screen::Talk => {
                self.state.screen.enter_family(Screen::Main);
            }
            Screen::Main => {}
        }
    }

    fn present_selected(&mut self) {
        let evidence = self.state.screen.screen.is_evidence();
        let Some(item) = self.state.selected_item(evidence).map(str::to_string) else {
            log::info!("nothing selected to present");
            return;
        };
        self.present(&item);
    }
}
