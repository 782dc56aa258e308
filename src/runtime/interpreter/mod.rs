//! Script interpreter
//!
//! A block is tokenized once, then reduced chunk by chunk into a styled
//! dialogue and a queue of deferred triggers. A chunk ends at `\b`, at a page
//! break, or at the end of the block. Each chunk is then revealed one
//! character at a time; triggers run when the reveal reaches their sentinel,
//! so they fire in textual order interleaved with the text.

use crate::config::TextConfig;
use crate::parser::{FontColor, Token, tokenize};
use crate::runtime::Context;
use crate::runtime::layout::{FixedMetrics, TextMetrics, line_count};
use crate::runtime::testimony;
use crate::runtime::triggers::{self, CROSS_EXAMINATION_ALLOWED, Flow};
use crate::types::case::Gender;
use crate::types::screen::Screen;
use std::collections::VecDeque;

#[cfg(test)]
mod tests;

/// Upper bound on speed sentinels emitted for one `\+N` or `\-N`
const MAX_SPEED_REPEAT: u32 = 100;

/// Text style selected by tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    #[default]
    Plain,
    Date,
    TestimonyTitle,
}

/// One element of a lexed chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Char { ch: char, kind: TextKind },
    LineBreak,
    /// Runs the next queued trigger
    Trigger,
    SpeedUp,
    SpeedDown,
    SpeedReset,
    Shake,
}

impl Glyph {
    /// Character this glyph contributes to the dialogue text
    pub fn printable(&self) -> Option<char> {
        match self {
            Glyph::Char { ch, .. } => Some(*ch),
            Glyph::LineBreak => Some('\n'),
            _ => None,
        }
    }
}

/// A coloured range of the dialogue text, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpan {
    pub start: usize,
    pub end: usize,
    pub color: FontColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedTrigger {
    /// Index into the dialogue text where the trigger fires
    pub position: usize,
    pub op: String,
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No block is running
    Done,
    /// A block is set and waits for the player to continue
    Waiting,
    /// The next chunk is lexed on the next call to `parse`
    Lexing,
    Revealing,
}

/// Result of one `parse` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStatus {
    /// Nothing is running
    Idle,
    /// Revealing text or waiting for the player
    Paused,
    /// Load this block next
    Goto(String),
    /// The dialogue ended
    Finished,
}

#[derive(Debug)]
pub struct TextParser {
    config: TextConfig,
    metrics: Box<dyn TextMetrics>,

    block_id: Option<String>,
    tokens: Vec<Token>,
    cursor: usize,

    glyphs: Vec<Glyph>,
    spans: Vec<ColorSpan>,
    printed: usize,
    color: FontColor,
    span_start: Option<usize>,
    tag_open: bool,
    kind: TextKind,
    triggers: VecDeque<QueuedTrigger>,

    revealed: usize,
    last_tick: u64,
    speed: u32,
    skippable: bool,

    phase: Phase,
    flow: Flow,
}

impl TextParser {
    pub fn new(config: &TextConfig) -> Self {
        Self::with_metrics(config, Box::new(FixedMetrics::from_config(config)))
    }

    pub fn with_metrics(config: &TextConfig, metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            config: config.clone(),
            metrics,
            block_id: None,
            tokens: Vec::new(),
            cursor: 0,
            glyphs: Vec::new(),
            spans: Vec::new(),
            printed: 0,
            color: FontColor::White,
            span_start: None,
            tag_open: false,
            kind: TextKind::Plain,
            triggers: VecDeque::new(),
            revealed: 0,
            last_tick: 0,
            speed: config.default_speed_ms,
            skippable: true,
            phase: Phase::Done,
            flow: Flow::default(),
        }
    }

    /// Load a block
    ///
    /// The current dialogue stays on screen until the player continues,
    /// unless a direct goto is armed or there is nothing on screen to read.
    pub fn set_block(&mut self, id: &str, text: &str) {
        log::debug!("set block '{id}'");
        self.block_id = Some(id.to_string());
        self.tokens = tokenize(text);
        self.cursor = 0;
        self.triggers.clear();
        self.color = FontColor::White;
        self.span_start = None;
        self.tag_open = false;
        self.kind = TextKind::Plain;
        self.speed = self.config.default_speed_ms;
        self.skippable = true;
        self.flow.next_block = None;
        self.flow.timed = None;
        self.flow.end_requested = false;

        self.phase = if self.flow.direct || self.printed == 0 {
            self.flow.direct = false;
            Phase::Lexing
        } else {
            Phase::Waiting
        };
    }

    /// Drop the block and everything queued; the speaker survives
    pub fn reset(&mut self) {
        self.block_id = None;
        self.tokens.clear();
        self.cursor = 0;
        self.clear_chunk();
        self.triggers.clear();
        self.color = FontColor::White;
        self.span_start = None;
        self.tag_open = false;
        self.kind = TextKind::Plain;
        self.speed = self.config.default_speed_ms;
        self.skippable = true;
        self.phase = Phase::Done;
        let speaker = self.flow.speaker.take();
        self.flow = Flow {
            speaker,
            ..Flow::default()
        };
    }

    /// Start lexing a waiting block right away
    pub fn begin(&mut self) {
        if self.phase == Phase::Waiting {
            self.phase = Phase::Lexing;
        }
    }

    /// Advance lexing or the reveal; called once per frame
    pub fn parse(&mut self, now: u64, ctx: &mut Context<'_>) -> ParseStatus {
        if self.phase == Phase::Done {
            return ParseStatus::Idle;
        }

        if let Some(timed) = self.flow.timed.as_mut() {
            if timed.frames == 0 {
                let target = timed.target.clone();
                self.flow.timed = None;
                self.flow.next_block = None;
                self.flow.direct = true;
                log::debug!("timed goto to '{target}'");
                return ParseStatus::Goto(target);
            }
            timed.frames -= 1;
        }

        match self.phase {
            Phase::Done => ParseStatus::Idle,
            Phase::Waiting => ParseStatus::Paused,
            Phase::Lexing => {
                self.lex(ctx);
                self.phase = Phase::Revealing;
                self.last_tick = now;
                if self.glyphs.is_empty() {
                    return self.settle(ctx);
                }
                ParseStatus::Paused
            }
            Phase::Revealing => {
                self.reveal(now, ctx, false);
                self.settle(ctx)
            }
        }
    }

    /// What to do once the reveal has progressed
    fn settle(&mut self, ctx: &mut Context<'_>) -> ParseStatus {
        if self.flow.end_requested {
            self.finish(ctx);
            return ParseStatus::Finished;
        }
        if !self.is_revealed() {
            return ParseStatus::Paused;
        }
        if !self.is_exhausted() {
            if self.printed == 0 {
                self.phase = Phase::Lexing;
            }
            return ParseStatus::Paused;
        }
        if let Some(next) = self.flow.next_block.take() {
            return ParseStatus::Goto(next);
        }
        if self.printed == 0 && self.flow.timed.is_none() {
            self.finish(ctx);
            return ParseStatus::Finished;
        }
        ParseStatus::Paused
    }

    /// The player asked to continue
    pub fn next_step(&mut self, ctx: &mut Context<'_>) {
        match self.phase {
            Phase::Done | Phase::Lexing => {}
            Phase::Waiting => self.phase = Phase::Lexing,
            Phase::Revealing => {
                if !self.is_revealed() {
                    if self.skippable {
                        self.reveal(u64::MAX, ctx, true);
                    }
                } else if !self.is_exhausted() {
                    self.phase = Phase::Lexing;
                } else if self.flow.next_block.is_none() && self.flow.timed.is_none() {
                    self.finish(ctx);
                }
            }
        }
    }

    /// End the dialogue and return to the screen the player came from
    pub fn finish(&mut self, ctx: &mut Context<'_>) {
        log::debug!("dialogue finished");
        let back_to = match ctx.state.screen.prev_screen {
            Screen::Examine => Screen::Examine,
            _ => Screen::Main,
        };
        ctx.state.screen.enter_family(back_to);
        ctx.state.display_character = None;
        self.reset();
        self.flow.speaker = None;
    }

    fn clear_chunk(&mut self) {
        self.glyphs.clear();
        self.spans.clear();
        self.printed = 0;
        self.revealed = 0;
    }

    fn lex(&mut self, ctx: &mut Context<'_>) {
        self.clear_chunk();
        if self.color != FontColor::White {
            self.span_start = Some(0);
        }

        while let Some(token) = self.tokens.get(self.cursor).cloned() {
            match token {
                Token::Char(ch) => {
                    if self.overflows(ch) {
                        break;
                    }
                    self.push_char(ch);
                }
                Token::UnknownEscape(ch) => {
                    log::warn!("unknown escape '\\{ch}' in block {:?}", self.block_id);
                    if self.overflows(ch) {
                        break;
                    }
                    self.push_char(ch);
                }
                Token::Tag(name) => self.toggle_tag(&name),
                Token::Trigger { op, command } => {
                    if op == "speaker" {
                        self.run_trigger(ctx, &op, &command);
                    } else {
                        self.glyphs.push(Glyph::Trigger);
                        self.triggers.push_back(QueuedTrigger {
                            position: self.printed,
                            op,
                            command,
                        });
                    }
                }
                Token::Malformed { text, reason } => {
                    log::error!("malformed markup {text:?} in block {:?}: {reason}", self.block_id);
                }
                Token::Color(color) => self.set_color(color),
                Token::Break => {
                    self.cursor += 1;
                    break;
                }
                Token::NoSkip => self.skippable = false,
                Token::SpeedUp(n) => self.push_repeated(Glyph::SpeedUp, n),
                Token::SpeedDown(n) => self.push_repeated(Glyph::SpeedDown, n),
                Token::SpeedReset => self.glyphs.push(Glyph::SpeedReset),
                Token::Shake => self.glyphs.push(Glyph::Shake),
                Token::LineBreak => {
                    if self.lines_used() >= self.config.max_lines {
                        self.cursor += 1;
                        break;
                    }
                    self.glyphs.push(Glyph::LineBreak);
                    self.printed += 1;
                }
            }
            self.cursor += 1;
        }

        self.close_span();
    }

    fn push_char(&mut self, ch: char) {
        self.glyphs.push(Glyph::Char {
            ch,
            kind: self.kind,
        });
        self.printed += 1;
    }

    fn push_repeated(&mut self, glyph: Glyph, count: u32) {
        for _ in 0..count.min(MAX_SPEED_REPEAT) {
            self.glyphs.push(glyph);
        }
    }

    fn lines_used(&self) -> usize {
        line_count(&self.text(), self.config.box_width, self.metrics.as_ref())
    }

    /// Whether appending `ch` would spill past the last line
    fn overflows(&self, ch: char) -> bool {
        let has_chars = self.glyphs.iter().any(|g| matches!(g, Glyph::Char { .. }));
        if !has_chars {
            return false;
        }
        let mut text = self.text();
        text.push(ch);
        line_count(&text, self.config.box_width, self.metrics.as_ref()) > self.config.max_lines
    }

    fn toggle_tag(&mut self, name: &str) {
        if self.tag_open {
            self.tag_open = false;
            self.kind = TextKind::Plain;
            self.set_color(FontColor::White);
            return;
        }

        self.tag_open = true;
        if let Some(color) = FontColor::from_tag(name) {
            self.set_color(color);
            return;
        }
        match name {
            "date" => self.kind = TextKind::Date,
            "testimony_title" => self.kind = TextKind::TestimonyTitle,
            _ => log::warn!("unknown tag <{name}> in block {:?}", self.block_id),
        }
    }

    fn set_color(&mut self, color: FontColor) {
        if color == self.color {
            return;
        }
        self.close_span();
        self.color = color;
        if color != FontColor::White {
            self.span_start = Some(self.printed);
        }
    }

    fn close_span(&mut self) {
        if let Some(start) = self.span_start.take()
            && start < self.printed
        {
            self.spans.push(ColorSpan {
                start,
                end: self.printed,
                color: self.color,
            });
        }
    }

    fn run_trigger(&mut self, ctx: &mut Context<'_>, op: &str, command: &str) {
        if let Err(err) = triggers::dispatch(ctx, &mut self.flow, op, command) {
            err.report();
        }
    }

    fn char_speed(&self, kind: TextKind) -> u32 {
        match kind {
            TextKind::Plain => self.speed,
            TextKind::Date => self.config.date_speed_ms,
            TextKind::TestimonyTitle => self.config.title_speed_ms,
        }
    }

    /// Reveal every character due by `now`; sentinels cost no time
    fn reveal(&mut self, now: u64, ctx: &mut Context<'_>, silent: bool) {
        while let Some(&glyph) = self.glyphs.get(self.revealed) {
            match glyph {
                Glyph::Char { ch, kind } => {
                    let speed = u64::from(self.char_speed(kind));
                    if !silent && now.saturating_sub(self.last_tick) < speed {
                        break;
                    }
                    self.last_tick = self.last_tick.saturating_add(speed);
                    self.revealed += 1;
                    if !silent && ch != ' ' {
                        self.type_sound(ctx, kind);
                    }
                }
                Glyph::LineBreak => self.revealed += 1,
                Glyph::Trigger => {
                    self.revealed += 1;
                    self.fire_next_trigger(ctx);
                }
                Glyph::SpeedUp => {
                    self.revealed += 1;
                    self.speed = self.speed.saturating_sub(self.config.speed_step_ms);
                }
                Glyph::SpeedDown => {
                    self.revealed += 1;
                    self.speed = self
                        .speed
                        .saturating_add(self.config.speed_step_ms)
                        .min(self.config.max_speed_ms);
                }
                Glyph::SpeedReset => {
                    self.revealed += 1;
                    self.speed = self.config.default_speed_ms;
                }
                Glyph::Shake => {
                    self.revealed += 1;
                    ctx.state.effects.shake = true;
                }
            }
        }
    }

    fn fire_next_trigger(&mut self, ctx: &mut Context<'_>) {
        let Some(trigger) = self.triggers.pop_front() else {
            log::error!("trigger sentinel without a queued trigger");
            return;
        };

        if self.in_cross_examination(ctx) && !CROSS_EXAMINATION_ALLOWED.contains(&trigger.op.as_str()) {
            log::debug!(
                "skipping {}:{} during cross-examination",
                trigger.op,
                trigger.command
            );
            return;
        }
        self.run_trigger(ctx, &trigger.op, &trigger.command);
    }

    fn in_cross_examination(&self, ctx: &Context<'_>) -> bool {
        self.block_id.as_deref().is_some_and(testimony::is_cross) && ctx.state.is_cross_examining()
    }

    fn type_sound(&self, ctx: &mut Context<'_>, kind: TextKind) {
        let config = ctx.config;
        let sounds = &config.sounds;
        let voice = match kind {
            TextKind::Date | TextKind::TestimonyTitle => Some(&sounds.typewriter),
            TextKind::Plain => self.flow.speaker.as_deref().map(|id| {
                match ctx.case.character(id).map(|c| c.gender) {
                    Some(Gender::Male) => &sounds.male_voice,
                    Some(Gender::Female) => &sounds.female_voice,
                    _ => &sounds.neutral_voice,
                }
            }),
        };
        if let Some(voice) = voice {
            ctx.presenter.play_effect(voice);
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Done
    }

    /// Whether the current chunk is fully on screen
    pub fn is_revealed(&self) -> bool {
        self.phase == Phase::Revealing && self.revealed >= self.glyphs.len()
    }

    /// Whether every token of the block has been lexed
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Whether a block waits for the player before it starts
    pub fn is_waiting(&self) -> bool {
        self.phase == Phase::Waiting
    }

    /// Whether a timed jump is counting down
    pub fn has_timed_goto(&self) -> bool {
        self.flow.timed.is_some()
    }

    pub fn block_id(&self) -> Option<&str> {
        self.block_id.as_deref()
    }

    pub fn speaker(&self) -> Option<&str> {
        self.flow.speaker.as_deref()
    }

    pub fn is_skippable(&self) -> bool {
        self.skippable
    }

    /// Milliseconds per plain character
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn next_block(&self) -> Option<&str> {
        self.flow.next_block.as_deref()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Full text of the current chunk, `'\n'` for line breaks
    pub fn text(&self) -> String {
        self.glyphs.iter().filter_map(Glyph::printable).collect()
    }

    /// The part of the chunk revealed so far
    pub fn visible_text(&self) -> String {
        self.glyphs[..self.revealed.min(self.glyphs.len())]
            .iter()
            .filter_map(Glyph::printable)
            .collect()
    }

    pub fn spans(&self) -> &[ColorSpan] {
        &self.spans
    }

    /// Triggers waiting for their sentinel
    pub fn queued_triggers(&self) -> impl Iterator<Item = &QueuedTrigger> {
        self.triggers.iter()
    }
}
