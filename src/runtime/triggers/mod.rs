//! Trigger dispatcher
//!
//! Every trigger op maps to one handler. Handlers validate their arguments
//! and references before touching anything, so a failing trigger leaves the
//! case and game state exactly as they were.

use crate::error::TriggerError;
use crate::runtime::Context;
use crate::runtime::testimony;
use crate::types::case::{COURT_LOCATIONS, Case, Gender, is_court_alias};
use crate::types::geometry::Rect;
use crate::types::state::{
    CameraPan, PlayerRequest, ScreenTarget, Sequence, ShownEvidence, Side, TestimonyMode,
    TestimonyProgress,
};

pub mod args;


/// Every trigger op the dispatcher understands
pub const TRIGGERS: &[&str] = &[
    "goto",
    "direct_goto",
    "timed_goto",
    "end_dialogue",
    "speaker",
    "add_evidence",
    "add_evidence_animated",
    "add_evidence_silent",
    "add_profile",
    "show_evidence_left",
    "show_evidence_right",
    "hide_evidence",
    "set_location",
    "add_location",
    "set_location_trigger",
    "set_location_music",
    "put_character",
    "show_character",
    "set_animation",
    "play_music",
    "stop_music",
    "set_temp_image",
    "add_talk_option",
    "remove_talk_option",
    "clear_talk_options",
    "add_presentable",
    "remove_presentable",
    "clear_presentables",
    "set_bad_presentable_block",
    "change_character_gender",
    "change_character_name",
    "change_character_caption",
    "change_character_desc",
    "change_evidence_name",
    "change_evidence_caption",
    "change_evidence_desc",
    "fade_out",
    "flash",
    "special_effect",
    "move_court_camera",
    "display_testimony",
    "cross_examine",
    "resume_cross_examination",
    "show_testimony_piece",
    "request_evidence",
    "request_answer",
    "request_image_contradiction",
];

/// Triggers still executed while a cross-examination statement is shown
pub const CROSS_EXAMINATION_ALLOWED: &[&str] = &["goto", "direct_goto"];

pub fn is_known(op: &str) -> bool {
    TRIGGERS.contains(&op)
}

/// A jump that happens after a number of frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedGoto {
    pub target: String,
    pub frames: u32,
}

/// Interpreter state triggers are allowed to change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flow {
    /// Block to continue with once this one is exhausted
    pub next_block: Option<String>,
    /// Start the next block without waiting for the player
    pub direct: bool,
    pub timed: Option<TimedGoto>,
    pub speaker: Option<String>,
    /// Finish the dialogue as soon as possible
    pub end_requested: bool,
}

/// Execute one trigger
pub fn dispatch(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    log::debug!("trigger {op}:{command}");

    match op {
        "goto" => goto(ctx, flow, op, command, false),
        "direct_goto" => goto(ctx, flow, op, command, true),
        "timed_goto" => timed_goto(ctx, flow, op, command),
        "end_dialogue" => {
            flow.end_requested = true;
            Ok(())
        }
        "speaker" => speaker(ctx, flow, op, command),

        "add_evidence" | "add_evidence_animated" => add_evidence(ctx, op, command, true),
        "add_evidence_silent" => add_evidence(ctx, op, command, false),
        "add_profile" => add_profile(ctx, op, command),
        "show_evidence_left" => show_evidence(ctx, op, command, Side::Left),
        "show_evidence_right" => show_evidence(ctx, op, command, Side::Right),
        "hide_evidence" => {
            ctx.state.shown_evidence = None;
            Ok(())
        }

        "set_location" => set_location(ctx, flow, op, command),
        "add_location" => add_location(ctx, op, command),
        "set_location_trigger" => set_location_trigger(ctx, op, command),
        "set_location_music" => set_location_music(ctx, op, command),
        "put_character" => put_character(ctx, op, command),
        "show_character" => show_character(ctx, op, command),
        "set_animation" => set_animation(ctx, op, command),

        "play_music" => {
            let music = args::single(op, command)?;
            ctx.presenter.play_music(music);
            Ok(())
        }
        "stop_music" => {
            ctx.presenter.halt_music();
            Ok(())
        }
        "set_temp_image" => set_temp_image(ctx, op, command),

        "add_talk_option" => add_talk_option(ctx, op, command),
        "remove_talk_option" => remove_talk_option(ctx, op, command),
        "clear_talk_options" => {
            character_mut(ctx.case, op, args::single(op, command)?)?
                .talk_options
                .clear();
            Ok(())
        }
        "add_presentable" => add_presentable(ctx, op, command),
        "remove_presentable" => remove_presentable(ctx, op, command),
        "clear_presentables" => {
            character_mut(ctx.case, op, args::single(op, command)?)?
                .presentables
                .clear();
            Ok(())
        }
        "set_bad_presentable_block" => set_bad_presentable_block(ctx, op, command),
        "change_character_gender" => change_character_gender(ctx, op, command),
        "change_character_name" | "change_character_caption" | "change_character_desc" => {
            change_character_text(ctx, op, command)
        }
        "change_evidence_name" | "change_evidence_caption" | "change_evidence_desc" => {
            change_evidence_text(ctx, op, command)
        }

        "fade_out" => {
            let target = screen_target(op, command)?;
            ctx.state.effects.fade = Some(target);
            Ok(())
        }
        "flash" => {
            let target = if command.trim().is_empty() {
                ScreenTarget::Both
            } else {
                screen_target(op, command)?
            };
            ctx.state.effects.flash = Some(target);
            Ok(())
        }
        "special_effect" => special_effect(ctx, op, command),
        "move_court_camera" => move_court_camera(ctx, op, command),

        "display_testimony" => display_testimony(ctx, flow, op, command),
        "cross_examine" => cross_examine(ctx, flow, op, command),
        "resume_cross_examination" => resume_cross_examination(ctx, flow, op, command),
        "show_testimony_piece" => show_testimony_piece(ctx, op, command),

        "request_evidence" => request_evidence(ctx, op, command),
        "request_answer" => request_answer(ctx, op, command),
        "request_image_contradiction" => request_image_contradiction(ctx, op, command),

        _ => Err(TriggerError::unknown(op)),
    }
}

/// Whether a block id can be loaded
pub fn block_exists(case: &Case, id: &str) -> bool {
    case.block(id).is_some() || testimony::resolves(case, id)
}

fn require_block(case: &Case, op: &str, id: &str) -> Result<(), TriggerError> {
    if block_exists(case, id) {
        Ok(())
    } else {
        Err(TriggerError::unresolved(op, "block", id))
    }
}

fn require_character(case: &Case, op: &str, id: &str) -> Result<(), TriggerError> {
    case.character(id)
        .map(|_| ())
        .ok_or_else(|| TriggerError::unresolved(op, "character", id))
}

fn require_evidence(case: &Case, op: &str, id: &str) -> Result<(), TriggerError> {
    case.evidence(id)
        .map(|_| ())
        .ok_or_else(|| TriggerError::unresolved(op, "evidence", id))
}

fn require_location(case: &Case, op: &str, id: &str) -> Result<(), TriggerError> {
    case.location(id)
        .map(|_| ())
        .ok_or_else(|| TriggerError::unresolved(op, "location", id))
}

/// Items that can be presented: evidence or profiles
fn require_item(case: &Case, op: &str, id: &str) -> Result<(), TriggerError> {
    if case.evidence(id).is_some() || case.character(id).is_some() {
        Ok(())
    } else {
        Err(TriggerError::unresolved(op, "evidence or profile", id))
    }
}

fn character_mut<'c>(
    case: &'c mut Case,
    op: &str,
    id: &str,
) -> Result<&'c mut crate::types::case::Character, TriggerError> {
    case.character_mut(id)
        .ok_or_else(|| TriggerError::unresolved(op, "character", id))
}

fn screen_target(op: &str, command: &str) -> Result<ScreenTarget, TriggerError> {
    ScreenTarget::parse(command)
        .ok_or_else(|| TriggerError::malformed(op, command, "expected top, bottom or both"))
}

fn goto(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
    direct: bool,
) -> Result<(), TriggerError> {
    let target = args::single(op, command)?;
    require_block(ctx.case, op, target)?;
    flow.next_block = Some(target.to_string());
    flow.direct = direct;
    Ok(())
}

fn timed_goto(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let [target, frames] = args::fields::<2>(op, command)?;
    let frames = args::number(op, command, frames)?;
    require_block(ctx.case, op, target)?;
    flow.timed = Some(TimedGoto {
        target: target.to_string(),
        frames,
    });
    Ok(())
}

fn speaker(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    match args::optional(command) {
        None => flow.speaker = None,
        Some(id) => {
            require_character(ctx.case, op, id)?;
            flow.speaker = Some(id.to_string());
        }
    }
    Ok(())
}

fn add_evidence(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
    animated: bool,
) -> Result<(), TriggerError> {
    let id = args::single(op, command)?;
    require_evidence(ctx.case, op, id)?;
    if !ctx.state.add_evidence(id) {
        return Err(TriggerError::redundant(
            op,
            format!("evidence '{id}' is already in the Court Record"),
        ));
    }
    if animated {
        ctx.state.effects.added_evidence = Some(id.to_string());
    }
    Ok(())
}

fn add_profile(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let id = args::single(op, command)?;
    require_character(ctx.case, op, id)?;
    if !ctx.state.add_profile(id) {
        return Err(TriggerError::redundant(
            op,
            format!("profile '{id}' is already in the Court Record"),
        ));
    }
    Ok(())
}

fn show_evidence(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
    side: Side,
) -> Result<(), TriggerError> {
    let id = args::single(op, command)?;
    require_evidence(ctx.case, op, id)?;
    ctx.state.shown_evidence = Some(ShownEvidence {
        id: id.to_string(),
        side,
    });
    Ok(())
}

/// Make `location` current, switch its music and hand back its one-shot block
pub fn arrive(ctx: &mut Context<'_>, location: &str) -> Option<String> {
    let place = ctx.case.location_mut(location)?;
    let music = place.music.clone();
    let trigger_block = place.trigger_block.take();

    log::info!("arrived at {location}");
    ctx.state.current_location = Some(location.to_string());
    ctx.state.selected_location = 0;
    ctx.presenter.halt_music();
    if let Some(music) = music {
        ctx.presenter.play_music(&music);
    }
    trigger_block
}

fn set_location(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let id = args::single(op, command)?;
    require_location(ctx.case, op, id)?;
    if let Some(block) = arrive(ctx, id) {
        flow.next_block = Some(block);
    }
    Ok(())
}

fn add_location(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [target, location] = args::fields::<2>(op, command)?;
    require_location(ctx.case, op, target)?;
    let place = ctx
        .case
        .location_mut(location)
        .ok_or_else(|| TriggerError::unresolved(op, "location", location))?;
    if place.move_locations.iter().any(|l| l == target) {
        return Err(TriggerError::redundant(
            op,
            format!("'{target}' is already reachable from '{location}'"),
        ));
    }
    place.move_locations.push(target.to_string());
    Ok(())
}

fn set_location_trigger(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let [location, block] = args::fields::<2>(op, command)?;
    require_block(ctx.case, op, block)?;
    let place = ctx
        .case
        .location_mut(location)
        .ok_or_else(|| TriggerError::unresolved(op, "location", location))?;
    place.trigger_block = Some(block.to_string());
    Ok(())
}

fn set_location_music(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [music, location] = args::fields::<2>(op, command)?;
    let music = args::optional(music).map(str::to_string);

    if is_court_alias(location) {
        let stands = ctx.case.court_locations();
        if stands.is_empty() {
            return Err(TriggerError::unresolved(op, "location", location));
        }
        for stand in stands {
            if let Some(place) = ctx.case.location_mut(stand) {
                place.music = music.clone();
            }
        }
        return Ok(());
    }

    let place = ctx
        .case
        .location_mut(location)
        .ok_or_else(|| TriggerError::unresolved(op, "location", location))?;
    place.music = music;
    Ok(())
}

fn put_character(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [character, location] = args::fields::<2>(op, command)?;
    let character = args::optional(character);
    if let Some(id) = character {
        require_character(ctx.case, op, id)?;
    }
    let place = ctx
        .case
        .location_mut(location)
        .ok_or_else(|| TriggerError::unresolved(op, "location", location))?;
    place.character = character.map(str::to_string);
    Ok(())
}

fn show_character(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let character = args::optional(command);
    if let Some(id) = character {
        require_character(ctx.case, op, id)?;
    }
    ctx.state.display_character = character.map(str::to_string);
    Ok(())
}

fn set_animation(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [character, animation] = args::fields::<2>(op, command)?;
    if animation.is_empty() {
        return Err(TriggerError::malformed(op, command, "missing animation"));
    }
    character_mut(ctx.case, op, character)?.root_animation = Some(animation.to_string());
    Ok(())
}

fn set_temp_image(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let image = args::optional(command);
    if let Some(id) = image
        && ctx.case.image(id).is_none()
    {
        return Err(TriggerError::unresolved(op, "image", id));
    }
    ctx.state.temp_image = image.map(str::to_string);
    Ok(())
}

fn add_talk_option(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let (character, option) = args::talk_option(op, command)?;
    require_block(ctx.case, op, &option.block)?;
    let target = character_mut(ctx.case, op, character)?;
    if target.talk_options.iter().any(|o| o.label == option.label) {
        return Err(TriggerError::redundant(
            op,
            format!("'{character}' already has option '{}'", option.label),
        ));
    }
    target.talk_options.push(option);
    Ok(())
}

fn remove_talk_option(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let Some((character, label)) = command.split_once(',') else {
        return Err(TriggerError::malformed(op, command, "expected character,\"label\""));
    };
    let label = args::unquote(label);
    let character = character.trim();
    if !character_mut(ctx.case, op, character)?.remove_talk_option(label) {
        return Err(TriggerError::redundant(
            op,
            format!("'{character}' has no option '{label}'"),
        ));
    }
    Ok(())
}

fn add_presentable(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [character, item, block] = args::fields::<3>(op, command)?;
    require_item(ctx.case, op, item)?;
    require_block(ctx.case, op, block)?;
    character_mut(ctx.case, op, character)?.add_presentable(item, block);
    Ok(())
}

fn remove_presentable(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [character, item] = args::fields::<2>(op, command)?;
    if !character_mut(ctx.case, op, character)?.remove_presentable(item) {
        return Err(TriggerError::redundant(
            op,
            format!("'{character}' does not react to '{item}'"),
        ));
    }
    Ok(())
}

fn set_bad_presentable_block(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let [character, block] = args::fields::<2>(op, command)?;
    require_block(ctx.case, op, block)?;
    character_mut(ctx.case, op, character)?.bad_presentable_block = Some(block.to_string());
    Ok(())
}

fn change_character_gender(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let [character, gender] = args::fields::<2>(op, command)?;
    let gender = Gender::parse(gender)
        .ok_or_else(|| TriggerError::malformed(op, command, "expected male, female or unknown"))?;
    character_mut(ctx.case, op, character)?.gender = gender;
    Ok(())
}

fn change_character_text(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let (id, text) = args::id_and_text(op, command)?;
    let character = character_mut(ctx.case, op, id)?;
    match op {
        "change_character_name" => character.name = text,
        "change_character_caption" => character.caption = text,
        _ => character.description = text,
    }
    Ok(())
}

fn change_evidence_text(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let (id, text) = args::id_and_text(op, command)?;
    let evidence = ctx
        .case
        .evidence_mut(id)
        .ok_or_else(|| TriggerError::unresolved(op, "evidence", id))?;
    match op {
        "change_evidence_name" => evidence.name = text,
        "change_evidence_caption" => evidence.caption = text,
        _ => evidence.description = text,
    }
    Ok(())
}

fn special_effect(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let (kind, count) = match command.split_once(',') {
        Some((kind, count)) => (kind.trim(), Some(count)),
        None => (command.trim(), None),
    };
    match (kind, count) {
        ("gavel", count) => {
            let slams = match count {
                Some(raw) => args::number(op, command, raw)?,
                None => 1,
            };
            ctx.state.effects.gavel = Some(slams);
            Ok(())
        }
        ("zoom", None) => {
            ctx.state.effects.zoom = true;
            Ok(())
        }
        _ => Err(TriggerError::malformed(op, command, "expected gavel[,count] or zoom")),
    }
}

fn move_court_camera(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [from, to] = args::fields::<2>(op, command)?;
    for stand in [from, to] {
        if !COURT_LOCATIONS.contains(&stand) {
            return Err(TriggerError::unresolved(op, "court stand", stand));
        }
    }
    ctx.state.effects.court_camera = Some(CameraPan {
        from: from.to_string(),
        to: to.to_string(),
    });
    Ok(())
}

/// Arm a blocking title sequence unless its speaker cannot be drawn
fn start_sequence(ctx: &mut Context<'_>, sequence: Sequence, speaker: &str) {
    if ctx.case.character(speaker).is_none() {
        log::warn!("abandoning {sequence:?} sequence: speaker '{speaker}' does not exist");
        return;
    }
    ctx.state.sequence = Some(sequence);
    ctx.presenter.start_sequence(sequence);
}

fn display_testimony(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let id = args::single(op, command)?;
    let speaker = ctx
        .case
        .testimony(id)
        .map(|t| t.speaker.clone())
        .ok_or_else(|| TriggerError::unresolved(op, "testimony", id))?;

    start_sequence(ctx, Sequence::Testimony, &speaker);
    ctx.state.testimony = Some(TestimonyProgress {
        testimony: id.to_string(),
        piece: 0,
        mode: TestimonyMode::Displaying,
    });
    flow.next_block = Some(testimony::title_id(id));
    flow.direct = true;
    Ok(())
}

fn cross_examine(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let id = args::single(op, command)?;
    let testimony = ctx
        .case
        .testimony(id)
        .ok_or_else(|| TriggerError::unresolved(op, "testimony", id))?;
    let first = testimony
        .next_visible(0)
        .ok_or_else(|| TriggerError::malformed(op, command, "testimony has no visible statements"))?;
    let speaker = testimony.speaker.clone();

    start_sequence(ctx, Sequence::CrossExamination, &speaker);
    ctx.state.testimony = Some(TestimonyProgress {
        testimony: id.to_string(),
        piece: first,
        mode: TestimonyMode::CrossExamining,
    });
    flow.next_block = Some(testimony::cross_id(id, first));
    flow.direct = true;
    Ok(())
}

fn resume_cross_examination(
    ctx: &mut Context<'_>,
    flow: &mut Flow,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let current = ctx.state.testimony.as_ref();
    let id = match args::optional(command) {
        Some(id) => id.to_string(),
        None => current
            .map(|p| p.testimony.clone())
            .ok_or_else(|| TriggerError::malformed(op, command, "no testimony to resume"))?,
    };
    // Resuming a different testimony starts it from the top
    let piece = current
        .filter(|p| p.testimony == id)
        .map(|p| p.piece);

    let testimony = ctx
        .case
        .testimony(&id)
        .ok_or_else(|| TriggerError::unresolved(op, "testimony", id.as_str()))?;
    let target = match piece {
        Some(piece) => testimony::next_cross_block(&id, testimony, piece),
        None => testimony.next_visible(0).map(|first| testimony::cross_id(&id, first)),
    }
    .ok_or_else(|| TriggerError::malformed(op, command, "testimony has no visible statements"))?;

    ctx.state.testimony = Some(TestimonyProgress {
        testimony: id,
        piece: piece.unwrap_or(0),
        mode: TestimonyMode::CrossExamining,
    });
    flow.next_block = Some(target);
    flow.direct = true;
    Ok(())
}

fn show_testimony_piece(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [id, index] = args::fields::<2>(op, command)?;
    let index: usize = args::number(op, command, index)?;
    let testimony = ctx
        .case
        .testimony_mut(id)
        .ok_or_else(|| TriggerError::unresolved(op, "testimony", id))?;
    let piece = testimony
        .pieces
        .get_mut(index)
        .ok_or_else(|| TriggerError::unresolved(op, "testimony piece", format!("{id}:{index}")))?;
    if !piece.hidden {
        return Err(TriggerError::redundant(
            op,
            format!("statement {index} of '{id}' is already visible"),
        ));
    }
    piece.hidden = false;
    Ok(())
}

fn request_evidence(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let [item, correct, wrong] = args::fields::<3>(op, command)?;
    require_item(ctx.case, op, item)?;
    require_block(ctx.case, op, correct)?;
    require_block(ctx.case, op, wrong)?;
    ctx.state.queued_request = Some(PlayerRequest::Evidence {
        item: item.to_string(),
        correct: correct.to_string(),
        wrong: wrong.to_string(),
    });
    Ok(())
}

fn request_answer(ctx: &mut Context<'_>, op: &str, command: &str) -> Result<(), TriggerError> {
    let options = args::answer_options(op, command)?;
    for option in &options {
        require_block(ctx.case, op, &option.block)?;
    }
    ctx.state.talk_options.extend(options);
    ctx.state.queued_request = Some(PlayerRequest::Answer);
    Ok(())
}

fn request_image_contradiction(
    ctx: &mut Context<'_>,
    op: &str,
    command: &str,
) -> Result<(), TriggerError> {
    let [image, x, y, w, h, correct, wrong] = args::fields::<7>(op, command)?;
    let region = Rect::new(
        args::number(op, command, x)?,
        args::number(op, command, y)?,
        args::number(op, command, w)?,
        args::number(op, command, h)?,
    );
    if region.w < 0 || region.h < 0 {
        return Err(TriggerError::malformed(op, command, "negative region size"));
    }
    if ctx.case.image(image).is_none() {
        return Err(TriggerError::unresolved(op, "image", image));
    }
    require_block(ctx.case, op, correct)?;
    require_block(ctx.case, op, wrong)?;
    ctx.state.queued_request = Some(PlayerRequest::ImageContradiction {
        image: image.to_string(),
        region,
        correct: correct.to_string(),
        wrong: wrong.to_string(),
    });
    Ok(())
}
