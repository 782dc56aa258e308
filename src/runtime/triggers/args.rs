//! Argument parsing for trigger commands
//!
//! Commands are single strings. Most split on commas into a fixed number of
//! fields; text arguments must be wrapped in double quotes.

use crate::error::TriggerError;
use crate::types::case::TalkOption;

/// Exactly `N` comma separated, trimmed fields
pub fn fields<'a, const N: usize>(op: &str, command: &'a str) -> Result<[&'a str; N], TriggerError> {
    let parts: Vec<&str> = command.split(',').map(str::trim).collect();
    let found = parts.len();
    parts.try_into().map_err(|_| {
        TriggerError::malformed(op, command, format!("expected {N} arguments, found {found}"))
    })
}

/// A single non-empty argument
pub fn single<'a>(op: &str, command: &'a str) -> Result<&'a str, TriggerError> {
    let value = command.trim();
    if value.is_empty() {
        return Err(TriggerError::malformed(op, command, "missing argument"));
    }
    Ok(value)
}

/// `None` for the `none` keyword or an empty argument
pub fn optional(value: &str) -> Option<&str> {
    match value.trim() {
        "" | "none" | "null" => None,
        other => Some(other),
    }
}

/// Contents of a double-quoted literal
pub fn quoted(op: &str, command: &str, raw: &str) -> Result<String, TriggerError> {
    let raw = raw.trim();
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| TriggerError::malformed(op, command, "text must be wrapped in double quotes"))
}

/// Strip surrounding quotes if present
pub fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}

/// `id,"text"` where the text may itself contain commas
pub fn id_and_text<'a>(op: &str, command: &'a str) -> Result<(&'a str, String), TriggerError> {
    let Some((id, text)) = command.split_once(',') else {
        return Err(TriggerError::malformed(op, command, "expected id and text"));
    };
    Ok((id.trim(), quoted(op, command, text)?))
}

/// `character,label,block` where the label may contain commas
pub fn talk_option<'a>(op: &str, command: &'a str) -> Result<(&'a str, TalkOption), TriggerError> {
    let malformed = || TriggerError::malformed(op, command, "expected character,\"label\",block");
    let (character, rest) = command.split_once(',').ok_or_else(malformed)?;
    let (label, block) = rest.rsplit_once(',').ok_or_else(malformed)?;
    let label = unquote(label);
    let block = block.trim();
    if label.is_empty() || block.is_empty() {
        return Err(malformed());
    }
    Ok((character.trim(), TalkOption::new(label, block)))
}

/// `(label,block),(label,block),...`
pub fn answer_options(op: &str, command: &str) -> Result<Vec<TalkOption>, TriggerError> {
    let mut options = Vec::new();
    let mut rest = command.trim();

    while !rest.is_empty() {
        let Some(body) = rest.strip_prefix('(') else {
            return Err(TriggerError::malformed(
                op,
                command,
                format!("expected '(' at '{rest}'"),
            ));
        };
        let close = body
            .find(')')
            .ok_or_else(|| TriggerError::malformed(op, command, "unclosed '('"))?;

        let group = &body[..close];
        let (label, block) = group.rsplit_once(',').ok_or_else(|| {
            TriggerError::malformed(op, command, format!("option '{group}' has no target"))
        })?;
        let (label, block) = (unquote(label), block.trim());
        if label.is_empty() || block.is_empty() {
            return Err(TriggerError::malformed(
                op,
                command,
                format!("option '{group}' needs a label and a target"),
            ));
        }
        options.push(TalkOption::new(label, block));

        rest = body[close + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(TriggerError::malformed(op, command, "trailing ','"));
            }
        } else if !rest.is_empty() {
            return Err(TriggerError::malformed(
                op,
                command,
                format!("expected ',' before '{rest}'"),
            ));
        }
    }

    if options.is_empty() {
        return Err(TriggerError::malformed(op, command, "no answers given"));
    }
    Ok(options)
}

pub fn number<T: std::str::FromStr>(op: &str, command: &str, raw: &str) -> Result<T, TriggerError> {
    raw.trim()
        .parse()
        .map_err(|_| TriggerError::malformed(op, command, format!("'{raw}' is not a number")))
}
