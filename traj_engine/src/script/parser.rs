//! Script parser
//!
//! The parser is lenient: a script can never fail to parse, lines the
//! parser doesn't understand are dropped rather than aborting the whole
//! script. This keeps live editing painless, a half-typed line simply
//! doesn't move the robot yet. Rejections are surfaced per line through
//! [`ParseReport::warnings`] so a frontend can mark them up.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;
use thiserror::Error;

// Internal
use super::{Command, MotionKind, KEYWORD_STRAIGHT, KEYWORD_TURN};
use crate::params::Params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The outcome of parsing a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    /// The commands from the well-formed lines, in script order
    pub commands: Vec<Command>,

    /// One entry per line that was dropped or only partially understood
    pub warnings: Vec<LineWarning>,
}

/// A note about a script line the parser couldn't fully use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineWarning {
    /// Zero-based index of the line within the input text
    pub line_index: usize,

    /// Why the line was flagged
    pub reason: WarnReason,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a script line gets flagged.
///
/// Every variant except [`WarnReason::ExtraTokens`] means the line was
/// dropped.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum WarnReason {
    #[error("Unknown keyword {0:?}")]
    UnknownKeyword(String),

    #[error("Keyword without a magnitude")]
    MissingMagnitude,

    #[error("Magnitude {0:?} is not a number")]
    InvalidMagnitude(String),

    #[error("Speed {0:?} is not a number")]
    InvalidSpeed(String),

    #[error("Number {0:?} is not finite")]
    NonFiniteNumber(String),

    #[error("Trailing tokens ignored")]
    ExtraTokens,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse a script into commands, dropping malformed lines.
///
/// Shorthand for [`parse_report`] with the warnings thrown away, for
/// callers that only want the commands.
pub fn parse(text: &str) -> Vec<Command> {
    parse_report(text).commands
}

/// Parse a script into commands plus a warning per flagged line, using
/// the default parameters.
///
/// Shorthand for [`parse_report_with_params`] for callers without a
/// tuned [`Params`] in hand.
pub fn parse_report(text: &str) -> ParseReport {
    parse_report_with_params(text, &Params::default())
}

/// Parse a script into commands plus a warning per flagged line.
///
/// Each line holds `<keyword> <magnitude> [speed]`, whitespace separated,
/// with keywords matched case-insensitively. A line which omits the speed
/// token gets the per-kind default speed from `params`, so typed lines
/// and editor-appended commands agree on what "unspecified" means. Blank
/// lines are separators. Malformed lines never fail the parse, they are
/// dropped, logged at debug level and surfaced in the report's warnings.
pub fn parse_report_with_params(text: &str, params: &Params) -> ParseReport {
    let mut commands = Vec::new();
    let mut warnings = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.is_empty() {
            continue;
        }

        match parse_tokens(&tokens, params) {
            Ok(command) => {
                if tokens.len() > 3 {
                    debug!(
                        "Script line {}: {}",
                        line_index,
                        WarnReason::ExtraTokens
                    );
                    warnings.push(LineWarning {
                        line_index,
                        reason: WarnReason::ExtraTokens,
                    });
                }

                commands.push(command);
            }
            Err(reason) => {
                debug!("Script line {} dropped: {}", line_index, reason);
                warnings.push(LineWarning { line_index, reason });
            }
        }
    }

    ParseReport { commands, warnings }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse the tokens of a single non-blank line.
fn parse_tokens(
    tokens: &[&str],
    params: &Params,
) -> Result<Command, WarnReason> {
    let keyword = tokens[0];

    let kind = if keyword.eq_ignore_ascii_case(KEYWORD_STRAIGHT) {
        MotionKind::Straight
    } else if keyword.eq_ignore_ascii_case(KEYWORD_TURN) {
        MotionKind::Turn
    } else {
        return Err(WarnReason::UnknownKeyword(keyword.to_string()));
    };

    let magnitude = match tokens.get(1) {
        Some(token) => parse_number(token, WarnReason::InvalidMagnitude)?,
        None => return Err(WarnReason::MissingMagnitude),
    };

    let speed = match tokens.get(2) {
        Some(token) => parse_number(token, WarnReason::InvalidSpeed)?,
        None => match kind {
            MotionKind::Straight => params.default_straight_speed_cms,
            MotionKind::Turn => params.default_turn_speed_degs,
        },
    };

    Ok(Command {
        kind,
        magnitude,
        speed,
    })
}

/// Parse a numeric token, rejecting non-finite values.
fn parse_number(
    token: &str,
    invalid: fn(String) -> WarnReason,
) -> Result<f64, WarnReason> {
    let value: f64 = token.parse().map_err(|_| invalid(token.to_string()))?;

    // f64 parsing accepts the "inf" and "NaN" spellings, neither makes a
    // usable command
    if !value.is_finite() {
        return Err(WarnReason::NonFiniteNumber(token.to_string()));
    }

    Ok(value)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::script::{DEFAULT_STRAIGHT_SPEED_CMS, DEFAULT_TURN_SPEED_DEGS};

    #[test]
    fn parses_full_lines() {
        let cmds = parse("reto 100 50\ngiro -45 90");

        assert_eq!(
            cmds,
            vec![Command::straight(100.0, 50.0), Command::turn(-45.0, 90.0)]
        );
    }

    #[test]
    fn omitted_speed_uses_default() {
        let cmds = parse("reto 10\ngiro 90");

        assert_eq!(cmds[0].speed, DEFAULT_STRAIGHT_SPEED_CMS);
        assert_eq!(cmds[1].speed, DEFAULT_TURN_SPEED_DEGS);
    }

    #[test]
    fn omitted_speed_defaults_come_from_params() {
        let params = Params {
            default_straight_speed_cms: 5.0,
            default_turn_speed_degs: 10.0,
            ..Params::default()
        };

        let report = parse_report_with_params("reto 100\ngiro 90", &params);

        assert_eq!(report.commands[0].speed, 5.0);
        assert_eq!(report.commands[1].speed, 10.0);
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let cmds = parse("RETO 10\nGiro 5 20");

        assert_eq!(cmds[0].kind, MotionKind::Straight);
        assert_eq!(cmds[1].kind, MotionKind::Turn);
    }

    #[test]
    fn blank_lines_are_separators() {
        let report = parse_report("\nreto 10\n   \n\ngiro 20\n");

        assert_eq!(report.commands.len(), 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn crlf_line_endings_parse() {
        let cmds = parse("reto 10\r\ngiro 20\r\n");

        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[1].magnitude, 20.0);
    }

    #[test]
    fn unknown_keyword_drops_line_only() {
        let report = parse_report("reto 10\nfly 100\ngiro 20");

        assert_eq!(report.commands.len(), 2);
        assert_eq!(
            report.warnings,
            vec![LineWarning {
                line_index: 1,
                reason: WarnReason::UnknownKeyword("fly".to_string()),
            }]
        );
    }

    #[test]
    fn missing_magnitude_drops_line() {
        let report = parse_report("reto");

        assert!(report.commands.is_empty());
        assert_eq!(report.warnings[0].reason, WarnReason::MissingMagnitude);
    }

    #[test]
    fn non_numeric_magnitude_drops_line() {
        let report = parse_report("giro fast");

        assert!(report.commands.is_empty());
        assert_eq!(
            report.warnings[0].reason,
            WarnReason::InvalidMagnitude("fast".to_string())
        );
    }

    #[test]
    fn bad_speed_token_drops_line() {
        let report = parse_report("reto 10 quick");

        assert!(report.commands.is_empty());
        assert_eq!(
            report.warnings[0].reason,
            WarnReason::InvalidSpeed("quick".to_string())
        );
    }

    #[test]
    fn non_finite_numbers_drop_line() {
        let report = parse_report("reto inf\ngiro NaN 10\nreto 10 -inf");

        assert!(report.commands.is_empty());
        assert_eq!(report.warnings.len(), 3);
        for warning in &report.warnings {
            assert!(matches!(warning.reason, WarnReason::NonFiniteNumber(_)));
        }
    }

    #[test]
    fn trailing_tokens_warn_but_keep_command() {
        let report = parse_report("reto 10 20 extra stuff");

        assert_eq!(report.commands, vec![Command::straight(10.0, 20.0)]);
        assert_eq!(
            report.warnings,
            vec![LineWarning {
                line_index: 0,
                reason: WarnReason::ExtraTokens,
            }]
        );
    }

    #[test]
    fn degenerate_speeds_are_accepted() {
        // Clamping happens downstream in the timeline, the parser keeps
        // whatever finite number was written
        let cmds = parse("reto 10 0\ngiro 45 -5");

        assert_eq!(cmds[0].speed, 0.0);
        assert_eq!(cmds[1].speed, -5.0);
    }

    #[test]
    fn line_indices_count_blank_and_bad_lines() {
        let report = parse_report("reto 10\n\nbad line\ngiro 20");

        assert_eq!(report.warnings[0].line_index, 2);
    }

    #[test]
    fn empty_text_parses_to_nothing() {
        let report = parse_report("");

        assert!(report.commands.is_empty());
        assert!(report.warnings.is_empty());
    }
}
