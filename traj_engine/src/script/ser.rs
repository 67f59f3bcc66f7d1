//! Script serializer
//!
//! The exact inverse of the parser: commands back to script text. The
//! speed token is always written, even when it matches the default, which
//! is what makes `parse(serialize(cmds)) == cmds` hold bit for bit
//! (Rust's `Display` for `f64` prints the shortest digits that parse back
//! to the same value).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::Command;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Serialize commands into script text, one line per command.
///
/// An empty command list gives an empty string, otherwise the text ends
/// with a newline.
pub fn serialize(commands: &[Command]) -> String {
    let mut text = String::new();

    for command in commands {
        text.push_str(&format!(
            "{} {} {}\n",
            command.kind.keyword(),
            command.magnitude,
            command.speed
        ));
    }

    text
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::script::parse;

    #[test]
    fn writes_one_line_per_command() {
        let text = serialize(&[
            Command::straight(100.0, 50.0),
            Command::turn(-45.0, 90.0),
        ]);

        assert_eq!(text, "reto 100 50\ngiro -45 90\n");
    }

    #[test]
    fn empty_list_serializes_to_empty_text() {
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn fractional_values_keep_their_digits() {
        let text = serialize(&[Command::straight(12.5, 3.25)]);

        assert_eq!(text, "reto 12.5 3.25\n");
    }

    #[test]
    fn canonical_text_survives_a_lap() {
        let text = "reto 100 50\ngiro -45 90\n";

        assert_eq!(serialize(&parse(text)), text);
    }

    #[test]
    fn awkward_floats_round_trip() {
        let cmds = vec![
            Command::straight(0.1, 0.000000001),
            Command::turn(-0.0, 123456.789),
        ];

        assert_eq!(parse(&serialize(&cmds)), cmds);
    }
}
