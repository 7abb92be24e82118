/// Raw input events delivered by the host shell
///
/// Translation into action tokens is step-dependent and lives on the steps
/// (see `StepId::recognize`).

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press, by lowercase key name ("enter", "1", "s")
    Key(String),

    /// Mouse wheel scroll
    Wheel { delta: f32 },

    /// The game's simulation pause was toggled
    PauseToggled { paused: bool },

    /// The player committed the planned velocity adjustment
    VelocityApplied,
}

impl InputEvent {
    /// Create a key event, normalizing the key name
    pub fn key(name: impl AsRef<str>) -> Self {
        InputEvent::Key(name.as_ref().trim().to_ascii_lowercase())
    }

    /// Parse a console command ("enter", "wheel", "pause", "burn").
    /// `paused` is the game's pause state after the command is applied.
    pub fn parse(command: &str, paused: bool) -> Option<Self> {
        let command = command.trim();
        if command.is_empty() {
            return None;
        }

        match command.to_ascii_lowercase().as_str() {
            "wheel" | "scroll" => Some(InputEvent::Wheel { delta: 1.0 }),
            "pause" => Some(InputEvent::PauseToggled { paused }),
            "burn" => Some(InputEvent::VelocityApplied),
            _ => Some(InputEvent::key(command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_normalized() {
        assert_eq!(InputEvent::key(" Enter "), InputEvent::Key("enter".to_string()));
    }

    #[test]
    fn test_parse_console_commands() {
        assert_eq!(
            InputEvent::parse("wheel", false),
            Some(InputEvent::Wheel { delta: 1.0 })
        );
        assert_eq!(
            InputEvent::parse("pause", true),
            Some(InputEvent::PauseToggled { paused: true })
        );
        assert_eq!(InputEvent::parse("burn", true), Some(InputEvent::VelocityApplied));
        assert_eq!(InputEvent::parse("S", false), Some(InputEvent::key("s")));
        assert_eq!(InputEvent::parse("   ", false), None);
    }
}
