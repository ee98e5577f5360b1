use serde::{Deserialize, Serialize};

/// Where a match is in its round cycle.
///
/// `Setup -> FirstTurn -> Playing -> FinalTurns -> Scoring`, then either
/// back to `FirstTurn` for the next round or on to `GameOver`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    /// Every player turns two cards face-up.
    FirstTurn,
    Playing,
    /// Someone went out; everyone else gets one more turn.
    FinalTurns,
    Scoring,
    GameOver,
}

impl Phase {
    /// Draw-and-place turns happen in this phase.
    #[must_use]
    pub fn is_turn_phase(self) -> bool {
        matches!(self, Phase::Playing | Phase::FinalTurns)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::FirstTurn => "first turn",
            Phase::Playing => "playing",
            Phase::FinalTurns => "final turns",
            Phase::Scoring => "scoring",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}
