use std::fmt;

use super::dice::ColumnChoice;

/// What the autonomous driver is about to do, for the presentation layer
/// to highlight before the action fires.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecisionIntent {
    #[default]
    None,
    Hop,
    Stop,
    Choose(ColumnChoice),
    Croaked,
}

impl DecisionIntent {
    pub fn is_none(&self) -> bool {
        matches!(self, DecisionIntent::None)
    }

    /// The column choice being targeted, if any.
    pub fn target(&self) -> Option<ColumnChoice> {
        match self {
            DecisionIntent::Choose(choice) => Some(*choice),
            _ => None,
        }
    }
}

impl fmt::Display for DecisionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionIntent::None => f.write_str("none"),
            DecisionIntent::Hop => f.write_str("hop"),
            DecisionIntent::Stop => f.write_str("stop"),
            DecisionIntent::Choose(choice) => write!(f, "choose({choice})"),
            DecisionIntent::Croaked => f.write_str("croaked"),
        }
    }
}
