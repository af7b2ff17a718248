use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, EnumString, EnumIter, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Cue {
    #[strum(to_string = "open", serialize = "ambient", serialize = "init")]
    Open,
    #[strum(to_string = "pending", serialize = "close", serialize = "select")]
    Pending,
    #[strum(to_string = "confirm", serialize = "transform")]
    Confirm,
}

/// Fire-and-forget audio output. Nothing is reported back to the dial.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
    fn silence(&mut self, cue: Cue);
}
