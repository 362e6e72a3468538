use snafu::Snafu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Character {c:?} cannot be typed"))]
    UnsupportedCharacter { c: char },
    #[snafu(display("Text macro queue is full"))]
    MacroQueueFull,
}
