/// Keyboard actions understood by the gallery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    Close,
}
