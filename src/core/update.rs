use crate::core::{cmd::Cmd, msg::FeedMsg, state::FeedState};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: FeedMsg, mut state: FeedState) -> (FeedState, Vec<Cmd>) {
    if !msg.is_frequent() {
        log::trace!("update: {msg:?}");
    }
    let commands = state.update(msg);
    (state, commands)
}
