//! # CLI Module
//!
//! User-facing commands of the streaming history viewer. Each command builds
//! its own [`crate::management::Session`], loads the requested export files
//! into it and, where needed, forwards an action to Spotify.
//!
//! ## Commands
//!
//! - [`show`] - Merge export files and print the listening log, optionally searched
//! - [`play`] / [`queue`] - Start or queue one track on the first device
//! - [`pause`] / [`resume`] - Control playback
//! - [`history_add`] - Add one track to the history playlist
//! - [`playlist`] - Create a playlist from selected rows, named after their date range
//! - [`clear_cache`] - Forget the cached Spotify token
//!
//! ## Error Handling
//!
//! Broken export files are reported and skipped; loading carries on with
//! the rest. A track that is not playable is rejected with a message before
//! any request is sent. Failures of Spotify itself end the command with an
//! error message.
//!
//! ## Usage
//!
//! ```bash
//! streamhist show Streaming_History_Audio_*.json --search radiohead
//! streamhist play spotify:track:4uLU6hMCjMI75M1A2tKUQC
//! streamhist queue --file Streaming_History_Audio_2023.json --row 12
//! streamhist playlist Streaming_History_Audio_2023.json --search jazz --rows 1,4,9
//! ```

mod cache;
mod history;
mod player;
mod playlist;

pub use cache::clear_cache;
pub use history::select_rows;
pub use history::show;
pub use history::table_rows;
pub use player::TrackSource;
pub use player::pause;
pub use player::play;
pub use player::queue;
pub use player::resume;
pub use playlist::history_add;
pub use playlist::playlist;
