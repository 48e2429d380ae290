mod player_status;
mod playlist;
mod video;

pub use player_status::PlayerStatus;
pub use playlist::Playlist;
pub use video::Video;
