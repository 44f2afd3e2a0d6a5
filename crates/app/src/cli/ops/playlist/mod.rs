use clap::Args;

use common::playlist::PlaylistPayload;

pub mod create;
pub mod delete;
pub mod read;
pub mod update;

pub use create::Create;
pub use delete::Delete;
pub use read::Read;
pub use update::Update;

/// Container formats a playback URL is signed for after create.
pub const PLAYBACK_FORMATS: [(&str, &str); 2] = [("hls", "m3u8"), ("dash", "mpd")];

/// Playlist fields shared by create and update.
#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// Description of the playlist
    #[arg(short = 'd', long)]
    pub desc: Option<String>,

    /// Number of times the playlist repeats (-1 repeats forever)
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    pub repeat: Option<i64>,

    /// Require a signed token for playback: 0 requires one, 1 does not (sent as skip_drm)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub skip_token: Option<u8>,

    /// Fill breaks with ad slate when no ads are available (0 or 1)
    #[arg(short = 's', long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub add_slate_fill: Option<u8>,

    /// Whether the playlist can be played back (0 or 1)
    #[arg(short = 'a', long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub active: Option<u8>,

    /// Require studio DRM (widevine/playready/fairplay) for playback (0 or 1)
    #[arg(short = 'm', long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub drm: Option<u8>,

    /// Ad break duration to request within assets, in seconds
    #[arg(short = 'b', long)]
    pub break_dur: Option<u32>,

    /// Comma separated beam ids and break durations, e.g. 30,beamA,beamB,30
    #[arg(short = 'p', long)]
    pub playlist: Option<String>,
}

impl PayloadArgs {
    pub fn to_payload(&self) -> PlaylistPayload {
        PlaylistPayload {
            ad_slate_fill: self.add_slate_fill,
            active: self.active,
            studio_drm_required: self.drm,
            skip_drm: self.skip_token,
            desc: self.desc.clone(),
            repeat: self.repeat,
            beam_break_duration: self.break_dur,
            playlist: None,
        }
        .with_playlist(self.playlist.as_deref())
    }
}
