//! Builders turning content records into playable `Track`s.
//!
//! Surfaces use these so the same record always produces the same track id,
//! which is what makes a second press toggle instead of restarting.

use crate::audio::Track;
use crate::config::PlaybackSettings;

use super::model::{Branding, HomePage, PodcastEpisode, Show, Song};

/// Fixed id of the on-air stream; there is only ever one.
pub const LIVE_STREAM_ID: &str = "live-stream";
pub const HERO_AUDIO_ID: &str = "hero-audio-stream";

pub fn chart_track(song: &Song) -> Track {
    let mut track = Track::new(&song.id, &song.title, &song.artist).with_cover(&song.cover_url);
    track.audio_source = song.audio_url.clone();
    if song.is_live() {
        track = track.live();
    }
    track
}

pub fn podcast_track(episode: &PodcastEpisode, branding: &Branding) -> Track {
    let mut track = Track::new(
        &episode.id,
        &episode.title,
        format!("{} {}", branding.site_title, episode.category),
    )
    .with_cover(&episode.image_url);
    track.audio_source = episode.audio_url.clone();
    track
}

/// The on-air stream for `show`. It carries no source of its own.
pub fn live_show_track(show: &Show) -> Track {
    Track::new(LIVE_STREAM_ID, &show.title, format!("Host: {}", show.host))
        .with_cover(&show.image_url)
        .live()
}

pub fn hero_track(home: &HomePage, branding: &Branding) -> Track {
    let mut track = Track::new(
        HERO_AUDIO_ID,
        &home.hero.title,
        format!("{} Special", branding.site_title),
    )
    .with_cover(&home.hero.bg_image);
    track.audio_source = home.hero.audio_url.clone();
    track
}

/// The now-playing track loaded (paused) at startup, if one is configured.
pub fn placeholder_track(playback: &PlaybackSettings) -> Option<Track> {
    if !playback.placeholder {
        return None;
    }
    let track = Track::new(
        &playback.placeholder_id,
        &playback.placeholder_title,
        &playback.placeholder_artist,
    )
    .with_source(&playback.default_source);
    Some(if playback.placeholder_live {
        track.live()
    } else {
        track
    })
}
