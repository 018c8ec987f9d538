/// What the music button shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    LoadError,
}

/// Why a play attempt was made; autoplay refusals are not load errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayTrigger {
    Autoplay,
    Manual,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Paused => "Play",
            PlaybackState::Playing => "Pause",
            PlaybackState::LoadError => "Error",
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }

    /// State after a play attempt settled.
    pub fn after_play(self, trigger: PlayTrigger, succeeded: bool) -> Self {
        match (succeeded, trigger) {
            (true, _) => PlaybackState::Playing,
            (false, PlayTrigger::Autoplay) => {
                if self == PlaybackState::LoadError {
                    self
                } else {
                    PlaybackState::Paused
                }
            }
            (false, PlayTrigger::Manual) => PlaybackState::LoadError,
        }
    }

    pub fn after_pause(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Paused,
            other => other,
        }
    }

    /// The media element reported it cannot load the source.
    pub fn after_media_error(self) -> Self {
        PlaybackState::LoadError
    }
}
