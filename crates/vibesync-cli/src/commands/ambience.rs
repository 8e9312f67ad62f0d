use clap::Subcommand;
use vibesync_core::storage::Config;
use vibesync_core::Playlist;

#[derive(Subcommand)]
pub enum AmbienceAction {
    /// List the track catalogue
    List,
    /// Select a track by (partial) title
    Select { query: String },
    /// Advance to the next track
    Next,
    /// Go back to the previous track
    Prev,
}

/// Build a playlist positioned at the configured track.
fn load_playlist(config: &Config) -> Playlist {
    let mut playlist = Playlist::builtin();
    playlist.select_by_title(&config.ambience.track);
    playlist
}

pub fn run(action: AmbienceAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    let mut playlist = load_playlist(&config);

    match action {
        AmbienceAction::List => {
            for track in playlist.tracks() {
                let marker = if track.id == playlist.current().id {
                    ">"
                } else {
                    " "
                };
                println!("{marker} {} -- {}", track.title, track.artist);
            }
            return Ok(());
        }
        AmbienceAction::Select { query } => {
            if playlist.select_by_title(&query).is_none() {
                return Err(format!("no track matching '{query}'").into());
            }
        }
        AmbienceAction::Next => {
            playlist.next();
        }
        AmbienceAction::Prev => {
            playlist.prev();
        }
    }

    let current = playlist.current();
    config.ambience.track = current.title.clone();
    config.save()?;
    println!("{} -- {}", current.title, current.artist);
    Ok(())
}
