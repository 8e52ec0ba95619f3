//! LRC export of lyrics documents.

use std::fmt::Write as _;

use crate::clients::entities::{LyricsDoc, TrackInfo};

/// Formats a millisecond offset as an LRC time tag body, `mm:ss.cc`.
pub fn timestamp(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1_000) % 60;
    let centis = (ms % 1_000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

pub fn render(lyrics: &LyricsDoc) -> String {
    lyrics.lines.iter().fold(String::new(), |mut out, line| {
        let _ = writeln!(out, "[{}]{}", timestamp(line.start_time_ms), line.words);
        out
    })
}

/// `"<track> - <artist, artist>.lrc"`, with path separators replaced.
pub fn file_name(track: &TrackInfo) -> String {
    let artists = track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} - {artists}.lrc", track.name).replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::entities::{Album, AlbumImage, Artist, LyricLine};

    fn track(name: &str, artists: &[&str]) -> TrackInfo {
        TrackInfo {
            name: name.into(),
            external_url: "https://open.spotify.com/track/x".into(),
            preview_url: None,
            artists: artists
                .iter()
                .map(|name| Artist {
                    name: (*name).into(),
                    external_url: "https://open.spotify.com/artist/y".into(),
                })
                .collect(),
            album: Album {
                name: "Album".into(),
                external_url: "https://open.spotify.com/album/z".into(),
                image: AlbumImage {
                    url: "https://i.scdn.co/image/w".into(),
                    width: 640,
                    height: 640,
                },
            },
        }
    }

    #[test]
    fn formats_timestamps() {
        assert_eq!(timestamp(0), "00:00.00");
        assert_eq!(timestamp(960), "00:00.96");
        assert_eq!(timestamp(61_234), "01:01.23");
        assert_eq!(timestamp(3_725_000), "62:05.00");
    }

    #[test]
    fn renders_one_tag_per_line() {
        let doc = LyricsDoc {
            has_lipsync: true,
            lines: vec![
                LyricLine {
                    words: "First".into(),
                    start_time_ms: 960,
                    end_time_ms: 0,
                },
                LyricLine {
                    words: "Second".into(),
                    start_time_ms: 12_500,
                    end_time_ms: 0,
                },
            ],
        };
        assert_eq!(render(&doc), "[00:00.96]First\n[00:12.50]Second\n");
    }

    #[test]
    fn file_name_lists_artists() {
        assert_eq!(
            file_name(&track("Song", &["A", "B"])),
            "Song - A, B.lrc"
        );
        assert_eq!(file_name(&track("AC/DC Cover", &["X"])), "AC_DC Cover - X.lrc");
    }
}
