use std::collections::HashMap;

use log::debug;
use rspotify::model::Image;
use serde::Deserialize;

use crate::clients::{
    entities::{AccessToken, Album, AlbumImage, Artist, TrackId, TrackInfo},
    errors::{Error, Result},
    read_ok_body,
};
use crate::config::Config;

const TRACK_ENDPOINT: &str = "track endpoint";

// Only the fields TrackInfo is built from, the rest of the payload is ignored
#[derive(Deserialize, Debug)]
struct TrackPayload {
    name: String,
    #[serde(default)]
    external_urls: HashMap<String, String>,
    preview_url: Option<String>,
    artists: Vec<ArtistPayload>,
    album: AlbumPayload,
}

#[derive(Deserialize, Debug)]
struct ArtistPayload {
    name: String,
    #[serde(default)]
    external_urls: HashMap<String, String>,
}

#[derive(Deserialize, Debug)]
struct AlbumPayload {
    name: String,
    #[serde(default)]
    external_urls: HashMap<String, String>,
    #[serde(default)]
    images: Vec<Image>,
}

impl TrackPayload {
    fn into_track_info(self) -> Result<TrackInfo> {
        let artists = self
            .artists
            .into_iter()
            .map(|artist| {
                Ok(Artist {
                    external_url: spotify_url(&artist.external_urls, "artist")?,
                    name: artist.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let image = widest_image(self.album.images.into_iter().map(AlbumImage::from))
            .ok_or_else(|| Error::ParseError("album has no images".into()))?;

        Ok(TrackInfo {
            external_url: spotify_url(&self.external_urls, "track")?,
            name: self.name,
            preview_url: self.preview_url,
            artists,
            album: Album {
                external_url: spotify_url(&self.album.external_urls, "album")?,
                name: self.album.name,
                image,
            },
        })
    }
}

impl From<Image> for AlbumImage {
    fn from(image: Image) -> AlbumImage {
        AlbumImage {
            url: image.url,
            width: image.width.unwrap_or_default(),
            height: image.height.unwrap_or_default(),
        }
    }
}

fn spotify_url(urls: &HashMap<String, String>, owner: &str) -> Result<String> {
    urls.get("spotify")
        .cloned()
        .ok_or_else(|| Error::ParseError(format!("{owner} has no spotify external url")))
}

/// Picks the widest image. On equal widths the earliest one is kept.
pub fn widest_image<I>(images: I) -> Option<AlbumImage>
where
    I: IntoIterator<Item = AlbumImage>,
{
    images
        .into_iter()
        .reduce(|best, image| if image.width > best.width { image } else { best })
}

pub struct SpotifyClient {
    http: reqwest::Client,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        SpotifyClient {
            http,
            api_base: config.endpoints.api.clone(),
        }
    }

    // Fetch a track from the Web API and reshape it into TrackInfo
    pub async fn get_track_info(&self, token: &AccessToken, track_id: &TrackId) -> Result<TrackInfo> {
        let url = format!("{}/tracks/{track_id}", self.api_base);
        debug!("Fetching track metadata from {url}");

        let response = self.http.get(&url).bearer_auth(token.as_str()).send().await?;
        let body = read_ok_body(response, TRACK_ENDPOINT).await?;
        let track: TrackPayload = serde_json::from_str(&body)?;
        track.into_track_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use std::time::Duration;

    const TRACK_JSON: &str = include_str!("../../tests/fixtures/track.json");

    fn image(url: &str, width: u32) -> AlbumImage {
        AlbumImage {
            url: url.into(),
            width,
            height: width,
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> SpotifyClient {
        let mut config = Config::new(Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            refresh_token: "refresh".into(),
            sp_dc: "cookie".into(),
        });
        config.endpoints.api = server.url();
        let http = crate::clients::http_client(Duration::from_secs(5)).unwrap();
        SpotifyClient::new(http, &config)
    }

    #[test]
    fn widest_image_picks_largest() {
        let picked = widest_image(vec![image("small", 64), image("medium", 300), image("large", 640)]);
        assert_eq!(picked.unwrap().url, "large");
    }

    #[test]
    fn widest_image_keeps_first_on_ties() {
        let picked = widest_image(vec![image("a", 640), image("b", 640), image("c", 300)]);
        assert_eq!(picked.unwrap().url, "a");
    }

    #[test]
    fn widest_image_of_nothing() {
        assert_eq!(widest_image(Vec::new()), None);
    }

    #[test]
    fn converts_full_track() {
        let track: TrackPayload = serde_json::from_str(TRACK_JSON).unwrap();
        let info = track.into_track_info().unwrap();

        assert_eq!(info.name, "Cut To The Feeling");
        assert_eq!(
            info.external_url,
            "https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl"
        );
        assert_eq!(info.preview_url, None);
        assert_eq!(
            info.artists,
            vec![Artist {
                name: "Carly Rae Jepsen".into(),
                external_url: "https://open.spotify.com/artist/6sFIWsNpZYqfjUpaCgueju".into(),
            }]
        );
        assert_eq!(info.album.name, "Cut To The Feeling");
        assert_eq!(info.album.image.width, 640);
        assert_eq!(
            info.album.image.url,
            "https://i.scdn.co/image/ab67616d0000b273d2f0d8c5ef8f1d4a6f2f66a2"
        );
    }

    #[test]
    fn ignores_fields_it_does_not_read() {
        let mut payload: serde_json::Value = serde_json::from_str(TRACK_JSON).unwrap();
        let fields = payload.as_object_mut().unwrap();
        for key in ["popularity", "external_ids", "disc_number", "track_number", "explicit", "is_local"] {
            fields.remove(key);
        }
        payload["album"].as_object_mut().unwrap().remove("release_date");

        let track: TrackPayload = serde_json::from_value(payload).unwrap();
        let info = track.into_track_info().unwrap();
        assert_eq!(info.name, "Cut To The Feeling");
        assert_eq!(info.album.image.width, 640);
    }

    #[test]
    fn album_without_images_is_an_error() {
        let mut payload: serde_json::Value = serde_json::from_str(TRACK_JSON).unwrap();
        payload["album"]["images"] = serde_json::json!([]);

        let track: TrackPayload = serde_json::from_value(payload).unwrap();
        assert!(matches!(track.into_track_info(), Err(Error::ParseError(_))));
    }

    #[tokio::test]
    async fn fetches_track_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tracks/11dFghVXANMlKmJXsNCbNl")
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TRACK_JSON)
            .create_async()
            .await;

        let info = client_for(&server)
            .get_track_info(&AccessToken::new("T"), &TrackId::new("11dFghVXANMlKmJXsNCbNl"))
            .await
            .unwrap();
        assert_eq!(info.album.image.width, 640);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_track_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tracks/0000000000000000000000")
            .with_status(404)
            .with_body(r#"{"error":{"status":404,"message":"Non existing id"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .get_track_info(&AccessToken::new("T"), &TrackId::new("0000000000000000000000"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
    }
}
