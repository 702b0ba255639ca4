use serde::{Deserialize, Serialize};

/// Discriminated outcome of one server call. Every endpoint resolves to
/// exactly one of these; the workflows consume all three branches.
#[derive(Debug, Clone)]
pub enum ApiOutcome<T> {
    Success(T),
    /// The server answered `success: false` with a message.
    AppError(String),
    /// The request could not be completed (connection, timeout, bad body).
    Transport(String),
}

#[derive(Debug, Clone)]
pub struct ArtPreviews {
    /// Server resource paths for the three candidate previews, in order.
    pub paths: [String; 3],
}

#[derive(Debug, Clone)]
pub struct LiteratureReply {
    pub result: String,
    /// Marker annotation the server may attach for debugging.
    pub debug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MusicReply {
    pub audio_url: String,
    /// Seconds into the track where the static was inserted.
    pub timestamp: f64,
}

#[derive(Serialize)]
struct LiteratureRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ArtResponse {
    success: bool,
    preview1: Option<String>,
    preview2: Option<String>,
    preview3: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct LiteratureResponse {
    success: bool,
    result: Option<String>,
    debug: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct MusicResponse {
    success: bool,
    audio_url: Option<String>,
    timestamp: Option<f64>,
    error: Option<String>,
}

fn server_message(error: Option<String>) -> String {
    error.unwrap_or_else(|| "unspecified server error".into())
}

fn interpret_art(body: ArtResponse) -> ApiOutcome<ArtPreviews> {
    if !body.success {
        return ApiOutcome::AppError(server_message(body.error));
    }
    match (body.preview1, body.preview2, body.preview3) {
        (Some(p1), Some(p2), Some(p3)) => ApiOutcome::Success(ArtPreviews {
            paths: [p1, p2, p3],
        }),
        _ => ApiOutcome::AppError("server response missing preview paths".into()),
    }
}

fn interpret_literature(body: LiteratureResponse) -> ApiOutcome<LiteratureReply> {
    if !body.success {
        return ApiOutcome::AppError(server_message(body.error));
    }
    match body.result {
        Some(result) => ApiOutcome::Success(LiteratureReply {
            result,
            debug: body.debug,
        }),
        None => ApiOutcome::AppError("server response missing result text".into()),
    }
}

fn interpret_music(body: MusicResponse) -> ApiOutcome<MusicReply> {
    if !body.success {
        return ApiOutcome::AppError(server_message(body.error));
    }
    match (body.audio_url, body.timestamp) {
        (Some(audio_url), Some(timestamp)) => ApiOutcome::Success(MusicReply {
            audio_url,
            timestamp,
        }),
        _ => ApiOutcome::AppError("server response missing audio fields".into()),
    }
}

/// HTTP client for the protection server.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a server resource path against the base URL. Absolute URLs
    /// pass through untouched.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// POST an image to `/upload-art` as multipart field `art`.
    pub async fn upload_art(&self, filename: String, bytes: Vec<u8>) -> ApiOutcome<ArtPreviews> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("art", part);

        let resp = match self
            .http
            .post(format!("{}/upload-art", self.base_url))
            .multipart(form)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return ApiOutcome::Transport(e.to_string()),
        };

        match resp.json::<ArtResponse>().await {
            Ok(body) => interpret_art(body),
            Err(e) => ApiOutcome::Transport(format!("bad response body: {e}")),
        }
    }

    /// POST text to `/upload-literature` as JSON `{text}`.
    pub async fn upload_literature(&self, text: String) -> ApiOutcome<LiteratureReply> {
        let resp = match self
            .http
            .post(format!("{}/upload-literature", self.base_url))
            .json(&LiteratureRequest { text: &text })
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return ApiOutcome::Transport(e.to_string()),
        };

        match resp.json::<LiteratureResponse>().await {
            Ok(body) => interpret_literature(body),
            Err(e) => ApiOutcome::Transport(format!("bad response body: {e}")),
        }
    }

    /// POST audio to `/upload-music` as multipart field `uploadMusic`.
    pub async fn upload_music(&self, filename: String, bytes: Vec<u8>) -> ApiOutcome<MusicReply> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("uploadMusic", part);

        let resp = match self
            .http
            .post(format!("{}/upload-music", self.base_url))
            .multipart(form)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return ApiOutcome::Transport(e.to_string()),
        };

        match resp.json::<MusicResponse>().await {
            Ok(body) => interpret_music(body),
            Err(e) => ApiOutcome::Transport(format!("bad response body: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn art_success_yields_three_paths() {
        let body: ArtResponse = serde_json::from_str(
            r#"{"success": true,
                "preview1": "/static/previews/opt_0.png",
                "preview2": "/static/previews/opt_1.png",
                "preview3": "/static/previews/opt_2.png"}"#,
        )
        .unwrap();
        match interpret_art(body) {
            ApiOutcome::Success(p) => {
                assert_eq!(p.paths[2], "/static/previews/opt_2.png");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn art_failure_carries_server_message() {
        let body: ArtResponse =
            serde_json::from_str(r#"{"success": false, "error": "No file"}"#).unwrap();
        match interpret_art(body) {
            ApiOutcome::AppError(msg) => assert_eq!(msg, "No file"),
            other => panic!("expected app error, got {other:?}"),
        }
    }

    #[test]
    fn art_success_without_previews_is_an_app_error() {
        let body: ArtResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(interpret_art(body), ApiOutcome::AppError(_)));
    }

    #[test]
    fn literature_debug_is_optional() {
        let body: LiteratureResponse =
            serde_json::from_str(r#"{"success": true, "result": "X"}"#).unwrap();
        match interpret_literature(body) {
            ApiOutcome::Success(reply) => {
                assert_eq!(reply.result, "X");
                assert!(reply.debug.is_none());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn music_failure_message_is_verbatim() {
        let body: MusicResponse =
            serde_json::from_str(r#"{"success": false, "error": "bad format"}"#).unwrap();
        match interpret_music(body) {
            ApiOutcome::AppError(msg) => assert_eq!(msg, "bad format"),
            other => panic!("expected app error, got {other:?}"),
        }
    }

    #[test]
    fn music_success_parses_url_and_timestamp() {
        let body: MusicResponse = serde_json::from_str(
            r#"{"success": true,
                "audio_url": "/static/previews/protected_audio.wav?t=1700000000",
                "timestamp": 125.4}"#,
        )
        .unwrap();
        match interpret_music(body) {
            ApiOutcome::Success(reply) => {
                assert!(reply.audio_url.ends_with("?t=1700000000"));
                assert!((reply.timestamp - 125.4).abs() < f64::EPSILON);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn resolve_joins_relative_paths_and_keeps_absolute_urls() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(
            client.resolve("/static/previews/opt_0.png"),
            "http://localhost:5000/static/previews/opt_0.png"
        );
        assert_eq!(
            client.resolve("http://cdn.example/x.png"),
            "http://cdn.example/x.png"
        );
    }
}
