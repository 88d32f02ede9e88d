//! Google Translate web endpoint.

use super::Translator;
use crate::error::{Result, YoyakError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Translator backed by the public Google Translate endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    max_chars_per_request: usize,
}

impl GoogleTranslator {
    /// Create a translator against `endpoint`, splitting input longer than
    /// `max_chars_per_request` characters.
    pub fn new(endpoint: &str, max_chars_per_request: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            max_chars_per_request: max_chars_per_request.max(1),
        }
    }

    async fn translate_chunk(&self, chunk: &str, source: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(|e| YoyakError::TranslationFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YoyakError::TranslationFailed(format!(
                "Translate returned {}: {}",
                status,
                body.trim()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            YoyakError::TranslationFailed(format!("Failed to parse response: {}", e))
        })?;

        parse_response(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let chunks = split_into_chunks(text, self.max_chars_per_request);
        debug!("Translating in {} request(s)", chunks.len());

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            translated.push(self.translate_chunk(chunk, source, target).await?);
        }

        Ok(translated.join(" "))
    }
}

/// Concatenate the translated sentences of a `dt=t` response.
///
/// The payload looks like `[[["Hello", "안녕", ...], ["world", "세계", ...]], null, "ko"]`.
fn parse_response(body: &serde_json::Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| YoyakError::TranslationFailed("Unexpected response shape".to_string()))?;

    let text: String = sentences
        .iter()
        .filter_map(|s| s.get(0).and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(YoyakError::TranslationFailed(
            "Empty translation returned".to_string(),
        ));
    }

    Ok(text)
}

/// Split text on whitespace into pieces of at most `max_chars` characters.
///
/// Words longer than the limit are cut at character boundaries.
fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = serde_json::json!([
            [["Hello, ", "안녕하세요, ", null, null, 10], ["world.", "세계.", null, null, 10]],
            null,
            "ko"
        ]);
        assert_eq!(parse_response(&body).unwrap(), "Hello, world.");
    }

    #[test]
    fn test_parse_unexpected_shape() {
        let body = serde_json::json!({"error": "bad request"});
        assert!(matches!(
            parse_response(&body),
            Err(YoyakError::TranslationFailed(_))
        ));
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_into_chunks("hello world", 100), vec!["hello world"]);
    }

    #[test]
    fn test_split_on_word_boundaries() {
        let chunks = split_into_chunks("aaa bbb ccc ddd", 7);
        assert_eq!(chunks, vec!["aaa bbb", "ccc ddd"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let chunks = split_into_chunks("가나다 라마바", 7);
        assert_eq!(chunks, vec!["가나다 라마바"]);
    }

    #[test]
    fn test_long_word_is_cut() {
        let chunks = split_into_chunks("abcdefghij xy", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij", "xy"]);
    }
}
