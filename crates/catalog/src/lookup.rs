// ABOUTME: Decoder for the lookup endpoint's JSON envelope.
// ABOUTME: Maps resultCount/results onto ResultSet with zero-value defaults for absent or null keys.

use crate::error::DecodeError;
use crate::models::ResultSet;

/// Decodes a lookup response body.
pub fn decode_result_set(data: &[u8]) -> Result<ResultSet, DecodeError> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_envelope() {
        let set = decode_result_set(br#"{"resultCount":0,"results":[]}"#).unwrap();
        assert_eq!(set.result_count, 0);
        assert!(set.results.is_empty());
    }

    #[test]
    fn legacy_key_spelling_is_accepted() {
        let body = br#"{"resultCount":1,"results":[{"artistViewURL":"https://a","screenshotURLs":["s1"]}]}"#;
        let set = decode_result_set(body).unwrap();
        assert_eq!(set.results[0].artist_view_url, "https://a");
        assert_eq!(set.results[0].screenshot_urls, vec!["s1".to_string()]);
    }

    #[test]
    fn null_values_decode_as_zero_values() {
        let body = br#"{"resultCount":null,"results":[{"trackId":1,"trackName":null,"genres":null,"price":null,"isGameCenterEnabled":null}]}"#;
        let set = decode_result_set(body).unwrap();
        assert_eq!(set.result_count, 0);
        let item = &set.results[0];
        assert_eq!(item.track_id, 1);
        assert_eq!(item.track_name, "");
        assert!(item.genres.is_empty());
        assert_eq!(item.price, 0.0);
        assert!(!item.is_game_center_enabled);

        let set = decode_result_set(br#"{"resultCount":0,"results":null}"#).unwrap();
        assert!(set.results.is_empty());
    }

    #[test]
    fn negative_identifiers_are_kept() {
        let body = br#"{"resultCount":1,"results":[{"artistId":-1,"trackId":-42,"userRatingCount":-3}]}"#;
        let set = decode_result_set(body).unwrap();
        assert_eq!(set.results[0].artist_id, -1);
        assert_eq!(set.results[0].track_id, -42);
        assert_eq!(set.results[0].user_rating_count, -3);
    }

    #[test]
    fn wrong_type_is_a_decode_error() {
        let err = decode_result_set(br#"{"resultCount":"one","results":[]}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn array_body_is_a_decode_error() {
        assert!(decode_result_set(b"[]").is_err());
    }
}
