use std::time::Duration;

use humantime::parse_duration;
use serde::Deserialize;
use serde_with::DeserializeAs;

/// Reads `"30s"`-style strings from the config file into a [`Duration`].
pub(super) struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(raw.trim()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::HumantimeDuration;
    use serde::Deserialize;
    use serde_with::serde_as;
    use std::time::Duration;

    #[serde_as]
    #[derive(Deserialize)]
    struct Sample {
        #[serde(default)]
        #[serde_as(as = "Option<HumantimeDuration>")]
        timeout: Option<Duration>,
    }

    #[test]
    fn humantime_duration_parses_strings() {
        let sample: Sample = match serde_json::from_str(r#"{"timeout":"2m"}"#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse sample json: {err}"),
        };
        assert_eq!(sample.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn humantime_duration_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"timeout":"later"}"#).is_err());
    }
}
