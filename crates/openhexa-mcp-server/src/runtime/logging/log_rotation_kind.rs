use schemars::JsonSchema;
use serde::Deserialize;
use tracing_appender::rolling::Rotation;

/// How often a new log file is started
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogRotationKind {
    #[serde(alias = "Minutely", alias = "MINUTELY")]
    Minutely,
    #[serde(alias = "Hourly", alias = "HOURLY")]
    Hourly,
    #[serde(alias = "Daily", alias = "DAILY")]
    Daily,
    #[serde(alias = "Never", alias = "NEVER")]
    Never,
}

impl From<LogRotationKind> for Rotation {
    fn from(kind: LogRotationKind) -> Self {
        match kind {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("daily", LogRotationKind::Daily, Rotation::DAILY)]
    #[case("Hourly", LogRotationKind::Hourly, Rotation::HOURLY)]
    #[case("NEVER", LogRotationKind::Never, Rotation::NEVER)]
    fn it_accepts_any_casing(
        #[case] value: &str,
        #[case] kind: LogRotationKind,
        #[case] rotation: Rotation,
    ) {
        let parsed: LogRotationKind = serde_json::from_value(json!(value)).unwrap();

        assert_eq!(parsed, kind);
        assert_eq!(Rotation::from(parsed), rotation);
    }
}
