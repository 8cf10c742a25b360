/// Logging severity threshold from the config document.
///
/// Levels are ordered `None < Fatal < Error < Info < Debug`; a message at
/// level `L` is emitted iff `L <= threshold`. The mapping onto the `log`
/// facade is monotone: domain `Fatal` rides on `log`'s `Error`, domain
/// `Error` on `Warn`, so filtering by threshold behaves identically.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    /// Don't log.
    #[default]
    None,
    /// Log only conditions the run cannot recover from.
    Fatal,
    /// Log all errors.
    Error,
    /// Log errors plus one line per copied directory.
    Info,
    /// Log everything, including one line per copied file.
    Debug,
}

impl LoggingLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LoggingLevel::None => log::LevelFilter::Off,
            LoggingLevel::Fatal => log::LevelFilter::Error,
            LoggingLevel::Error => log::LevelFilter::Warn,
            LoggingLevel::Info => log::LevelFilter::Info,
            LoggingLevel::Debug => log::LevelFilter::Debug,
        }
    }
}
