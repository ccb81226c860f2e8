use crate::{ConfigError, Level, ModlogError, ROOT_NAME};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Levels of a set of loggers, keyed by logger name.
///
/// This is the textual exchange format of [`ModuleRegistry`](crate::ModuleRegistry):
/// it is produced by
/// [`ModuleRegistry::snapshot_config`](crate::ModuleRegistry::snapshot_config) and
/// consumed by [`ModuleRegistry::apply`](crate::ModuleRegistry::apply).
///
/// The textual form is a list of `name=level` pairs, separated by `;` or `,`:
///
/// ```text
/// <config>      ::= <level> | <entry>[{(;|,)<entry>}]
/// <entry>       ::= <logger_name>=<level>
/// ```
///
/// * Whitespace around names and levels is ignored, levels are case-insensitive
///   (`WARN` and `WARNING` are both accepted).
/// * A backslash escapes the next character, so that logger names can contain
///   `;`, `,`, `=`, `\` and leading or trailing whitespace (e.g. `a\;b=INFO`).
/// * A specification that consists of a single level sets the root logger.
/// * The name `<root>` and the empty name both designate the root logger.
///
/// The rendered form (`Display`) is sorted by name, uses `;` as separator and
/// escapes names where necessary, so that rendering and parsing again reproduces
/// the same configuration for any logger names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoggersConfig {
    levels: BTreeMap<String, Level>,
}

impl LoggersConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a textual configuration.
    ///
    /// Parsing is all-or-nothing: if any entry is malformed, an error is returned
    /// and no configuration at all is produced.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] describing the first malformed entry.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if let Ok(level) = spec.parse::<Level>() {
            config.insert(ROOT_NAME, level);
            return Ok(config);
        }
        for entry in raw_entries(spec) {
            let name = unescape(&entry.name);
            let Some(ref level) = entry.level else {
                if name.is_empty() {
                    continue;
                }
                return Err(ConfigError::MissingEquals(entry.text.trim().to_string()));
            };
            let level = unescape(level);
            if name.is_empty() || level.is_empty() {
                return Err(ConfigError::BlankNameOrLevel(entry.text.trim().to_string()));
            }
            config.insert(&name, level.parse()?);
        }
        Ok(config)
    }

    /// Reads the configuration from the environment variable `var`, or, if that is
    /// not set, parses the given default.
    ///
    /// # Errors
    ///
    /// [`ModlogError::Config`] if the chosen text is malformed.
    pub fn env_or_parse<S: AsRef<str>>(var: &str, default: S) -> Result<Self, ModlogError> {
        match std::env::var(var) {
            Ok(spec) => Ok(Self::parse(&spec)?),
            Err(_) => Ok(Self::parse(default.as_ref())?),
        }
    }

    /// Sets the level for a logger name; the name is normalized like in
    /// [`ModuleRegistry::get`](crate::ModuleRegistry::get).
    pub fn insert(&mut self, name: &str, level: Level) -> &mut Self {
        self.levels.insert(normalize_name(name), level);
        self
    }

    /// Returns the configured level of a logger, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Level> {
        self.levels.get(&normalize_name(name)).copied()
    }

    /// Iterates over the entries, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Level)> {
        self.levels.iter().map(|(name, level)| (name.as_str(), *level))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// An entry of the textual form, with each character flagged as escaped or not.
#[derive(Default)]
struct RawEntry {
    text: String,
    name: Vec<(char, bool)>,
    level: Option<Vec<(char, bool)>>,
}

// Splits at unescaped `;` and `,`; the first unescaped `=` of an entry
// separates the name from the level.
fn raw_entries(spec: &str) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut current = RawEntry::default();
    let mut chars = spec.chars();
    while let Some(c) = chars.next() {
        let (c, escaped) = match (c, chars.clone().next()) {
            ('\\', Some(next)) => {
                chars.next();
                current.text.push('\\');
                (next, true)
            }
            _ => (c, false),
        };
        if !escaped && (c == ';' || c == ',') {
            entries.push(std::mem::take(&mut current));
            continue;
        }
        current.text.push(c);
        match current.level {
            Some(ref mut level) => level.push((c, escaped)),
            None => {
                if !escaped && c == '=' {
                    current.level = Some(Vec::new());
                } else {
                    current.name.push((c, escaped));
                }
            }
        }
    }
    entries.push(current);
    entries
}

// Drops unescaped whitespace at both ends.
fn unescape(chars: &[(char, bool)]) -> String {
    let keep = |&(c, escaped): &(char, bool)| escaped || !c.is_whitespace();
    let start = chars.iter().position(keep).unwrap_or(chars.len());
    let end = chars.iter().rposition(keep).map_or(start, |i| i + 1);
    chars[start..end].iter().map(|&(c, _)| c).collect()
}

// Inverse of raw_entries + unescape for a logger name.
fn write_escaped(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let last = name.chars().count().saturating_sub(1);
    for (i, c) in name.chars().enumerate() {
        let at_edge = i == 0 || i == last;
        if matches!(c, '\\' | ';' | ',' | '=') || (at_edge && c.is_whitespace()) {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

// lowercase, and all aliases of the root logger become ROOT_NAME
fn normalize_name(name: &str) -> String {
    let name = name.to_lowercase();
    if name.is_empty() || name == ROOT_NAME {
        ROOT_NAME.to_string()
    } else {
        name
    }
}

impl fmt::Display for LoggersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, level)) in self.levels.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write_escaped(f, name)?;
            write!(f, "={level}")?;
        }
        Ok(())
    }
}

impl FromStr for LoggersConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> FromIterator<(&'a str, Level)> for LoggersConfig {
    fn from_iter<T: IntoIterator<Item = (&'a str, Level)>>(iter: T) -> Self {
        let mut config = Self::new();
        for (name, level) in iter {
            config.insert(name, level);
        }
        config
    }
}

#[cfg(feature = "specfile")]
mod specfile {
    use super::LoggersConfig;
    use crate::{Level, ModlogError, ROOT_NAME};
    use serde_derive::{Deserialize, Serialize};
    use std::{collections::BTreeMap, path::Path};

    #[derive(Deserialize, Serialize)]
    struct ConfigFile {
        root: Option<String>,
        #[serde(default)]
        modules: BTreeMap<String, String>,
    }

    const FILE_HEADER: &str = "\
### Optional: Level of the root logger
# root = \"WARNING\"
### Optional: levels of individual loggers
# [modules]
# \"a.b\" = \"DEBUG\"

";

    impl LoggersConfig {
        /// Reads a configuration from a TOML string.
        ///
        /// # Errors
        ///
        /// [`ModlogError::TomlDe`] if the input is not valid TOML of the expected shape,
        /// [`ModlogError::Config`] if a level is unknown.
        #[cfg_attr(docsrs, doc(cfg(feature = "specfile")))]
        pub fn from_toml_str(s: &str) -> Result<Self, ModlogError> {
            let file: ConfigFile = toml::from_str(s)?;
            let mut config = Self::new();
            if let Some(root) = file.root {
                config.insert(ROOT_NAME, root.parse::<Level>()?);
            }
            for (name, level) in file.modules {
                config.insert(&name, level.parse::<Level>()?);
            }
            Ok(config)
        }

        /// Renders the configuration as TOML.
        ///
        /// # Errors
        ///
        /// [`ModlogError::TomlSer`] if serialization fails.
        #[cfg_attr(docsrs, doc(cfg(feature = "specfile")))]
        pub fn to_toml_string(&self) -> Result<String, ModlogError> {
            let file = ConfigFile {
                root: self.get(ROOT_NAME).map(|level| level.to_string()),
                modules: self
                    .iter()
                    .filter(|(name, _)| *name != ROOT_NAME)
                    .map(|(name, level)| (name.to_string(), level.to_string()))
                    .collect(),
            };
            Ok(toml::to_string(&file)?)
        }

        /// Reads a configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// [`ModlogError::Io`] if the file cannot be read, see also
        /// [`LoggersConfig::from_toml_str`].
        #[cfg_attr(docsrs, doc(cfg(feature = "specfile")))]
        pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModlogError> {
            Self::from_toml_str(&std::fs::read_to_string(path)?)
        }

        /// Writes the configuration as TOML file, with a short explanatory header.
        ///
        /// # Errors
        ///
        /// [`ModlogError::Io`] if the file cannot be written, see also
        /// [`LoggersConfig::to_toml_string`].
        #[cfg_attr(docsrs, doc(cfg(feature = "specfile")))]
        pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ModlogError> {
            let content = format!("{FILE_HEADER}{}", self.to_toml_string()?);
            std::fs::write(path, content)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod test {
        use crate::{Level, LoggersConfig};

        #[test]
        fn toml_roundtrip() {
            let config: LoggersConfig = "<root>=info;a.b=debug;c=error".parse().unwrap();
            let text = config.to_toml_string().unwrap();
            assert!(text.contains("root = \"INFO\""));
            assert_eq!(LoggersConfig::from_toml_str(&text).unwrap(), config);
        }

        #[test]
        fn toml_unknown_level() {
            assert!(LoggersConfig::from_toml_str("root = \"LOUD\"").is_err());
            let config = LoggersConfig::from_toml_str("[modules]\nfoo = \"warn\"").unwrap();
            assert_eq!(config.get("foo"), Some(Level::Warning));
        }
    }
}

#[cfg(test)]
mod test {
    use super::LoggersConfig;
    use crate::{ConfigError, Level, ROOT_NAME};

    #[test]
    fn parse_valid() {
        let config = LoggersConfig::parse(" a.b = debug ; C=warn, <root>=Error").unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("a.b"), Some(Level::Debug));
        assert_eq!(config.get("c"), Some(Level::Warning));
        assert_eq!(config.get(ROOT_NAME), Some(Level::Error));
    }

    #[test]
    fn parse_single_level_sets_root() {
        let config = LoggersConfig::parse("debug").unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get(ROOT_NAME), Some(Level::Debug));
    }

    #[test]
    fn parse_root_aliases() {
        let config = LoggersConfig::parse("<ROOT>=info").unwrap();
        assert_eq!(config.get("<root>"), Some(Level::Info));
        assert_eq!(config.get(""), Some(Level::Info));
        // a logger that happens to be called "root" is an ordinary logger
        let config = LoggersConfig::parse("root=info").unwrap();
        assert_eq!(config.get("<root>"), None);
    }

    #[test]
    fn parse_empty() {
        assert!(LoggersConfig::parse("").unwrap().is_empty());
        assert!(LoggersConfig::parse(" ;, ").unwrap().is_empty());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            LoggersConfig::parse("a=info;b"),
            Err(ConfigError::MissingEquals("b".to_string()))
        );
        assert_eq!(
            LoggersConfig::parse("a= ;b=info"),
            Err(ConfigError::BlankNameOrLevel("a=".to_string()))
        );
        assert_eq!(
            LoggersConfig::parse("a=info;b=loud"),
            Err(ConfigError::UnknownLevel("loud".to_string()))
        );
    }

    #[test]
    fn render_sorted() {
        let config = LoggersConfig::parse("z=trace;a=warn;<root>=info").unwrap();
        assert_eq!(config.to_string(), "<root>=INFO;a=WARNING;z=TRACE");
        assert_eq!(config.to_string().parse::<LoggersConfig>().unwrap(), config);
    }

    #[test]
    fn env_or_parse_falls_back() {
        let config =
            LoggersConfig::env_or_parse("MODLOG_TEST_SURELY_NOT_SET", "x=debug").unwrap();
        assert_eq!(config.get("x"), Some(Level::Debug));
    }

    #[test]
    fn odd_names_survive_rendering() {
        let mut config = LoggersConfig::new();
        config
            .insert(" padded", Level::Debug)
            .insert("a;b", Level::Trace)
            .insert("x=y,z", Level::Info)
            .insert("back\\slash ", Level::Error)
            .insert("in ner", Level::Warning);
        let text = config.to_string();
        assert_eq!(
            text,
            "\\ padded=DEBUG;a\\;b=TRACE;back\\\\slash\\ =ERROR;in ner=WARNING;x\\=y\\,z=INFO"
        );
        assert_eq!(LoggersConfig::parse(&text).unwrap(), config);
        assert_eq!(config.get("padded"), None);
    }
}
