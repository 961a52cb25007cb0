use std::{collections::HashMap, fmt, process};

use thiserror::Error;

/// The kind of value a flag accepts on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    Integer,
    Str,
}

/// A resolved flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlagsError {
    #[error("unrecognized option --{0}")]
    UnknownOption(String),
    #[error("option --{0} requires a value")]
    MissingValue(String),
    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
    #[error("invalid value {value:?} for --{option}: not an integer")]
    InvalidInteger { option: String, value: String },
    #[error("help requested")]
    HelpRequested,
}

#[derive(Debug, Clone)]
struct Flag {
    name: String,
    kind: Kind,
    default: Option<Value>,
    help: String,
    supplied: bool,
}

/// A set of declared flags and, after [`FlagSet::parse`], their resolved
/// values.
///
/// Every set carries an implicit boolean `help` flag. Each tool constructs
/// and owns its own set; nothing here is process-global.
pub struct FlagSet {
    program: String,
    flags: Vec<Flag>,
    resolved: HashMap<String, Option<Value>>,
}

impl FlagSet {
    pub fn new(program: &str) -> Self {
        let mut set = Self {
            program: program.to_string(),
            flags: Vec::new(),
            resolved: HashMap::new(),
        };
        set.declare("help", Kind::Boolean, None, "Print Usage");
        set
    }

    /// Registers a flag. Declaring a name twice silently replaces the
    /// earlier declaration, keeping its position in the usage text.
    /// Declaring after a successful parse is not guarded; the new flag has
    /// no resolved value until the next parse.
    ///
    /// The default is taken verbatim and is not checked against `kind`;
    /// only values supplied on the command line go through conversion.
    pub fn declare(
        &mut self,
        name: &str,
        kind: Kind,
        default: Option<Value>,
        help: &str,
    ) {
        let flag = Flag {
            name: name.to_string(),
            kind,
            default,
            help: help.to_string(),
            supplied: false,
        };
        if let Some(existing) = self.flags.iter_mut().find(|flag| flag.name == name) {
            *existing = flag;
        } else {
            self.flags.push(flag);
        }
    }

    pub fn set_string(
        &mut self,
        name: &str,
        default: Option<&str>,
        help: &str,
    ) {
        self.declare(
            name,
            Kind::Str,
            default.map(|value| Value::Str(value.to_string())),
            help,
        );
    }

    pub fn set_integer(
        &mut self,
        name: &str,
        default: Option<i64>,
        help: &str,
    ) {
        self.declare(name, Kind::Integer, default.map(Value::Integer), help);
    }

    pub fn set_boolean(
        &mut self,
        name: &str,
        default: Option<bool>,
        help: &str,
    ) {
        self.declare(name, Kind::Boolean, default.map(Value::Boolean), help);
    }

    /// Parses command-line tokens against the declared flags.
    ///
    /// Accepted forms are `--name` for boolean flags and `--name=value` or
    /// `--name value` for string and integer flags. On success every
    /// declared name (including `help`) has a resolved value: the supplied
    /// one, converted to the flag's kind, or the declared default verbatim.
    /// On any error the resolved state is left untouched.
    pub fn parse<I, S>(
        &mut self,
        args: I,
    ) -> Result<(), FlagsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed: Vec<(String, Kind, Option<String>)> = Vec::new();
        let mut iter = args.into_iter().map(Into::into);
        while let Some(token) = iter.next() {
            let Some(body) = token.strip_prefix("--") else {
                return Err(FlagsError::UnexpectedArgument(token));
            };
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (body.to_string(), None),
            };
            let kind = self
                .flags
                .iter()
                .find(|flag| flag.name == name)
                .ok_or_else(|| FlagsError::UnknownOption(name.clone()))?
                .kind;
            let value = match kind {
                Kind::Boolean => inline,
                Kind::Str | Kind::Integer => match inline {
                    Some(value) => Some(value),
                    None => Some(
                        iter.next()
                            .ok_or_else(|| FlagsError::MissingValue(name.clone()))?,
                    ),
                },
            };
            parsed.push((name, kind, value));
        }

        // an explicit help request wins over everything else
        if parsed.iter().any(|(name, _, _)| name == "help") {
            return Err(FlagsError::HelpRequested);
        }

        let mut resolved = HashMap::new();
        for (name, kind, raw) in parsed {
            let value = match kind {
                // any inline raw value on a boolean flag is ignored
                Kind::Boolean => Value::Boolean(true),
                Kind::Str => Value::Str(raw.unwrap_or_default()),
                Kind::Integer => {
                    let raw = raw.unwrap_or_default();
                    let converted =
                        raw.parse::<i64>()
                            .map_err(|_| FlagsError::InvalidInteger {
                                option: name.clone(),
                                value: raw,
                            })?;
                    Value::Integer(converted)
                }
            };
            resolved.insert(name, Some(value));
        }

        for flag in &mut self.flags {
            flag.supplied = resolved.contains_key(&flag.name);
        }
        for flag in &self.flags {
            if !flag.supplied {
                resolved.insert(flag.name.clone(), flag.default.clone());
            }
        }
        self.resolved = resolved;

        Ok(())
    }

    /// Parses `args`, translating any failure into printed diagnostics and
    /// a non-zero process exit. A help request prints the usage text only.
    pub fn parse_or_exit<I, S>(
        &mut self,
        args: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Err(err) = self.parse(args) {
            if !matches!(err, FlagsError::HelpRequested) {
                eprintln!("error: {err}");
            }
            self.usage();
            process::exit(1);
        }
    }

    /// One line per declared flag, in declaration order. An absent default
    /// prints as `None`.
    pub fn render_usage(&self) -> String {
        let mut usage = format!("{} usage:\n", self.program);
        for flag in &self.flags {
            let default = flag
                .default
                .as_ref()
                .map_or_else(|| "None".to_string(), ToString::to_string);
            usage.push_str(&format!(
                "--{} : {} : default={}\n",
                flag.name, flag.help, default
            ));
        }
        usage
    }

    pub fn usage(&self) {
        print!("{}", self.render_usage());
    }

    /// The resolved value for `name`, or `None` when the flag resolved to
    /// an absent default or has not been parsed yet.
    pub fn value(
        &self,
        name: &str,
    ) -> Option<&Value> {
        self.resolved.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` has an entry in the resolved map, absent default
    /// included.
    pub fn is_resolved(
        &self,
        name: &str,
    ) -> bool {
        self.resolved.contains_key(name)
    }

    pub fn get_str(
        &self,
        name: &str,
    ) -> Option<&str> {
        match self.value(name) {
            Some(Value::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_integer(
        &self,
        name: &str,
    ) -> Option<i64> {
        match self.value(name) {
            Some(Value::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_bool(
        &self,
        name: &str,
    ) -> bool {
        matches!(self.value(name), Some(Value::Boolean(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_boolean_supplied_and_omitted() {
        let mut flags = FlagSet::new("test");
        flags.set_boolean("clean", None, "clean build directory");
        flags.parse(args(&["--clean"])).unwrap();
        assert!(flags.get_bool("clean"));

        let mut flags = FlagSet::new("test");
        flags.set_boolean("clean", None, "clean build directory");
        flags.parse(args(&[])).unwrap();
        assert!(!flags.get_bool("clean"));
        assert!(flags.is_resolved("clean"));
        assert_eq!(flags.value("clean"), None);
    }

    #[test]
    fn test_integer_both_forms() {
        let mut flags = FlagSet::new("test");
        flags.set_integer("jobs", Some(1), "parallel jobs");
        flags.parse(args(&["--jobs=42"])).unwrap();
        assert_eq!(flags.get_integer("jobs"), Some(42));

        let mut flags = FlagSet::new("test");
        flags.set_integer("jobs", Some(1), "parallel jobs");
        flags.parse(args(&["--jobs", "42"])).unwrap();
        assert_eq!(flags.get_integer("jobs"), Some(42));
    }

    #[test]
    fn test_integer_conversion_failure() {
        let mut flags = FlagSet::new("test");
        flags.set_integer("jobs", Some(1), "parallel jobs");
        let err = flags.parse(args(&["--jobs=abc"])).unwrap_err();
        assert_eq!(
            err,
            FlagsError::InvalidInteger {
                option: "jobs".to_string(),
                value: "abc".to_string(),
            }
        );
        // nothing was resolved
        assert!(!flags.is_resolved("jobs"));
    }

    #[test]
    fn test_defaults_flow_through_verbatim() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", None, "project name");
        flags.set_string("type", Some("bin"), "src or bin package");
        // a default is never checked against the declared kind
        flags.declare(
            "port",
            Kind::Integer,
            Some(Value::Str("default".to_string())),
            "listen port",
        );
        flags.parse(args(&[])).unwrap();
        assert_eq!(flags.value("name"), None);
        assert_eq!(flags.get_str("type"), Some("bin"));
        assert_eq!(flags.value("port"), Some(&Value::Str("default".to_string())));
    }

    #[test]
    fn test_usage_is_idempotent_and_ordered() {
        let mut flags = FlagSet::new("gen-spec");
        flags.set_string("name", None, "project name");
        flags.set_string("type", Some("bin"), "src or bin package");
        let first = flags.render_usage();
        assert_eq!(first, flags.render_usage());
        assert_eq!(
            first,
            "gen-spec usage:\n\
             --help : Print Usage : default=None\n\
             --name : project name : default=None\n\
             --type : src or bin package : default=bin\n"
        );
        assert!(!flags.is_resolved("name"));
    }

    #[test]
    fn test_help_short_circuits() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", None, "project name");
        let err = flags.parse(args(&["--name=foo", "--help"])).unwrap_err();
        assert_eq!(err, FlagsError::HelpRequested);
        assert!(!flags.is_resolved("name"));
    }

    #[test]
    fn test_help_beats_conversion_errors() {
        let mut flags = FlagSet::new("test");
        flags.set_integer("jobs", None, "parallel jobs");
        let err = flags.parse(args(&["--jobs=abc", "--help"])).unwrap_err();
        assert_eq!(err, FlagsError::HelpRequested);
    }

    #[test]
    fn test_spec_generator_scenario() {
        let mut flags = FlagSet::new("gen-spec");
        flags.set_string("summary", None, "short summary");
        flags.set_string("name", None, "project name");
        flags.set_string("type", Some("bin"), "src or bin package");
        flags.set_string("buildarch", Some("noarch"), "build architecture");
        flags
            .parse(args(&["--name=foo", "--summary=hello"]))
            .unwrap();
        assert_eq!(flags.get_str("summary"), Some("hello"));
        assert_eq!(flags.get_str("name"), Some("foo"));
        assert_eq!(flags.get_str("type"), Some("bin"));
        assert_eq!(flags.get_str("buildarch"), Some("noarch"));
        assert!(flags.is_resolved("help"));
        assert_eq!(flags.value("help"), None);
    }

    #[test]
    fn test_unknown_option() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", None, "project name");
        let err = flags.parse(args(&["--bogus=1"])).unwrap_err();
        assert_eq!(err, FlagsError::UnknownOption("bogus".to_string()));
        assert!(!flags.is_resolved("name"));
    }

    #[test]
    fn test_non_option_argument() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", None, "project name");
        let err = flags.parse(args(&["foo"])).unwrap_err();
        assert_eq!(err, FlagsError::UnexpectedArgument("foo".to_string()));
    }

    #[test]
    fn test_missing_value_at_end_of_input() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", None, "project name");
        let err = flags.parse(args(&["--name"])).unwrap_err();
        assert_eq!(err, FlagsError::MissingValue("name".to_string()));
    }

    #[test]
    fn test_last_supplied_value_wins() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", None, "project name");
        flags.parse(args(&["--name=foo", "--name=bar"])).unwrap();
        assert_eq!(flags.get_str("name"), Some("bar"));
    }

    #[test]
    fn test_duplicate_declaration_last_wins() {
        let mut flags = FlagSet::new("test");
        flags.set_string("name", Some("first"), "first declaration");
        flags.set_string("name", Some("second"), "second declaration");
        flags.parse(args(&[])).unwrap();
        assert_eq!(flags.get_str("name"), Some("second"));
        // position in the usage text is the original one
        let usage = flags.render_usage();
        assert!(usage.ends_with("--name : second declaration : default=second\n"));
    }

    #[test]
    fn test_boolean_ignores_inline_value() {
        let mut flags = FlagSet::new("test");
        flags.set_boolean("clean", None, "clean build directory");
        flags.parse(args(&["--clean=no"])).unwrap();
        assert!(flags.get_bool("clean"));
    }
}
