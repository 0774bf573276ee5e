use secrecy::SecretString;
use serde::Deserialize;

/// Environment variables resolved on every hook invocation.
pub const ENV_LICENSE_KEY: &str = "NEW_RELIC_LICENSE_KEY";
pub const ENV_APP_NAME: &str = "NEW_RELIC_APP_NAME";
pub const ENV_RECORD_CONTENT: &str = "NEW_RELIC_AI_MONITORING_RECORD_CONTENT_ENABLED";

/// Parameters the host passes alongside the `"newrelic"` callback
/// registration in its own configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct NewRelicParams {
    /// `true` disables message-content recording regardless of the
    /// environment toggle.
    #[serde(default)]
    pub turn_off_message_logging: Option<bool>,
}

/// Whether message `content` fields are included in emitted events.
///
/// Pure function of configuration, applied uniformly to every message
/// regardless of role. Content is recorded only when the environment toggle
/// enables it and the host parameter does not turn it off; either source
/// disabling it is sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactionPolicy {
    include_content: bool,
}

impl RedactionPolicy {
    pub fn resolve(env_flag: Option<&str>, turn_off_message_logging: Option<bool>) -> Self {
        let enabled_by_env = env_flag.map(parse_bool_flag).unwrap_or(false);
        let turned_off = turn_off_message_logging.unwrap_or(false);
        Self {
            include_content: enabled_by_env && !turned_off,
        }
    }

    pub fn include_content(&self) -> bool {
        self.include_content
    }
}

/// Agent settings resolved for a single hook invocation.
///
/// `None` from the resolvers means required configuration is absent and the
/// hook must be a silent no-op. Settings are never cached across calls so
/// deferred or dynamic configuration is honored.
#[derive(Debug)]
pub struct AgentSettings {
    pub license_key: SecretString,
    pub app_name: String,
    pub redaction: RedactionPolicy,
}

impl AgentSettings {
    /// Resolve from the process environment.
    pub fn from_env(turn_off_message_logging: Option<bool>) -> Option<Self> {
        Self::resolve(|key| std::env::var(key).ok(), turn_off_message_logging)
    }

    /// Resolve from an arbitrary lookup. Tests inject maps here instead of
    /// mutating process-global environment state.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        turn_off_message_logging: Option<bool>,
    ) -> Option<Self> {
        let license_key = non_empty(lookup(ENV_LICENSE_KEY))?;
        let app_name = non_empty(lookup(ENV_APP_NAME))?;
        let redaction = RedactionPolicy::resolve(
            lookup(ENV_RECORD_CONTENT).as_deref(),
            turn_off_message_logging,
        );
        Some(Self {
            license_key: SecretString::from(license_key),
            app_name,
            redaction,
        })
    }
}

/// `"true"`, case-insensitive, is the only enabling value.
fn parse_bool_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
