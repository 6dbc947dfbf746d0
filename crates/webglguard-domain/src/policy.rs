use crate::model::SettingValue;
use std::fmt;

/// What a rule inspects: a settings key or a named source text.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Setting(String),
    Source(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Setting(key) => f.write_str(key),
            Target::Source(name) => write!(f, "source:{name}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Exact match for ints, bools and text.
    Equals(SettingValue),
    /// `|actual - expected| <= tolerance`.
    Approx { expected: f64, tolerance: f64 },
    /// Numeric bounds; each side is inclusive or strict.
    Range {
        low: f64,
        high: f64,
        low_inclusive: bool,
        high_inclusive: bool,
    },
    /// `true`, or a non-zero integer (the engine serializes flags as 0/1).
    Truthy,
    /// Target text contains the substring.
    Contains(String),
}

impl Predicate {
    pub fn range_inclusive(low: f64, high: f64) -> Self {
        Predicate::Range {
            low,
            high,
            low_inclusive: true,
            high_inclusive: true,
        }
    }

    pub fn range_exclusive(low: f64, high: f64) -> Self {
        Predicate::Range {
            low,
            high,
            low_inclusive: false,
            high_inclusive: false,
        }
    }

    /// Human-readable form of what the predicate accepts.
    pub fn expected_text(&self) -> String {
        match self {
            Predicate::Equals(v) => v.to_string(),
            Predicate::Approx { expected, .. } => expected.to_string(),
            Predicate::Range {
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => format!(
                "{}{}, {}{}",
                if *low_inclusive { '[' } else { '(' },
                low,
                high,
                if *high_inclusive { ']' } else { ')' }
            ),
            Predicate::Truthy => "true".to_string(),
            Predicate::Contains(needle) => format!("contains '{needle}'"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub target: Target,
    pub predicate: Predicate,
}

impl Rule {
    pub fn setting(id: &str, description: &str, key: &str, predicate: Predicate) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            target: Target::Setting(key.to_string()),
            predicate,
        }
    }

    pub fn source(id: &str, description: &str, name: &str, needle: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            target: Target::Source(name.to_string()),
            predicate: Predicate::Contains(needle.to_string()),
        }
    }
}

/// Build target platform. Preset rules only apply to the browser targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Platform {
    WebGl,
    WebGpu,
    Other(String),
}

impl Platform {
    pub fn parse(v: &str) -> Self {
        match v.trim().to_ascii_lowercase().as_str() {
            "webgl" => Platform::WebGl,
            "webgpu" => Platform::WebGpu,
            _ => Platform::Other(v.trim().to_string()),
        }
    }

    pub fn is_webgl(&self) -> bool {
        matches!(self, Platform::WebGl | Platform::WebGpu)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::WebGl => "WebGL",
            Platform::WebGpu => "WebGPU",
            Platform::Other(name) => name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub platform: Platform,
    /// Evaluated in declaration order.
    pub rules: Vec<Rule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detection_is_case_insensitive() {
        assert!(Platform::parse("WebGL").is_webgl());
        assert!(Platform::parse("webgl").is_webgl());
        assert!(Platform::parse("WEBGPU").is_webgl());
        assert!(!Platform::parse("Standalone").is_webgl());
        assert!(!Platform::parse("Android").is_webgl());
        assert_eq!(Platform::parse("Android").as_str(), "Android");
    }

    #[test]
    fn expected_text_shows_bounds() {
        assert_eq!(Predicate::range_inclusive(64.0, 2048.0).expected_text(), "[64, 2048]");
        assert_eq!(Predicate::range_exclusive(64.0, 2048.0).expected_text(), "(64, 2048)");
        let half_open = Predicate::Range {
            low: 32.0,
            high: 4096.0,
            low_inclusive: true,
            high_inclusive: false,
        };
        assert_eq!(half_open.expected_text(), "[32, 4096)");
        assert_eq!(
            Predicate::Approx {
                expected: 0.2,
                tolerance: 0.01
            }
            .expected_text(),
            "0.2"
        );
        assert_eq!(
            Predicate::Contains("Gzip".into()).expected_text(),
            "contains 'Gzip'"
        );
    }

    #[test]
    fn target_display_prefixes_sources() {
        assert_eq!(Target::Setting("webGLMemorySize".into()).to_string(), "webGLMemorySize");
        assert_eq!(Target::Source("builder".into()).to_string(), "source:builder");
    }
}
