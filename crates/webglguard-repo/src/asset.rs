//! Line-oriented reader for Unity's text asset serialization.
//!
//! Unity writes `ProjectSettings/*.asset` as a YAML dialect with `%TAG !u!` directives and
//! `--- !u!129 &1` document headers. Only the pieces the validator needs are read: scalar
//! entries of each document's root object and the `m_QualitySettings` level list.

/// Root key holding the list of quality levels in `QualitySettings.asset`.
pub const QUALITY_LIST_KEY: &str = "m_QualitySettings";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetEntry {
    pub key: String,
    /// Raw scalar text, still quoted if the asset quoted it.
    pub raw: String,
    /// 1-based.
    pub line: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QualityLevel {
    pub name: String,
    pub line: u32,
    pub entries: Vec<AssetEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnityAsset {
    /// Root object names in document order (`PlayerSettings`, `QualitySettings`, ...).
    pub roots: Vec<String>,
    /// Scalar entries directly under a root object.
    pub entries: Vec<AssetEntry>,
    /// Line of the `m_QualitySettings:` key, when present.
    pub quality_list_line: Option<u32>,
    pub quality_levels: Vec<QualityLevel>,
}

enum Block {
    /// Outside any root object.
    Preamble,
    /// Inside a root object whose children sit at `child_indent` (unknown until the first child).
    Root { child_indent: Option<usize> },
    /// Inside the quality level list.
    QualityList {
        child_indent: usize,
        item_indent: Option<usize>,
    },
}

/// Parse the text of a Unity asset.
///
/// Fails on binary-serialized assets and on text with no root object. Never panics.
pub fn parse_unity_asset(text: &str) -> anyhow::Result<UnityAsset> {
    if text.contains('\0') {
        anyhow::bail!("binary asset serialization is not supported (set Asset Serialization to Force Text)");
    }

    let mut asset = UnityAsset::default();
    let mut block = Block::Preamble;
    let mut level: Option<QualityLevel> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let line = raw_line.trim_end();
        let content = line.trim_start();
        if content.is_empty() || content.starts_with('#') || content.starts_with('%') {
            continue;
        }
        if content.starts_with("---") {
            flush_level(&mut asset, &mut level);
            block = Block::Preamble;
            continue;
        }
        let indent = line.len() - content.len();

        if indent == 0 {
            flush_level(&mut asset, &mut level);
            if let Some((key, value)) = split_entry(content)
                && value.is_empty()
            {
                asset.roots.push(key.to_string());
                block = Block::Root { child_indent: None };
            } else {
                block = Block::Preamble;
            }
            continue;
        }

        match &mut block {
            Block::Preamble => {}
            Block::Root { child_indent } => {
                let child = *child_indent.get_or_insert(indent);
                if indent != child {
                    continue;
                }
                let Some((key, value)) = split_entry(content) else {
                    continue;
                };
                if key == QUALITY_LIST_KEY && value.is_empty() {
                    asset.quality_list_line = Some(line_no);
                    block = Block::QualityList {
                        child_indent: child,
                        item_indent: None,
                    };
                } else if !value.is_empty() {
                    asset.entries.push(AssetEntry {
                        key: key.to_string(),
                        raw: value.to_string(),
                        line: line_no,
                    });
                }
            }
            Block::QualityList {
                child_indent,
                item_indent,
            } => {
                let child = *child_indent;
                let dash_rest = if content == "-" {
                    Some("")
                } else {
                    content.strip_prefix("- ")
                };
                let starts_item = match *item_indent {
                    Some(item) => indent == item,
                    None => indent >= child,
                };
                if let Some(rest) = dash_rest
                    && starts_item
                {
                    flush_level(&mut asset, &mut level);
                    *item_indent = Some(indent);
                    let mut next = QualityLevel {
                        line: line_no,
                        ..QualityLevel::default()
                    };
                    if let Some((key, value)) = split_entry(rest) {
                        push_level_entry(&mut next, key, value, line_no);
                    }
                    level = Some(next);
                    continue;
                }
                if indent <= child {
                    // Next root key; the list has ended.
                    flush_level(&mut asset, &mut level);
                    let mut root = Block::Root {
                        child_indent: Some(child),
                    };
                    if indent == child
                        && let Some((key, value)) = split_entry(content)
                        && !value.is_empty()
                    {
                        asset.entries.push(AssetEntry {
                            key: key.to_string(),
                            raw: value.to_string(),
                            line: line_no,
                        });
                    } else if indent < child {
                        root = Block::Preamble;
                    }
                    block = root;
                    continue;
                }
                // Item entries sit two columns past the dash.
                if let (Some(item), Some(current)) = (*item_indent, level.as_mut())
                    && indent == item + 2
                    && let Some((key, value)) = split_entry(content)
                {
                    push_level_entry(current, key, value, line_no);
                }
            }
        }
    }
    flush_level(&mut asset, &mut level);

    if asset.roots.is_empty() {
        anyhow::bail!("no root object found (expected a Unity text asset)");
    }
    Ok(asset)
}

fn push_level_entry(level: &mut QualityLevel, key: &str, value: &str, line: u32) {
    if value.is_empty() {
        return;
    }
    if key == "name" {
        level.name = unquote(value).to_string();
    }
    level.entries.push(AssetEntry {
        key: key.to_string(),
        raw: value.to_string(),
        line,
    });
}

fn flush_level(asset: &mut UnityAsset, level: &mut Option<QualityLevel>) {
    if let Some(done) = level.take()
        && !done.name.is_empty()
    {
        asset.quality_levels.push(done);
    }
}

/// Split `key: value`. Keys are plain identifiers; anything else is not an entry.
fn split_entry(content: &str) -> Option<(&str, &str)> {
    let (key, value) = content.split_once(':')?;
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return None;
    }
    if !(value.is_empty() || value.starts_with(' ')) {
        return None;
    }
    Some((key, value.trim()))
}

fn unquote(v: &str) -> &str {
    let v = v.trim();
    if v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
    {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: &str = "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!129 &1
PlayerSettings:
  m_ObjectHideFlags: 0
  serializedVersion: 26
  productName: Demo World
  m_SplashScreenLogos: []
  m_VirtualRealitySDKs:
    webGLMemorySize: 999
  webGLMemorySize: 64
  webGLMemoryGeometricStep: 0.15
  webGLMemorySize: 256
";

    const QUALITY: &str = "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!47 &1
QualitySettings:
  m_ObjectHideFlags: 0
  serializedVersion: 5
  m_CurrentQuality: 1
  m_QualitySettings:
  - serializedVersion: 3
    name: Low
    pixelLightCount: 0
    shadows: 0
  - serializedVersion: 3
    name: WebGL-Optimized
    pixelLightCount: 1
    excludedTargetPlatforms:
    - Standalone
    antiAliasing: 0
  m_PerPlatformDefaultQuality:
    WebGL: 1
  streamingMipmapsActive: 1
";

    fn keys(asset: &UnityAsset) -> Vec<(&str, &str)> {
        asset
            .entries
            .iter()
            .map(|e| (e.key.as_str(), e.raw.as_str()))
            .collect()
    }

    #[test]
    fn reads_root_scalars_and_skips_nested_maps() {
        let asset = parse_unity_asset(PLAYER).expect("parse");
        assert_eq!(asset.roots, vec!["PlayerSettings"]);
        assert_eq!(
            keys(&asset),
            vec![
                ("m_ObjectHideFlags", "0"),
                ("serializedVersion", "26"),
                ("productName", "Demo World"),
                ("m_SplashScreenLogos", "[]"),
                ("webGLMemorySize", "64"),
                ("webGLMemoryGeometricStep", "0.15"),
                ("webGLMemorySize", "256"),
            ]
        );
        let memory = asset
            .entries
            .iter()
            .find(|e| e.key == "webGLMemorySize")
            .expect("entry");
        assert_eq!(memory.line, 11);
    }

    #[test]
    fn reads_quality_levels_and_resumes_root() {
        let asset = parse_unity_asset(QUALITY).expect("parse");
        let names: Vec<&str> = asset.quality_levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Low", "WebGL-Optimized"]);
        assert_eq!(asset.quality_list_line, Some(8));

        let webgl = &asset.quality_levels[1];
        let entries: Vec<(&str, &str)> = webgl
            .entries
            .iter()
            .map(|e| (e.key.as_str(), e.raw.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("serializedVersion", "3"),
                ("name", "WebGL-Optimized"),
                ("pixelLightCount", "1"),
                ("antiAliasing", "0"),
            ]
        );
        assert!(keys(&asset).contains(&("streamingMipmapsActive", "1")));
        assert!(!keys(&asset).iter().any(|(k, _)| *k == "WebGL"));
    }

    #[test]
    fn accepts_list_items_indented_past_the_key() {
        let text = "--- !u!47 &1
QualitySettings:
  m_QualitySettings:
    - name: 'Very Low'
      shadows: 0
  m_CurrentQuality: 0
";
        let asset = parse_unity_asset(text).expect("parse");
        assert_eq!(asset.quality_levels.len(), 1);
        assert_eq!(asset.quality_levels[0].name, "Very Low");
        assert_eq!(asset.quality_levels[0].entries.len(), 2);
        assert_eq!(keys(&asset), vec![("m_CurrentQuality", "0")]);
    }

    #[test]
    fn rejects_non_assets() {
        assert!(parse_unity_asset("").is_err());
        assert!(parse_unity_asset("just some words").is_err());
        assert!(parse_unity_asset("Player\0Settings:\n").is_err());
    }
}
