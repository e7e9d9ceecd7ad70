use crate::model::DocumentAttributes;

#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("front matter must be a key/value mapping")]
    NotAMapping,
}

/// Front matter split off the head of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub attributes: DocumentAttributes,
    /// Byte offset where the body starts (0 when there is no front matter)
    pub body_start: usize,
}

#[derive(Clone, Copy)]
enum Fence {
    Yaml,
    Toml,
}

/// Split a leading `---` (YAML) or `+++` (TOML) block off `text`.
///
/// A block with no closing fence is not front matter; the whole text is body.
/// A closed block that is not a key/value mapping is an error; callers decide
/// whether to read it as body instead.
pub fn split_front_matter(text: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(FrontMatter::default());
    };

    let fence = match first.trim_start_matches('\u{feff}').trim_end() {
        "---" => Fence::Yaml,
        "+++" => Fence::Toml,
        _ => return Ok(FrontMatter::default()),
    };

    let content_start = first.len();
    let mut pos = content_start;
    for line in lines {
        let trimmed = line.trim_end();
        let closes = match fence {
            Fence::Yaml => trimmed == "---" || trimmed == "...",
            Fence::Toml => trimmed == "+++",
        };
        if closes {
            let raw = &text[content_start..pos];
            let attributes = match fence {
                Fence::Yaml => parse_yaml(raw)?,
                Fence::Toml => parse_toml(raw)?,
            };
            return Ok(FrontMatter {
                attributes,
                body_start: pos + line.len(),
            });
        }
        pos += line.len();
    }

    Ok(FrontMatter::default())
}

fn parse_yaml(raw: &str) -> Result<DocumentAttributes, FrontMatterError> {
    let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
    let mut attributes = DocumentAttributes::new();
    match value {
        serde_yaml::Value::Null => {}
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                if let (Some(key), Some(color)) = (key.as_str(), value.as_str()) {
                    attributes.insert(key, color);
                }
            }
        }
        _ => return Err(FrontMatterError::NotAMapping),
    }
    Ok(attributes)
}

fn parse_toml(raw: &str) -> Result<DocumentAttributes, FrontMatterError> {
    let table: toml::Table = toml::from_str(raw)?;
    let mut attributes = DocumentAttributes::new();
    for (key, value) in table {
        if let toml::Value::String(color) = value {
            attributes.insert(key, color);
        }
    }
    Ok(attributes)
}
