use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

static ASSET_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

/// Deserialize an embedded json asset by file name
pub fn read_json<T: DeserializeOwned>(file_name: &str) -> Result<T> {
    let file = ASSET_DIR
        .get_file(file_name)
        .ok_or_else(|| Error::Asset(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| Error::Asset(format!("{file_name} is not utf-8")))?;

    Ok(serde_json::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct NameOnly {
        name: String,
    }

    #[test]
    fn test_read_words_asset() {
        let parsed: NameOnly = read_json("words.json").unwrap();
        assert_eq!(parsed.name, "portfolio");
    }

    #[test]
    fn test_read_missing_asset() {
        let result: Result<NameOnly> = read_json("nonexistent.json");
        assert_matches!(result, Err(Error::Asset(name)) if name == "nonexistent.json");
    }

    #[test]
    fn test_read_asset_with_wrong_shape() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrong {
            missing_field: u32,
        }

        let result: Result<Wrong> = read_json("words.json");
        assert_matches!(result, Err(Error::Json(_)));
    }
}
