//! 表單輸入正規化
//!
//! 貨架指派入口接受兩種格式：逗號分隔字串，或帶 `"value"` 欄位的
//! JSON 物件陣列。兩者都會去除多餘空白與引號後再交給服務層。

use depot_core::{DepotError, Result};
use serde::Deserialize;

/// JSON 包裝格式的單一項目
#[derive(Debug, Deserialize)]
struct ValueEntry {
    value: String,
}

/// 解析訂單號輸入
pub fn parse_order_numbers(raw: &str) -> Result<Vec<String>> {
    let raw = raw.trim();

    let numbers: Vec<String> = if raw.starts_with('[') {
        let entries: Vec<ValueEntry> = serde_json::from_str(raw)
            .map_err(|e| DepotError::InvalidInput(format!("訂單號 JSON 格式錯誤: {e}")))?;
        entries
            .into_iter()
            .map(|entry| clean_token(&entry.value))
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        raw.split(',')
            .map(clean_token)
            .filter(|s| !s.is_empty())
            .collect()
    };

    if numbers.is_empty() {
        return Err(DepotError::InvalidInput("訂單號不可為空".to_string()));
    }
    Ok(numbers)
}

/// 解析貨架代碼輸入（純字串或同樣的 JSON 包裝）
pub fn parse_shelf_code(raw: &str) -> Result<String> {
    let raw = raw.trim();

    let code = if raw.starts_with('[') {
        let entries: Vec<ValueEntry> = serde_json::from_str(raw)
            .map_err(|e| DepotError::InvalidInput(format!("貨架代碼 JSON 格式錯誤: {e}")))?;
        entries
            .into_iter()
            .map(|entry| clean_token(&entry.value))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    } else if raw.starts_with('{') {
        let entry: ValueEntry = serde_json::from_str(raw)
            .map_err(|e| DepotError::InvalidInput(format!("貨架代碼 JSON 格式錯誤: {e}")))?;
        clean_token(&entry.value)
    } else {
        clean_token(raw)
    };

    if code.is_empty() {
        return Err(DepotError::InvalidInput("貨架代碼不可為空".to_string()));
    }
    Ok(code)
}

/// 去除空白與成對引號
fn clean_token(token: &str) -> String {
    token
        .trim()
        .trim_matches('\'')
        .trim_matches('"')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_comma_delimited_list() {
        let numbers = parse_order_numbers(" 100325-0001 , '100325-0002' ,, \"100325-0003\" ")
            .unwrap();
        assert_eq!(
            numbers,
            vec!["100325-0001", "100325-0002", "100325-0003"]
        );
    }

    #[test]
    fn test_json_array_of_value_objects() {
        let raw = r#"[{"value": "100325-0001"}, {"value": " 100325-0002 "}]"#;
        let numbers = parse_order_numbers(raw).unwrap();
        assert_eq!(numbers, vec!["100325-0001", "100325-0002"]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(", ,")]
    #[case("[]")]
    fn test_empty_order_input_rejected(#[case] raw: &str) {
        assert!(parse_order_numbers(raw).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse_order_numbers("[{\"value\": ").is_err());
        assert!(parse_shelf_code("[{\"code\": \"X\"}]").is_err());
    }

    #[rstest]
    #[case("010101H", "010101H")]
    #[case("  '010101H'  ", "010101H")]
    #[case(r#"{"value": "010101H"}"#, "010101H")]
    #[case(r#"[{"value": "010101H"}]"#, "010101H")]
    fn test_shelf_code_forms(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(parse_shelf_code(raw).unwrap(), expected);
    }

    #[test]
    fn test_empty_shelf_code_rejected() {
        assert!(parse_shelf_code("  ").is_err());
        assert!(parse_shelf_code(r#"[{"value": ""}]"#).is_err());
    }
}
