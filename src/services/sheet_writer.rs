//! 表格写入服务 - 接收端契约
//!
//! 描述 webhook 另一端"把一条报名写成表格中的一行"的行为：
//! 严格校验入参、固定列顺序、空表时先写表头、返回 `{status, body}`。
//! 测试中的本地 webhook 也用它来生成响应。

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// 表头（列顺序固定）
pub const SHEET_HEADERS: [&str; 6] = [
    "Student Name",
    "Student Number",
    "Parent Phone",
    "Grade Level",
    "Center",
    "Timestamp",
];

/// 必填字段，对应 SHEET_HEADERS 的前五列
const REQUIRED_FIELDS: [&str; 5] = [
    "studentName",
    "studentNumber",
    "parentPhone",
    "gradeLevel",
    "center",
];

/// 接收端的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResponseBody {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u64>,
}

/// 接收端的完整响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetResponse {
    pub status: u16,
    pub body: SheetResponseBody,
}

impl SheetResponse {
    fn success(row_number: u64) -> Self {
        Self {
            status: 200,
            body: SheetResponseBody {
                success: true,
                message: format!("Student registration added successfully to row {}", row_number),
                row_number: Some(row_number),
            },
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: SheetResponseBody {
                success: false,
                message: message.into(),
                row_number: None,
            },
        }
    }
}

/// 从 webhook 响应文本中提取行号，兼容带 `status` 外层和只有 body 两种形式
pub fn parse_row_number(text: &str) -> Option<u64> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reply {
        Wrapped { body: SheetResponseBody },
        Bare(SheetResponseBody),
    }

    match serde_json::from_str::<Reply>(text).ok()? {
        Reply::Wrapped { body } | Reply::Bare(body) => body.row_number,
    }
}

/// 内存中的表格
pub struct SheetWriter {
    rows: Vec<[String; 6]>,
    name_re: Regex,
    number_re: Regex,
    phone_re: Regex,
}

impl SheetWriter {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            name_re: Regex::new(r"^[A-Za-z\s]{2,50}$").expect("常量正则"),
            number_re: Regex::new(r"^[A-Za-z0-9]{3,20}$").expect("常量正则"),
            phone_re: Regex::new(r"^[0-9]{10,12}$").expect("常量正则"),
        }
    }

    /// 表格中的全部行（含表头）
    pub fn rows(&self) -> &[[String; 6]] {
        &self.rows
    }

    /// 数据行数（不含表头）
    pub fn record_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// 处理一条请求，合法时追加一行
    pub fn append(&mut self, request: &Value) -> SheetResponse {
        let Some(data) = request.as_object() else {
            return SheetResponse::error(400, "Invalid request data");
        };

        let mut values: Vec<String> = Vec::with_capacity(REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            match data.get(field).and_then(Value::as_str) {
                Some(v) if !v.trim().is_empty() => values.push(v.trim().to_string()),
                _ => {
                    warn!("缺少字段或字段为空: {}", field);
                    return SheetResponse::error(400, "Missing or invalid required fields");
                }
            }
        }

        let (name, number, phone) = (&values[0], &values[1], &values[2]);
        if !self.phone_re.is_match(phone)
            || !self.number_re.is_match(number)
            || !self.name_re.is_match(name)
        {
            return SheetResponse::error(400, "Missing or invalid required fields");
        }

        if self.rows.is_empty() {
            self.rows.push(SHEET_HEADERS.map(String::from));
        }

        let timestamp = data
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut iter = values.into_iter();
        let mut next = || iter.next().unwrap_or_default();
        let row = [next(), next(), next(), next(), next(), timestamp];
        self.rows.push(row);

        let row_number = self.rows.len() as u64;
        debug!("写入第 {} 行", row_number);
        SheetResponse::success(row_number)
    }
}

impl Default for SheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> Value {
        json!({
            "studentName": "John Smith",
            "studentNumber": "ABC123",
            "parentPhone": "0123456789",
            "gradeLevel": "1st prep",
            "center": "cambridge",
            "timestamp": "2026-10-17T09:30:00.123Z"
        })
    }

    #[test]
    fn test_first_append_writes_header_once() {
        let mut sheet = SheetWriter::new();
        let first = sheet.append(&request());
        let second = sheet.append(&request());

        assert_eq!(first.status, 200);
        assert_eq!(first.body.row_number, Some(2));
        assert_eq!(second.body.row_number, Some(3));
        assert_eq!(sheet.rows()[0], SHEET_HEADERS.map(String::from));
        assert_eq!(sheet.record_count(), 2);
        assert_eq!(sheet.rows()[1][3], "1st prep");
        assert_eq!(sheet.rows()[1][5], "2026-10-17T09:30:00.123Z");
    }

    #[test]
    fn test_rejects_missing_and_malformed_fields() {
        let mut sheet = SheetWriter::new();

        let mut missing = request();
        missing.as_object_mut().unwrap().remove("center");
        assert_eq!(sheet.append(&missing).status, 400);

        let mut blank = request();
        blank["studentName"] = json!("   ");
        assert_eq!(sheet.append(&blank).status, 400);

        let mut not_string = request();
        not_string["parentPhone"] = json!(123456789012u64);
        assert_eq!(sheet.append(&not_string).status, 400);

        let mut short_phone = request();
        short_phone["parentPhone"] = json!("12345");
        let resp = sheet.append(&short_phone);
        assert_eq!(resp.status, 400);
        assert!(!resp.body.success);

        assert_eq!(sheet.append(&json!("text")).status, 400);
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn test_parse_row_number_both_shapes() {
        let wrapped = serde_json::to_string(&SheetResponse::success(7)).unwrap();
        assert_eq!(parse_row_number(&wrapped), Some(7));
        assert_eq!(
            parse_row_number(r#"{"success":true,"message":"ok","rowNumber":4}"#),
            Some(4)
        );
        assert_eq!(parse_row_number(""), None);
        assert_eq!(parse_row_number("Accepted"), None);
    }
}
