//! JSON documents returned to callers.

use serde::Serialize;
use serde_json::Value;

use crate::error::SearchError;
use crate::models::EventRecord;

/// Response document for one inbound request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    /// Normal search result, or an error with empty data
    Records {
        code: u16,
        msg: String,
        data: Vec<EventRecord>,
        #[serde(skip_serializing_if = "Option::is_none")]
        debug_info: Option<Value>,
    },

    /// `debug=response`: the first page body, untouched
    RawResponse {
        code: u16,
        msg: String,
        response_length: usize,
        response: String,
    },

    /// `debug=raw`: the first page list, undecoded
    RawData {
        code: u16,
        msg: String,
        total: i64,
        raw_data: Value,
    },
}

impl Envelope {
    pub fn success(keyword: impl Into<String>, data: Vec<EventRecord>) -> Self {
        Envelope::Records {
            code: 200,
            msg: keyword.into(),
            data,
            debug_info: None,
        }
    }

    pub fn failure(error: &SearchError) -> Self {
        Envelope::Records {
            code: error.code(),
            msg: error.public_message().to_string(),
            data: Vec::new(),
            debug_info: error.debug_info(),
        }
    }

    pub fn raw_response(body: String) -> Self {
        Envelope::RawResponse {
            code: 200,
            msg: "原始响应（debug模式）".to_string(),
            response_length: body.len(),
            response: body,
        }
    }

    pub fn raw_data(total: i64, list: Value) -> Self {
        Envelope::RawData {
            code: 200,
            msg: "原始数据（debug模式）".to_string(),
            total,
            raw_data: list,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Envelope::Records { code, .. }
            | Envelope::RawResponse { code, .. }
            | Envelope::RawData { code, .. } => *code,
        }
    }
}
