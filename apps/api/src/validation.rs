//! # リクエストバリデーション
//!
//! `validator` クレートのルール違反を [`ServiceError`] に変換する。
//!
//! バリデーション自体はステートレスで副作用を持たない。`Validate::validate`
//! はインスタンスを必要としないため、プロセス全体で共有する検証器は存在しない。

use dodai_shared::ServiceError;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

/// リクエストを検証し、違反を `validation_error` に変換する
///
/// `details` にはフィールド名 → 違反メッセージ一覧のマップが入る。
pub fn validate<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|errors| ServiceError::validation(extract(&errors)))
}

/// フィールド単位の違反をマップに展開する
fn extract(errors: &ValidationErrors) -> Value {
    let mut out = Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| Value::String(e.to_string()))
            .collect();
        out.insert(field.to_string(), Value::Array(messages));
    }

    Value::Object(out)
}
