//! 桥接层属性测试
//!
//! 使用proptest验证参数个数检查、文档往返转换与JSON序列化

use std::sync::Arc;

use proptest::prelude::*;
use rquickjs::{Context, Runtime, Value};

use crate::bindings::{invoke, Arity, Binding, Call, Converter, Document, DocumentMap};
use crate::core::{BridgeResult, ErrorKind};
use crate::services::{HostServices, JsonService, MemoryShell};

fn noop<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    Ok(call.undefined())
}

const ARITIES: [&[usize]; 4] = [&[0], &[1], &[2, 3], &[1, 2]];

// 对象键只用标识符：数字键在脚本对象中会被重新排序
fn key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn object(entries: Vec<(String, Document)>) -> Document {
    Document::Object(entries.into_iter().collect::<DocumentMap>())
}

fn text() -> impl Strategy<Value = String> {
    "[ -~\u{e9}\u{4e2d}\u{1f600}]{0,16}"
}

/// 可在脚本值之间往返的文档：整数只用 `Int`，浮点数有限
fn script_document() -> impl Strategy<Value = Document> {
    let leaf = prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        any::<i64>().prop_map(Document::Int),
        (-1.0e9f64..1.0e9).prop_map(Document::Float),
        text().prop_map(Document::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Document::Array),
            prop::collection::vec((key(), inner), 0..6).prop_map(object),
        ]
    })
}

/// 与JSON解析结果同构的文档：非负整数为 `UInt`，负整数为 `Int`，浮点数为 n/4
fn json_document() -> impl Strategy<Value = Document> {
    let leaf = prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        (i64::MIN..0).prop_map(Document::Int),
        any::<u64>().prop_map(Document::UInt),
        (-4_000_000i32..4_000_000).prop_map(|n| Document::Float(n as f64 / 4.0)),
        text().prop_map(Document::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Document::Array),
            prop::collection::vec((key(), inner), 0..6).prop_map(object),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arity_rejects_every_other_count(
        accepted in prop::sample::select(ARITIES.to_vec()),
        count in 0usize..8
    ) {
        let services = HostServices::new(Arc::new(MemoryShell::new()));
        let binding = Binding {
            name: "Test.noop",
            arity: Arity::OneOf(accepted),
            call: noop,
        };
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        let outcome = context.with(|ctx| {
            let args: Vec<Value> = (0..count).map(|_| Value::new_undefined(ctx.clone())).collect();
            invoke(&ctx, &binding, &services, &args).map(|_| ()).map_err(|e| e.kind())
        });
        if accepted.contains(&count) {
            prop_assert_eq!(outcome, Ok(()));
        } else {
            prop_assert_eq!(outcome, Err(ErrorKind::Arity));
        }
    }

    #[test]
    fn document_survives_script_round_trip(document in script_document()) {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        let converter = Converter::default();
        let back = context.with(|ctx| {
            let value = converter.to_script_value(&ctx, &document).unwrap();
            converter.to_document(&value).unwrap()
        });
        // 整数在脚本中为 BigInt，回到文档仍是 Int；有限浮点数保持不变
        prop_assert_eq!(back, document);
    }

    #[test]
    fn json_dump_then_parse_is_identity(
        document in json_document(),
        indent in -1i32..3,
        ascii in any::<bool>()
    ) {
        let text = JsonService::dump(&document, indent, ascii).unwrap();
        if ascii {
            prop_assert!(text.is_ascii());
        }
        prop_assert_eq!(JsonService::parse(&text).unwrap(), document);
    }
}
