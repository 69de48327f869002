//! 核心宏定义
//!
//! 提供统一的宏来减少代码重复

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use script_host::impl_default;
///
/// struct Limits {
///     depth: usize,
///     label: String,
/// }
///
/// impl_default!(Limits {
///     depth: 8,
///     label: String::new(),
/// });
///
/// assert_eq!(Limits::default().depth, 8);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 为一组只转发到同一个通用实现的本地函数生成函数项
///
/// 每个生成的函数都满足 `NativeFn` 签名，可以直接注册到 `ScriptApi`。
///
/// ```rust,ignore
/// native_forwarders!(run_codec => {
///     rton_decode: CodecId::RtonDecode,
/// });
/// ```
#[macro_export]
macro_rules! native_forwarders {
    ($target:path => { $($name:ident: $arg:expr),* $(,)? }) => {
        $(
            fn $name<'js>(
                call: &$crate::bindings::Call<'js, '_>,
            ) -> $crate::core::BridgeResult<rquickjs::Value<'js>> {
                $target(call, $arg)
            }
        )*
    };
}
