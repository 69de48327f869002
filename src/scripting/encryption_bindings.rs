//! Encryption bindings: digests, Base64 and XOR.

use rquickjs::Value;
use sha2::Digest;

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::BridgeResult;
use crate::services::crypto::{Md5, Sha224, Sha256, Sha384, Sha512};
use crate::services::CryptoService;

pub fn register(api: &mut ScriptApi) {
    api.register_function("Encryption.MD5.hash", Arity::Exactly(1), hash::<Md5>);
    api.register_function("Encryption.MD5.hash_fs", Arity::Exactly(1), hash_fs::<Md5>);
    api.register_function("Encryption.SHA224.hash", Arity::Exactly(1), hash::<Sha224>);
    api.register_function("Encryption.SHA224.hash_fs", Arity::Exactly(1), hash_fs::<Sha224>);
    api.register_function("Encryption.SHA256.hash", Arity::Exactly(1), hash::<Sha256>);
    api.register_function("Encryption.SHA256.hash_fs", Arity::Exactly(1), hash_fs::<Sha256>);
    api.register_function("Encryption.SHA384.hash", Arity::Exactly(1), hash::<Sha384>);
    api.register_function("Encryption.SHA384.hash_fs", Arity::Exactly(1), hash_fs::<Sha384>);
    api.register_function("Encryption.SHA512.hash", Arity::Exactly(1), hash::<Sha512>);
    api.register_function("Encryption.SHA512.hash_fs", Arity::Exactly(1), hash_fs::<Sha512>);

    api.register_function("Encryption.Base64.encode", Arity::Exactly(1), base64_encode);
    api.register_function("Encryption.Base64.decode", Arity::Exactly(1), base64_decode);
    api.register_function("Encryption.Base64.encode_fs", Arity::Exactly(2), base64_encode_fs);
    api.register_function("Encryption.Base64.decode_fs", Arity::Exactly(2), base64_decode_fs);

    api.register_function("Encryption.XOR.encrypt", Arity::Exactly(2), xor_encrypt);
    api.register_function("Encryption.XOR.encrypt_fs", Arity::Exactly(3), xor_encrypt_fs);
}

fn hash<'js, D: Digest>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let text = call.string(0)?;
    call.string_value(&CryptoService::hash_text::<D>(&text))
}

fn hash_fs<'js, D: Digest>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let path = call.string(0)?;
    let digest = CryptoService::hash_file::<D>(path.as_path())?;
    call.string_value(&digest)
}

fn base64_encode<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let text = call.string(0)?;
    call.string_value(&CryptoService::base64_encode(&text))
}

fn base64_decode<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let text = call.string(0)?;
    let decoded = CryptoService::base64_decode(&text)?;
    call.string_value(&decoded)
}

fn base64_encode_fs<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let source = call.string(0)?;
    let destination = call.string(1)?;
    CryptoService::base64_encode_file(source.as_path(), destination.as_path())?;
    Ok(call.undefined())
}

fn base64_decode_fs<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let source = call.string(0)?;
    let destination = call.string(1)?;
    CryptoService::base64_decode_file(source.as_path(), destination.as_path())?;
    Ok(call.undefined())
}

/// Returns the cipher bytes as lowercase hex so arbitrary bytes survive as a
/// script string.
fn xor_encrypt<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let plain = call.string(0)?;
    let key = call.string(1)?;
    let encrypted = CryptoService::xor_encrypt(&plain, &key)?;
    call.string_value(&encrypted)
}

fn xor_encrypt_fs<'js>(call: &Call<'js, '_>) -> BridgeResult<Value<'js>> {
    let source = call.string(0)?;
    let destination = call.string(1)?;
    let key = call.string(2)?;
    CryptoService::xor_encrypt_file(source.as_path(), destination.as_path(), &key)?;
    Ok(call.undefined())
}
