//! Proprietary format bindings. Each one forwards a source and destination
//! path to the codec registered for it.

use rquickjs::Value;

use super::api::ScriptApi;
use crate::bindings::{Arity, Call};
use crate::core::BridgeResult;
use crate::services::CodecId;

pub fn register(api: &mut ScriptApi) {
    let table: [(&'static str, crate::bindings::NativeFn); 10] = [
        ("Support.PopCap.RTON.decode_fs", rton_decode),
        ("Support.PopCap.RTON.encode_fs", rton_encode),
        ("Support.PopCap.RSB.unpack_fs", rsb_unpack),
        ("Support.PopCap.RSB.pack_fs", rsb_pack),
        ("Support.PopCap.RSG.unpack_fs", rsg_unpack),
        ("Support.PopCap.RSG.pack_fs", rsg_pack),
        ("Support.PopCap.Animation.decode_fs", animation_decode),
        ("Support.PopCap.Animation.encode_fs", animation_encode),
        ("Support.WWise.SoundBank.decode_fs", sound_bank_decode),
        ("Support.WWise.SoundBank.encode_fs", sound_bank_encode),
    ];
    for (name, call) in table {
        api.register_function(name, Arity::Exactly(2), call);
    }
}

fn run_codec<'js>(call: &Call<'js, '_>, codec: CodecId) -> BridgeResult<Value<'js>> {
    let source = call.string(0)?;
    let destination = call.string(1)?;
    call.services()
        .codecs()
        .run(codec, source.as_path(), destination.as_path())?;
    Ok(call.undefined())
}

crate::native_forwarders!(run_codec => {
    rton_decode: CodecId::RtonDecode,
    rton_encode: CodecId::RtonEncode,
    rsb_unpack: CodecId::RsbUnpack,
    rsb_pack: CodecId::RsbPack,
    rsg_unpack: CodecId::RsgUnpack,
    rsg_pack: CodecId::RsgPack,
    animation_decode: CodecId::AnimationDecode,
    animation_encode: CodecId::AnimationEncode,
    sound_bank_decode: CodecId::SoundBankDecode,
    sound_bank_encode: CodecId::SoundBankEncode,
});
