use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use script_host::bindings::Document;
use script_host::config::HostConfig;
use script_host::core::KernelError;
use script_host::scripting::ScriptingRuntime;
use script_host::services::{CodecId, CodecRegistry, HostServices, MemoryShell};

fn runtime_with(shell: Arc<MemoryShell>) -> Result<ScriptingRuntime> {
    Ok(ScriptingRuntime::new(&HostConfig::default(), shell)?)
}

fn runtime() -> Result<ScriptingRuntime> {
    runtime_with(Arc::new(MemoryShell::new()))
}

/// 以脚本字符串字面量形式嵌入路径
fn js_path(path: &Path) -> String {
    serde_json::to_string(&path.to_string_lossy()).unwrap()
}

/// 运行会抛异常的表达式，返回 `name: message`
fn thrown(runtime: &ScriptingRuntime, expression: &str) -> Result<String> {
    let script = format!(
        "(() => {{ try {{ {}; return 'no error'; }} catch (e) {{ return e.name + ': ' + e.message; }} }})()",
        expression
    );
    match runtime.evaluate(&script)? {
        Document::String(text) => Ok(text),
        other => anyhow::bail!("unexpected result {:?}", other),
    }
}

fn text(runtime: &ScriptingRuntime, expression: &str) -> Result<String> {
    match runtime.evaluate(expression)? {
        Document::String(text) => Ok(text),
        other => anyhow::bail!("unexpected result {:?}", other),
    }
}

#[test]
fn test_arity_error_is_type_error() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        thrown(&runtime, "Kernel.Encryption.SHA256.hash()")?,
        "TypeError: argument expected 1 but received 0"
    );
    assert_eq!(
        thrown(&runtime, "Kernel.Compression.Zlib.compress_fs('a')")?,
        "TypeError: argument expected 2 or 3 but received 1"
    );
    assert_eq!(runtime.services().ledger().outstanding(), 0);
    Ok(())
}

#[test]
fn test_type_mismatch_names_position() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        thrown(&runtime, "Kernel.Encryption.XOR.encrypt('abc', 7)")?,
        "TypeError: argument 2 expected string but received integer"
    );
    assert_eq!(
        thrown(&runtime, "Kernel.JSON.serialize({}, 1, 'yes')")?,
        "TypeError: argument 3 expected boolean but received string"
    );
    assert_eq!(runtime.services().ledger().outstanding(), 0);
    Ok(())
}

#[test]
fn test_compression_level_checked_before_io() -> Result<()> {
    let runtime = runtime()?;
    let dir = tempfile::tempdir()?;
    let missing = js_path(&dir.path().join("missing.bin"));
    let output = js_path(&dir.path().join("out.bin"));

    for level in [-1, 10] {
        let message = thrown(
            &runtime,
            &format!("Kernel.Compression.Zlib.compress_fs({}, {}, {})", missing, output, level),
        )?;
        assert_eq!(
            message,
            format!("RangeError: compression level must be between 0 and 9, received {}", level)
        );
    }

    // 合法级别才会去读取源文件
    let message = thrown(
        &runtime,
        &format!("Kernel.Compression.Gzip.compress_fs({}, {}, 9)", missing, output),
    )?;
    assert!(message.starts_with("Error: "), "{}", message);
    assert!(message.contains("missing.bin"), "{}", message);
    Ok(())
}

#[test]
fn test_compression_round_trip() -> Result<()> {
    let runtime = runtime()?;
    let dir = tempfile::tempdir()?;
    let plain = dir.path().join("plain.txt");
    let packed = dir.path().join("plain.gz");
    let unpacked = dir.path().join("unpacked.txt");
    std::fs::write(&plain, "hello hello hello hello")?;

    runtime.run_script(&format!(
        "Kernel.Compression.Gzip.compress_fs({}, {});
         Kernel.Compression.Gzip.uncompress_fs({}, {});",
        js_path(&plain),
        js_path(&packed),
        js_path(&packed),
        js_path(&unpacked)
    ))?;
    assert_eq!(std::fs::read_to_string(&unpacked)?, "hello hello hello hello");
    assert_eq!(&std::fs::read(&packed)?[..2], &[0x1f, 0x8b]);
    Ok(())
}

#[test]
fn test_json_end_to_end() -> Result<()> {
    let runtime = runtime()?;
    let output = text(
        &runtime,
        r#"Kernel.JSON.serialize(Kernel.JSON.deserialize('{"a":1,"b":[true,null]}'), 1, false)"#,
    )?;
    assert_eq!(output, "{\n\t\"a\": 1,\n\t\"b\": [\n\t\ttrue,\n\t\tnull\n\t]\n}");

    assert_eq!(
        text(&runtime, "typeof Kernel.JSON.deserialize('{\"n\": 5}').n")?,
        "bigint"
    );
    assert_eq!(
        text(&runtime, "Kernel.JSON.serialize({ s: '\\u00e9' }, -1, true)")?,
        "{\"s\":\"\\u00e9\"}"
    );
    Ok(())
}

#[test]
fn test_json_files() -> Result<()> {
    let runtime = runtime()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("data.json");

    runtime.run_script(&format!(
        "Kernel.JSON.serialize_fs({}, {{ name: 'host', list: [1, 2.5] }}, -1, false)",
        js_path(&path)
    ))?;
    assert_eq!(std::fs::read_to_string(&path)?, r#"{"name":"host","list":[1.0,2.5]}"#);

    let document = runtime.evaluate(&format!("Kernel.JSON.deserialize_fs({})", js_path(&path)))?;
    assert_eq!(document.get("name").and_then(Document::as_str), Some("host"));
    Ok(())
}

#[test]
fn test_bigint_outside_i64_is_range_error() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        text(&runtime, "Kernel.JSON.serialize(2n ** 63n - 1n, -1, false)")?,
        "9223372036854775807"
    );
    for big in ["2n ** 63n", "-(2n ** 63n) - 1n", "2n ** 64n + 5n"] {
        let message = thrown(&runtime, &format!("Kernel.JSON.serialize({}, -1, false)", big))?;
        assert!(message.starts_with("RangeError: "), "{}: {}", big, message);
    }
    Ok(())
}

#[test]
fn test_error_objects_serialize_as_objects() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        text(
            &runtime,
            "Kernel.JSON.serialize({ e: Object.assign(new Error('x'), { code: 'E1' }) }, -1, false)"
        )?,
        r#"{"e":{"code":"E1"}}"#
    );
    Ok(())
}

#[test]
fn test_literal_arrays_survive_deserialize() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        text(
            &runtime,
            r#"Kernel.JSON.deserialize(Kernel.JSON.serialize(["a", "b", "c"], -1, false)).join(",")"#
        )?,
        "a,b,c"
    );
    assert_eq!(
        text(&runtime, "Kernel.JSON.serialize([1, 2, 3], -1, false)")?,
        "[1.0,2.0,3.0]"
    );
    Ok(())
}

#[test]
fn test_same_path_file_functions() -> Result<()> {
    let runtime = runtime()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.txt");
    let data = "same path ".repeat(150);
    std::fs::write(&path, &data)?;
    let p = js_path(&path);

    runtime.run_script(&format!(
        "Kernel.Compression.Zlib.compress_fs({p}, {p}, 6);
         Kernel.Compression.Zlib.uncompress_fs({p}, {p});
         Kernel.Encryption.Base64.encode_fs({p}, {p});
         Kernel.Encryption.Base64.decode_fs({p}, {p});
         Kernel.Encryption.XOR.encrypt_fs({p}, {p}, 'key');
         Kernel.Encryption.XOR.encrypt_fs({p}, {p}, 'key');",
        p = p
    ))?;
    assert_eq!(std::fs::read_to_string(&path)?, data);
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_unsupported_value_is_type_error() -> Result<()> {
    let runtime = runtime()?;
    let message = thrown(&runtime, "Kernel.JSON.serialize({ f: () => 1 }, -1, false)")?;
    assert!(message.starts_with("TypeError: "), "{}", message);
    let message = thrown(
        &runtime,
        "const o = {}; o.self = o; Kernel.JSON.serialize(o, -1, false)",
    )?;
    assert!(message.starts_with("RangeError: "), "{}", message);
    Ok(())
}

#[test]
fn test_hashes_and_encodings() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        text(&runtime, "Kernel.Encryption.SHA256.hash('abc')")?,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        text(&runtime, "Kernel.Encryption.MD5.hash('abc')")?,
        "900150983cd24fb0d6963f7d28e17f72"
    );
    assert_eq!(text(&runtime, "Kernel.Encryption.Base64.encode('hello')")?, "aGVsbG8=");
    assert_eq!(text(&runtime, "Kernel.Encryption.Base64.decode('aGVsbG8=')")?, "hello");
    assert_eq!(text(&runtime, "Kernel.Encryption.XOR.encrypt('abc', 'k')")?, "0a0908");
    assert_eq!(
        thrown(&runtime, "Kernel.Encryption.XOR.encrypt('abc', '')")?,
        "Error: invalid input: xor key must not be empty"
    );
    Ok(())
}

#[test]
fn test_file_hash_matches_text_hash() -> Result<()> {
    let runtime = runtime()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("abc.txt");
    std::fs::write(&path, "abc")?;
    assert_eq!(
        text(&runtime, &format!("Kernel.Encryption.SHA256.hash_fs({})", js_path(&path)))?,
        text(&runtime, "Kernel.Encryption.SHA256.hash('abc')")?
    );
    Ok(())
}

#[test]
fn test_filesystem_bindings() -> Result<()> {
    let runtime = runtime()?;
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("sub");
    let file = sub.join("note.txt");

    runtime.run_script(&format!(
        "Kernel.FileSystem.create_directory({});
         Kernel.FileSystem.write_file({}, 'written from script');",
        js_path(&sub),
        js_path(&file)
    ))?;
    assert_eq!(std::fs::read_to_string(&file)?, "written from script");
    assert_eq!(
        text(&runtime, &format!("Kernel.FileSystem.read_file({})", js_path(&file)))?,
        "written from script"
    );
    assert_eq!(
        runtime.evaluate(&format!(
            "Kernel.FileSystem.is_file({}) && Kernel.FileSystem.is_directory({})",
            js_path(&file),
            js_path(&sub)
        ))?,
        Document::Bool(true)
    );

    let listing =
        runtime.evaluate(&format!("Kernel.FileSystem.read_directory({})", js_path(&sub)))?;
    let entries = listing.as_array().unwrap_or_default();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].as_str().unwrap_or_default().ends_with("note.txt"));
    assert_eq!(runtime.services().ledger().outstanding(), 0);
    Ok(())
}

#[test]
fn test_console_print_and_readline() -> Result<()> {
    let shell = Arc::new(MemoryShell::with_input(["first line"]));
    let runtime = runtime_with(shell.clone())?;
    runtime.run_script(
        "Kernel.Console.print('answer: '); Kernel.Console.print(Kernel.Console.readline(), 2);",
    )?;
    assert_eq!(shell.output(), "answer: first line");
    assert_eq!(shell.printed()[1].1.code(), 2);

    let message = thrown(&runtime, "Kernel.Console.readline()")?;
    assert!(message.starts_with("Error: "), "{}", message);
    Ok(())
}

#[test]
fn test_evaluate_nested_script() -> Result<()> {
    let runtime = runtime()?;
    assert_eq!(
        runtime.evaluate("Kernel.JavaScript.evaluate('6 * 7')")?,
        Document::Float(42.0)
    );
    assert_eq!(
        thrown(&runtime, "Kernel.JavaScript.evaluate('null.x')")?
            .split(':')
            .next(),
        Some("TypeError")
    );
    Ok(())
}

#[test]
fn test_codec_registry_dispatch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("in.rton");
    let destination = dir.path().join("out.json");
    std::fs::write(&source, "payload")?;

    let codecs = CodecRegistry::new().with(
        CodecId::RtonDecode,
        |source: &Path, destination: &Path| -> Result<(), KernelError> {
            let data = std::fs::read(source).map_err(|e| KernelError::io(source, e))?;
            std::fs::write(destination, data).map_err(|e| KernelError::io(destination, e))
        },
    );
    let services = HostServices::new(Arc::new(MemoryShell::new())).with_codecs(codecs);
    let runtime = ScriptingRuntime::with_services(Arc::new(services), "Kernel")?;

    runtime.run_script(&format!(
        "Kernel.Support.PopCap.RTON.decode_fs({}, {})",
        js_path(&source),
        js_path(&destination)
    ))?;
    assert_eq!(std::fs::read_to_string(&destination)?, "payload");

    assert_eq!(
        thrown(&runtime, "Kernel.Support.PopCap.RSB.unpack_fs('a', 'b')")?,
        "Error: codec 'PopCap.RSB.unpack' is not available"
    );
    Ok(())
}

#[test]
fn test_uncaught_exception_reaches_host() -> Result<()> {
    let runtime = runtime()?;
    let error = runtime
        .run_script("Kernel.Encryption.Base64.decode(1)")
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Uncaught exception: TypeError: argument 1 expected string but received integer"
    );
    Ok(())
}

#[test]
fn test_shared_ledger_settles_after_threads() -> Result<()> {
    let services = Arc::new(HostServices::new(Arc::new(MemoryShell::new())));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let services = services.clone();
            std::thread::spawn(move || -> Result<()> {
                let runtime = ScriptingRuntime::with_services(services, "Kernel")?;
                for _ in 0..25 {
                    text(&runtime, "Kernel.Encryption.XOR.encrypt('abc', 'k')")?;
                }
                Ok(())
            })
        })
        .collect();
    for worker in workers {
        worker.join().map_err(|_| anyhow::anyhow!("worker panicked"))??;
    }
    assert_eq!(services.ledger().acquired(), 4 * 25 * 2);
    assert_eq!(services.ledger().outstanding(), 0);
    Ok(())
}
