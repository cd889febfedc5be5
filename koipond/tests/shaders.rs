//! Shader compilation tests (using naga)
//!
//! Parses and validates every WGSL file the renderer embeds, so a typo
//! fails here instead of at pipeline creation on someone's GPU.

const SHADERS: &[(&str, &str)] = &[
    ("mesh", include_str!("../shaders/mesh.wgsl")),
    ("occlusion", include_str!("../shaders/occlusion.wgsl")),
    ("godrays", include_str!("../shaders/godrays.wgsl")),
    ("composite", include_str!("../shaders/composite.wgsl")),
];

/// Helper to compile a WGSL shader and validate it using naga
fn compile_and_validate_shader(name: &str, source: &str) -> Result<(), String> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| format!("WGSL parse error in {name}: {e:?}"))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("Validation error in {name}: {e:?}"))?;

    Ok(())
}

#[test]
fn test_compile_all_shaders() {
    let mut errors = Vec::new();
    for (name, source) in SHADERS {
        if let Err(e) = compile_and_validate_shader(name, source) {
            errors.push(e);
        }
    }
    if !errors.is_empty() {
        panic!(
            "Shader compilation failed for {} shaders:\n{}",
            errors.len(),
            errors.join("\n")
        );
    }
}

#[test]
fn test_shaders_use_shared_entry_points() {
    for (name, source) in SHADERS {
        assert!(source.contains("fn vs"), "{name} is missing the vs entry");
        assert!(source.contains("fn fs"), "{name} is missing the fs entry");
    }
}
