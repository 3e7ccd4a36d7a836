//! WGSL compile, link and validate for the grass program.
//!
//! Both stages are parsed and validated with naga before a material is
//! created, so broken source falls back to unshaded grass instead of a
//! pipeline that never builds. `#import` lines resolve against the
//! signatures of the Bevy shader functions the stages are allowed to call.

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Binding, EntryPoint, Module, ShaderStage, TypeInner};

use crate::error::MapError;

/// Entry point names the 2D material pipeline looks up.
pub const VERTEX_ENTRY: &str = "vertex";
pub const FRAGMENT_ENTRY: &str = "fragment";

const MESH2D_FUNCTIONS: &str = "bevy_sprite::mesh2d_functions";

/// `(module, item, declaration)` for every importable function.
const IMPORTABLE: &[(&str, &str, &str)] = &[
    (
        MESH2D_FUNCTIONS,
        "get_world_from_local",
        "fn get_world_from_local(instance_index: u32) -> mat4x4<f32> {
    return mat4x4<f32>(
        vec4<f32>(1.0, 0.0, 0.0, 0.0),
        vec4<f32>(0.0, 1.0, 0.0, 0.0),
        vec4<f32>(0.0, 0.0, 1.0, 0.0),
        vec4<f32>(0.0, 0.0, 0.0, 1.0),
    );
}
",
    ),
    (
        MESH2D_FUNCTIONS,
        "mesh2d_position_local_to_world",
        "fn mesh2d_position_local_to_world(world_from_local: mat4x4<f32>, vertex_position: vec4<f32>) -> vec4<f32> {
    return world_from_local * vertex_position;
}
",
    ),
    (
        MESH2D_FUNCTIONS,
        "mesh2d_position_local_to_clip",
        "fn mesh2d_position_local_to_clip(world_from_local: mat4x4<f32>, vertex_position: vec4<f32>) -> vec4<f32> {
    return world_from_local * vertex_position;
}
",
    ),
];

/// Compile both stages and check the fragment inputs are all written by the
/// vertex stage.
pub fn link_program(vertex_source: &str, fragment_source: &str) -> Result<(), MapError> {
    let vertex = compile_stage(vertex_source, ShaderStage::Vertex)?;
    let fragment = compile_stage(fragment_source, ShaderStage::Fragment)?;

    let written = vertex_output_locations(&vertex);
    for location in fragment_input_locations(&fragment) {
        if !written.contains(&location) {
            return Err(MapError::ShaderCompile(format!(
                "fragment input @location({location}) is not written by the vertex stage"
            )));
        }
    }
    Ok(())
}

/// Parse and validate one stage and require its entry point.
pub fn compile_stage(source: &str, stage: ShaderStage) -> Result<Module, MapError> {
    let label = stage_label(stage);
    let resolved = resolve_imports(source)?;

    let module = naga::front::wgsl::parse_str(&resolved).map_err(|e| {
        MapError::ShaderCompile(format!("{label} stage: {}", e.emit_to_string(&resolved)))
    })?;
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| MapError::ShaderCompile(format!("{label} stage: {}", e.as_inner())))?;

    if find_entry(&module, stage).is_none() {
        return Err(MapError::ShaderCompile(format!(
            "{label} stage has no @{label} fn {}",
            entry_name(stage)
        )));
    }
    Ok(module)
}

fn stage_label(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vertex",
        ShaderStage::Fragment => "fragment",
        ShaderStage::Compute => "compute",
    }
}

fn entry_name(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Fragment => FRAGMENT_ENTRY,
        _ => VERTEX_ENTRY,
    }
}

fn find_entry(module: &Module, stage: ShaderStage) -> Option<&EntryPoint> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage && ep.name == entry_name(stage))
}

/// Replace `#import` lines with the declarations they name. Import lines are
/// blanked rather than removed so error line numbers still match the file.
fn resolve_imports(source: &str) -> Result<String, MapError> {
    let mut body = String::with_capacity(source.len());
    let mut declarations = String::new();

    for line in source.lines() {
        let Some(import) = line.trim_start().strip_prefix("#import") else {
            body.push_str(line);
            body.push('\n');
            continue;
        };
        body.push('\n');
        for (module, item) in import_items(import.trim())? {
            let declaration = IMPORTABLE
                .iter()
                .find(|(m, i, _)| *m == module && *i == item)
                .map(|(_, _, decl)| *decl)
                .ok_or_else(|| {
                    MapError::ShaderCompile(format!("unresolved import {module}::{item}"))
                })?;
            if !declarations.contains(declaration) {
                declarations.push_str(declaration);
            }
        }
    }

    body.push_str(&declarations);
    Ok(body)
}

/// `a::b::{x, y}` or `a::b::x` into `(module, item)` pairs.
fn import_items(path: &str) -> Result<Vec<(&str, &str)>, MapError> {
    let malformed = || MapError::ShaderCompile(format!("malformed #import {path}"));

    if let Some((module, rest)) = path.split_once("::{") {
        let items = rest.trim_end().strip_suffix('}').ok_or_else(malformed)?;
        let items: Vec<_> = items
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| (module, item))
            .collect();
        if items.is_empty() {
            return Err(malformed());
        }
        return Ok(items);
    }
    path.rsplit_once("::")
        .map(|pair| vec![pair])
        .ok_or_else(malformed)
}

fn vertex_output_locations(module: &Module) -> Vec<u32> {
    let mut out = Vec::new();
    if let Some(result) = find_entry(module, ShaderStage::Vertex).and_then(|ep| ep.function.result.as_ref()) {
        collect_locations(module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn fragment_input_locations(module: &Module) -> Vec<u32> {
    let mut out = Vec::new();
    if let Some(ep) = find_entry(module, ShaderStage::Fragment) {
        for arg in &ep.function.arguments {
            collect_locations(module, arg.ty, arg.binding.as_ref(), &mut out);
        }
    }
    out
}

fn collect_locations(
    module: &Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(*location),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}
