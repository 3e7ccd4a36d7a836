//! Fixed asset set for the tile map and the handles loaded from it.

use crate::backend::AssetLoader;
use crate::error::MapError;

/// Name of the vec2 uniform that receives the viewport size in screen pixels.
pub const RESOLUTION_UNIFORM: &str = "resolution";

/// One texture the map draws with. Sand has no texture of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Grass,
    Water,
    Forest,
    RockBig,
    RockMedium,
    Flower1,
    Flower2,
    Bush1,
}

impl TextureSlot {
    pub const COUNT: usize = 8;

    pub const ALL: [TextureSlot; Self::COUNT] = [
        TextureSlot::Grass,
        TextureSlot::Water,
        TextureSlot::Forest,
        TextureSlot::RockBig,
        TextureSlot::RockMedium,
        TextureSlot::Flower1,
        TextureSlot::Flower2,
        TextureSlot::Bush1,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Paths (relative to the asset root) of everything the map loads.
#[derive(Debug, Clone, Copy)]
pub struct AssetManifest {
    pub textures: [(TextureSlot, &'static str); TextureSlot::COUNT],
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
}

impl AssetManifest {
    pub fn texture_path(&self, slot: TextureSlot) -> &'static str {
        self.textures
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, path)| *path)
            .unwrap_or_default()
    }
}

pub const ASSET_MANIFEST: AssetManifest = AssetManifest {
    textures: [
        (TextureSlot::Grass, "textures/grass.png"),
        (TextureSlot::Water, "textures/water.png"),
        (TextureSlot::Forest, "textures/forest.png"),
        (TextureSlot::RockBig, "textures/rock_big.png"),
        (TextureSlot::RockMedium, "textures/rock_medium.png"),
        (TextureSlot::Flower1, "textures/flower1.png"),
        (TextureSlot::Flower2, "textures/flower2.png"),
        (TextureSlot::Bush1, "textures/bush1.png"),
    ],
    vertex_shader: "shaders/grass_vertex.wgsl",
    fragment_shader: "shaders/grass_fragment.wgsl",
};

/// Every texture in the manifest, indexed by slot. Dropping the set drops
/// each handle.
pub struct TextureSet<T> {
    textures: Vec<T>,
}

impl<T> TextureSet<T> {
    /// Load all textures in slot order. Fails on the first missing one.
    pub fn load<L>(loader: &mut L, manifest: &AssetManifest) -> Result<Self, MapError>
    where
        L: AssetLoader<Texture = T> + ?Sized,
    {
        let mut textures = Vec::with_capacity(TextureSlot::COUNT);
        for slot in TextureSlot::ALL {
            textures.push(loader.load_texture(manifest.texture_path(slot))?);
        }
        Ok(Self { textures })
    }

    pub fn get(&self, slot: TextureSlot) -> &T {
        &self.textures[slot.index()]
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Result of building the grass program from readable sources.
#[derive(Debug)]
pub enum GrassProgram<P> {
    Compiled(P),
    /// Compile or link failed; grass is drawn without a shader.
    Disabled(MapError),
}

/// Read both grass shader stages and build the program.
///
/// Missing source files are an error. A compile or link failure is not:
/// it comes back as `GrassProgram::Disabled` for the caller to report.
pub fn load_grass_program<L>(
    loader: &mut L,
    manifest: &AssetManifest,
) -> Result<GrassProgram<L::Program>, MapError>
where
    L: AssetLoader + ?Sized,
{
    let vertex_source = loader.read_shader_source(manifest.vertex_shader)?;
    let fragment_source = loader.read_shader_source(manifest.fragment_shader)?;
    Ok(match loader.compile_program(&vertex_source, &fragment_source) {
        Ok(program) => GrassProgram::Compiled(program),
        Err(e) => GrassProgram::Disabled(e),
    })
}
