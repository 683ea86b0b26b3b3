//! Optional FBX SDK subtree for collision-mesh import in the bake module.

use std::path::PathBuf;

use acoustics_targets::{LinkType, Platform, TargetEnvironment};

use crate::descriptor::{ArtifactKind, DescriptorBuilder, ModuleDescriptor};
use crate::error::{Result, RulesError};
use crate::options::PluginLayout;

/// FBX SDK release bundled with the engine.
pub const FBX_SDK_VERSION: &str = "2018.1.1";

/// Definition enabling the collision import code paths.
pub const COLLISION_DEFINITION: &str = "ENABLE_COLLISION_SUPPORT=1";

/// Definition telling the FBX headers to use the DLL build.
pub const SHARED_DEFINITION: &str = "FBXSDK_SHARED";

const DLL_NAME: &str = "libfbxsdk.dll";

/// Root of the FBX SDK inside the engine's third-party tree.
pub fn fbx_sdk_dir(layout: &PluginLayout) -> PathBuf {
    layout
        .engine_third_party_dir
        .join("FBX")
        .join(FBX_SDK_VERSION)
}

/// Build the FBX subtree for `env`, or `None` on platforms other than Win64.
///
/// Modular builds link the DLL import library and stage the DLL next to the
/// output; monolithic builds link the static library matching the CRT.
pub fn fbx_subtree(env: &TargetEnvironment, layout: &PluginLayout) -> Result<Option<ModuleDescriptor>> {
    if env.platform != Platform::Win64 {
        return Ok(None);
    }
    let compiler = env
        .compiler_version
        .as_deref()
        .ok_or(RulesError::MissingCompilerVersion {
            platform: env.platform,
        })?;

    let sdk_dir = fbx_sdk_dir(layout);
    let lib_dir = sdk_dir
        .join("lib")
        .join(format!("vs{compiler}"))
        .join("x64")
        .join("release");

    let mut builder = DescriptorBuilder::new("FbxSdk");
    builder
        .definition(COLLISION_DEFINITION)
        .public_system_include(sdk_dir.join("include"))
        .public_system_include(sdk_dir.join("include").join("fbxsdk"))
        .library_path(&lib_dir);

    match env.link_type {
        LinkType::Modular => {
            builder
                .artifact(ArtifactKind::FbxSdk, "libfbxsdk.lib")
                .definition(SHARED_DEFINITION)
                .runtime_dependency(
                    PathBuf::from("$(TargetOutputDir)").join(DLL_NAME),
                    Some(lib_dir.join(DLL_NAME)),
                );
        }
        LinkType::Monolithic => {
            let lib = if env.use_static_crt {
                "libfbxsdk-mt.lib"
            } else {
                "libfbxsdk-md.lib"
            };
            builder.artifact(ArtifactKind::FbxSdk, lib);
        }
    }

    tracing::debug!(
        link_type = %env.link_type,
        lib_dir = %lib_dir.display(),
        "added FBX SDK subtree"
    );
    Ok(Some(builder.build()))
}
